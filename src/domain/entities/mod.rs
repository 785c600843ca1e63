pub mod option_fields;
pub mod project;
pub mod record;
pub mod skill;
pub mod validation;
