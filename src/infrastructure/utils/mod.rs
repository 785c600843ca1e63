pub mod clock;
pub mod text_search;
pub mod valid_uuid;
