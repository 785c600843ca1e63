use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxSkillRepo {
    pub pool: PgPool,
}

/// Columns read back into the record structs; `search_terms` stays in the table.
pub(crate) const PROJECT_COLUMNS: &str =
    "id, title, description, technologies, key_points, created_at, updated_at";

pub(crate) const SKILL_COLUMNS: &str = "id, name, level, category, created_at, updated_at";
