/// Database URL that selects the in-process store instead of PostgreSQL.
pub const MEMORY_DATABASE_URL: &str = "memory://";
