use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Behaviour shared by every stored record type.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;

    fn created_at(&self) -> DateTime<Utc>;

    /// Terms of the full-text index over the record's searchable fields.
    fn index_terms(&self) -> Vec<String>;
}
