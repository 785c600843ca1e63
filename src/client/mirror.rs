use uuid::Uuid;

use crate::entities::record::Record;

/// Local copy of one collection, in the order records arrived.
#[derive(Debug, Clone)]
pub struct Mirror<T: Record> {
    records: Vec<T>,
}

impl<T: Record> Default for Mirror<T> {
    fn default() -> Self {
        Mirror { records: Vec::new() }
    }
}

impl<T: Record> Mirror<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, records: Vec<T>) {
        self.records = records;
    }

    /// Replaces the record with the same id in place, or appends it.
    pub fn upsert_one(&mut self, record: T) {
        match self.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    pub fn remove_one(&mut self, id: &Uuid) -> Option<T> {
        let index = self.records.iter().position(|r| &r.id() == id)?;
        Some(self.records.remove(index))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn get(&self, id: &Uuid) -> Option<&T> {
        self.records.iter().find(|r| &r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::skill::Skill;
    use chrono::Utc;

    fn skill(name: &str) -> Skill {
        let now = Utc::now();
        Skill {
            id: Uuid::new_v4(),
            name: name.into(),
            level: 3,
            category: "Backend".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut mirror = Mirror::new();
        let first = skill("Rust");
        let second = skill("Go");
        mirror.replace_all(vec![first.clone(), second.clone()]);

        let renamed = Skill { name: "Rust 2024".into(), ..first.clone() };
        mirror.upsert_one(renamed);

        assert_eq!(mirror.len(), 2);
        assert_eq!(mirror.as_slice()[0].name, "Rust 2024");
        assert_eq!(mirror.as_slice()[1], second);
    }

    #[test]
    fn upsert_appends_unknown_record() {
        let mut mirror = Mirror::new();
        mirror.upsert_one(skill("Rust"));
        mirror.upsert_one(skill("Go"));

        let names: Vec<_> = mirror.as_slice().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Rust", "Go"]);
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut mirror = Mirror::new();
        let kept = skill("Rust");
        mirror.upsert_one(kept.clone());

        assert!(mirror.remove_one(&Uuid::new_v4()).is_none());
        assert_eq!(mirror.remove_one(&kept.id), Some(kept));
        assert!(mirror.is_empty());
    }
}
