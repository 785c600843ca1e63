//! In-process store backend, selected with the `memory://` database URL.
//!
//! Each collection is a `DashMap` keyed by record id. Per-operation
//! atomicity comes from the map's shard locks; nothing is held across an
//! `.await`.

use std::{cmp::Reverse, sync::Arc};

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use uuid::Uuid;

use crate::{
    entities::{
        project::{Project, ProjectChanges, ProjectInsert},
        record::Record,
        skill::{Skill, SkillChanges, SkillInsert},
    },
    errors::AppError,
    repositories::{project::ProjectRepository, skill::SkillRepository},
    utils::text_search::{index_terms, match_score},
};

pub struct MemoryCollection<T: Record> {
    records: DashMap<Uuid, T>,
}

impl<T: Record> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self { records: DashMap::new() }
    }
}

impl<T: Record> MemoryCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.records.len() as u64
    }

    /// Snapshot ordered by creation time, ids breaking ties.
    pub fn list_all(&self) -> Vec<T> {
        let mut records: Vec<T> = self.records.iter().map(|r| r.value().clone()).collect();
        records.sort_by_key(|r| (r.created_at(), r.id()));
        records
    }

    /// Stores the record built for a fresh id that no live record holds.
    pub fn insert_with<F>(&self, build: F) -> T
    where
        F: FnOnce(Uuid) -> T,
    {
        loop {
            if let Entry::Vacant(slot) = self.records.entry(Uuid::new_v4()) {
                let record = build(*slot.key());
                slot.insert(record.clone());
                return record;
            }
        }
    }

    pub fn find(&self, id: &Uuid) -> Option<T> {
        self.records.get(id).map(|r| r.value().clone())
    }

    /// Applies `f` under the entry lock and returns the modified record.
    pub fn modify<F>(&self, id: &Uuid, f: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        self.records.get_mut(id).map(|mut record| {
            f(record.value_mut());
            record.value().clone()
        })
    }

    pub fn remove(&self, id: &Uuid) -> u64 {
        self.records.remove(id).map_or(0, |_| 1)
    }

    /// Records sharing at least one term with `query`, best matches first.
    pub fn search(&self, query: &str) -> Vec<T> {
        let query_terms = index_terms([query]);
        if query_terms.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(usize, T)> = self
            .records
            .iter()
            .filter_map(|r| {
                let score = match_score(&r.value().index_terms(), &query_terms);
                (score > 0).then(|| (score, r.value().clone()))
            })
            .collect();

        hits.sort_by_key(|(score, r)| (Reverse(*score), r.created_at(), r.id()));
        hits.into_iter().map(|(_, r)| r).collect()
    }
}

#[derive(Clone, Default)]
pub struct MemoryProjectRepo {
    collection: Arc<MemoryCollection<Project>>,
}

impl MemoryProjectRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for MemoryProjectRepo {
    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.collection.count())
    }

    async fn list_all(&self) -> Result<Vec<Project>, AppError> {
        Ok(self.collection.list_all())
    }

    async fn insert(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        Ok(self.collection.insert_with(|id| project.clone().into_project(id)))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Project, AppError> {
        self.collection
            .find(id)
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn update(&self, id: &Uuid, changes: &ProjectChanges) -> Result<Project, AppError> {
        self.collection
            .modify(id, |project| project.apply(changes.clone()))
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<u64, AppError> {
        Ok(self.collection.remove(id))
    }

    async fn search(&self, query: &str) -> Result<Vec<Project>, AppError> {
        Ok(self.collection.search(query))
    }
}

#[derive(Clone, Default)]
pub struct MemorySkillRepo {
    collection: Arc<MemoryCollection<Skill>>,
}

impl MemorySkillRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SkillRepository for MemorySkillRepo {
    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.collection.count())
    }

    async fn list_all(&self) -> Result<Vec<Skill>, AppError> {
        Ok(self.collection.list_all())
    }

    async fn insert(&self, skill: &SkillInsert) -> Result<Skill, AppError> {
        Ok(self.collection.insert_with(|id| skill.clone().into_skill(id)))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Skill, AppError> {
        self.collection
            .find(id)
            .ok_or_else(|| AppError::NotFound("Skill not found".into()))
    }

    async fn update(&self, id: &Uuid, changes: &SkillChanges) -> Result<Skill, AppError> {
        self.collection
            .modify(id, |skill| skill.apply(changes.clone()))
            .ok_or_else(|| AppError::NotFound("Skill not found".into()))
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<u64, AppError> {
        Ok(self.collection.remove(id))
    }

    async fn search(&self, query: &str) -> Result<Vec<Skill>, AppError> {
        Ok(self.collection.search(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: Uuid,
        body: String,
        created_at: chrono::DateTime<Utc>,
    }

    impl Record for Note {
        fn id(&self) -> Uuid {
            self.id
        }

        fn created_at(&self) -> chrono::DateTime<Utc> {
            self.created_at
        }

        fn index_terms(&self) -> Vec<String> {
            index_terms([self.body.as_str()])
        }
    }

    fn add(collection: &MemoryCollection<Note>, body: &str, age_secs: i64) -> Note {
        collection.insert_with(|id| Note {
            id,
            body: body.to_string(),
            created_at: Utc::now() - Duration::seconds(age_secs),
        })
    }

    #[test]
    fn list_all_is_ordered_by_creation() {
        let collection = MemoryCollection::new();
        let newer = add(&collection, "newer", 1);
        let older = add(&collection, "older", 10);

        assert_eq!(collection.list_all(), vec![older, newer]);
    }

    #[test]
    fn remove_reports_count() {
        let collection = MemoryCollection::new();
        let note = add(&collection, "gone", 0);

        assert_eq!(collection.remove(&note.id), 1);
        assert_eq!(collection.remove(&note.id), 0);
        assert!(collection.find(&note.id).is_none());
    }

    #[test]
    fn search_ranks_by_matching_terms() {
        let collection = MemoryCollection::new();
        let one = add(&collection, "rust services", 5);
        let two = add(&collection, "rust async services", 1);
        add(&collection, "python scripts", 3);

        let hits = collection.search("async rust");
        assert_eq!(hits, vec![two, one]);
    }

    #[test]
    fn search_without_terms_is_empty() {
        let collection = MemoryCollection::new();
        add(&collection, "anything", 0);

        assert!(collection.search(" ,. ").is_empty());
    }
}
