use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::{
        record::Record,
        skill::{Skill, SkillChanges, SkillInsert},
    },
    errors::AppError,
    repositories::sqlx_repo::{SqlxSkillRepo, SKILL_COLUMNS},
    utils::text_search::index_terms,
};

#[async_trait]
pub trait SkillRepository: Send + Sync {
    async fn count(&self) -> Result<u64, AppError>;
    async fn list_all(&self) -> Result<Vec<Skill>, AppError>;
    async fn insert(&self, skill: &SkillInsert) -> Result<Skill, AppError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Skill, AppError>;
    async fn update(&self, id: &Uuid, changes: &SkillChanges) -> Result<Skill, AppError>;
    async fn delete_by_id(&self, id: &Uuid) -> Result<u64, AppError>;
    async fn search(&self, query: &str) -> Result<Vec<Skill>, AppError>;
}

impl SqlxSkillRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxSkillRepo { pool }
    }
}

#[async_trait]
impl SkillRepository for SqlxSkillRepo {
    async fn count(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM skills")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }

    async fn list_all(&self) -> Result<Vec<Skill>, AppError> {
        let skills = sqlx::query_as::<_, Skill>(&format!(
            "SELECT {SKILL_COLUMNS} FROM skills ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(skills)
    }

    async fn insert(&self, skill: &SkillInsert) -> Result<Skill, AppError> {
        let created = sqlx::query_as::<_, Skill>(&format!(
            r#"
            INSERT INTO skills (name, level, category, search_terms, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SKILL_COLUMNS}
            "#
        ))
        .bind(&skill.name)
        .bind(skill.level)
        .bind(&skill.category)
        .bind(skill.index_terms())
        .bind(skill.created_at)
        .bind(skill.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Skill, AppError> {
        let skill = sqlx::query_as::<_, Skill>(&format!(
            "SELECT {SKILL_COLUMNS} FROM skills WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        skill.ok_or_else(|| AppError::NotFound("Skill not found".into()))
    }

    async fn update(&self, id: &Uuid, changes: &SkillChanges) -> Result<Skill, AppError> {
        let mut skill = self.find_by_id(id).await?;
        skill.apply(changes.clone());

        let updated = sqlx::query_as::<_, Skill>(&format!(
            r#"
            UPDATE skills SET
                name = $1,
                level = $2,
                category = $3,
                search_terms = $4,
                updated_at = $5
            WHERE id = $6
            RETURNING {SKILL_COLUMNS}
            "#
        ))
        .bind(&skill.name)
        .bind(skill.level)
        .bind(&skill.category)
        .bind(skill.index_terms())
        .bind(skill.updated_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound("Skill not found".into()))
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn search(&self, query: &str) -> Result<Vec<Skill>, AppError> {
        let terms = index_terms([query]);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let skills = sqlx::query_as::<_, Skill>(&format!(
            r#"
            SELECT {SKILL_COLUMNS} FROM skills
            WHERE search_terms && $1
            ORDER BY
                cardinality(ARRAY(SELECT unnest(search_terms) INTERSECT SELECT unnest($1::text[]))) DESC,
                created_at ASC
            "#
        ))
        .bind(&terms)
        .fetch_all(&self.pool)
        .await?;

        Ok(skills)
    }
}
