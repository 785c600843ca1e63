use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::{
        project::{Project, ProjectChanges, ProjectInsert},
        record::Record,
    },
    errors::AppError,
    repositories::sqlx_repo::{SqlxProjectRepo, PROJECT_COLUMNS},
    utils::text_search::index_terms,
};

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn count(&self) -> Result<u64, AppError>;
    async fn list_all(&self) -> Result<Vec<Project>, AppError>;
    async fn insert(&self, project: &ProjectInsert) -> Result<Project, AppError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Project, AppError>;
    async fn update(&self, id: &Uuid, changes: &ProjectChanges) -> Result<Project, AppError>;
    async fn delete_by_id(&self, id: &Uuid) -> Result<u64, AppError>;
    async fn search(&self, query: &str) -> Result<Vec<Project>, AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn count(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }

    async fn list_all(&self) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn insert(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let created = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (
                title, description, technologies, key_points, search_terms, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.technologies)
        .bind(&project.key_points)
        .bind(project.index_terms())
        .bind(project.created_at)
        .bind(project.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        project.ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn update(&self, id: &Uuid, changes: &ProjectChanges) -> Result<Project, AppError> {
        // Read, merge, write back: concurrent updates of one row race and the last write wins
        let mut project = self.find_by_id(id).await?;
        project.apply(changes.clone());

        let updated = sqlx::query_as::<_, Project>(&format!(
            r#"
            UPDATE projects SET
                title = $1,
                description = $2,
                technologies = $3,
                key_points = $4,
                search_terms = $5,
                updated_at = $6
            WHERE id = $7
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.technologies)
        .bind(&project.key_points)
        .bind(project.index_terms())
        .bind(project.updated_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn search(&self, query: &str) -> Result<Vec<Project>, AppError> {
        let terms = index_terms([query]);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let projects = sqlx::query_as::<_, Project>(&format!(
            r#"
            SELECT {PROJECT_COLUMNS} FROM projects
            WHERE search_terms && $1
            ORDER BY
                cardinality(ARRAY(SELECT unnest(search_terms) INTERSECT SELECT unnest($1::text[]))) DESC,
                created_at ASC
            "#
        ))
        .bind(&terms)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }
}
