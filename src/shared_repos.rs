use std::sync::Arc;

use crate::{
    constants::MEMORY_DATABASE_URL,
    db::postgres::{create_pool, run_migrations},
    errors::AppError,
    repositories::{
        memory::{MemoryProjectRepo, MemorySkillRepo},
        project::ProjectRepository,
        skill::SkillRepository,
        sqlx_repo::{SqlxProjectRepo, SqlxSkillRepo},
    },
    settings::AppConfig,
};

#[derive(Clone)]
pub struct SharedRepositories {
    pub project_repo: Arc<dyn ProjectRepository>,
    pub skill_repo: Arc<dyn SkillRepository>,
}

impl SharedRepositories {
    pub fn new(pool: sqlx::PgPool) -> Self {
        let project_repo = SqlxProjectRepo::new(pool.clone());
        let skill_repo = SqlxSkillRepo::new(pool);

        SharedRepositories {
            project_repo: Arc::new(project_repo),
            skill_repo: Arc::new(skill_repo),
        }
    }

    pub fn in_memory() -> Self {
        SharedRepositories {
            project_repo: Arc::new(MemoryProjectRepo::new()),
            skill_repo: Arc::new(MemorySkillRepo::new()),
        }
    }

    /// Opens the backend named by `database_url`, migrating PostgreSQL first.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        if config.database_url.trim() == MEMORY_DATABASE_URL {
            tracing::info!("Using the in-memory store");
            return Ok(Self::in_memory());
        }

        let pool = create_pool(&config.database_url, config.database_max_connections).await?;
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::StoreError(format!("Migration failed: {}", e)))?;

        Ok(Self::new(pool))
    }
}
