use std::sync::Arc;

use crate::{
    entities::skill::{NewSkill, Skill, SkillInsert, UpdateSkillRequest},
    errors::AppError,
    repositories::skill::SkillRepository,
    use_cases::log_store_error,
    utils::valid_uuid::parse_record_id,
};

const SKILL_NOT_FOUND: &str = "Skill not found";

pub struct SkillHandler {
    pub skill_repo: Arc<dyn SkillRepository>,
}

impl SkillHandler {
    pub fn new(skill_repo: Arc<dyn SkillRepository>) -> Self {
        SkillHandler { skill_repo }
    }

    pub async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        self.skill_repo
            .list_all()
            .await
            .map_err(|e| log_store_error("list skills", e))
    }

    pub async fn create_skill(&self, request: NewSkill) -> Result<Skill, AppError> {
        let insert = SkillInsert::try_from(request)?;

        let skill = self.skill_repo
            .insert(&insert)
            .await
            .map_err(|e| log_store_error("create skill", e))?;

        tracing::info!("Created skill {} ({})", skill.id, skill.name);
        Ok(skill)
    }

    pub async fn get_skill(&self, id: &str) -> Result<Skill, AppError> {
        let valid_id = parse_record_id(id, SKILL_NOT_FOUND)?;

        self.skill_repo.find_by_id(&valid_id).await.map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound(SKILL_NOT_FOUND.to_string()),
            _ => log_store_error("get skill", e),
        })
    }

    pub async fn update_skill(&self, id: &str, request: UpdateSkillRequest) -> Result<Skill, AppError> {
        let valid_id = parse_record_id(id, SKILL_NOT_FOUND)?;

        let changes = match request.into_changes() {
            Ok(changes) => changes,
            Err(errors) => {
                self.get_skill(id).await?;
                return Err(errors.into());
            }
        };

        let skill = self.skill_repo
            .update(&valid_id, &changes)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound(SKILL_NOT_FOUND.to_string()),
                _ => log_store_error("update skill", e),
            })?;

        tracing::info!("Updated skill {}", skill.id);
        Ok(skill)
    }

    pub async fn delete_skill(&self, id: &str) -> Result<(), AppError> {
        let valid_id = parse_record_id(id, SKILL_NOT_FOUND)?;

        let deleted = self.skill_repo
            .delete_by_id(&valid_id)
            .await
            .map_err(|e| log_store_error("delete skill", e))?;

        if deleted == 0 {
            return Err(AppError::NotFound(SKILL_NOT_FOUND.to_string()));
        }

        tracing::info!("Deleted skill {}", valid_id);
        Ok(())
    }

    /// Full-text search over name and category
    pub async fn search_skills(&self, query: &str) -> Result<Vec<Skill>, AppError> {
        self.skill_repo
            .search(query)
            .await
            .map_err(|e| log_store_error("search skills", e))
    }
}
