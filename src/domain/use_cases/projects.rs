use std::sync::Arc;

use crate::{
    entities::project::{NewProject, Project, ProjectInsert, UpdateProjectRequest},
    errors::AppError,
    repositories::project::ProjectRepository,
    use_cases::log_store_error,
    utils::valid_uuid::parse_record_id,
};

const PROJECT_NOT_FOUND: &str = "Project not found";

pub struct ProjectHandler {
    pub project_repo: Arc<dyn ProjectRepository>,
}

impl ProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        ProjectHandler { project_repo }
    }

    /// Every stored project
    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo
            .list_all()
            .await
            .map_err(|e| log_store_error("list projects", e))
    }

    /// Validates and stores a new project, returning it with its generated fields
    pub async fn create_project(&self, request: NewProject) -> Result<Project, AppError> {
        let insert = ProjectInsert::try_from(request)?;

        let project = self.project_repo
            .insert(&insert)
            .await
            .map_err(|e| log_store_error("create project", e))?;

        tracing::info!("Created project {} ({})", project.id, project.title);
        Ok(project)
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, AppError> {
        let valid_id = parse_record_id(id, PROJECT_NOT_FOUND)?;

        self.project_repo.find_by_id(&valid_id).await.map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound(PROJECT_NOT_FOUND.to_string()),
            _ => log_store_error("get project", e),
        })
    }

    /// Applies the truthy fields of `request` to an existing project
    pub async fn update_project(
        &self,
        id: &str,
        request: UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        let valid_id = parse_record_id(id, PROJECT_NOT_FOUND)?;

        let changes = match request.into_changes() {
            Ok(changes) => changes,
            Err(errors) => {
                // An unknown id is reported ahead of an invalid body
                self.get_project(id).await?;
                return Err(errors.into());
            }
        };

        let project = self.project_repo
            .update(&valid_id, &changes)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound(PROJECT_NOT_FOUND.to_string()),
                _ => log_store_error("update project", e),
            })?;

        tracing::info!("Updated project {}", project.id);
        Ok(project)
    }

    /// Removes a project; a zero delete count becomes `NotFound`
    pub async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        let valid_id = parse_record_id(id, PROJECT_NOT_FOUND)?;

        let deleted = self.project_repo
            .delete_by_id(&valid_id)
            .await
            .map_err(|e| log_store_error("delete project", e))?;

        if deleted == 0 {
            return Err(AppError::NotFound(PROJECT_NOT_FOUND.to_string()));
        }

        tracing::info!("Deleted project {}", valid_id);
        Ok(())
    }

    /// Full-text search over title, description and technologies
    pub async fn search_projects(&self, query: &str) -> Result<Vec<Project>, AppError> {
        self.project_repo
            .search(query)
            .await
            .map_err(|e| log_store_error("search projects", e))
    }
}
