use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    entities::{
        option_fields::{overwrite, supplied},
        record::Record,
        validation::{validate_required_text, validate_tokens, FieldChecks},
    },
    utils::{clock, text_search::index_terms},
};

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub key_points: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProjectInsert {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub key_points: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated, truthiness-filtered changes ready to merge into a stored project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub key_points: Option<Vec<String>>,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[serde(default)]
    #[validate(custom(function = "validate_required_text"))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "validate_required_text"))]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "validate_tokens"))]
    pub technologies: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_tokens"))]
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_points: Option<Vec<String>>,
}

// ───── Conversions ──────────────────────────────────────────────────

impl TryFrom<NewProject> for ProjectInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewProject) -> Result<Self, Self::Error> {
        value.validate()?;
        let now = clock::now();

        Ok(ProjectInsert {
            title: value.title,
            description: value.description,
            technologies: value.technologies,
            key_points: value.key_points,
            created_at: now,
            updated_at: now,
        })
    }
}

impl UpdateProjectRequest {
    /// Drops falsy fields, then validates what remains.
    pub fn into_changes(self) -> Result<ProjectChanges, ValidationErrors> {
        let changes = ProjectChanges {
            title: supplied(self.title),
            description: supplied(self.description),
            technologies: supplied(self.technologies),
            key_points: supplied(self.key_points),
        };

        let mut checks = FieldChecks::new();
        if let Some(title) = &changes.title {
            checks.check("title", validate_required_text(title));
        }
        if let Some(description) = &changes.description {
            checks.check("description", validate_required_text(description));
        }
        if let Some(technologies) = &changes.technologies {
            checks.check("technologies", validate_tokens(technologies));
        }
        if let Some(key_points) = &changes.key_points {
            checks.check("keyPoints", validate_tokens(key_points));
        }
        checks.finish()?;

        Ok(changes)
    }
}

impl ProjectInsert {
    pub fn index_terms(&self) -> Vec<String> {
        project_terms(&self.title, &self.description, &self.technologies)
    }

    pub fn into_project(self, id: Uuid) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            technologies: self.technologies,
            key_points: self.key_points,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Project {
    /// Merges `changes` and advances `updated_at`, whether or not anything changed.
    pub fn apply(&mut self, changes: ProjectChanges) {
        overwrite(&mut self.title, changes.title);
        overwrite(&mut self.description, changes.description);
        overwrite(&mut self.technologies, changes.technologies);
        overwrite(&mut self.key_points, changes.key_points);
        self.updated_at = clock::next_after(self.updated_at);
    }
}

impl Record for Project {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn index_terms(&self) -> Vec<String> {
        project_terms(&self.title, &self.description, &self.technologies)
    }
}

fn project_terms(title: &str, description: &str, technologies: &[String]) -> Vec<String> {
    index_terms(
        [title, description]
            .into_iter()
            .chain(technologies.iter().map(String::as_str)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        NewProject {
            title: "Portfolio".into(),
            description: "Three tier app".into(),
            technologies: vec!["React".into(), "Node.js".into()],
            key_points: vec![],
        }
        .try_into()
        .map(|insert: ProjectInsert| insert.into_project(Uuid::new_v4()))
        .unwrap()
    }

    #[test]
    fn new_project_requires_title_and_description() {
        let result = ProjectInsert::try_from(NewProject {
            title: " ".into(),
            description: String::new(),
            technologies: vec![],
            key_points: vec![],
        });

        let errors = result.unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("description"));
    }

    #[test]
    fn insert_sets_equal_timestamps() {
        let project = sample_project();
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn falsy_update_fields_are_ignored() {
        let changes = UpdateProjectRequest {
            title: Some(String::new()),
            description: None,
            technologies: Some(vec![]),
            key_points: None,
        }
        .into_changes()
        .unwrap();

        assert_eq!(changes.title, None);
        assert_eq!(changes.technologies, Some(vec![]));
    }

    #[test]
    fn blank_update_title_is_rejected() {
        let result = UpdateProjectRequest {
            title: Some("   ".into()),
            ..Default::default()
        }
        .into_changes();

        assert!(result.is_err());
    }

    #[test]
    fn apply_advances_updated_at_even_without_changes() {
        let mut project = sample_project();
        let before = project.clone();

        project.apply(ProjectChanges::default());

        assert!(project.updated_at > before.updated_at);
        assert_eq!(project.title, before.title);
        assert_eq!(project.technologies, before.technologies);
        assert_eq!(project.created_at, before.created_at);
    }

    #[test]
    fn index_covers_title_description_and_technologies() {
        let terms = sample_project().index_terms();
        for term in ["portfolio", "three", "tier", "react", "node", "js"] {
            assert!(terms.contains(&term.to_string()), "missing {term}");
        }
    }

    #[test]
    fn wire_format_is_camel_case() {
        let json = serde_json::to_value(sample_project()).unwrap();
        assert!(json.get("keyPoints").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("key_points").is_none());
    }
}
