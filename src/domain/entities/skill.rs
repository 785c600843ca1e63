use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    entities::{
        option_fields::{overwrite, supplied},
        record::Record,
        validation::{validate_level, validate_required_text, FieldChecks},
    },
    utils::{clock, text_search::index_terms},
};

/// Categories offered by editing forms. The store accepts any non-empty category.
pub const SKILL_CATEGORY_CHOICES: [&str; 5] = ["Frontend", "Backend", "Database", "DevOps", "Other"];

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub level: i32,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SkillInsert {
    pub name: String,
    pub level: i32,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillChanges {
    pub name: Option<String>,
    pub level: Option<i32>,
    pub category: Option<String>,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSkill {
    #[serde(default)]
    #[validate(custom(function = "validate_required_text"))]
    pub name: String,

    #[serde(default)]
    #[validate(
        required(message = "Level is required"),
        range(min = 1, max = 5, message = "Level must be between 1 and 5")
    )]
    pub level: Option<i32>,

    #[serde(default)]
    #[validate(custom(function = "validate_required_text"))]
    pub category: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateSkillRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

// ───── Conversions ──────────────────────────────────────────────────

impl TryFrom<NewSkill> for SkillInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewSkill) -> Result<Self, Self::Error> {
        value.validate()?;

        // `required` has already rejected a missing level
        let level = value.level.unwrap_or_default();

        let now = clock::now();
        Ok(SkillInsert {
            name: value.name,
            level,
            category: value.category,
            created_at: now,
            updated_at: now,
        })
    }
}

impl UpdateSkillRequest {
    /// Drops falsy fields, then validates what remains.
    pub fn into_changes(self) -> Result<SkillChanges, ValidationErrors> {
        let changes = SkillChanges {
            name: supplied(self.name),
            level: supplied(self.level),
            category: supplied(self.category),
        };

        let mut checks = FieldChecks::new();
        if let Some(name) = &changes.name {
            checks.check("name", validate_required_text(name));
        }
        if let Some(level) = changes.level {
            checks.check("level", validate_level(level));
        }
        if let Some(category) = &changes.category {
            checks.check("category", validate_required_text(category));
        }
        checks.finish()?;

        Ok(changes)
    }
}

impl SkillInsert {
    pub fn index_terms(&self) -> Vec<String> {
        index_terms([self.name.as_str(), self.category.as_str()])
    }

    pub fn into_skill(self, id: Uuid) -> Skill {
        Skill {
            id,
            name: self.name,
            level: self.level,
            category: self.category,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Skill {
    /// Merges `changes` and advances `updated_at`, whether or not anything changed.
    pub fn apply(&mut self, changes: SkillChanges) {
        overwrite(&mut self.name, changes.name);
        overwrite(&mut self.level, changes.level);
        overwrite(&mut self.category, changes.category);
        self.updated_at = clock::next_after(self.updated_at);
    }
}

impl Record for Skill {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn index_terms(&self) -> Vec<String> {
        index_terms([self.name.as_str(), self.category.as_str()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_skill(level: Option<i32>) -> NewSkill {
        NewSkill {
            name: "Go".into(),
            level,
            category: "Backend".into(),
        }
    }

    #[test]
    fn level_outside_range_is_rejected() {
        assert!(SkillInsert::try_from(new_skill(Some(0))).is_err());
        assert!(SkillInsert::try_from(new_skill(Some(6))).is_err());
        assert!(SkillInsert::try_from(new_skill(Some(5))).is_ok());
    }

    #[test]
    fn missing_level_is_rejected() {
        let errors = SkillInsert::try_from(new_skill(None)).unwrap_err();
        let level_errors = errors.field_errors()["level"];
        assert_eq!(level_errors.len(), 1);
        assert_eq!(level_errors[0].code, "required");
    }

    #[test]
    fn category_is_not_restricted_to_choices() {
        let skill = NewSkill {
            name: "Figma".into(),
            level: Some(2),
            category: "Design".into(),
        };
        assert!(SkillInsert::try_from(skill).is_ok());
        assert!(!SKILL_CATEGORY_CHOICES.contains(&"Design"));
    }

    #[test]
    fn zero_level_update_is_ignored_but_out_of_range_is_rejected() {
        let changes = UpdateSkillRequest {
            level: Some(0),
            ..Default::default()
        }
        .into_changes()
        .unwrap();
        assert_eq!(changes.level, None);

        let result = UpdateSkillRequest {
            level: Some(7),
            ..Default::default()
        }
        .into_changes();
        assert!(result.is_err());
    }

    #[test]
    fn index_covers_name_and_category() {
        let skill = SkillInsert::try_from(new_skill(Some(4)))
            .unwrap()
            .into_skill(Uuid::new_v4());
        assert_eq!(skill.index_terms(), vec!["go".to_string(), "backend".to_string()]);
    }
}
