//! Conversions between raw editing-form input and API requests.

use crate::entities::{
    project::{NewProject, Project, UpdateProjectRequest},
    skill::{NewSkill, Skill, UpdateSkillRequest, SKILL_CATEGORY_CHOICES},
};

const DEFAULT_FORM_LEVEL: &str = "3";

/// Comma-separated technologies; blank entries are dropped.
pub fn parse_technologies(raw: &str) -> Vec<String> {
    split_entries(raw.split(','))
}

/// One key point per line; blank lines are dropped.
pub fn parse_key_points(raw: &str) -> Vec<String> {
    split_entries(raw.lines())
}

pub fn parse_level(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

pub fn category_choices() -> &'static [&'static str] {
    &SKILL_CATEGORY_CHOICES
}

fn split_entries<'a>(parts: impl Iterator<Item = &'a str>) -> Vec<String> {
    parts
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub technologies: String,
    pub key_points: String,
}

impl ProjectForm {
    /// Pre-fills the form for editing an existing project.
    pub fn from_project(project: &Project) -> Self {
        ProjectForm {
            title: project.title.clone(),
            description: project.description.clone(),
            technologies: project.technologies.join(", "),
            key_points: project.key_points.join("\n"),
        }
    }

    pub fn to_new_project(&self) -> NewProject {
        NewProject {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            technologies: parse_technologies(&self.technologies),
            key_points: parse_key_points(&self.key_points),
        }
    }

    pub fn to_update_request(&self) -> UpdateProjectRequest {
        UpdateProjectRequest {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            technologies: Some(parse_technologies(&self.technologies)),
            key_points: Some(parse_key_points(&self.key_points)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillForm {
    pub name: String,
    pub level: String,
    pub category: String,
}

impl Default for SkillForm {
    fn default() -> Self {
        SkillForm {
            name: String::new(),
            level: DEFAULT_FORM_LEVEL.to_string(),
            category: String::new(),
        }
    }
}

impl SkillForm {
    pub fn from_skill(skill: &Skill) -> Self {
        SkillForm {
            name: skill.name.clone(),
            level: skill.level.to_string(),
            category: skill.category.clone(),
        }
    }

    pub fn to_new_skill(&self) -> NewSkill {
        NewSkill {
            name: self.name.trim().to_string(),
            level: parse_level(&self.level),
            category: self.category.trim().to_string(),
        }
    }

    pub fn to_update_request(&self) -> UpdateSkillRequest {
        UpdateSkillRequest {
            name: Some(self.name.trim().to_string()),
            level: parse_level(&self.level),
            category: Some(self.category.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn technologies_drop_blank_entries() {
        assert_eq!(
            parse_technologies(" React, Node.js ,, Docker ,"),
            ["React", "Node.js", "Docker"]
        );
        assert!(parse_technologies("  ").is_empty());
    }

    #[test]
    fn key_points_split_on_lines() {
        assert_eq!(
            parse_key_points("Fast builds\n\n  Zero downtime  \r\nCI"),
            ["Fast builds", "Zero downtime", "CI"]
        );
    }

    #[test]
    fn project_form_builds_trimmed_request() {
        let form = ProjectForm {
            title: " Portfolio ".into(),
            description: "Site".into(),
            technologies: "React, Docker".into(),
            key_points: "One\nTwo".into(),
        };

        let request = form.to_new_project();
        assert_eq!(request.title, "Portfolio");
        assert_eq!(request.technologies, ["React", "Docker"]);
        assert_eq!(request.key_points, ["One", "Two"]);
    }

    #[test]
    fn skill_form_defaults_to_middle_level() {
        let form = SkillForm { name: "Go".into(), category: "Backend".into(), ..Default::default() };
        assert_eq!(form.to_new_skill().level, Some(3));
    }

    #[test]
    fn unparseable_level_is_left_out() {
        let form = SkillForm { level: "expert".into(), ..Default::default() };

        assert_eq!(form.to_new_skill().level, None);
        assert_eq!(form.to_update_request().level, None);
    }

    #[test]
    fn choices_are_the_fixed_list() {
        assert_eq!(category_choices(), ["Frontend", "Backend", "Database", "DevOps", "Other"]);
    }
}
