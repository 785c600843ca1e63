//! Pure view filters over mirrored records.

use crate::entities::{project::Project, skill::Skill};

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

pub fn project_matches(project: &Project, query: &str) -> bool {
    let needle = query.to_lowercase();

    contains_ignore_case(&project.title, &needle)
        || contains_ignore_case(&project.description, &needle)
        || project.technologies.iter().any(|t| contains_ignore_case(t, &needle))
}

pub fn skill_matches(skill: &Skill, query: &str, category: Option<&str>) -> bool {
    let matches_query = contains_ignore_case(&skill.name, &query.to_lowercase());
    let matches_category = category.is_none_or(|c| skill.category == c);

    matches_query && matches_category
}

pub fn filter_projects<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    projects.iter().filter(|p| project_matches(p, query)).collect()
}

pub fn filter_skills<'a>(skills: &'a [Skill], query: &str, category: Option<&str>) -> Vec<&'a Skill> {
    skills
        .iter()
        .filter(|s| skill_matches(s, query, category))
        .collect()
}

/// Distinct skill categories in first-seen order.
pub fn skill_categories(skills: &[Skill]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for skill in skills {
        if !categories.contains(&skill.category) {
            categories.push(skill.category.clone());
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn project(title: &str, description: &str, technologies: &[&str]) -> Project {
        let now = Utc::now();
        Project {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            technologies: technologies.iter().map(|t| t.to_string()).collect(),
            key_points: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    fn skill(name: &str, category: &str) -> Skill {
        let now = Utc::now();
        Skill {
            id: Uuid::new_v4(),
            name: name.into(),
            level: 3,
            category: category.into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn projects_match_on_any_technology() {
        let projects = vec![
            project("Portfolio", "Personal site", &["React", "Docker"]),
            project("Blog", "Writing", &["Hugo"]),
        ];

        let hits = filter_projects(&projects, "dock");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Portfolio");
    }

    #[test]
    fn empty_query_keeps_everything() {
        let projects = vec![project("A", "a", &[]), project("B", "b", &[])];
        assert_eq!(filter_projects(&projects, "").len(), 2);
    }

    #[test]
    fn filtering_is_idempotent() {
        let projects = vec![
            project("Rust API", "Actix service", &["Rust"]),
            project("Web", "Frontend", &["React"]),
        ];

        let once: Vec<Project> = filter_projects(&projects, "RUST").into_iter().cloned().collect();
        let twice: Vec<Project> = filter_projects(&once, "RUST").into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn skills_filter_by_name_and_exact_category() {
        let skills = vec![
            skill("React.js", "Frontend"),
            skill("Node.js", "Backend"),
            skill("Next.js", "frontend"),
        ];

        let names = |hits: Vec<&Skill>| hits.iter().map(|s| s.name.clone()).collect::<Vec<_>>();

        assert_eq!(names(filter_skills(&skills, ".JS", None)).len(), 3);
        assert_eq!(names(filter_skills(&skills, "", Some("Frontend"))), ["React.js"]);
        assert!(filter_skills(&skills, "node", Some("Frontend")).is_empty());
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let skills = vec![
            skill("Docker", "DevOps"),
            skill("Rust", "Backend"),
            skill("Kubernetes", "DevOps"),
        ];

        assert_eq!(skill_categories(&skills), ["DevOps", "Backend"]);
    }
}
