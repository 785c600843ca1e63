use crate::{
    entities::{
        project::{NewProject, ProjectInsert},
        skill::{NewSkill, SkillInsert},
    },
    errors::AppError,
    repositories::{project::ProjectRepository, skill::SkillRepository},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub projects_created: usize,
    pub skills_created: usize,
}

pub fn default_project() -> NewProject {
    NewProject {
        title: "Portfolio Docker".to_string(),
        description: "A modern portfolio built on Docker and a three-tier architecture".to_string(),
        technologies: ["React", "Node.js", "MongoDB", "Docker"]
            .into_iter()
            .map(String::from)
            .collect(),
        key_points: Vec::new(),
    }
}

pub fn default_skills() -> Vec<NewSkill> {
    [
        ("React.js", 4, "Frontend"),
        ("Node.js", 4, "Backend"),
        ("MongoDB", 3, "Database"),
        ("Docker", 3, "DevOps"),
    ]
    .into_iter()
    .map(|(name, level, category)| NewSkill {
        name: name.to_string(),
        level: Some(level),
        category: category.to_string(),
    })
    .collect()
}

/// Fills each collection with its defaults when, and only when, it holds no records.
pub async fn seed_defaults(
    projects: &dyn ProjectRepository,
    skills: &dyn SkillRepository,
) -> Result<SeedReport, AppError> {
    let mut report = SeedReport::default();

    if projects.count().await? == 0 {
        projects.insert(&ProjectInsert::try_from(default_project())?).await?;
        report.projects_created = 1;
        tracing::info!("Seeded default project");
    }

    if skills.count().await? == 0 {
        for skill in default_skills() {
            skills.insert(&SkillInsert::try_from(skill)?).await?;
            report.skills_created += 1;
        }
        tracing::info!("Seeded {} default skills", report.skills_created);
    }

    Ok(report)
}
