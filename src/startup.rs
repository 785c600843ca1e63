use anyhow::Context;

use crate::{settings::AppConfig, shared_repos::SharedRepositories, use_cases::seed::seed_defaults};

/// Opens the configured store and seeds empty collections.
///
/// A seeding failure is logged and does not abort startup.
pub async fn prepare_store(config: &AppConfig) -> anyhow::Result<SharedRepositories> {
    let repos = SharedRepositories::connect(config)
        .await
        .context("Failed to open the record store")?;

    match seed_defaults(repos.project_repo.as_ref(), repos.skill_repo.as_ref()).await {
        Ok(report) => tracing::info!(
            "Seeding finished: {} projects, {} skills created",
            report.projects_created,
            report.skills_created
        ),
        Err(e) => tracing::error!("Seeding failed: {}", e),
    }

    Ok(repos)
}
