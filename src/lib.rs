use actix_cors::Cors;
use actix_web::http::{header, Method};

mod domain;
mod interfaces;
mod infrastructure;
pub mod client;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;
pub mod startup;
pub mod telemetry;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, utils};

use settings::AppConfig;
use shared_repos::SharedRepositories;
use use_cases::{projects::ProjectHandler, skills::SkillHandler};

pub struct AppState {
    pub project_handler: ProjectHandler,
    pub skill_handler: SkillHandler,
}

impl AppState {
    pub fn new(repos: &SharedRepositories) -> Self {
        AppState {
            project_handler: ProjectHandler::new(repos.project_repo.clone()),
            skill_handler: SkillHandler::new(repos.skill_repo.clone()),
        }
    }
}

/// CORS policy for the configured origins; `*` allows any origin.
pub fn build_cors(config: &AppConfig) -> Cors {
    let origins = config.cors_origins();

    let cors = if origins.iter().any(|o| o == "*") {
        Cors::default().allow_any_origin()
    } else {
        origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600)
}
