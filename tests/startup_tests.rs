use portfolio_api::{
    constants::MEMORY_DATABASE_URL,
    settings::{AppConfig, AppEnvironment, LogFormat},
    startup::prepare_store,
};

fn config_for(database_url: &str) -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Portfolio API Startup Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        database_url: database_url.into(),
        database_max_connections: 1,
        cors_allowed_origins: vec!["*".to_string()],
        log_format: LogFormat::Text,
    }
}

#[actix_rt::test]
async fn memory_store_is_seeded_on_startup() {
    let repos = prepare_store(&config_for(MEMORY_DATABASE_URL))
        .await
        .expect("Failed to prepare the memory store");

    assert_eq!(repos.project_repo.count().await.unwrap(), 1);
    assert_eq!(repos.skill_repo.count().await.unwrap(), 4);
}

#[actix_rt::test]
async fn unusable_database_url_fails_with_context() {
    let err = prepare_store(&config_for("not-a-database-url"))
        .await
        .err()
        .expect("A malformed database URL must not open a store");

    let chain = format!("{:#}", err);
    assert!(chain.starts_with("Failed to open the record store"), "{}", chain);
    assert!(err.downcast_ref::<portfolio_api::errors::AppError>().is_some());
}
