use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use portfolio_api::{
    build_cors,
    graceful_shutdown::shutdown_signal,
    routes::configure_routes,
    settings::AppConfig,
    startup::prepare_store,
    telemetry::init_tracing,
    AppState,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::new().context("Configuration error")?;

    init_tracing(config.log_format);
    tracing::info!("Loaded configuration: {:?}", config);

    let repos = prepare_store(&config).await?;

    let app_state = web::Data::new(AppState::new(&repos));
    let server_addr = config.server_addr();

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let cors_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(build_cors(&cors_config))
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run();

    tokio::select! {
        res = server => res.context("Server stopped with an error"),
        _ = shutdown_signal() => Ok(()),
    }
}
