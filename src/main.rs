use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use anyhow::Context;
use contact_backend::{
    constants::START_TIME,
    cors::build_cors,
    db::Storage,
    graceful_shutdown::shutdown_signal,
    mail::notifier::build_notifier,
    routes::configure_routes,
    settings::AppConfig,
    telemetry::init_tracing,
    AppState,
};
use once_cell::sync::Lazy;
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    Lazy::force(&START_TIME);

    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config);
    tracing::info!("Loaded configuration: {:?}", config);

    let storage = Storage::open(&config)
        .await
        .context("Failed to open the contact store")?;

    let notifier = build_notifier(&config)
        .context("Failed to build the mail relay client")?;

    let app_state = web::Data::new(
        AppState::new(&config, &storage, notifier)
    );

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );
    tracing::info!("Health check: http://{}/api/health", server_addr);

    let server_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(build_cors(&server_config))
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .disable_signals()
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run();

    let handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        handle.stop(true).await;
    });

    server.await.context("HTTP server error")?;

    storage.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}
