pub mod api; // HTTP router, endpoints, server lifecycle
pub mod config;
pub mod dashboard; // Filter + KPI + chart + detail pipeline
pub mod models;
pub mod source; // Record loading (CSV, in-memory)

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Run the dashboard server until Ctrl-C.
pub async fn run() -> Result<(), String> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let settings = config::ServerConfig::from_env().map_err(|e| e.to_string())?;
    tracing::info!(
        addr = %settings.addr,
        data = %settings.data_path.display(),
        static_dir = %settings.static_dir.display(),
        "Configuration loaded"
    );

    if !settings.data_path.exists() {
        tracing::warn!(
            data = %settings.data_path.display(),
            "Data file not found, /api/data will return 404 until it exists"
        );
    }

    let source = Arc::new(source::CsvRecordSource::new(&settings.data_path));
    let ctx = api::ApiContext::new(source).with_static_dir(&settings.static_dir);

    let mut server = api::start_dashboard_server_on(ctx, settings.addr).await?;
    tracing::info!("Dashboard available at http://{}", server.session.server_addr);

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for Ctrl-C: {e}"))?;

    server.shutdown();
    server.join().await;
    Ok(())
}
