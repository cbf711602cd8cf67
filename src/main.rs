#[tokio::main]
async fn main() {
    if let Err(e) = icu_dashboard::run().await {
        tracing::error!("{e}");
        eprintln!("icu-dashboard: {e}");
        std::process::exit(1);
    }
}
