use gpui_stream_dashboard::config::DashboardConfig;
use gpui_stream_dashboard::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DashboardConfig::from_env()?;
    server::serve(&config.server).await
}
