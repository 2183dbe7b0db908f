use mock_upsd::config::Config;
use mock_upsd::server::Server;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!(
        host = %cfg.host,
        port = cfg.port,
        ups = %cfg.ups_name,
        max_line_bytes = cfg.max_line_bytes,
        "Starting mock NUT server"
    );

    let server = Server::bind(&cfg).await?;
    server
        .run(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Shutdown signal received"),
                Err(e) => {
                    tracing::warn!("Cannot listen for Ctrl-C: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        })
        .await
}
