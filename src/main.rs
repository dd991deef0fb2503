use anyhow::{Context, anyhow};
use bucket_ingest::config::{AppConfig, RuntimeMode};
use bucket_ingest::{AppState, app, telemetry};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载 .env 文件
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    telemetry::init(config.runtime);

    tracing::info!(
        region = %config.region,
        bucket_prefix = %config.bucket_prefix,
        object_key = %config.object_key,
        scratch_dir = %config.scratch_dir.display(),
        "starting"
    );

    let state = AppState::from_config(&config).await;
    let router = app(state);

    match config.runtime {
        RuntimeMode::Lambda => lambda_http::run(router).await.map_err(|e| anyhow!(e)),
        RuntimeMode::Local => {
            let listener = TcpListener::bind(config.listen_addr)
                .await
                .with_context(|| format!("failed to bind {}", config.listen_addr))?;
            tracing::info!("服务器运行在 http://{}", config.listen_addr);
            axum::serve(listener, router).await?;
            Ok(())
        }
    }
}
