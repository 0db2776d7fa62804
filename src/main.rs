use mood_api::{server, AffectPipelineBuilder, ServiceConfig};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    let config = ServiceConfig::from_env()?;
    info!(
        port = config.port,
        model_dir = ?config.model_dir,
        bert_repo = %config.bert_repo,
        "starting mood-api"
    );

    let pipeline = AffectPipelineBuilder::from_config(&config).build().await?;
    info!(device = ?pipeline.scorer().device(), "models loaded");

    server::serve(config.bind_addr(), pipeline).await
}
