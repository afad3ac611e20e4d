use std::sync::Arc;

use anyhow::Context;
use uniformdesk_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    uniformdesk_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let services = Arc::new(
        uniformdesk_api::app::services::build_services(&config)
            .context("failed to build services")?,
    );
    let app = uniformdesk_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
