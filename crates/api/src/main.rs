use anyhow::Context;

use medstock_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal outside local development.
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    medstock_observability::init_with(config.log_format);

    if let Err(e) = dotenv {
        tracing::debug!("no .env file loaded: {e}");
    }

    let bind_addr = config.bind_addr;
    let app = medstock_api::app::build_app(config);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
