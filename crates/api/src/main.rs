use std::env;

use anyhow::{Context, Result};
use tripflow_api::build_app;
use tripflow_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("tripflow_api");

    let bind = env::var("TRIPFLOW_BIND").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    let app = build_app().await?;

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(bind = %bind, "tripflow api started");

    axum::serve(listener, app).await?;
    Ok(())
}
