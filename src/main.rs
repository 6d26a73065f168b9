use std::error::Error;

use api;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file, if one exists.
    // Deployments without a .env configure the environment directly.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,rag_index=info"))
        .unwrap();

    tracing_subscriber::fmt().with_env_filter(filter).init();

    api::start().await?;

    Ok(())
}
