use std::error::Error;

use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file, if present.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let address =
        std::env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    println!("{}", "World Bank Query API".bold());
    println!("Starting on {}", format!("http://{address}").cyan());

    api::start().await?;

    Ok(())
}
