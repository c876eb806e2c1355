use std::sync::Arc;

use rolecall::{config::Config, init, logging, run};
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::new()?;
    logging::init(config.log_level)?;

    let config = Arc::new(RwLock::new(config));
    let clients = init(Arc::clone(&config)).await?;

    run(clients).await?;

    Ok(())
}
