pub mod config;
pub mod discord;
pub mod logging;
pub mod storage;

use std::sync::Arc;

use log::{error, info};
use tokio::sync::RwLock;

use crate::config::Config;
use crate::discord::DiscordClient;
use crate::storage::StorageClient;

/// Shared state handed to command handlers. All guild/member/role state
/// lives on the platform side; this is just configuration plus the prefix
/// store.
pub struct BotState {
    pub config: Arc<RwLock<Config>>,
    pub storage: Arc<StorageClient>,
}

pub struct BotClients {
    pub discord: Arc<DiscordClient>,
}

pub async fn init(
    config: Arc<RwLock<Config>>,
) -> Result<BotClients, Box<dyn std::error::Error + Send + Sync>> {
    let database_path = config
        .read()
        .await
        .database_path
        .clone()
        .unwrap_or_else(|| "rolecall.db".to_string());
    let storage = Arc::new(StorageClient::new(&database_path)?);

    let state = Arc::new(BotState {
        config: Arc::clone(&config),
        storage,
    });

    let discord = DiscordClient::new(Arc::clone(&config), state).await?;
    info!("Discord client initialized successfully.");

    Ok(BotClients {
        discord: Arc::new(discord),
    })
}

pub async fn run(clients: BotClients) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut handles = vec![];

    let discord = Arc::clone(&clients.discord);
    handles.push(tokio::spawn(async move {
        if let Err(e) = discord.start().await {
            error!("Discord client error: {:?}", e);
        }
        Ok(()) as Result<(), Box<dyn std::error::Error + Send + Sync>>
    }));

    info!("Bot is now running. Press Ctrl+C to exit.");

    tokio::select! {
        _ = futures::future::join_all(handles) => {
            info!("All handlers have completed.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down.");
            clients.discord.shutdown().await?;
        }
    }

    info!("Bot has shut down.");
    Ok(())
}
