mod catalog;
mod config;
mod discord;
mod sampler;
mod service;

use std::sync::Arc;

use dotenv::dotenv;
use serenity::all::{Client, GatewayIntents};
use tracing::{error, info};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::discord::Handler;
use crate::service::PairingService;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Loading finishes before the gateway connects, so no request is served
    // against a half-built catalog.
    let catalog = Catalog::load(&config.image_dir, &config.captions_file);
    info!(
        "Catalog loaded: {} images, {} captions",
        catalog.images.len(),
        catalog.captions.len()
    );

    let service = Arc::new(PairingService::new(catalog, config.image_dir.clone()));

    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;
    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler::new(service))
        .await
        .expect("failed to build Discord client");

    if let Err(e) = client.start().await {
        error!("Discord client stopped: {}", e);
    }
}
