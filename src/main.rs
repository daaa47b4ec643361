
use serenity::prelude::{Client, GatewayIntents};

use utility::traits::Singleton;
use utility::logger::Logger;
use commands::command_manager::CommandManager;
use handler::Handler;
use databases::*;

extern crate alloc;

mod handler;
mod utility;
mod databases;
mod commands;
mod moderation;


#[tokio::main]
async fn main() {

    // setup
    let token = match resolve_token().await {
        Some(token) => token,
        None => {
            Logger::err("No bot token configured. Set `token` in the config database or DISCORD_TOKEN.");
            return;
        }
    };
    let command_manager = match CommandManager::new() {
        Ok(command_manager) => command_manager,
        Err(why) => {
            Logger::err_long("Could not set up commands", &format!("{:#}", why));
            return;
        }
    };
    let handler = Handler::new(command_manager);

    // start threads
    let intents = GatewayIntents::GUILDS                    |
                  GatewayIntents::GUILD_MEMBERS             |
                  GatewayIntents::GUILD_MESSAGES            |
                  GatewayIntents::MESSAGE_CONTENT;
    let mut client = match Client::builder(&token, intents).event_handler(handler).await {
        Ok(client) => client,
        Err(why) => {
            Logger::err_long("Error creating client", &why.to_string());
            return;
        }
    };

    #[cfg(feature = "db_interface")]
    utility::console::spawn_console();

    Logger::info("Starting client");
    if let Err(why) = client.start().await {
        Logger::err_long("Client stopped", &why.to_string());
    }
}

/// The stored token wins over `DISCORD_TOKEN`.
async fn resolve_token() -> Option<String> {
    match ConfigDB::get_instance().get("token").await {
        Ok(entry) if !entry.value.is_empty() => Some(entry.value),
        _ => std::env::var("DISCORD_TOKEN").ok().filter(|token| !token.is_empty()),
    }
}
