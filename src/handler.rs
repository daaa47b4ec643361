
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;

use crate::commands::command_manager::CommandManager;
use crate::utility::*;


pub struct Handler {
    command_manager: CommandManager,
}

impl Handler {

    pub fn new(command_manager: CommandManager) -> Handler {
        Handler {
            command_manager,
        }
    }

}

#[async_trait]
impl EventHandler for Handler {

    async fn ready(&self, _ctx: Context, ready: Ready) {
        Logger::info_long("Connected as", &ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {

        // ignore bots, including ourselves
        if msg.author.bot {
            return;
        }

        let resolver = Resolver::new(ctx, msg.guild_id);
        let message = MessageManager::new(resolver, msg).await;

        #[cfg(feature = "commands")]
        if message.is_command() {
            self.command_manager.execute(&message).await;
        }
    }

}
