
use strum::IntoEnumIterator;

use std::sync::Arc;

use crate::commands::*;
use crate::commands::command::{CommandParams, MatchType};
use crate::databases::BalancesDB;
use crate::utility::*;


pub struct CommandManager {
    commands: Vec<Box<dyn Command>>,
}

impl CommandManager {

    pub fn new() -> anyhow::Result<CommandManager> {
        let content = Arc::new(ContentClient::new()?);
        let economy: Arc<dyn EconomyService> = Arc::new(BalancesDB::new());

        let mut commands: Vec<Box<dyn Command>> = vec![
            Box::new(NicknameCommand),
            Box::new(PurgeCommand),
            Box::new(MuteCommand),
            Box::new(UnmuteCommand),
            Box::new(TempmuteCommand),
            Box::new(KickCommand),
            Box::new(BanCommand),
            Box::new(UnbanCommand),
            Box::new(EightBallCommand),
            Box::new(RpsCommand::new(economy)),
            Box::new(WordsCommand::new(Arc::clone(&content), WordRelation::Synonym)),
            Box::new(WordsCommand::new(Arc::clone(&content), WordRelation::Antonym)),
            Box::new(WikipediaCommand::new(Arc::clone(&content))),
            Box::new(InsultCommand),
            Box::new(FakeInfoCommand),
        ];
        for source in ContentSource::iter() {
            commands.push(Box::new(ContentCommand::new(Arc::clone(&content), source)));
        }
        for meme in ImageMeme::iter() {
            commands.push(Box::new(ImageCommand::new(meme)));
        }

        Ok(CommandManager { commands })
    }

    async fn run_command(&self, command: &dyn Command, message: MessageManager) {
        if !command.permission(&message).await {
            message.reply_failure("You do not have permission to use this command.").await;
            return;
        }
        command.run(CommandParams::new(message)).await;
    }

    /// Runs the exact match, or suggests the closest trigger.
    pub async fn execute(&self, message: &MessageManager) {
        let mut closest = None;
        for command in self.commands.iter() {
            match command.is_triggered_by(message) {
                MatchType::Exact => {
                    Logger::debug("Command", &format!("{} by {}",
                        message.get_command().unwrap_or_default(),
                        message.resolve_name()));
                    self.run_command(command.as_ref(), message.clone()).await;
                    return;
                }
                MatchType::Fuzzy(trigger) if closest.is_none() => closest = Some(trigger),
                _ => continue,
            }
        }

        if let Some(trigger) = closest {
            let correction = format!("{}{} {}",
                message.get_prefix().unwrap_or_default(),
                trigger,
                message.payload(None));
            let embed = MessageManager::create_embed(|embed| {
                embed.title("Did you mean ...").description(correction.trim())
            }).await;
            message.reply_temporary(embed).await;
        }
    }

}
