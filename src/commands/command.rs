
use serenity::builder::CreateEmbedFooter;
use serenity::model::permissions::Permissions;
use nonempty::NonEmpty;

use crate::utility::*;


pub struct CommandParams {
    pub message: MessageManager,
}

impl CommandParams {
    pub fn new(message: MessageManager) -> Self {
        Self { message }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchType {
    Exact,
    Fuzzy(String),
    None
}

/// Exact trigger, otherwise the first trigger within a third of its length in edits.
pub fn match_trigger(triggers: &NonEmpty<String>, word: &str) -> MatchType {
    let compare = word.to_lowercase();
    if triggers.iter().any(|trigger| *trigger == compare) {
        return MatchType::Exact;
    }
    for trigger in triggers.iter() {
        let threshold = trigger.len() / 3;
        if string_distance(trigger, &compare) <= threshold {
            return MatchType::Fuzzy(trigger.to_string());
        }
    }
    MatchType::None
}

/// Guild permissions of the author; `false` outside of guilds.
pub async fn author_has(message: &MessageManager, required: Permissions) -> bool {
    match message.resolve_member().await {
        Some(member) => message.get_resolver()
            .resolve_permissions(&member).await
            .contains(required),
        None => false,
    }
}

pub trait Command: Send + Sync {

    fn is_triggered_by(&self, message: &MessageManager) -> MatchType {
        match message.get_command() {
            Some(word) => match_trigger(&self.get_triggers(), &word),
            None => MatchType::None,
        }
    }

    fn permission<'a>(&'a self, _message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move { true })
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()>;

    fn define_usage(&self) -> UsageBuilder;

    fn display_usage(&self, params: CommandParams, title: String) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {
                let message = &params.message;
                let prefix = message.get_prefix().unwrap_or_default();
                let usage = self.define_usage().build(&prefix);
                let embed = MessageManager::create_embed(|embed| {
                    embed
                        .title(title)
                        .description(&usage)
                        .footer(CreateEmbedFooter::new(
                            "Syntax Legend: <> = required, [] = optional",
                        ))
                }).await;
                message.reply_temporary(embed).await;
            }
        )
    }

    fn invalid_usage(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move { self.display_usage(params, "Invalid Usage!".to_string()).await }
        )
    }

    fn get_triggers(&self) -> NonEmpty<String> {
        self.define_usage().triggers
    }

}
