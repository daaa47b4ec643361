
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::commands::moderation::run_action;
use crate::moderation::ActionKind;
use crate::utility::*;


pub struct PurgeCommand;

impl PurgeCommand {
    pub const MAX_PURGE: usize = 100;
}

impl Command for PurgeCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            author_has(message, Permissions::MANAGE_MESSAGES).await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["purge".to_string(), "clear".to_string()]
        )
            .add_required("amount (1..100)")
            .add_optional("user")
            .example("15 @EvilCorp")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let limit = message.word(0)
                    .and_then(|word| word.parse::<usize>().ok())
                    .filter(|limit| (1..=PurgeCommand::MAX_PURGE).contains(limit));
                let limit = match limit {
                    Some(limit) => limit,
                    None => {
                        self.invalid_usage(params).await;
                        return;
                    }
                };

                let user = message.word(1).unwrap_or("").to_string();
                run_action(message, ActionKind::Purge, |request| {
                    request.targets(user).limit(limit)
                }).await;

                // the invocation itself is not part of the purge
                message.delete().await;
            }
        )
    }

}
