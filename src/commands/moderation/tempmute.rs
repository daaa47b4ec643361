
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::commands::moderation::run_action;
use crate::moderation::ActionKind;
use crate::utility::*;


pub struct TempmuteCommand;

impl Command for TempmuteCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            author_has(message, Permissions::MUTE_MEMBERS).await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["tempmute".to_string(), "timeout".to_string()]
        )
            .add_required("user")
            .add_required("time (e.g. 1h30m, max 2w)")
            .add_optional("reason")
            .example("@Chatterbox 10m flooding the chat")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let (target, time) = match (message.word(0), message.word(1)) {
                    (Some(target), Some(time)) => (target.to_string(), time.to_string()),
                    _ => {
                        self.invalid_usage(params).await;
                        return;
                    }
                };

                let reason = Some(message.payload(Some(2)));
                run_action(message, ActionKind::Timeout, |request| {
                    request.targets(target).duration(time).reason(reason)
                }).await;
            }
        )
    }

}
