
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::commands::moderation::{run_action, take_target_list};
use crate::moderation::ActionKind;
use crate::utility::*;


pub struct BanCommand;

impl Command for BanCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            author_has(message, Permissions::BAN_MEMBERS).await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["ban".to_string()]
        )
            .add_required("users,...")
            .add_optional("reason")
            .add_constant("-delete")
            .add_optional("time (max 7d)")
            .example("@JuicyJuggler, @Spambot we could not handle you anymore -delete 1d")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let (targets, consumed) = take_target_list(message.words());
                if consumed == 0 {
                    self.invalid_usage(params).await;
                    return;
                }

                let reason = Some(message.payload(Some(consumed)));
                let window = message.get_parameter("delete");
                run_action(message, ActionKind::Ban, |request| {
                    request.targets(targets).reason(reason).delete_window(window)
                }).await;
            }
        )
    }

}
