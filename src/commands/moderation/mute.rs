
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::commands::moderation::run_action;
use crate::moderation::ActionKind;
use crate::utility::*;


pub struct MuteCommand;

impl Command for MuteCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            author_has(message, Permissions::MUTE_MEMBERS).await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["mute".to_string()]
        )
            .add_required("user")
            .add_optional("reason")
            .example("@BadBoy continuously being bad")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let target = match message.word(0) {
                    Some(target) => target.to_string(),
                    None => {
                        self.invalid_usage(params).await;
                        return;
                    }
                };

                let reason = Some(message.payload(Some(1)));
                run_action(message, ActionKind::Mute, |request| {
                    request.targets(target).reason(reason)
                }).await;
            }
        )
    }

}
