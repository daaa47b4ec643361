
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::commands::moderation::run_action;
use crate::moderation::ActionKind;
use crate::utility::*;


pub struct UnmuteCommand;

impl Command for UnmuteCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            author_has(message, Permissions::MUTE_MEMBERS).await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["unmute".to_string()]
        )
            .add_required("user")
            .example("@GoodBoy")
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

                run_action(message, ActionKind::Unmute, |request| request.targets(target)).await;
            }
        )
    }

}
