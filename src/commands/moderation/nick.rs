
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::commands::moderation::run_action;
use crate::moderation::ActionKind;
use crate::utility::*;


pub struct NicknameCommand;

impl Command for NicknameCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            author_has(message, Permissions::MANAGE_NICKNAMES).await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["nick".to_string(), "nickname".to_string()]
        )
            .add_required("user")
            .add_optional("nickname")
            .example("@LoudPerson quiet person")
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

                // an empty nickname resets it
                let nickname = message.payload(Some(1));
                run_action(message, ActionKind::Nickname, |request| {
                    request.targets(target).nickname(nickname)
                }).await;
            }
        )
    }

}
