
pub mod nick;
pub mod purge;
pub mod mute;
pub mod unmute;
pub mod tempmute;
pub mod kick;
pub mod ban;
pub mod unban;

use crate::databases::*;
use crate::moderation::*;
use crate::utility::*;


/// Takes a comma separated target list from the front of `words`.
///
/// `@a, @b reason` and `@a ,@b reason` both yield `@a,@b` and consume two words.
pub fn take_target_list(words: &[String]) -> (String, usize) {
    let mut targets = String::new();
    let mut consumed = 0;
    for (index, word) in words.iter().enumerate() {
        let continues = index == 0
            || targets.ends_with(',')
            || word.starts_with(',');
        if !continues {
            break;
        }
        targets.push_str(word);
        consumed += 1;
    }
    (targets, consumed)
}

/// Runs one moderation request for the author of `message` and replies with the result.
pub async fn run_action(message: &MessageManager, kind: ActionKind, build: impl FnOnce(ActionRequest) -> ActionRequest) {
    let resolver = message.get_resolver();
    let guild_id = match message.get_guild() {
        Some(guild_id) => guild_id,
        None => {
            message.reply_failure("This command only works in servers.").await;
            return;
        }
    };

    let member = message.resolve_member().await;
    let actor = match member {
        Some(member) => resolver.resolve_guild_user(&member).await,
        None => None,
    };
    let (actor, platform) = match (actor, resolver.moderation_platform().await) {
        (Some(actor), Some(platform)) => (actor, platform),
        _ => {
            message.reply_failure("Could not resolve your membership in this server.").await;
            return;
        }
    };

    let request = build(ActionRequest::new(
        kind,
        actor,
        message.get_channel(),
        message.get_message_id(),
        message.get_timestamp())
        .guild_name(resolver.resolve_guild_name().await));

    let color = ConfigDB::get_instance().color_primary().await;
    match ModerationPipeline::new(&platform).execute(&request).await {
        Ok(report) => {
            let ephemeral = ConfigDB::get_instance().ephemeral_moderation(guild_id).await;
            let reply = format_report(&report, ephemeral);
            Logger::info_long(&format!("{} by {}", kind, request.actor.name),
                &format!("{} target(s) in {}", report.succeeded().count(), guild_id));
            match reply.ephemeral {
                true  => message.reply_temporary(reply.to_embed(color)).await,
                false => {
                    if let Err(why) = message.reply(reply.to_embed(color)).await {
                        Logger::warn_long("Could not reply", &why);
                    }
                }
            }
        }
        Err(failure) => {
            let reply = format_failure(&failure);
            message.reply_temporary(reply.to_embed(color)).await;
        }
    }
}
