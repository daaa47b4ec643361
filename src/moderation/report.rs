
use serenity::builder::{CreateEmbed, CreateEmbedFooter};

use crate::moderation::duration::humanize_duration;
use crate::moderation::hierarchy::GuildUser;
use crate::moderation::pipeline::{ActionKind, ModerationReport, PipelineFailure};
use crate::moderation::platform::PlatformError;


/// A rendered moderation reply, independent of how it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationReply {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<(String, String, bool)>,
    pub warnings: Vec<String>,
    pub footer: Option<String>,
    pub ephemeral: bool,
}

impl ModerationReply {

    pub fn to_embed(&self, color: u32) -> CreateEmbed {
        let mut description = self.description.clone().unwrap_or_default();
        for warning in self.warnings.iter() {
            if !description.is_empty() {
                description.push('\n');
            }
            description.push_str(&format!("⚠️ {}", warning));
        }

        let mut embed = CreateEmbed::new()
            .title(&self.title)
            .fields(self.fields.clone())
            .color(color);
        if !description.is_empty() {
            embed = embed.description(description);
        }
        if let Some(footer) = &self.footer {
            embed = embed.footer(CreateEmbedFooter::new(footer));
        }
        embed
    }

}

fn title(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Nickname => "Nickname result",
        ActionKind::Purge    => "Purge result",
        ActionKind::Mute     => "Mute result",
        ActionKind::Unmute   => "Unmute result",
        ActionKind::Timeout  => "Timeout result",
        ActionKind::Kick     => "Kick result",
        ActionKind::Ban      => "Ban result",
        ActionKind::Unban    => "Unban result",
    }
}

fn mentions<'a>(users: impl Iterator<Item = &'a GuildUser>) -> String {
    let mentions = users.map(|user| user.mention()).collect::<Vec<_>>();
    match mentions.is_empty() {
        true  => "None".to_string(),
        false => mentions.join(", "),
    }
}

pub fn format_report(report: &ModerationReport, ephemeral: bool) -> ModerationReply {
    let mut fields = Vec::new();

    match report.kind {
        ActionKind::Nickname => {
            fields.push(("User".to_string(), mentions(report.succeeded()), true));
            fields.push(("Old nickname".to_string(),
                report.previous_nickname.clone().unwrap_or_else(|| "None".to_string()), true));
            let new = match report.nickname.as_deref() {
                Some(nickname) if !nickname.is_empty() => nickname.to_string(),
                _ => "Reset".to_string(),
            };
            fields.push(("New nickname".to_string(), new, true));
        }
        ActionKind::Purge => {
            if !report.outcomes.is_empty() {
                fields.push(("User".to_string(), mentions(report.outcomes.iter().map(|outcome| &outcome.target)), true));
            }
            fields.push(("Messages deleted".to_string(), report.purged.unwrap_or(0).to_string(), true));
        }
        _ => {
            let title = match report.kind.is_multi_target() {
                true  => "Targets",
                false => "User",
            };
            fields.push((title.to_string(), mentions(report.succeeded()), false));
            fields.push(("Reason".to_string(),
                report.reason.clone().unwrap_or_else(|| "None".to_string()), false));
        }
    }

    if let Some(duration) = report.duration {
        fields.push(("Duration".to_string(), humanize_duration(duration), true));
    }
    if let Some(window) = report.deletion_window.filter(|window| *window > 0) {
        fields.push(("Deleted messages from".to_string(), format!("the last {}", humanize_duration(window)), true));
        fields.push(("Messages deleted".to_string(), report.swept.to_string(), true));
    }

    let mut warnings = report.outcomes.iter()
        .filter_map(|outcome| outcome.failure.as_ref().map(|why| (outcome, why)))
        .map(|(outcome, why)| format!("{}: {}", outcome.target.mention(), why))
        .collect::<Vec<_>>();
    if report.degraded && warnings.is_empty() {
        warnings.push(format!("Some messages could not be deleted. {}", PlatformError::Forbidden));
    }

    ModerationReply {
        title: title(report.kind).to_string(),
        description: None,
        fields,
        warnings,
        footer: Some(format!("Moderator: {}", report.actor.name)),
        ephemeral,
    }
}

/// Failures are always shown ephemerally.
pub fn format_failure(failure: &PipelineFailure) -> ModerationReply {
    ModerationReply {
        title: "❌".to_string(),
        description: Some(failure.to_string()),
        fields: Vec::new(),
        warnings: Vec::new(),
        footer: None,
        ephemeral: true,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderation::pipeline::*;
    use crate::moderation::testing::*;
    use serenity::model::id::{ChannelId, MessageId};

    const NOW: i64 = 1_700_000_000;

    async fn run(platform: &RecordingPlatform, request: ActionRequest) -> Result<ModerationReport, PipelineFailure> {
        ModerationPipeline::new(platform).execute(&request).await
    }

    fn request(kind: ActionKind) -> ActionRequest {
        ActionRequest::new(kind, member(1, "mod", 5), ChannelId::new(10), MessageId::new(1000), NOW)
    }

    fn field<'a>(reply: &'a ModerationReply, name: &str) -> Option<&'a str> {
        reply.fields.iter()
            .find(|(label, _, _)| label == name)
            .map(|(_, value, _)| value.as_str())
    }

    #[tokio::test]
    async fn ban_report_lists_targets_and_refusals() {
        let platform = RecordingPlatform::new()
            .with_member(member(2, "a", 1))
            .with_member(member(3, "b", 1))
            .forbid(3);
        let report = run(&platform, request(ActionKind::Ban).targets("a,b")).await.unwrap();

        let reply = format_report(&report, false);
        assert_eq!(reply.title, "Ban result");
        assert_eq!(field(&reply, "Targets"), Some("<@2>"));
        assert_eq!(field(&reply, "Reason"), Some("None"));
        assert_eq!(reply.warnings, vec!["<@3>: Missing required permissions. Is the user above me?".to_string()]);
        assert_eq!(reply.footer.as_deref(), Some("Moderator: mod"));
        assert!(!reply.ephemeral);
    }

    #[tokio::test]
    async fn timeout_report_humanizes_duration() {
        let platform = RecordingPlatform::new().with_member(member(2, "a", 1));
        let report = run(&platform, request(ActionKind::Timeout)
            .targets("a")
            .duration("1h30m")
            .reason(Some("flooding".to_string()))).await.unwrap();

        let reply = format_report(&report, true);
        assert_eq!(reply.title, "Timeout result");
        assert_eq!(field(&reply, "User"), Some("<@2>"));
        assert_eq!(field(&reply, "Reason"), Some("flooding"));
        assert_eq!(field(&reply, "Duration"), Some("1 hour and 30 minutes"));
        assert!(reply.warnings.is_empty());
        assert!(reply.ephemeral);
    }

    #[tokio::test]
    async fn nickname_report_shows_both_names() {
        let platform = RecordingPlatform::new().with_member(member(2, "before", 1));
        let report = run(&platform, request(ActionKind::Nickname).targets("before").nickname("")).await.unwrap();

        let reply = format_report(&report, true);
        assert_eq!(field(&reply, "Old nickname"), Some("before"));
        assert_eq!(field(&reply, "New nickname"), Some("Reset"));
        assert_eq!(field(&reply, "Reason"), None);
    }

    #[tokio::test]
    async fn purge_report_counts_deleted_messages() {
        let platform = RecordingPlatform::new()
            .with_history(vec![message(1, 10, 2, NOW), message(2, 10, 2, NOW)]);
        let report = run(&platform, request(ActionKind::Purge).limit(50)).await.unwrap();

        let reply = format_report(&report, true);
        assert_eq!(reply.title, "Purge result");
        assert_eq!(field(&reply, "Messages deleted"), Some("2"));
        assert_eq!(field(&reply, "User"), None);
    }

    #[tokio::test]
    async fn failure_names_already_applied_targets() {
        let platform = RecordingPlatform::new()
            .with_member(member(2, "a", 1))
            .with_member(member(3, "boss", 9));
        let failure = run(&platform, request(ActionKind::Kick).targets("a,boss")).await.unwrap_err();

        let reply = format_failure(&failure);
        assert!(reply.ephemeral);
        assert_eq!(reply.description.as_deref(),
            Some("You cannot moderate users higher than you (<@3>)\nAlready applied to: <@2>"));
    }
}
