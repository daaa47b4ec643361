
use serenity::model::id::{ChannelId, MessageId, UserId};
use strum_macros::{Display, EnumIter};

use std::collections::HashSet;
use std::fmt;

use crate::moderation::duration::*;
use crate::moderation::error::ModerationError;
use crate::moderation::hierarchy::GuildUser;
use crate::moderation::platform::*;
use crate::moderation::targets::{split_targets, Lookup, TargetResolver};
use crate::utility::logger::Logger;


/// How many messages per channel a history scan looks at.
pub const HISTORY_SCAN_DEPTH: usize = 100;

#[derive(Display, EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum ActionKind {
    Nickname,
    Purge,
    Mute,
    Unmute,
    Timeout,
    Kick,
    Ban,
    Unban,
}

impl ActionKind {

    /// Only these accept a comma separated target list.
    pub fn is_multi_target(&self) -> bool {
        matches!(self, ActionKind::Kick | ActionKind::Ban | ActionKind::Unban)
    }

    pub fn lookup(&self) -> Lookup {
        match self {
            ActionKind::Unban => Lookup::User,
            _                 => Lookup::Member,
        }
    }

}

/// One moderation invocation. Raw duration strings are parsed by the pipeline.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    pub kind: ActionKind,
    pub actor: GuildUser,
    pub targets: String,
    pub reason: Option<String>,
    pub duration: Option<String>,
    pub delete_window: Option<String>,
    pub nickname: Option<String>,
    pub limit: usize,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    /// Unix seconds.
    pub invoked_at: i64,
    pub guild_name: String,
}

impl ActionRequest {

    pub fn new(kind: ActionKind, actor: GuildUser, channel_id: ChannelId, message_id: MessageId, invoked_at: i64) -> Self {
        ActionRequest {
            kind,
            actor,
            targets: String::new(),
            reason: None,
            duration: None,
            delete_window: None,
            nickname: None,
            limit: 0,
            channel_id,
            message_id,
            invoked_at,
            guild_name: String::new(),
        }
    }

    pub fn targets(mut self, raw: impl Into<String>) -> Self {
        self.targets = raw.into();
        self
    }

    pub fn reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason.filter(|reason| !reason.trim().is_empty());
        self
    }

    pub fn duration(mut self, raw: impl Into<String>) -> Self {
        self.duration = Some(raw.into());
        self
    }

    pub fn delete_window(mut self, raw: Option<String>) -> Self {
        self.delete_window = raw;
        self
    }

    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn guild_name(mut self, name: impl Into<String>) -> Self {
        self.guild_name = name.into();
        self
    }

}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub target: GuildUser,
    pub succeeded: bool,
    pub failure: Option<PlatformError>,
}

impl ActionOutcome {
    fn applied(target: GuildUser) -> Self {
        ActionOutcome { target, succeeded: true, failure: None }
    }

    fn failed(target: GuildUser, failure: PlatformError) -> Self {
        ActionOutcome { target, succeeded: false, failure: Some(failure) }
    }
}

#[derive(Debug, Clone)]
pub struct ModerationReport {
    pub kind: ActionKind,
    pub actor: GuildUser,
    pub outcomes: Vec<ActionOutcome>,
    pub reason: Option<String>,
    pub duration: Option<u64>,
    pub deletion_window: Option<u64>,
    pub previous_nickname: Option<String>,
    pub nickname: Option<String>,
    pub purged: Option<usize>,
    pub swept: usize,
    /// Set when a channel level call was refused; per target refusals live in `outcomes`.
    pub degraded: bool,
}

impl ModerationReport {

    fn new(request: &ActionRequest, duration: Option<u64>, deletion_window: Option<u64>) -> Self {
        ModerationReport {
            kind: request.kind,
            actor: request.actor.clone(),
            outcomes: Vec::new(),
            reason: request.reason.clone(),
            duration,
            deletion_window,
            previous_nickname: None,
            nickname: request.nickname.clone(),
            purged: None,
            swept: 0,
            degraded: false,
        }
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &GuildUser> {
        self.outcomes.iter()
            .filter(|outcome| outcome.succeeded)
            .map(|outcome| &outcome.target)
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded || self.outcomes.iter().any(|outcome| !outcome.succeeded)
    }

}

/// A request that stopped early. `applied` holds what already happened and was not undone.
#[derive(Debug, Clone)]
pub struct PipelineFailure {
    pub error: ModerationError,
    pub applied: Vec<ActionOutcome>,
}

impl PipelineFailure {
    fn before_any(error: ModerationError) -> Self {
        PipelineFailure { error, applied: Vec::new() }
    }
}

impl fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.error)?;
        let applied = self.applied.iter()
            .filter(|outcome| outcome.succeeded)
            .map(|outcome| outcome.target.mention())
            .collect::<Vec<_>>();
        if !applied.is_empty() {
            write!(f, "\nAlready applied to: {}", applied.join(", "))?;
        }
        Ok(())
    }
}

fn parse_timeout(request: &ActionRequest) -> Result<Option<u64>, ModerationError> {
    if request.kind != ActionKind::Timeout {
        return Ok(None);
    }
    let seconds = parse_duration(request.duration.as_deref().unwrap_or(""))
        .map_err(ModerationError::InvalidDuration)?;
    if seconds > MAX_TIMEOUT {
        return Err(ModerationError::DurationTooLong(seconds));
    }
    Ok(Some(seconds))
}

fn parse_deletion_window(request: &ActionRequest) -> Result<Option<u64>, ModerationError> {
    if !matches!(request.kind, ActionKind::Kick | ActionKind::Ban) {
        return Ok(None);
    }
    let raw = match request.delete_window.as_deref() {
        Some(raw) => raw,
        None      => return Ok(None),
    };
    let seconds = parse_duration(raw).map_err(ModerationError::InvalidDeletionWindow)?;
    if request.kind == ActionKind::Ban && seconds > MAX_DELETION_WINDOW {
        return Err(ModerationError::DeletionWindowTooLong(seconds));
    }
    Ok(Some(seconds))
}

pub struct ModerationPipeline<'a, P: ModerationPlatform + ?Sized> {
    platform: &'a P,
}

impl<'a, P: ModerationPlatform + ?Sized> ModerationPipeline<'a, P> {

    pub fn new(platform: &'a P) -> Self {
        ModerationPipeline { platform }
    }

    /// Runs one request: parse limits, then resolve, check and apply target by target.
    ///
    /// Resolution and permission failures stop the batch without undoing earlier
    /// targets. A refusal by the platform is recorded for that target and the
    /// batch goes on.
    pub async fn execute(&self, request: &ActionRequest) -> Result<ModerationReport, PipelineFailure> {
        let duration = parse_timeout(request).map_err(PipelineFailure::before_any)?;
        let deletion_window = parse_deletion_window(request).map_err(PipelineFailure::before_any)?;
        let mut report = ModerationReport::new(request, duration, deletion_window);

        Logger::debug("Moderation", &format!("{} by {} on '{}'", request.kind, request.actor.name, request.targets));

        let applied = match request.kind {
            ActionKind::Purge => self.purge(request, &mut report).await,
            _                 => self.apply_to_targets(request, &mut report).await,
        };
        if let Err(error) = applied {
            return Err(self.abort(request, error, report));
        }

        if let Some(window) = deletion_window.filter(|window| *window > 0) {
            if let Err(error) = self.sweep(request, &mut report, window).await {
                return Err(self.abort(request, error, report));
            }
        }

        if request.kind == ActionKind::Timeout {
            self.notify_timeouts(request, &report).await;
        }

        Ok(report)
    }

    fn abort(&self, request: &ActionRequest, error: ModerationError, report: ModerationReport) -> PipelineFailure {
        Logger::warn_long(
            &format!("{} by {} stopped", request.kind, request.actor.name),
            &error.to_string());
        PipelineFailure { error, applied: report.outcomes }
    }

    async fn apply_to_targets(&self, request: &ActionRequest, report: &mut ModerationReport) -> Result<(), ModerationError> {
        let tokens = match request.kind.is_multi_target() {
            true  => split_targets(&request.targets),
            false => vec![request.targets.trim().to_string()],
        };
        let mut resolver = TargetResolver::new(self.platform, &request.actor, tokens, request.kind.lookup());

        while let Some(target) = resolver.next_target().await {
            let target = target?;
            if request.kind == ActionKind::Nickname {
                report.previous_nickname = Some(target.name.clone());
            }

            match self.apply(request, report, &target).await {
                Ok(()) => report.outcomes.push(ActionOutcome::applied(target)),
                Err(PlatformError::Forbidden) => {
                    Logger::warn_long(
                        &format!("Missing permissions for {}", request.kind),
                        &format!("{} ({})", target.name, target.id));
                    report.outcomes.push(ActionOutcome::failed(target, PlatformError::Forbidden));
                }
                Err(why) => return Err(ModerationError::Platform(why)),
            }
        }
        Ok(())
    }

    async fn apply(&self, request: &ActionRequest, report: &ModerationReport, target: &GuildUser) -> PlatformResult<()> {
        let reason = request.reason.as_deref();
        match request.kind {
            ActionKind::Nickname => {
                let nickname = request.nickname.as_deref().unwrap_or("");
                self.platform.edit_nickname(target, nickname).await
            }
            ActionKind::Mute => self.platform.add_muted_role(target, reason).await,
            ActionKind::Unmute => {
                self.platform.set_timeout(target, None, reason).await?;
                match self.platform.remove_muted_role(target).await {
                    Err(PlatformError::NotFound(_)) => Ok(()),
                    other => other,
                }
            }
            ActionKind::Timeout => {
                let seconds = report.duration.unwrap_or(0);
                let until = request.invoked_at + seconds as i64;
                self.platform.set_timeout(target, Some(until), reason).await
            }
            ActionKind::Kick => self.platform.kick(target, reason).await,
            ActionKind::Ban => {
                let window = report.deletion_window.unwrap_or(0);
                self.platform.ban(target, reason, window).await
            }
            ActionKind::Unban => self.platform.unban(target, reason).await,
            ActionKind::Purge => Ok(()),
        }
    }

    async fn purge(&self, request: &ActionRequest, report: &mut ModerationReport) -> Result<(), ModerationError> {
        let channel = request.channel_id;
        let before = Some(request.message_id);
        let token = request.targets.trim();

        let author = match token {
            "" => None,
            token => {
                let mut resolver = TargetResolver::new(
                    self.platform, &request.actor, vec![token.to_string()], Lookup::Member);
                match resolver.next_target().await {
                    Some(author) => Some(author?),
                    None => return Err(ModerationError::ResolutionFailed { index: 0, token: token.to_string() }),
                }
            }
        };

        let doomed = match &author {
            None => self.platform.history(channel, before, request.limit).await
                .map(|history| history.into_iter().map(|message| message.id).collect::<Vec<_>>()),
            // linear scan of recent history, not a server side query
            Some(author) => self.platform.history(channel, before, HISTORY_SCAN_DEPTH).await
                .map(|history| history.into_iter()
                    .filter(|message| message.author_id == author.id)
                    .take(request.limit)
                    .map(|message| message.id)
                    .collect::<Vec<_>>()),
        };

        let deleted = match doomed {
            Ok(doomed) if doomed.is_empty() => Ok(0),
            Ok(doomed) => {
                let count = doomed.len();
                self.platform.delete_messages(channel, doomed).await.map(|_| count)
            }
            Err(why) => Err(why),
        };
        match deleted {
            Ok(count) => {
                report.purged = Some(count);
                if let Some(author) = author {
                    report.outcomes.push(ActionOutcome::applied(author));
                }
            }
            Err(PlatformError::Forbidden) => {
                report.purged = Some(0);
                report.degraded = true;
                if let Some(author) = author {
                    report.outcomes.push(ActionOutcome::failed(author, PlatformError::Forbidden));
                }
            }
            Err(why) => return Err(why.into()),
        }
        Ok(())
    }

    /// Deletes recent messages of removed members across every channel the bot can read.
    async fn sweep(&self, request: &ActionRequest, report: &mut ModerationReport, window: u64) -> Result<(), ModerationError> {
        let removed = report.succeeded()
            .map(|target| target.id)
            .collect::<HashSet<UserId>>();
        if removed.is_empty() {
            return Ok(());
        }
        let cutoff = request.invoked_at - window as i64;

        for channel in self.platform.text_channels().await? {
            let history = match self.platform.history(channel, None, HISTORY_SCAN_DEPTH).await {
                Ok(history) => history,
                Err(PlatformError::Forbidden) => {
                    Logger::debug("Sweep", &format!("skipping unreadable channel {}", channel));
                    continue;
                }
                Err(why) => return Err(why.into()),
            };

            let doomed = history.into_iter()
                .filter(|message| removed.contains(&message.author_id) && message.created_at > cutoff)
                .map(|message| message.id)
                .collect::<Vec<_>>();
            if doomed.is_empty() {
                continue;
            }

            let count = doomed.len();
            match self.platform.delete_messages(channel, doomed).await {
                Ok(()) => report.swept += count,
                Err(PlatformError::Forbidden) => report.degraded = true,
                Err(why) => return Err(why.into()),
            }
        }
        Ok(())
    }

    async fn notify_timeouts(&self, request: &ActionRequest, report: &ModerationReport) {
        let seconds = match report.duration {
            Some(seconds) => seconds,
            None          => return,
        };
        let content = format!("You have been muted in **{}** for *{}*",
            request.guild_name,
            humanize_duration(seconds));
        for target in report.succeeded() {
            if let Err(why) = self.platform.notify(target, content.clone()).await {
                Logger::warn_long(&format!("Could not notify {}", target.name), &why.to_string());
            }
        }
    }

}
