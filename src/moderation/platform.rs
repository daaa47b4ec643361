
use serenity::model::id::{ChannelId, MessageId, UserId};

use std::fmt;

use crate::moderation::hierarchy::GuildUser;
use crate::utility::mixed::BoxedFuture;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The bot itself lacks the privilege for this call.
    Forbidden,
    NotFound(String),
    Http(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlatformError::Forbidden      => write!(f, "Missing required permissions. Is the user above me?"),
            PlatformError::NotFound(what) => write!(f, "Could not find {}", what),
            PlatformError::Http(why)      => write!(f, "Request failed: {}", why),
        }
    }
}

impl std::error::Error for PlatformError {}

pub type PlatformResult<T> = Result<T, PlatformError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub author_id: UserId,
    /// Unix seconds.
    pub created_at: i64,
}

/// Everything the moderation pipeline asks of the chat platform.
///
/// Lookups answer `Ok(None)` when nothing matches; side effects fail with
/// [`PlatformError::Forbidden`] when the bot is not allowed to perform them.
pub trait ModerationPlatform: Send + Sync {

    fn resolve_member<'a>(&'a self, token: &'a str) -> BoxedFuture<'a, PlatformResult<Option<GuildUser>>>;

    /// Like [`resolve_member`](Self::resolve_member) but also finds users that left or were banned.
    fn resolve_user<'a>(&'a self, token: &'a str) -> BoxedFuture<'a, PlatformResult<Option<GuildUser>>>;

    fn add_muted_role<'a>(&'a self, target: &'a GuildUser, reason: Option<&'a str>) -> BoxedFuture<'a, PlatformResult<()>>;

    fn remove_muted_role<'a>(&'a self, target: &'a GuildUser) -> BoxedFuture<'a, PlatformResult<()>>;

    /// `None` lifts an active timeout.
    fn set_timeout<'a>(&'a self, target: &'a GuildUser, until: Option<i64>, reason: Option<&'a str>) -> BoxedFuture<'a, PlatformResult<()>>;

    fn kick<'a>(&'a self, target: &'a GuildUser, reason: Option<&'a str>) -> BoxedFuture<'a, PlatformResult<()>>;

    fn ban<'a>(&'a self, target: &'a GuildUser, reason: Option<&'a str>, delete_message_seconds: u64) -> BoxedFuture<'a, PlatformResult<()>>;

    fn unban<'a>(&'a self, target: &'a GuildUser, reason: Option<&'a str>) -> BoxedFuture<'a, PlatformResult<()>>;

    /// An empty nickname resets it.
    fn edit_nickname<'a>(&'a self, target: &'a GuildUser, nickname: &'a str) -> BoxedFuture<'a, PlatformResult<()>>;

    fn text_channels<'a>(&'a self) -> BoxedFuture<'a, PlatformResult<Vec<ChannelId>>>;

    /// Newest first, at most `limit` messages older than `before` (or the newest if `None`).
    fn history<'a>(&'a self, channel: ChannelId, before: Option<MessageId>, limit: usize) -> BoxedFuture<'a, PlatformResult<Vec<HistoryMessage>>>;

    fn delete_messages<'a>(&'a self, channel: ChannelId, messages: Vec<MessageId>) -> BoxedFuture<'a, PlatformResult<()>>;

    fn notify<'a>(&'a self, target: &'a GuildUser, content: String) -> BoxedFuture<'a, PlatformResult<()>>;

}
