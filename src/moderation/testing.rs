
use serenity::model::id::{ChannelId, MessageId, UserId};

use std::collections::HashSet;
use std::sync::Mutex;

use crate::moderation::hierarchy::GuildUser;
use crate::moderation::platform::*;
use crate::utility::mixed::{parse_user_id, BoxedFuture};


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    AddMutedRole(UserId),
    RemoveMutedRole(UserId),
    Timeout(UserId, Option<i64>),
    Kick(UserId),
    Ban(UserId, u64),
    Unban(UserId),
    Nickname(UserId, String),
    Delete(ChannelId, Vec<MessageId>),
    Notify(UserId, String),
}

pub fn member(id: u64, name: &str, rank: u16) -> GuildUser {
    GuildUser::new(UserId::new(id), name, rank)
}

pub fn message(id: u64, channel: u64, author: u64, created_at: i64) -> HistoryMessage {
    HistoryMessage {
        id: MessageId::new(id),
        channel_id: ChannelId::new(channel),
        author_id: UserId::new(author),
        created_at,
    }
}

/// Records every side effect instead of talking to a guild.
#[derive(Default)]
pub struct RecordingPlatform {
    members: Vec<GuildUser>,
    banned: Vec<GuildUser>,
    forbidden: HashSet<UserId>,
    forbidden_channels: HashSet<ChannelId>,
    history: Vec<HistoryMessage>,
    muted_role_missing: bool,
    direct_messages_closed: bool,
    calls: Mutex<Vec<Call>>,
    lookups: Mutex<Vec<String>>,
}

impl RecordingPlatform {

    pub fn new() -> Self {
        RecordingPlatform::default()
    }

    pub fn with_member(mut self, member: GuildUser) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_banned(mut self, user: GuildUser) -> Self {
        self.banned.push(user);
        self
    }

    /// Side effects on this user fail as if the bot ranked below them.
    pub fn forbid(mut self, id: u64) -> Self {
        self.forbidden.insert(UserId::new(id));
        self
    }

    pub fn forbid_channel(mut self, id: u64) -> Self {
        self.forbidden_channels.insert(ChannelId::new(id));
        self
    }

    /// Removing the muted role fails as if the guild had none.
    pub fn without_muted_role(mut self) -> Self {
        self.muted_role_missing = true;
        self
    }

    /// Every DM fails.
    pub fn with_closed_dms(mut self) -> Self {
        self.direct_messages_closed = true;
        self
    }

    /// Messages are given oldest first.
    pub fn with_history(mut self, messages: Vec<HistoryMessage>) -> Self {
        self.history.extend(messages);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    fn find(&self, pool: &[GuildUser], token: &str) -> Option<GuildUser> {
        let id = parse_user_id(token);
        pool.iter()
            .find(|user| Some(user.id) == id || user.id.to_string() == token || user.name == token)
            .cloned()
    }

    fn effect(&self, target: &GuildUser, call: Call) -> PlatformResult<()> {
        if self.forbidden.contains(&target.id) {
            return Err(PlatformError::Forbidden);
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }

}

impl ModerationPlatform for RecordingPlatform {

    fn resolve_member<'a>(&'a self, token: &'a str) -> BoxedFuture<'a, PlatformResult<Option<GuildUser>>> {
        Box::pin(async move {
            self.lookups.lock().unwrap().push(token.to_string());
            Ok(self.find(&self.members, token))
        })
    }

    fn resolve_user<'a>(&'a self, token: &'a str) -> BoxedFuture<'a, PlatformResult<Option<GuildUser>>> {
        Box::pin(async move {
            self.lookups.lock().unwrap().push(token.to_string());
            Ok(self.find(&self.members, token).or_else(|| self.find(&self.banned, token)))
        })
    }

    fn add_muted_role<'a>(&'a self, target: &'a GuildUser, _reason: Option<&'a str>) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(async move { self.effect(target, Call::AddMutedRole(target.id)) })
    }

    fn remove_muted_role<'a>(&'a self, target: &'a GuildUser) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(async move {
            if self.muted_role_missing {
                return Err(PlatformError::NotFound("the muted role".to_string()));
            }
            self.effect(target, Call::RemoveMutedRole(target.id))
        })
    }

    fn set_timeout<'a>(&'a self, target: &'a GuildUser, until: Option<i64>, _reason: Option<&'a str>) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(async move { self.effect(target, Call::Timeout(target.id, until)) })
    }

    fn kick<'a>(&'a self, target: &'a GuildUser, _reason: Option<&'a str>) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(async move { self.effect(target, Call::Kick(target.id)) })
    }

    fn ban<'a>(&'a self, target: &'a GuildUser, _reason: Option<&'a str>, delete_message_seconds: u64) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(async move { self.effect(target, Call::Ban(target.id, delete_message_seconds)) })
    }

    fn unban<'a>(&'a self, target: &'a GuildUser, _reason: Option<&'a str>) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(async move { self.effect(target, Call::Unban(target.id)) })
    }

    fn edit_nickname<'a>(&'a self, target: &'a GuildUser, nickname: &'a str) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(async move { self.effect(target, Call::Nickname(target.id, nickname.to_string())) })
    }

    fn text_channels<'a>(&'a self) -> BoxedFuture<'a, PlatformResult<Vec<ChannelId>>> {
        Box::pin(async move {
            let mut channels = Vec::new();
            for message in self.history.iter() {
                if !channels.contains(&message.channel_id) {
                    channels.push(message.channel_id);
                }
            }
            Ok(channels)
        })
    }

    fn history<'a>(&'a self, channel: ChannelId, before: Option<MessageId>, limit: usize) -> BoxedFuture<'a, PlatformResult<Vec<HistoryMessage>>> {
        Box::pin(async move {
            if self.forbidden_channels.contains(&channel) {
                return Err(PlatformError::Forbidden);
            }
            Ok(self.history.iter()
                .rev()
                .filter(|message| message.channel_id == channel)
                .filter(|message| before.map_or(true, |before| message.id < before))
                .take(limit)
                .cloned()
                .collect())
        })
    }

    fn delete_messages<'a>(&'a self, channel: ChannelId, messages: Vec<MessageId>) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(async move {
            if self.forbidden_channels.contains(&channel) {
                return Err(PlatformError::Forbidden);
            }
            self.calls.lock().unwrap().push(Call::Delete(channel, messages));
            Ok(())
        })
    }

    fn notify<'a>(&'a self, target: &'a GuildUser, content: String) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(async move {
            if self.direct_messages_closed {
                return Err(PlatformError::Http("Cannot send messages to this user".to_string()));
            }
            self.calls.lock().unwrap().push(Call::Notify(target.id, content));
            Ok(())
        })
    }

}
