
use serenity::all::{ChannelType, Context, EditMember, GetMessages, HttpError, ModelError, Timestamp};
use serenity::builder::CreateMessage;
use serenity::model::guild::Member;
use serenity::model::id::{ChannelId, GuildId, MessageId, RoleId, UserId};
use serenity::model::channel::Message;
use serenity::Error as SerenityError;

use crate::moderation::hierarchy::GuildUser;
use crate::moderation::platform::*;
use crate::utility::mixed::{parse_user_id, BoxedFuture};


/// Serenity rejects larger bulk deletes and history pages.
const PAGE_SIZE: usize = 100;

fn classify(error: SerenityError) -> PlatformError {
    match &error {
        SerenityError::Http(HttpError::UnsuccessfulRequest(response)) => match response.status_code.as_u16() {
            403 => PlatformError::Forbidden,
            404 => PlatformError::NotFound(response.error.message.clone()),
            _   => PlatformError::Http(error.to_string()),
        },
        SerenityError::Model(ModelError::InvalidPermissions { .. })
        | SerenityError::Model(ModelError::Hierarchy) => PlatformError::Forbidden,
        _ => PlatformError::Http(error.to_string()),
    }
}

fn not_found_as_none<T>(result: PlatformResult<Option<T>>) -> PlatformResult<Option<T>> {
    match result {
        Err(PlatformError::NotFound(_)) => Ok(None),
        other => other,
    }
}

fn history_entry(message: &Message) -> HistoryMessage {
    HistoryMessage {
        id: message.id,
        channel_id: message.channel_id,
        author_id: message.author.id,
        created_at: message.timestamp.unix_timestamp(),
    }
}

/// Discord refuses bulk deletes containing anything older than this.
const BULK_DELETE_MAX_AGE: i64 = 14 * 24 * 60 * 60;

/// Splits ids into those that may be bulk deleted at `now` and those that
/// must go one by one. Message ids carry their creation time.
fn split_by_age(messages: Vec<MessageId>, now: i64) -> (Vec<MessageId>, Vec<MessageId>) {
    messages.into_iter()
        .partition(|message| now - message.created_at().unix_timestamp() < BULK_DELETE_MAX_AGE)
}

/// The moderation port backed by one guild over the live gateway.
pub struct SerenityPlatform {
    ctx: Context,
    guild_id: GuildId,
    muted_role: String,
}

impl SerenityPlatform {

    pub fn new(ctx: Context, guild_id: GuildId, muted_role: String) -> SerenityPlatform {
        SerenityPlatform { ctx, guild_id, muted_role }
    }

    async fn owner_id(&self) -> PlatformResult<UserId> {
        let cached = self.guild_id.to_guild_cached(&self.ctx.cache).map(|guild| guild.owner_id);
        if let Some(owner_id) = cached {
            return Ok(owner_id);
        }
        let guild = self.guild_id.to_partial_guild(&self.ctx).await.map_err(classify)?;
        Ok(guild.owner_id)
    }

    /// Rank is the position of the member's highest role.
    pub async fn guild_user(&self, member: &Member) -> PlatformResult<GuildUser> {
        let roles = self.guild_id.roles(&self.ctx).await.map_err(classify)?;
        let rank = member.roles.iter()
            .filter_map(|role| roles.get(role))
            .map(|role| role.position)
            .max()
            .unwrap_or(0);

        let user = GuildUser::new(member.user.id, member.display_name(), rank);
        match self.owner_id().await? == member.user.id {
            true  => Ok(user.owner()),
            false => Ok(user),
        }
    }

    async fn muted_role_id(&self) -> PlatformResult<RoleId> {
        let roles = self.guild_id.roles(&self.ctx).await.map_err(classify)?;
        roles.values()
            .find(|role| role.name.eq_ignore_ascii_case(&self.muted_role))
            .map(|role| role.id)
            .ok_or_else(|| PlatformError::NotFound(format!("role `{}`", self.muted_role)))
    }

    async fn find_member(&self, token: &str) -> PlatformResult<Option<GuildUser>> {
        if let Some(id) = parse_user_id(token) {
            return match self.guild_id.member(&self.ctx, id).await {
                Ok(member) => Ok(Some(self.guild_user(&member).await?)),
                Err(why)   => not_found_as_none(Err(classify(why))),
            };
        }

        let members = self.guild_id.search_members(&self.ctx, token, Some(10)).await.map_err(classify)?;
        let found = members.iter().find(|member| {
            member.user.name.eq_ignore_ascii_case(token)
                || member.display_name().eq_ignore_ascii_case(token)
        });
        match found {
            Some(member) => Ok(Some(self.guild_user(member).await?)),
            None         => Ok(None),
        }
    }

    async fn find_user(&self, token: &str) -> PlatformResult<Option<GuildUser>> {
        if let Some(user) = self.find_member(token).await? {
            return Ok(Some(user));
        }

        let id = parse_user_id(token);
        let bans = self.guild_id.bans(&self.ctx, None, None).await.map_err(classify)?;
        let banned = bans.into_iter().find(|ban| {
            Some(ban.user.id) == id || ban.user.name.eq_ignore_ascii_case(token)
        });
        if let Some(ban) = banned {
            return Ok(Some(GuildUser::new(ban.user.id, ban.user.name, 0)));
        }

        match id {
            Some(id) => not_found_as_none(match id.to_user(&self.ctx).await {
                Ok(user) => Ok(Some(GuildUser::new(user.id, user.name, 0))),
                Err(why) => Err(classify(why)),
            }),
            None => Ok(None),
        }
    }

    async fn edit(&self, target: &GuildUser, builder: EditMember<'_>) -> PlatformResult<()> {
        self.guild_id.edit_member(&self.ctx, target.id, builder).await
            .map(|_| ())
            .map_err(classify)
    }

    async fn fetch_history(&self, channel: ChannelId, before: Option<MessageId>, limit: usize) -> PlatformResult<Vec<HistoryMessage>> {
        let mut collected = Vec::new();
        let mut cursor = before;

        while collected.len() < limit {
            let page = (limit - collected.len()).min(PAGE_SIZE);
            let mut builder = GetMessages::new().limit(page as u8);
            if let Some(cursor) = cursor {
                builder = builder.before(cursor);
            }

            let messages = channel.messages(&self.ctx, builder).await.map_err(classify)?;
            let exhausted = messages.len() < page;
            cursor = messages.last().map(|message| message.id);
            collected.extend(messages.iter().map(history_entry));

            if exhausted || cursor.is_none() {
                break;
            }
        }
        Ok(collected)
    }

    async fn purge(&self, channel: ChannelId, messages: Vec<MessageId>) -> PlatformResult<()> {
        let (recent, old) = split_by_age(messages, Timestamp::now().unix_timestamp());
        for chunk in recent.chunks(PAGE_SIZE) {
            match chunk {
                [single] => channel.delete_message(&self.ctx, *single).await,
                _        => channel.delete_messages(&self.ctx, chunk).await,
            }.map_err(classify)?;
        }
        for message in old {
            channel.delete_message(&self.ctx, message).await.map_err(classify)?;
        }
        Ok(())
    }

}

impl ModerationPlatform for SerenityPlatform {

    fn resolve_member<'a>(&'a self, token: &'a str) -> BoxedFuture<'a, PlatformResult<Option<GuildUser>>> {
        Box::pin(self.find_member(token))
    }

    fn resolve_user<'a>(&'a self, token: &'a str) -> BoxedFuture<'a, PlatformResult<Option<GuildUser>>> {
        Box::pin(self.find_user(token))
    }

    fn add_muted_role<'a>(&'a self, target: &'a GuildUser, reason: Option<&'a str>) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(async move {
            let role = self.muted_role_id().await?;
            self.ctx.http.add_member_role(self.guild_id, target.id, role, reason).await.map_err(classify)
        })
    }

    fn remove_muted_role<'a>(&'a self, target: &'a GuildUser) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(async move {
            let role = self.muted_role_id().await?;
            self.ctx.http.remove_member_role(self.guild_id, target.id, role, None).await.map_err(classify)
        })
    }

    fn set_timeout<'a>(&'a self, target: &'a GuildUser, until: Option<i64>, reason: Option<&'a str>) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(async move {
            let mut builder = match until {
                Some(until) => {
                    let until = Timestamp::from_unix_timestamp(until)
                        .map_err(|why| PlatformError::Http(why.to_string()))?;
                    EditMember::new().disable_communication_until(until.to_string())
                }
                None => EditMember::new().enable_communication(),
            };
            if let Some(reason) = reason {
                builder = builder.audit_log_reason(reason);
            }
            self.edit(target, builder).await
        })
    }

    fn kick<'a>(&'a self, target: &'a GuildUser, reason: Option<&'a str>) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(async move {
            match reason {
                Some(reason) => self.guild_id.kick_with_reason(&self.ctx, target.id, reason).await,
                None         => self.guild_id.kick(&self.ctx, target.id).await,
            }.map_err(classify)
        })
    }

    fn ban<'a>(&'a self, target: &'a GuildUser, reason: Option<&'a str>, delete_message_seconds: u64) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(async move {
            // the gateway only accepts whole days, 7 at most
            let days = (delete_message_seconds / 86400).min(7) as u8;
            match reason {
                Some(reason) => self.guild_id.ban_with_reason(&self.ctx, target.id, days, reason).await,
                None         => self.guild_id.ban(&self.ctx, target.id, days).await,
            }.map_err(classify)
        })
    }

    fn unban<'a>(&'a self, target: &'a GuildUser, reason: Option<&'a str>) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(async move {
            self.ctx.http.remove_ban(self.guild_id, target.id, reason).await.map_err(classify)
        })
    }

    fn edit_nickname<'a>(&'a self, target: &'a GuildUser, nickname: &'a str) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(self.edit(target, EditMember::new().nickname(nickname)))
    }

    fn text_channels<'a>(&'a self) -> BoxedFuture<'a, PlatformResult<Vec<ChannelId>>> {
        Box::pin(async move {
            let channels = self.guild_id.channels(&self.ctx).await.map_err(classify)?;
            Ok(channels.into_values()
                .filter(|channel| channel.kind == ChannelType::Text)
                .map(|channel| channel.id)
                .collect())
        })
    }

    fn history<'a>(&'a self, channel: ChannelId, before: Option<MessageId>, limit: usize) -> BoxedFuture<'a, PlatformResult<Vec<HistoryMessage>>> {
        Box::pin(self.fetch_history(channel, before, limit))
    }

    fn delete_messages<'a>(&'a self, channel: ChannelId, messages: Vec<MessageId>) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(self.purge(channel, messages))
    }

    fn notify<'a>(&'a self, target: &'a GuildUser, content: String) -> BoxedFuture<'a, PlatformResult<()>> {
        Box::pin(async move {
            let channel = target.id.create_dm_channel(&self.ctx).await.map_err(classify)?;
            channel.send_message(&self.ctx, CreateMessage::new().content(content)).await
                .map(|_| ())
                .map_err(classify)
        })
    }

}
