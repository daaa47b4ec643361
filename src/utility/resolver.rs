
use serenity::all::{Cache, CacheHttp, Context, Http};
use serenity::model::prelude::*;

use std::sync::Arc;

use crate::moderation::{GuildUser, SerenityPlatform};
use crate::databases::*;
use crate::utility::traits::Singleton;


#[derive(Clone)]
pub struct Resolver {
    ctx: Context,
    guild_id: Option<GuildId>,
}

impl CacheHttp for Resolver {
    fn http(&self) -> &Http {
        &self.ctx.http
    }
    fn cache(&self) -> Option<&Arc<Cache>> {
        Some(&self.ctx.cache)
    }
}

impl AsRef<Http> for Resolver {
    fn as_ref(&self) -> &Http {
        &self.ctx.http
    }
}

impl Resolver {

    pub fn new(ctx: Context, guild_id: Option<GuildId>) -> Resolver {
        Resolver { ctx, guild_id }
    }

    pub fn ctx(&self) -> &Context {
        &self.ctx
    }

    pub async fn resolve_user(&self, user_id: UserId) -> Option<User> {
        user_id.to_user(self).await.ok()
    }

    pub async fn resolve_member(&self, user: &User) -> Option<Member> {
        let guild_id = self.guild_id?;
        guild_id.member(self, user.id).await.ok()
    }

    pub fn resolve_name(&self, user: &User) -> String {
        user.global_name.clone().unwrap_or_else(|| user.name.clone())
    }

    pub async fn resolve_guild_name(&self) -> String {
        let guild_id = match self.guild_id {
            Some(guild_id) => guild_id,
            None => return "this server".to_string(),
        };
        let cached = guild_id.name(&self.ctx.cache);
        match cached {
            Some(name) => name,
            None => guild_id.to_partial_guild(self).await
                .map(|guild| guild.name)
                .unwrap_or_else(|_| "this server".to_string()),
        }
    }

    /// Permissions from `@everyone` plus every role of the member; owners and admins get all.
    pub async fn resolve_permissions(&self, member: &Member) -> Permissions {
        let roles = match member.guild_id.roles(self).await {
            Ok(roles) => roles,
            Err(_) => return Permissions::empty(),
        };
        let owner = match member.guild_id.to_partial_guild(self).await {
            Ok(guild) => guild.owner_id,
            Err(_) => return Permissions::empty(),
        };
        if owner == member.user.id {
            return Permissions::all();
        }

        let everyone = RoleId::new(member.guild_id.get());
        let permissions = member.roles.iter()
            .chain(std::iter::once(&everyone))
            .filter_map(|role| roles.get(role))
            .fold(Permissions::empty(), |acc, role| acc | role.permissions);

        match permissions.administrator() {
            true  => Permissions::all(),
            false => permissions,
        }
    }

    /// The moderation view of a member; `None` outside of guilds.
    pub async fn resolve_guild_user(&self, member: &Member) -> Option<GuildUser> {
        let platform = self.moderation_platform().await?;
        platform.guild_user(member).await.ok()
    }

    pub async fn moderation_platform(&self) -> Option<SerenityPlatform> {
        let guild_id = self.guild_id?;
        let muted_role = ConfigDB::get_instance().muted_role().await;
        Some(SerenityPlatform::new(self.ctx.clone(), guild_id, muted_role))
    }

}
