
use serenity::model::id::UserId;


/// A guild member as the moderation core sees it. Used both for the acting
/// moderator and for every target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildUser {
    pub id: UserId,
    pub name: String,
    /// Position of the highest role; `0` means only `@everyone` or not in the guild.
    pub rank: u16,
    pub is_owner: bool,
}

impl GuildUser {

    pub fn new(id: UserId, name: impl Into<String>, rank: u16) -> GuildUser {
        GuildUser { id, name: name.into(), rank, is_owner: false }
    }

    pub fn owner(mut self) -> GuildUser {
        self.is_owner = true;
        self
    }

    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }

}

/// Equal or higher rank is off limits unless the actor owns the guild.
pub fn is_permitted(actor: &GuildUser, target: &GuildUser) -> bool {
    actor.is_owner || target.rank < actor.rank
}
