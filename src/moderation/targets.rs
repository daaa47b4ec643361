
use crate::moderation::error::ModerationError;
use crate::moderation::hierarchy::{is_permitted, GuildUser};
use crate::moderation::platform::{ModerationPlatform, PlatformError};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Current guild members only.
    Member,
    /// Any user, e.g. somebody who is banned.
    User,
}

pub fn split_targets(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|token| token.trim().to_string())
        .collect()
}

/// Walks a target list in order, resolving and permission-checking one entry
/// per call.
///
/// The first unresolvable or forbidden entry ends the walk. Callers apply their
/// side effect between calls, so anything done for earlier entries stays done
/// when a later one fails.
pub struct TargetResolver<'a, P: ModerationPlatform + ?Sized> {
    platform: &'a P,
    actor: &'a GuildUser,
    lookup: Lookup,
    tokens: Vec<String>,
    position: usize,
    failed: bool,
}

impl<'a, P: ModerationPlatform + ?Sized> TargetResolver<'a, P> {

    pub fn new(platform: &'a P, actor: &'a GuildUser, tokens: Vec<String>, lookup: Lookup) -> Self {
        TargetResolver {
            platform,
            actor,
            lookup,
            tokens,
            position: 0,
            failed: false,
        }
    }

    pub async fn next_target(&mut self) -> Option<Result<GuildUser, ModerationError>> {
        if self.failed || self.position >= self.tokens.len() {
            return None;
        }
        let index = self.position;
        self.position += 1;

        let resolved = self.resolve_token(index).await;
        if resolved.is_err() {
            self.failed = true;
        }
        Some(resolved)
    }

    async fn resolve_token(&self, index: usize) -> Result<GuildUser, ModerationError> {
        let token = &self.tokens[index];
        let found = match (token.is_empty(), self.lookup) {
            (true, _)              => Ok(None),
            (false, Lookup::Member) => self.platform.resolve_member(token).await,
            (false, Lookup::User)   => self.platform.resolve_user(token).await,
        };

        let target = match found {
            Ok(Some(target)) => target,
            Ok(None) | Err(PlatformError::NotFound(_)) => {
                return Err(ModerationError::ResolutionFailed { index, token: token.clone() });
            }
            Err(why) => return Err(ModerationError::Platform(why)),
        };

        if !is_permitted(self.actor, &target) {
            return Err(ModerationError::PermissionDenied { index, target });
        }
        Ok(target)
    }

}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderation::testing::*;

    #[test]
    fn splitting_trims_entries() {
        assert_eq!(split_targets("<@1>, bob ,carol"), vec!["<@1>", "bob", "carol"]);
        assert_eq!(split_targets(""), vec![""]);
        assert_eq!(split_targets("a,,b"), vec!["a", "", "b"]);
    }

    #[tokio::test]
    async fn resolves_in_order() {
        let platform = RecordingPlatform::new()
            .with_member(member(2, "alice", 1))
            .with_member(member(3, "bob", 2));
        let actor = member(1, "mod", 5);
        let mut resolver = TargetResolver::new(&platform, &actor, split_targets("bob, <@2>"), Lookup::Member);

        assert_eq!(resolver.next_target().await.unwrap().unwrap().name, "bob");
        assert_eq!(resolver.next_target().await.unwrap().unwrap().name, "alice");
        assert!(resolver.next_target().await.is_none());
    }

    #[tokio::test]
    async fn stops_at_first_unknown_token() {
        let platform = RecordingPlatform::new()
            .with_member(member(2, "alice", 1));
        let actor = member(1, "mod", 5);
        let mut resolver = TargetResolver::new(&platform, &actor, split_targets("ghost, alice"), Lookup::Member);

        match resolver.next_target().await {
            Some(Err(ModerationError::ResolutionFailed { index: 0, token })) => assert_eq!(token, "ghost"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(resolver.next_target().await.is_none());
        assert_eq!(platform.lookups(), vec!["ghost".to_string()]);
    }

    #[tokio::test]
    async fn stops_at_first_forbidden_target() {
        let platform = RecordingPlatform::new()
            .with_member(member(2, "peer", 5))
            .with_member(member(3, "junior", 1));
        let actor = member(1, "mod", 5);
        let mut resolver = TargetResolver::new(&platform, &actor, split_targets("peer,junior"), Lookup::Member);

        match resolver.next_target().await {
            Some(Err(ModerationError::PermissionDenied { index: 0, target })) => assert_eq!(target.name, "peer"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(resolver.next_target().await.is_none());
    }

    #[tokio::test]
    async fn banned_users_need_user_lookup() {
        let platform = RecordingPlatform::new()
            .with_banned(member(4, "gone", 0));
        let actor = member(1, "mod", 5);

        let mut members = TargetResolver::new(&platform, &actor, split_targets("gone"), Lookup::Member);
        assert!(matches!(members.next_target().await, Some(Err(ModerationError::ResolutionFailed { .. }))));

        let mut users = TargetResolver::new(&platform, &actor, split_targets("gone"), Lookup::User);
        assert_eq!(users.next_target().await.unwrap().unwrap().id, member(4, "gone", 0).id);
    }
}
