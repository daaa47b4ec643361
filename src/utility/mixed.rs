
use serenity::model::id::UserId;
use once_cell::sync::Lazy;
use regex::Regex;

use std::pin::Pin;
use std::future::Future;


pub type BoxedFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub fn string_distance(a: &str, b: &str) -> usize {
    let common = a.chars().zip(b.chars()).filter(|(a, b)| a != b).count();
    common + a.chars().count().abs_diff(b.chars().count())
}

pub struct RegexManager;

impl RegexManager {

    pub fn get_user_regex() -> &'static Regex {
        static USER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:<@!?(\d+)>|(\d{15,21}))$").unwrap());
        &USER
    }

}

/// Accepts `<@id>`, `<@!id>` or a bare snowflake.
pub fn parse_user_id(token: &str) -> Option<UserId> {
    let captures = RegexManager::get_user_regex().captures(token.trim())?;
    let id = captures.get(1).or_else(|| captures.get(2))?
        .as_str()
        .parse::<u64>().ok()?;
    match id {
        0 => None,
        id => Some(UserId::new(id))
    }
}
