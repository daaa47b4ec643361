
use serenity::model::prelude::*;
use serenity::builder::CreateEmbed;
use serenity::all::{CacheHttp, Cache, Http};

use std::collections::HashMap;
use std::time::Duration;
use std::sync::Arc;

use crate::utility::*;
use crate::databases::*;


/// Seconds before a temporary reply removes itself.
pub const TEMPORARY_REPLY_SECONDS: u64 = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMessage {
    pub prefix: Option<String>,
    pub command: Option<String>,
    /// Positional words after the command, parameters excluded.
    pub words: Vec<String>,
    pub parameters: HashMap<String, String>,
}

fn is_parameter_key(word: &str) -> bool {
    word.strip_prefix('-')
        .and_then(|key| key.chars().next())
        .map_or(false, |first| first.is_alphabetic())
}

/// Splits `!cmd a b -key some value -flag` into command, positional words and parameters.
pub fn parse_message(content: &str, prefix: &str) -> ParsedMessage {
    let mut words = content.split_whitespace();
    let mut parsed = ParsedMessage::default();

    let command = words.next()
        .and_then(|first| first.strip_prefix(prefix))
        .filter(|command| !prefix.is_empty() && !command.is_empty());
    match command {
        Some(command) => {
            parsed.prefix = Some(prefix.to_string());
            parsed.command = Some(command.to_lowercase());
        }
        None => {
            parsed.words = content.split_whitespace().map(|word| word.to_string()).collect();
            return parsed;
        }
    }

    let mut key: Option<String> = None;
    for word in words {
        if is_parameter_key(word) {
            let name = word[1..].to_lowercase();
            parsed.parameters.entry(name.clone()).or_default();
            key = Some(name);
            continue;
        }
        match &key {
            Some(key) => {
                let value = parsed.parameters.entry(key.clone()).or_default();
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(word);
            }
            None => parsed.words.push(word.to_string()),
        }
    }
    parsed
}

#[derive(Clone)]
pub struct MessageManager {
    resolver: Resolver,
    raw_message: Message,
    parsed: ParsedMessage,
}

impl CacheHttp for MessageManager {
    fn http(&self) -> &Http {
        self.resolver.http()
    }
    fn cache(&self) -> Option<&Arc<Cache>> {
        self.resolver.cache()
    }
}

impl AsRef<Http> for MessageManager {
    fn as_ref(&self) -> &Http {
        self.resolver.http()
    }
}

impl MessageManager {

    pub async fn new(resolver: Resolver, message: Message) -> MessageManager {
        let prefix = ConfigDB::get_instance().command_prefix().await;
        let parsed = parse_message(&message.content, &prefix);
        MessageManager {
            resolver,
            raw_message: message,
            parsed,
        }
    }

    pub fn is_command(&self) -> bool {
        self.parsed.command.is_some()
    }

    pub fn get_command(&self) -> Option<String> {
        self.parsed.command.clone()
    }

    pub fn get_prefix(&self) -> Option<String> {
        self.parsed.prefix.clone()
    }

    pub fn get_parameter(&self, key: &str) -> Option<String> {
        self.parsed.parameters.get(key)
            .filter(|value| !value.is_empty())
            .cloned()
    }

    pub fn words(&self) -> &[String] {
        &self.parsed.words
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.parsed.words.get(index).map(|word| word.as_str())
    }

    /// Positional words from `starting_from` on, joined by spaces.
    pub fn payload(&self, starting_from: Option<usize>) -> String {
        let first = starting_from.unwrap_or(0).min(self.parsed.words.len());
        self.parsed.words[first..].join(" ").trim().to_string()
    }

    pub fn get_resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn get_author(&self) -> &User {
        &self.raw_message.author
    }

    pub fn get_channel(&self) -> ChannelId {
        self.raw_message.channel_id
    }

    pub fn get_guild(&self) -> Option<GuildId> {
        self.raw_message.guild_id
    }

    pub fn get_message_id(&self) -> MessageId {
        self.raw_message.id
    }

    pub fn get_timestamp(&self) -> i64 {
        self.raw_message.timestamp.unix_timestamp()
    }

    pub fn get_attachments(&self) -> &[Attachment] {
        &self.raw_message.attachments
    }

    pub fn resolve_name(&self) -> String {
        self.resolver.resolve_name(self.get_author())
    }

    pub async fn resolve_member(&self) -> Option<Member> {
        self.resolver.resolve_member(self.get_author()).await
    }

    pub async fn delete(&self) {
        let _ = self.raw_message.delete(&self.resolver).await;
    }

    pub async fn reply(&self, message: impl ToMessage) -> Result<Message, String> {
        let channel = self.get_channel();
        channel.send_message(&self.resolver, message.to_message()).await
            .map_err(|why| format!("Failed to send message: {}", why))
    }

    /// Sends a reply that removes itself after [`TEMPORARY_REPLY_SECONDS`].
    pub async fn reply_temporary(&self, message: impl ToMessage) {
        let sent = self.reply(message).await;
        match sent {
            Ok(sent) => {
                let resolver = self.resolver.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_secs(TEMPORARY_REPLY_SECONDS)).await;
                    let _ = sent.delete(&resolver).await;
                });
            }
            Err(why) => Logger::warn_long("Could not reply", &why),
        }
    }

    pub async fn reply_failure(&self, context: &str) {
        let embed = MessageManager::create_embed(|embed| {
            embed
                .title("❌")
                .description(context)
        }).await;
        self.reply_temporary(embed).await;
    }

    pub async fn create_embed(fn_style: impl FnOnce(CreateEmbed) -> CreateEmbed) -> CreateEmbed {
        let color_primary = ConfigDB::get_instance().color_primary().await;
        fn_style(CreateEmbed::default()).color(color_primary)
    }

}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_messages_are_not_commands() {
        let parsed = parse_message("hello there", "!");
        assert_eq!(parsed.command, None);
        assert_eq!(parsed.words, vec!["hello", "there"]);
        assert!(parse_message("!", "!").command.is_none());
    }

    #[test]
    fn command_words_and_parameters() {
        let parsed = parse_message("!Ban <@1>,bob being rude -delete 1d", "!");
        assert_eq!(parsed.prefix.as_deref(), Some("!"));
        assert_eq!(parsed.command.as_deref(), Some("ban"));
        assert_eq!(parsed.words, vec!["<@1>,bob", "being", "rude"]);
        assert_eq!(parsed.parameters.get("delete").map(|v| v.as_str()), Some("1d"));
    }

    #[test]
    fn parameter_values_span_words() {
        let parsed = parse_message("?rip -url https://a.b/c.png -flag", "?");
        assert_eq!(parsed.parameters.get("url").map(|v| v.as_str()), Some("https://a.b/c.png"));
        assert_eq!(parsed.parameters.get("flag").map(|v| v.as_str()), Some(""));
        assert!(parsed.words.is_empty());
    }

    #[test]
    fn negative_numbers_are_words() {
        let parsed = parse_message("!purge -5", "!");
        assert_eq!(parsed.words, vec!["-5"]);
        assert!(parsed.parameters.is_empty());
    }

    #[test]
    fn longer_prefixes() {
        let parsed = parse_message("kb!joke", "kb!");
        assert_eq!(parsed.command.as_deref(), Some("joke"));
        assert!(parse_message("!joke", "kb!").command.is_none());
    }
}
