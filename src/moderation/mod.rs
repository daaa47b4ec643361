
pub mod duration;
pub mod hierarchy;
pub mod platform;
pub mod error;
pub mod targets;
pub mod pipeline;
pub mod report;
pub mod serenity_platform;

#[cfg(test)]
pub mod testing;

pub use duration::{parse_duration, humanize_duration, DurationError};
pub use hierarchy::{is_permitted, GuildUser};
pub use platform::{ModerationPlatform, PlatformError, PlatformResult, HistoryMessage};
pub use error::ModerationError;
pub use targets::{split_targets, Lookup, TargetResolver};
pub use pipeline::*;
pub use report::{format_report, format_failure, ModerationReply};
pub use serenity_platform::SerenityPlatform;
