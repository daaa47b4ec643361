
use std::fmt;

use crate::moderation::duration::DurationError;
use crate::moderation::hierarchy::GuildUser;
use crate::moderation::platform::PlatformError;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationError {
    InvalidDuration(DurationError),
    DurationTooLong(u64),
    InvalidDeletionWindow(DurationError),
    DeletionWindowTooLong(u64),
    PermissionDenied { index: usize, target: GuildUser },
    ResolutionFailed { index: usize, token: String },
    Platform(PlatformError),
}

impl fmt::Display for ModerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModerationError::InvalidDuration(why) =>
                write!(f, "Invalid time! ({})", why),
            ModerationError::DurationTooLong(_) =>
                write!(f, "Timeouts can only be 2 weeks max!"),
            ModerationError::InvalidDeletionWindow(why) =>
                write!(f, "You cannot input invalid numbers. ({})", why),
            ModerationError::DeletionWindowTooLong(_) =>
                write!(f, "You can only delete messages up to 7 days old"),
            ModerationError::PermissionDenied { target, .. } =>
                write!(f, "You cannot moderate users higher than you ({})", target.mention()),
            ModerationError::ResolutionFailed { token, .. } if token.is_empty() =>
                write!(f, "No user given."),
            ModerationError::ResolutionFailed { token, .. } =>
                write!(f, "Could not find a user matching `{}`", token),
            ModerationError::Platform(why) =>
                write!(f, "{}", why),
        }
    }
}

impl std::error::Error for ModerationError {}

impl From<PlatformError> for ModerationError {
    fn from(error: PlatformError) -> ModerationError {
        ModerationError::Platform(error)
    }
}
