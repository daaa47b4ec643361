
pub mod command_manager;

pub mod command;
pub use command::Command;

// ---- src/commands/moderation/ ---- //

pub mod moderation;

pub use moderation::nick::NicknameCommand;
pub use moderation::purge::PurgeCommand;
pub use moderation::mute::MuteCommand;
pub use moderation::unmute::UnmuteCommand;
pub use moderation::tempmute::TempmuteCommand;
pub use moderation::kick::KickCommand;
pub use moderation::ban::BanCommand;
pub use moderation::unban::UnbanCommand;

// ---- src/commands/games/ ---- //

pub mod games;

pub use games::eightball::EightBallCommand;
pub use games::rps::RpsCommand;

// ---- src/commands/fun/ ---- //

pub mod fun;

pub use fun::content::ContentCommand;
pub use fun::words::WordsCommand;
pub use fun::wikipedia::WikipediaCommand;
pub use fun::image::{ImageCommand, ImageMeme};
pub use fun::insult::InsultCommand;
pub use fun::fake_info::FakeInfoCommand;
