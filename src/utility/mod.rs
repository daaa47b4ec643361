
pub mod traits;
pub mod mixed;
pub mod logger;
pub mod resolver;
pub mod message_manager;
pub mod usage_builder;
pub mod economy;
pub mod content;
pub mod image_source;

#[cfg(any(test, feature = "db_interface"))]
pub mod console;

pub use traits::*;
pub use mixed::*;
pub use logger::Logger;
pub use resolver::Resolver;
pub use message_manager::MessageManager;
pub use usage_builder::{UsageBuilder, CommandType};
pub use economy::{Account, EconomyService};
pub use content::*;
pub use image_source::{ImageSource, AmbiguousImageSource};
