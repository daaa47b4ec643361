
use serenity::builder::{CreateEmbed, CreateMessage};


pub trait Singleton: Sized + Send + Sync + 'static {
    fn get_instance() -> &'static Self;
}

#[macro_export]
macro_rules! impl_singleton {
    ($t:ty) => {
        impl $crate::utility::traits::Singleton for $t {
            fn get_instance() -> &'static Self {
                static INSTANCE: once_cell::sync::Lazy<$t> = once_cell::sync::Lazy::new(|| <$t>::new());
                &INSTANCE
            }
        }
    };
}


pub trait ToMessage {
    fn to_message(&self) -> CreateMessage;
}

impl ToMessage for &str {
    fn to_message(&self) -> CreateMessage {
        CreateMessage::new().content(self.to_string())
    }
}

impl ToMessage for String {
    fn to_message(&self) -> CreateMessage {
        CreateMessage::new().content(self.clone())
    }
}

impl ToMessage for CreateEmbed {
    fn to_message(&self) -> CreateMessage {
        CreateMessage::new().embed(self.clone())
    }
}

impl ToMessage for CreateMessage {
    fn to_message(&self) -> CreateMessage {
        self.clone()
    }
}
