
use serenity::model::id::GuildId;

use crate::databases::database::{Database, DBEntry, DB, Result};
use crate::utility::*;
use crate::impl_singleton;


pub trait DatabaseWrapper: Send + Sync {

    fn get_database(&self) -> &Database;

    fn get_keys<'a>(&'a self) -> BoxedFuture<'a, Result<Vec<String>>> {
        Box::pin(async move {
            self.get_database().get_keys().await
        })
    }

    fn get<'a>(&'a self, key: &'a str) -> BoxedFuture<'a, Result<DBEntry>> {
        Box::pin(async move {
            self.get_database().get(key).await
        })
    }

    fn try_get<'a>(&'a self, key: &'a str) -> BoxedFuture<'a, Result<Option<DBEntry>>> {
        Box::pin(async move {
            self.get_database().try_get(key).await
        })
    }

    fn increment<'a>(&'a self, key: &'a str, amount: i64) -> BoxedFuture<'a, Result<i64>> {
        Box::pin(async move {
            self.get_database().increment(key, amount).await
        })
    }

    fn get_all<'a>(&'a self, key: &'a str) -> BoxedFuture<'a, Result<Vec<DBEntry>>> {
        Box::pin(async move {
            self.get_database().get_all(key).await
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxedFuture<'a, Result<()>> {
        Box::pin(async move {
            self.get_database().set(key, value).await
        })
    }

    fn append<'a>(&'a self, key: &'a str, value: &'a str) -> BoxedFuture<'a, Result<()>> {
        Box::pin(async move {
            self.get_database().append(key, value).await
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> BoxedFuture<'a, Result<()>> {
        Box::pin(async move {
            self.get_database().delete(key).await
        })
    }
}

macro_rules! impl_database_wrapper {
    ($name:ident, $db_type:expr) => {
        pub struct $name {
            database: Database
        }

        impl $name {
            pub fn new() -> Self {
                $name { database: Database::new($db_type) }
            }

            #[allow(unused)]
            pub fn with_database(database: Database) -> Self {
                $name { database }
            }
        }

        impl DatabaseWrapper for $name {
            fn get_database(&self) -> &Database {
                &self.database
            }
        }
    };
}

impl_database_wrapper!(ConfigDB, DB::Config);
impl_database_wrapper!(BalancesDB, DB::Balances);

impl_singleton!(ConfigDB);

impl ConfigDB {

    pub const DEFAULT_PREFIX: &'static str = "!";
    pub const DEFAULT_MUTED_ROLE: &'static str = "Muted";

    pub async fn get_or(&self, key: &str, default: &str) -> String {
        match self.get(key).await {
            Ok(entry) => entry.value,
            Err(_)    => default.to_string()
        }
    }

    pub async fn command_prefix(&self) -> String {
        self.get_or("command_prefix", ConfigDB::DEFAULT_PREFIX).await
    }

    pub async fn muted_role(&self) -> String {
        self.get_or("muted_role", ConfigDB::DEFAULT_MUTED_ROLE).await
    }

    pub async fn color_primary(&self) -> u32 {
        let value = self.get_or("color_primary", "#5865F2").await;
        u32::from_str_radix(value.trim_start_matches('#'), 16).unwrap_or(0x5865F2)
    }

    /// Read on every invocation so console edits apply immediately; unset means ephemeral.
    pub async fn ephemeral_moderation(&self, guild_id: GuildId) -> bool {
        let key = format!("ephemeral_moderation:{}", guild_id);
        match self.get(&key).await {
            Ok(entry) => !matches!(entry.value.to_lowercase().as_str(), "false" | "off" | "0" | "no"),
            Err(_)    => true
        }
    }

}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ephemeral_flag_defaults_on_and_is_read_fresh() {
        let config = ConfigDB::with_database(Database::in_memory(DB::Config));
        let guild = GuildId::new(42);
        assert!(config.ephemeral_moderation(guild).await);

        config.set("ephemeral_moderation:42", "false").await.unwrap();
        assert!(!config.ephemeral_moderation(guild).await);

        config.set("ephemeral_moderation:42", "true").await.unwrap();
        assert!(config.ephemeral_moderation(guild).await);
    }

    #[tokio::test]
    async fn color_falls_back_on_garbage() {
        let config = ConfigDB::with_database(Database::in_memory(DB::Config));
        assert_eq!(config.color_primary().await, 0x5865F2);
        config.set("color_primary", "#ff8200").await.unwrap();
        assert_eq!(config.color_primary().await, 0xff8200);
        config.set("color_primary", "orange").await.unwrap();
        assert_eq!(config.color_primary().await, 0x5865F2);
    }
}
