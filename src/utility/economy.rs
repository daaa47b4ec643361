
use serenity::model::id::UserId;
use strum_macros::Display;
use anyhow::anyhow;

use crate::databases::*;
use crate::utility::mixed::BoxedFuture;


#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Account {
    Wallet,
}

/// Credits currency to a user; returns the new balance of that account.
pub trait EconomyService: Send + Sync {
    fn add_currency<'a>(&'a self, user: UserId, amount: i64, account: Account) -> BoxedFuture<'a, anyhow::Result<i64>>;
}

impl BalancesDB {
    fn balance_key(user: UserId, account: Account) -> String {
        format!("{}:{}", user, account)
    }

    /// A user without an entry has 0; a store failure is an error.
    pub async fn balance(&self, user: UserId, account: Account) -> anyhow::Result<i64> {
        let entry = self.try_get(&BalancesDB::balance_key(user, account)).await
            .map_err(|why| anyhow!(why))?;
        match entry {
            Some(entry) => entry.value.parse::<i64>()
                .map_err(|why| anyhow!("corrupt balance for {}: {}", user, why)),
            None => Ok(0)
        }
    }
}

impl EconomyService for BalancesDB {
    fn add_currency<'a>(&'a self, user: UserId, amount: i64, account: Account) -> BoxedFuture<'a, anyhow::Result<i64>> {
        Box::pin(async move {
            self.increment(&BalancesDB::balance_key(user, account), amount).await
                .map_err(|why| anyhow!(why))
        })
    }
}
