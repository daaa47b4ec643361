
pub mod database;
pub mod wrappers;

pub use database::Database;
pub use database::DBEntry;
pub use database::DB;
pub use wrappers::DatabaseWrapper;
pub use wrappers::ConfigDB;
pub use wrappers::BalancesDB;
