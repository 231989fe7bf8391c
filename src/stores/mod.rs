//! Contains traits and implementations for objects that store users,
//! categories and transactions.

mod category;
mod transaction;
mod user;

pub mod sqlite;

pub use category::{CategoryQuery, CategoryStore};
pub use transaction::{CategoryTotal, Totals, TransactionQuery, TransactionStore};
pub use user::UserStore;
