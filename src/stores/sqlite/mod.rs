//! SQLite implementations of the store traits.
//!
//! Every store shares one connection behind an `Arc<Mutex<_>>`, so cloning a
//! store is cheap and all clones see the same database.

mod category;
mod transaction;
mod user;

pub use category::SQLiteCategoryStore;
pub use transaction::SQLiteTransactionStore;
pub use user::SQLiteUserStore;
