//! Transactions: the income and expense events of each user.

mod domain;
mod endpoints;
mod service;

pub use domain::{Description, NewTransaction, Transaction, TransactionForm, parse_date};
pub use endpoints::{
    create_transaction, delete_transaction, get_transaction, list_transactions, update_transaction,
};
pub use service::{TransactionFilter, TransactionService};
