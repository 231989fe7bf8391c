//! The shapes of the monthly report and dashboard.

use serde::Serialize;

use crate::{category::CategoryName, database_id::CategoryId, transaction::Transaction};

/// The number of most recent transactions shown on the dashboard.
pub const RECENT_TRANSACTIONS_LIMIT: u64 = 5;

/// The largest number of categories in the dashboard breakdown.
pub const DASHBOARD_BREAKDOWN_LIMIT: u64 = 10;

/// The total of one category and its share of all money moved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category_id: CategoryId,
    pub category_name: CategoryName,
    pub category_icon: String,
    pub total_amount: f64,
    pub count: u64,
    /// The share of income plus expenses, 0-100.
    pub percentage: f64,
}

/// Income, expenses and a per category breakdown for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub year: i32,
    /// The month number, 1-12.
    pub month: u8,
    /// A label such as "January 2024".
    pub label: String,
    pub total_income: f64,
    pub total_expense: f64,
    /// Income minus expenses.
    pub balance: f64,
    pub transaction_count: u64,
    /// Every category with transactions in the month, largest total first.
    pub category_breakdown: Vec<CategorySummary>,
}

/// All time statistics plus the latest activity of a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_income: f64,
    pub total_expense: f64,
    /// Income minus expenses.
    pub balance: f64,
    pub transaction_count: u64,
    /// The largest categories, at most [DASHBOARD_BREAKDOWN_LIMIT].
    pub category_breakdown: Vec<CategorySummary>,
    /// The newest transactions, at most [RECENT_TRANSACTIONS_LIMIT].
    pub recent_transactions: Vec<Transaction>,
}
