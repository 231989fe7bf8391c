//! Computes the monthly report and dashboard from the transaction store.

use crate::{
    Error, UserID,
    report::{
        DASHBOARD_BREAKDOWN_LIMIT, DashboardStats, MonthWindow, MonthlyReport,
        RECENT_TRANSACTIONS_LIMIT, aggregation::summarize_categories,
    },
    stores::{TransactionQuery, TransactionStore},
};

/// Aggregates the transactions of a user.
///
/// Nothing is cached, every report reads the live transactions.
#[derive(Debug, Clone)]
pub struct ReportService<T> {
    transactions: T,
}

impl<T> ReportService<T>
where
    T: TransactionStore,
{
    /// Create a report service over a transaction store.
    pub fn new(transactions: T) -> Self {
        Self { transactions }
    }

    /// Income, expenses and the category breakdown of `user_id` in one month.
    pub fn monthly_report(
        &self,
        user_id: UserID,
        window: MonthWindow,
    ) -> Result<MonthlyReport, Error> {
        let totals = self
            .transactions
            .totals(user_id, Some(window.date_range()))?;
        let category_totals =
            self.transactions
                .totals_by_category(user_id, Some(window.date_range()), None)?;

        Ok(MonthlyReport {
            year: window.year(),
            month: window.month(),
            label: window.label(),
            total_income: totals.income,
            total_expense: totals.expense,
            balance: totals.income - totals.expense,
            transaction_count: totals.count,
            category_breakdown: summarize_categories(category_totals, &totals),
        })
    }

    /// All time statistics and the most recent transactions of `user_id`.
    pub fn dashboard(&self, user_id: UserID) -> Result<DashboardStats, Error> {
        let totals = self.transactions.totals(user_id, None)?;
        let category_totals = self.transactions.totals_by_category(
            user_id,
            None,
            Some(DASHBOARD_BREAKDOWN_LIMIT),
        )?;

        let mut recent_query = TransactionQuery::for_user(user_id);
        recent_query.limit = Some(RECENT_TRANSACTIONS_LIMIT);
        let recent_transactions = self.transactions.get_query(&recent_query)?;

        Ok(DashboardStats {
            total_income: totals.income,
            total_expense: totals.expense,
            balance: totals.income - totals.expense,
            transaction_count: totals.count,
            category_breakdown: summarize_categories(category_totals, &totals),
            recent_transactions,
        })
    }
}
