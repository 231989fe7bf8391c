//! Monthly reports and dashboard statistics computed from the transactions.

mod aggregation;
mod domain;
mod endpoints;
mod month;
mod service;

pub use domain::{
    CategorySummary, DASHBOARD_BREAKDOWN_LIMIT, DashboardStats, MonthlyReport,
    RECENT_TRANSACTIONS_LIMIT,
};
pub use endpoints::{get_dashboard, get_monthly_report};
pub use month::MonthWindow;
pub use service::ReportService;
