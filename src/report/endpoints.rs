//! Route handlers for the monthly report and dashboard.

use axum::{
    Extension, Json,
    extract::{FromRef, State},
};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error, UserID,
    extract::QueryParams,
    report::{DashboardStats, MonthWindow, MonthlyReport, ReportService},
    stores::sqlite::SQLiteTransactionStore,
    timezone::get_local_offset,
};

/// The state needed by the report handlers.
#[derive(Debug, Clone)]
pub struct ReportState {
    pub report_service: ReportService<SQLiteTransactionStore>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            report_service: ReportService::new(state.transaction_store.clone()),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query string for the monthly report. Missing parts default to the
/// current year and month in the server's timezone.
#[derive(Debug, Default, Deserialize)]
pub struct MonthlyReportQuery {
    pub year: Option<i32>,
    pub month: Option<u8>,
}

/// Handler for the income and expenses of one month.
pub async fn get_monthly_report(
    State(state): State<ReportState>,
    Extension(user_id): Extension<UserID>,
    QueryParams(query): QueryParams<MonthlyReportQuery>,
) -> Result<Json<MonthlyReport>, Error> {
    let local_offset = get_local_offset(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezone(state.local_timezone.clone()))?;
    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();
    let window = MonthWindow::resolve(query.year, query.month, today)?;

    state
        .report_service
        .monthly_report(user_id, window)
        .map(Json)
}

/// Handler for the all time statistics of the user.
pub async fn get_dashboard(
    State(state): State<ReportState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<DashboardStats>, Error> {
    state.report_service.dashboard(user_id).map(Json)
}
