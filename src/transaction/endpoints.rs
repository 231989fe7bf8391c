//! Route handlers for transactions.

use axum::{
    Extension, Json,
    extract::{FromRef, State},
    http::{HeaderName, StatusCode, header::LOCATION},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    AppState, Error, TransactionType, UserID,
    database_id::{CategoryId, TransactionId},
    endpoints::{self, format_endpoint},
    extract::{JsonBody, PathParam, QueryParams},
    pagination::{Page, PaginationConfig},
    stores::sqlite::{SQLiteCategoryStore, SQLiteTransactionStore},
    transaction::{Transaction, TransactionFilter, TransactionForm, TransactionService, parse_date},
};

/// The state needed by the transaction handlers.
#[derive(Debug, Clone)]
pub struct TransactionState {
    pub transaction_service: TransactionService<SQLiteTransactionStore, SQLiteCategoryStore>,
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_service: TransactionService::new(
                state.transaction_store.clone(),
                state.category_store.clone(),
            ),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query string for listing transactions.
///
/// Empty text parameters are treated the same as missing ones.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub category_id: Option<CategoryId>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}

impl TransactionListQuery {
    fn filter(&self) -> Result<TransactionFilter, Error> {
        Ok(TransactionFilter {
            start_date: non_empty(&self.start_date).map(parse_date).transpose()?,
            end_date: non_empty(&self.end_date).map(parse_date).transpose()?,
            transaction_type: non_empty(&self.transaction_type)
                .map(str::parse::<TransactionType>)
                .transpose()?,
            category_id: self.category_id,
        })
    }
}

/// Handler for listing one page of the user's transactions.
pub async fn list_transactions(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    QueryParams(query): QueryParams<TransactionListQuery>,
) -> Result<Json<Page<Transaction>>, Error> {
    let filter = query.filter()?;
    let page = state.pagination_config.resolve(query.page, query.limit);

    state
        .transaction_service
        .list(user_id, filter, page)
        .map(Json)
}

/// Handler for getting a single transaction.
pub async fn get_transaction(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    PathParam(transaction_id): PathParam<TransactionId>,
) -> Result<Json<Transaction>, Error> {
    state
        .transaction_service
        .get(user_id, transaction_id)
        .map(Json)
}

/// Handler for recording a new transaction.
pub async fn create_transaction(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    JsonBody(form): JsonBody<TransactionForm>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Transaction>), Error> {
    let transaction = state.transaction_service.create(user_id, form)?;
    let location = format_endpoint(endpoints::TRANSACTION, transaction.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(transaction)))
}

/// Handler for overwriting a transaction.
pub async fn update_transaction(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    PathParam(transaction_id): PathParam<TransactionId>,
    JsonBody(form): JsonBody<TransactionForm>,
) -> Result<Json<Transaction>, Error> {
    state
        .transaction_service
        .update(user_id, transaction_id, form)
        .map(Json)
}

/// Handler for deleting a transaction.
pub async fn delete_transaction(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    PathParam(transaction_id): PathParam<TransactionId>,
) -> Result<Json<Value>, Error> {
    state
        .transaction_service
        .delete(user_id, transaction_id)?;

    Ok(Json(json!({ "message": "Transaction deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, TransactionType};

    use super::TransactionListQuery;

    #[test]
    fn empty_parameters_are_ignored() {
        let query = TransactionListQuery {
            start_date: Some(String::new()),
            transaction_type: Some(String::new()),
            ..Default::default()
        };

        let filter = query.filter().unwrap();

        assert_eq!(filter.start_date, None);
        assert_eq!(filter.transaction_type, None);
    }

    #[test]
    fn parameters_are_parsed() {
        let query = TransactionListQuery {
            start_date: Some("2024-01-01".to_owned()),
            end_date: Some("2024-01-31".to_owned()),
            transaction_type: Some("income".to_owned()),
            category_id: Some(4),
            ..Default::default()
        };

        let filter = query.filter().unwrap();

        assert_eq!(filter.start_date, Some(date!(2024 - 01 - 01)));
        assert_eq!(filter.end_date, Some(date!(2024 - 01 - 31)));
        assert_eq!(filter.transaction_type, Some(TransactionType::Income));
        assert_eq!(filter.category_id, Some(4));
    }

    #[test]
    fn invalid_type_is_rejected() {
        let query = TransactionListQuery {
            transaction_type: Some("refund".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            query.filter(),
            Err(Error::InvalidTransactionType("refund".to_owned()))
        );
    }
}
