//! Route handlers for categories.

use axum::{
    Extension, Json,
    extract::{FromRef, State},
    http::{HeaderName, StatusCode, header::LOCATION},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    AppState, Error, TransactionType, UserID,
    category::{Category, CategoryForm, CategoryService},
    database_id::CategoryId,
    endpoints::{self, format_endpoint},
    extract::{JsonBody, PathParam, QueryParams},
    stores::sqlite::{SQLiteCategoryStore, SQLiteTransactionStore},
};

/// The state needed by the category handlers.
#[derive(Debug, Clone)]
pub struct CategoryState {
    pub category_service: CategoryService<SQLiteCategoryStore, SQLiteTransactionStore>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_service: CategoryService::new(
                state.category_store.clone(),
                state.transaction_store.clone(),
            ),
        }
    }
}

/// The query string for listing categories.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryListQuery {
    /// Only list categories of this type, `income` or `expense`.
    #[serde(rename = "type")]
    pub category_type: Option<String>,
}

/// Handler for listing the categories visible to the user.
pub async fn list_categories(
    State(state): State<CategoryState>,
    Extension(user_id): Extension<UserID>,
    QueryParams(query): QueryParams<CategoryListQuery>,
) -> Result<Json<Vec<Category>>, Error> {
    let category_type = query
        .category_type
        .as_deref()
        .filter(|category_type| !category_type.is_empty())
        .map(str::parse::<TransactionType>)
        .transpose()?;

    state
        .category_service
        .list(user_id, category_type)
        .map(Json)
}

/// Handler for getting a single category.
pub async fn get_category(
    State(state): State<CategoryState>,
    Extension(user_id): Extension<UserID>,
    PathParam(category_id): PathParam<CategoryId>,
) -> Result<Json<Category>, Error> {
    state.category_service.get(user_id, category_id).map(Json)
}

/// Handler for creating a category owned by the user.
pub async fn create_category(
    State(state): State<CategoryState>,
    Extension(user_id): Extension<UserID>,
    JsonBody(form): JsonBody<CategoryForm>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Category>), Error> {
    let category = state.category_service.create(user_id, form)?;
    let location = format_endpoint(endpoints::CATEGORY, category.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(category)))
}

/// Handler for updating a category owned by the user.
pub async fn update_category(
    State(state): State<CategoryState>,
    Extension(user_id): Extension<UserID>,
    PathParam(category_id): PathParam<CategoryId>,
    JsonBody(form): JsonBody<CategoryForm>,
) -> Result<Json<Category>, Error> {
    state
        .category_service
        .update(user_id, category_id, form)
        .map(Json)
}

/// Handler for deleting a category owned by the user.
pub async fn delete_category(
    State(state): State<CategoryState>,
    Extension(user_id): Extension<UserID>,
    PathParam(category_id): PathParam<CategoryId>,
) -> Result<Json<Value>, Error> {
    state.category_service.delete(user_id, category_id)?;

    Ok(Json(json!({ "message": "Category deleted successfully" })))
}
