//! Customer endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::db::repos::{Customer, CustomerRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiQuery};
use crate::http::server::AppState;
use crate::models::{customer, CustomerInput, CustomerPatch, Paginated, PaginationParams};

/// POST /customer
async fn create_customer(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<CustomerInput>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let customer = input.validate()?;
    let created = CustomerRepo::new(&state.pool).create(customer).await?;

    tracing::info!(id = %created.id, "customer created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /customer/array - all rows or none
async fn create_customers(
    State(state): State<Arc<AppState>>,
    ApiJson(inputs): ApiJson<Vec<CustomerInput>>,
) -> Result<(StatusCode, Json<Vec<Customer>>), ApiError> {
    let customers = customer::validate_batch(inputs)?;
    let created = CustomerRepo::new(&state.pool).create_many(&customers).await?;

    tracing::info!(count = created.len(), "customers created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /customer
async fn list_customers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers = CustomerRepo::new(&state.pool).list_all().await?;
    Ok(Json(customers))
}

/// GET /customer/pagination?page=&per_page=&search=
async fn paginate_customers(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<Paginated<Customer>>, ApiError> {
    let page = CustomerRepo::new(&state.pool)
        .list(params.pagination(), params.search())
        .await?;

    Ok(Json(page))
}

/// GET /customer/{id}
async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    let customer = CustomerRepo::new(&state.pool).get(&id).await?;
    Ok(Json(customer))
}

/// PUT /customer/{id}
async fn update_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<CustomerPatch>,
) -> Result<Json<Customer>, ApiError> {
    let changes = patch.validate()?;
    let updated = CustomerRepo::new(&state.pool).update(&id, changes).await?;

    tracing::info!(id = %updated.id, "customer updated");
    Ok(Json(updated))
}

/// DELETE /customer/{id}
async fn delete_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    CustomerRepo::new(&state.pool).delete(&id).await?;

    tracing::info!(id = %id, "customer deleted");
    Ok(Json(json!({ "message": "Customer deleted successfully" })))
}

/// Customer routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/customer", get(list_customers).post(create_customer))
        .route("/customer/array", post(create_customers))
        .route("/customer/pagination", get(paginate_customers))
        .route(
            "/customer/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}
