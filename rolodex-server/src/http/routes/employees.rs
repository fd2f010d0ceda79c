//! Employee endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::db::repos::{Employee, EmployeeRepo, EmployeeSummary};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiQuery};
use crate::http::server::AppState;
use crate::models::{employee, EmployeeInput, EmployeePatch, Paginated, PaginationParams};

/// POST /employee
async fn create_employee(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<EmployeeInput>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let employee = input.validate()?;
    let created = EmployeeRepo::new(&state.pool).create(employee).await?;

    tracing::info!(id = %created.id, "employee created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /employee/array
async fn create_employees(
    State(state): State<Arc<AppState>>,
    ApiJson(inputs): ApiJson<Vec<EmployeeInput>>,
) -> Result<(StatusCode, Json<Vec<Employee>>), ApiError> {
    let employees = employee::validate_batch(inputs)?;
    let created = EmployeeRepo::new(&state.pool).create_many(&employees).await?;

    tracing::info!(count = created.len(), "employees created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /employee
async fn list_employees(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees = EmployeeRepo::new(&state.pool).list_all().await?;
    Ok(Json(employees))
}

/// GET /employee/pagination?page=&per_page=
async fn paginate_employees(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<Paginated<EmployeeSummary>>, ApiError> {
    let page = EmployeeRepo::new(&state.pool)
        .list(params.pagination())
        .await?;

    Ok(Json(page))
}

/// GET /employee/{id}
async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    let employee = EmployeeRepo::new(&state.pool).get(&id).await?;
    Ok(Json(employee))
}

/// PUT /employee/{id}
async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<EmployeePatch>,
) -> Result<Json<Employee>, ApiError> {
    let updated = EmployeeRepo::new(&state.pool).update(&id, patch).await?;

    tracing::info!(id = %updated.id, "employee updated");
    Ok(Json(updated))
}

/// DELETE /employee/{id}
async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    EmployeeRepo::new(&state.pool).delete(&id).await?;

    tracing::info!(id = %id, "employee deleted");
    Ok(Json(json!({ "message": "Employee deleted successfully" })))
}

/// Employee routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/employee", get(list_employees).post(create_employee))
        .route("/employee/array", post(create_employees))
        .route("/employee/pagination", get(paginate_employees))
        .route(
            "/employee/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}
