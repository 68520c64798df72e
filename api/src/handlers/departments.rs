use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use common::services::ServiceError;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct DepartmentPayload {
    name: String,
}

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let departments = state
        .services
        .department_service
        .list_with_employee_count()
        .await?;
    Ok(Json(json!({ "departments": departments })))
}

pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let department = state.services.department_service.get_with_employees(id).await?;
    Ok(Json(json!({ "department": department })))
}

pub async fn store(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DepartmentPayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let department = state.services.department_service.create(&payload.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "department": department,
            "message": "Department created successfully.",
        })),
    ))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<DepartmentPayload>,
) -> Result<Json<Value>, ApiError> {
    let department = state
        .services
        .department_service
        .update(id, &payload.name)
        .await?;
    Ok(Json(json!({
        "department": department,
        "message": "Department updated successfully.",
    })))
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    match state.services.department_service.delete(id).await {
        Ok(()) => Ok(Json(json!({ "message": "Department deleted successfully." }))),
        Err(ServiceError::Conflict) => Err(ApiError::conflict(
            "Cannot delete department with existing employees.",
        )),
        Err(err) => Err(err.into()),
    }
}
