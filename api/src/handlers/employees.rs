use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use common::services::employees::EmployeeInput;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct EmployeePayload {
    first_name: String,
    last_name: String,
    email: String,
    department_id: i32,
    #[serde(default)]
    skills: Vec<i32>,
}

impl From<EmployeePayload> for EmployeeInput {
    fn from(payload: EmployeePayload) -> Self {
        EmployeeInput {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            department_id: payload.department_id,
            skill_ids: payload.skills,
        }
    }
}

#[derive(Deserialize)]
pub struct IndexParams {
    department_id: Option<i32>,
}

#[derive(Deserialize)]
pub struct CheckEmailPayload {
    email: Option<String>,
    employee_id: Option<i32>,
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IndexParams>,
) -> Result<Json<Value>, ApiError> {
    let employees = state
        .services
        .employee_service
        .list(params.department_id)
        .await?;
    Ok(Json(json!({ "employees": employees })))
}

/// Collaborator bundle for the employee create/edit forms.
pub async fn form_data(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let departments = state.services.department_service.list_all().await?;
    let skills = state.services.skill_service.list_all().await?;
    Ok(Json(json!({ "departments": departments, "skills": skills })))
}

pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let employee = state.services.employee_service.get(id).await?;
    Ok(Json(json!({ "employee": employee })))
}

pub async fn store(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EmployeePayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let employee = state
        .services
        .employee_service
        .create(&payload.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "employee": employee,
            "message": "Employee created successfully.",
        })),
    ))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<EmployeePayload>,
) -> Result<Json<Value>, ApiError> {
    let employee = state
        .services
        .employee_service
        .update(id, &payload.into())
        .await?;
    Ok(Json(json!({
        "employee": employee,
        "message": "Employee updated successfully.",
    })))
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    state.services.employee_service.delete(id).await?;
    Ok(Json(json!({ "message": "Employee deleted successfully." })))
}

/// Availability check used by the employee form. A missing or malformed
/// email is a 422, never a silent "available".
pub async fn check_email(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CheckEmailPayload>,
) -> Result<Json<Value>, ApiError> {
    let email = payload.email.unwrap_or_default();
    let exists = state
        .services
        .employee_service
        .email_exists(&email, payload.employee_id)
        .await?;
    Ok(Json(json!({ "exists": exists })))
}
