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
pub struct SkillPayload {
    name: String,
}

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let skills = state
        .services
        .skill_service
        .list_with_employee_count()
        .await?;
    Ok(Json(json!({ "skills": skills })))
}

pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let skill = state.services.skill_service.get_with_employees(id).await?;
    Ok(Json(json!({ "skill": skill })))
}

pub async fn store(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SkillPayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let skill = state.services.skill_service.create(&payload.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "skill": skill,
            "message": "Skill created successfully.",
        })),
    ))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<SkillPayload>,
) -> Result<Json<Value>, ApiError> {
    let skill = state.services.skill_service.update(id, &payload.name).await?;
    Ok(Json(json!({
        "skill": skill,
        "message": "Skill updated successfully.",
    })))
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    match state.services.skill_service.delete(id).await {
        Ok(()) => Ok(Json(json!({ "message": "Skill deleted successfully." }))),
        Err(ServiceError::Conflict) => Err(ApiError::conflict(
            "Cannot delete skill assigned to employees.",
        )),
        Err(err) => Err(err.into()),
    }
}
