use crate::{error::AppError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use core_types::{DeleteConfirmation, NewStudent, StudentPatch, StudentRecord};
use std::sync::Arc;
use uuid::Uuid;

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId(raw.to_string()))
}

/// # GET /students
/// Returns every record in store order. No filtering, no pagination.
pub async fn list_students(State(state): State<Arc<AppState>>) -> Result<Json<Vec<StudentRecord>>, AppError> {
    let students = state.store.list_students().await.map_err(AppError::Fetch)?;
    Ok(Json(students))
}

/// # POST /students
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> Result<Json<StudentRecord>, AppError> {
    let Json(new) = payload?;
    let created = state.store.create_student(new).await.map_err(AppError::Store)?;
    tracing::info!(id = %created.id, roll_no = %created.roll_no, "Student created.");
    Ok(Json(created))
}

/// # PUT /students/:id
/// Responds with the updated record, or `null` when the id is unknown.
pub async fn update_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<StudentPatch>, JsonRejection>,
) -> Result<Json<Option<StudentRecord>>, AppError> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    let updated = state.store.update_student(id, patch).await.map_err(AppError::Store)?;
    match &updated {
        Some(_) => tracing::info!(%id, "Student updated."),
        None => tracing::debug!(%id, "Update matched no student."),
    }
    Ok(Json(updated))
}

/// # DELETE /students/:id
/// Confirms the deletion whether or not the id existed.
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteConfirmation>, AppError> {
    let id = parse_id(&id)?;
    let removed = state.store.delete_student(id).await.map_err(AppError::Store)?;
    tracing::info!(%id, removed, "Student delete processed.");
    Ok(Json(DeleteConfirmation::student_deleted()))
}
