//! Student HTTP Routes
//!
//! `/students` collection endpoints backed by [`StudentService`].

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::model::{StudentDraft, StudentRecord};

use super::errors::{ApiError, ApiResult};
use super::service::{MessageResponse, StudentService};

/// Create student routes
pub fn student_routes(service: StudentService) -> Router {
    Router::new()
        .route("/students", get(list_handler).post(create_handler))
        .route("/students/{id}", put(update_handler).delete(delete_handler))
        .with_state(service)
}

/// Unparseable bodies and wrongly-typed fields are a 400, not the extractor's default
fn body(payload: Result<Json<StudentDraft>, JsonRejection>) -> ApiResult<StudentDraft> {
    payload
        .map(|Json(draft)| draft)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

async fn create_handler(
    State(service): State<StudentService>,
    payload: Result<Json<StudentDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StudentRecord>)> {
    let record = service.create(body(payload)?)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_handler(
    State(service): State<StudentService>,
) -> ApiResult<Json<Vec<StudentRecord>>> {
    Ok(Json(service.list()?))
}

async fn update_handler(
    State(service): State<StudentService>,
    Path(id): Path<String>,
    payload: Result<Json<StudentDraft>, JsonRejection>,
) -> ApiResult<Json<StudentRecord>> {
    Ok(Json(service.update(&id, body(payload)?)?))
}

async fn delete_handler(
    State(service): State<StudentService>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    Ok(Json(service.delete(&id)?))
}
