//! Task route handlers.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use ftrack_models::{ImageRecord, Task, TaskId};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Envelope wrapping every successful response.
#[derive(Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Liveness probe, open to unauthenticated callers.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `POST /api/tasks` - create an empty task.
pub async fn create_task(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<DataResponse<TaskId>>)> {
    let task_id = state.service.create_task().await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: task_id })))
}

/// `GET /api/tasks/:id` - task with images and faces nested in.
pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<TaskId>,
) -> ApiResult<Json<DataResponse<Task>>> {
    let task = state.service.get_task(task_id).await?;
    Ok(Json(DataResponse { data: task }))
}

/// `DELETE /api/tasks/:id`
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<TaskId>,
) -> ApiResult<Json<DataResponse<&'static str>>> {
    state.service.delete_task(task_id).await?;
    Ok(Json(DataResponse {
        data: "task was successfully deleted",
    }))
}

/// `POST /api/tasks/:id/images` - attach one uploaded JPEG.
///
/// Expects a multipart field named `image`; its file name becomes the
/// image name, which must be unique within the task.
pub async fn add_image(
    State(state): State<AppState>,
    Path(task_id): Path<TaskId>,
    mut multipart: Multipart,
) -> ApiResult<Json<DataResponse<ImageRecord>>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        if field.content_type() != Some("image/jpeg") {
            return Err(ApiError::bad_request(
                "Only image/jpeg uploads are accepted",
            ));
        }

        let name = field
            .file_name()
            .map(str::to_owned)
            .ok_or_else(|| ApiError::bad_request("Uploaded image is missing a file name"))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        let record = state.service.add_image(task_id, &name, &bytes).await?;
        info!(task_id, image_id = record.id, "Image attached to task");
        return Ok(Json(DataResponse { data: record }));
    }

    Err(ApiError::bad_request("Multipart field \"image\" is required"))
}

/// `POST /api/tasks/:id/process` - launch a detached processing run.
///
/// Responds as soon as the run is launched; poll the task to observe
/// the outcome.
pub async fn process_task(
    State(state): State<AppState>,
    Path(task_id): Path<TaskId>,
) -> ApiResult<(StatusCode, Json<DataResponse<&'static str>>)> {
    state.service.start_processing(task_id).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: "task is being processed",
        }),
    ))
}
