use axum::{
    Extension, Json,
    extract::{Multipart, Path},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use std::sync::Arc;

use super::mime::{attachment_disposition, content_type_for};
use super::protocol::{UPLOAD_FIELD, UploadResponse};
use super::service::Coordinator;
use super::types::{FileId, FileRecord};
use crate::error::ClusterError;

const UNNAMED_UPLOAD: &str = "unnamed";

pub async fn handle_upload(
    Extension(coordinator): Extension<Arc<Coordinator>>,
    mut multipart: Multipart,
) -> Response {
    let (file_name, data) = match read_upload_field(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            return (StatusCode::BAD_REQUEST, "No file uploaded".to_string()).into_response();
        }
        Err(e) => {
            // Oversized bodies surface here too and carry 413.
            tracing::warn!("Rejected upload: {}", e);
            return (e.status(), format!("Rejected upload: {}", e.body_text())).into_response();
        }
    };

    match coordinator.upload(&file_name, data).await {
        Ok(record) => (
            StatusCode::OK,
            Json(UploadResponse {
                file_id: record.file_id,
                file_name: record.file_name,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Upload error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Upload error: {}", e),
            )
                .into_response()
        }
    }
}

async fn read_upload_field(
    multipart: &mut Multipart,
) -> Result<Option<(String, Bytes)>, axum::extract::multipart::MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNNAMED_UPLOAD)
            .to_string();
        let data = field.bytes().await?;
        return Ok(Some((file_name, data)));
    }
    Ok(None)
}

pub async fn handle_retrieve(
    Extension(coordinator): Extension<Arc<Coordinator>>,
    Path(file_id): Path<String>,
) -> Response {
    let file_id = FileId(file_id);

    match coordinator.retrieve(&file_id).await {
        Ok((record, data)) => {
            tracing::info!(
                "Serving {} ({} bytes) for {}",
                record.file_name,
                data.len(),
                file_id
            );
            (
                StatusCode::OK,
                [
                    (
                        header::CONTENT_TYPE,
                        content_type_for(&record.file_name).to_string(),
                    ),
                    (
                        header::CONTENT_DISPOSITION,
                        attachment_disposition(&record.file_name),
                    ),
                ],
                data,
            )
                .into_response()
        }
        Err(ClusterError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, "File not found".to_string()).into_response()
        }
        Err(e) => {
            tracing::error!("Retrieval error for {}: {}", file_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Retrieval error: {}", e),
            )
                .into_response()
        }
    }
}

pub async fn handle_list_files(
    Extension(coordinator): Extension<Arc<Coordinator>>,
) -> Json<Vec<FileRecord>> {
    Json(coordinator.metadata().list())
}
