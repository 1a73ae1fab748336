//! Image labelling handler

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::errors::{AppError, AppResult, WebError};
use crate::models::{LabelResponse, UploadedImage};
use crate::web::AppState;

const FILE_FIELD: &str = "file";

/// `POST /label` with a multipart `file` field
pub async fn label_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<LabelResponse>> {
    let mut multipart = multipart.map_err(|e| {
        AppError::validation(format!(
            "Expected a multipart/form-data upload: {}",
            e.body_text()
        ))
    })?;

    let upload = read_upload(&mut multipart, state.max_upload_bytes).await?;
    let response = state.label_service.label(upload).await?;
    Ok(Json(response))
}

/// Pull the first `file` field out of the form; other fields are skipped
async fn read_upload(
    multipart: &mut Multipart,
    max_upload_bytes: usize,
) -> AppResult<UploadedImage> {
    let multipart_error = |e: axum::extract::multipart::MultipartError| -> AppError {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            WebError::PayloadTooLarge {
                max_size: max_upload_bytes,
            }
            .into()
        } else {
            WebError::invalid_request(FILE_FIELD, e.body_text()).into()
        }
    };

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::validation("Uploaded file has no filename"))?;
        let data = field.bytes().await.map_err(multipart_error)?;

        return Ok(UploadedImage::new(file_name, data));
    }

    Err(AppError::validation("No file uploaded"))
}
