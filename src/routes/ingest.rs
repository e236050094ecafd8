use axum::extract::Multipart;
use axum::http::{header, HeaderMap};
use axum::Json;

use crate::error::AppError;
use crate::pipeline::ingest::{IngestError, IngestOutcome, UploadBuffer, MAX_FILE_BYTES};

const FILE_FIELD: &str = "file";

/// Multipart boundaries, part headers and small extra fields.
const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

/// POST /api/ingest — multipart upload, field `file`
///
/// Mounted without the router-wide body limit: oversized uploads must still
/// get the 5MB message, so the size is enforced here.
pub async fn ingest(
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<IngestOutcome>, AppError> {
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    if declared.is_some_and(|len| len > MAX_FILE_BYTES + MULTIPART_OVERHEAD_BYTES) {
        return Err(upload_error(IngestError::TooLarge));
    }

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let mime = field.content_type().unwrap_or_default().to_string();

        let mut upload = UploadBuffer::new(&mime);
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            if !upload.push(&chunk) {
                break;
            }
        }

        tracing::info!(%file_name, %mime, bytes = upload.size(), "file uploaded");

        return upload.finish(&file_name).map(Json).map_err(upload_error);
    }

    Err(AppError::BadRequest("No file uploaded".into()))
}

fn upload_error(err: IngestError) -> AppError {
    AppError::BadRequest(err.to_string())
}
