use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    response::Json,
    Extension,
};
use medinfo_core::upload::medicine_image_filename;
use medinfo_core::{Envelope, MedicineInput, MedicineListing};
use serde_json::{json, Value};
use std::path::Path as FsPath;
use std::sync::Arc;

use super::{created, ApiJson};
use crate::error::{ApiError, ApiResult};
use crate::session::AdminSession;
use crate::AppState;

/// Multipart field carrying the image
const IMAGE_FIELD: &str = "image";

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::new(err.status(), err.body_text())
    }
}

/// Delete a stored image. Only the file name part of `stored` is used.
async fn remove_image(upload_dir: &FsPath, stored: &str) {
    let Some(name) = FsPath::new(stored).file_name() else {
        return;
    };
    let path = upload_dir.join(name);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed medicine image"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to remove medicine image"),
    }
}

/// GET /admin/medicines
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Envelope<Vec<MedicineListing>>>> {
    Ok(Json(Envelope::ok(state.store.list_medicines()?)))
}

/// POST /admin/medicine
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
    ApiJson(input): ApiJson<MedicineInput>,
) -> ApiResult<Json<Envelope<Value>>> {
    if input.draft.name.trim().is_empty() {
        return Err(ApiError::bad_request("Medicine name is required"));
    }
    let id = state.store.insert_medicine(&input)?;
    tracing::info!(
        admin = %session.email,
        entity = "medicine",
        id,
        illness_id = input.illness_id,
        "Created"
    );
    Ok(Json(created(id, "Medicine added successfully")))
}

/// DELETE /admin/medicine/{id}. Its image file goes too.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Envelope<()>>> {
    let image = state.store.delete_medicine(id)?;
    if let Some(image) = image {
        remove_image(&state.upload_dir, &image).await;
    }
    tracing::info!(admin = %session.email, entity = "medicine", id, "Deleted");
    Ok(Json(Envelope::done("Medicine deleted successfully")))
}

/// POST /admin/medicine/upload-image/{id}
///
/// Stores the `image` field as `med_{id}_{unix_timestamp}.{ext}` in the
/// upload directory and points the medicine at it. A replaced image is
/// deleted; if the database update fails the new file is deleted instead.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> ApiResult<Json<Envelope<Value>>> {
    if state.store.get_medicine(id)?.is_none() {
        return Err(ApiError::not_found("Medicine"));
    }

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let original = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        upload = Some((original, data));
        break;
    }

    let Some((original, data)) = upload else {
        return Err(ApiError::bad_request("No file uploaded"));
    };

    let ext = state.image_policy.check(&original, data.len())?;
    let filename = medicine_image_filename(id, &ext, chrono::Utc::now().timestamp());

    tokio::fs::create_dir_all(&state.upload_dir).await?;
    let path = state.upload_dir.join(&filename);
    tokio::fs::write(&path, &data).await?;

    let previous = match state.store.set_medicine_image(id, &filename) {
        Ok(previous) => previous,
        Err(e) => {
            remove_image(&state.upload_dir, &filename).await;
            return Err(e.into());
        }
    };
    if let Some(previous) = previous
        && previous != filename
    {
        remove_image(&state.upload_dir, &previous).await;
    }

    tracing::info!(
        admin = %session.email,
        entity = "medicine",
        id,
        file = %filename,
        bytes = data.len(),
        "Image uploaded"
    );
    Ok(Json(
        Envelope::ok(json!({ "filename": filename })).with_message("Image uploaded successfully"),
    ))
}
