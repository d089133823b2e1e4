/**
 * Post Image Uploads
 *
 * Reads the multipart form of a new post and stores its image under the
 * configured upload directory. Stored images are served back under
 * `/uploads/<file name>`.
 *
 * # Form Fields
 *
 * - `title`, `content` - text
 * - `image` - one file with an `image/...` content type
 *
 * Any other file field is rejected; unknown text fields are ignored.
 */

use std::path::Path;

use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};
use chrono::Utc;
use uuid::Uuid;

use crate::backend::error::BackendError;

/// URL prefix uploaded images are served under
pub const UPLOADS_PREFIX: &str = "/uploads/";

pub const MISSING_IMAGE_MESSAGE: &str = "Please select an image for your post.";
pub const NOT_AN_IMAGE_MESSAGE: &str = "Only image files are allowed.";
pub const UNEXPECTED_FILE_MESSAGE: &str = "Unexpected file field. Please check your form data.";
pub const UPLOAD_FAILED_MESSAGE: &str = "File upload error. Please try again.";

/// Image received with a post, not yet written to disk
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub extension: &'static str,
    pub bytes: Bytes,
}

/// Parsed multipart body of a new post
#[derive(Debug, Default)]
pub struct NewPostForm {
    pub title: String,
    pub content: String,
    pub image: Option<UploadedImage>,
}

/// Message for an image over the size limit
pub fn too_large_message(max_bytes: usize) -> String {
    format!(
        "File size too large. Please select a smaller image (max {}MB).",
        max_bytes.div_ceil(1024 * 1024)
    )
}

/// File extension for an accepted image content type
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    match essence.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/bmp" => Some("bmp"),
        "image/svg+xml" => Some("svg"),
        _ => None,
    }
}

/// Read a new post's form, holding at most `max_image_bytes` of image data
pub async fn read_post_form(mut multipart: Multipart, max_image_bytes: usize) -> Result<NewPostForm, BackendError> {
    let mut form = NewPostForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_image_bytes))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let is_file = field.file_name().is_some();

        match name.as_str() {
            "title" if !is_file => form.title = read_text(field, max_image_bytes).await?,
            "content" if !is_file => form.content = read_text(field, max_image_bytes).await?,
            "image" if form.image.is_none() => {
                form.image = Some(read_image(field, max_image_bytes).await?);
            }
            _ if is_file || name == "image" => {
                tracing::warn!(field = %name, "Rejected unexpected file field");
                return Err(BackendError::bad_request(UNEXPECTED_FILE_MESSAGE));
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: Field<'_>, max_image_bytes: usize) -> Result<String, BackendError> {
    field
        .text()
        .await
        .map_err(|e| multipart_error(e, max_image_bytes))
}

async fn read_image(mut field: Field<'_>, max_bytes: usize) -> Result<UploadedImage, BackendError> {
    let extension = field
        .content_type()
        .and_then(image_extension)
        .ok_or_else(|| {
            tracing::warn!(content_type = ?field.content_type(), "Rejected non-image upload");
            BackendError::bad_request(NOT_AN_IMAGE_MESSAGE)
        })?;

    let mut buffer = BytesMut::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        if buffer.len() + chunk.len() > max_bytes {
            tracing::warn!(max_bytes, "Rejected oversized image");
            return Err(BackendError::bad_request(too_large_message(max_bytes)));
        }
        buffer.extend_from_slice(&chunk);
    }

    Ok(UploadedImage {
        extension,
        bytes: buffer.freeze(),
    })
}

fn multipart_error(err: MultipartError, max_bytes: usize) -> BackendError {
    tracing::warn!("Multipart read failed: {}", err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        BackendError::bad_request(too_large_message(max_bytes))
    } else {
        BackendError::bad_request(UPLOAD_FAILED_MESSAGE)
    }
}

/// Write an image to `upload_dir` and return its public path
pub async fn save_image(upload_dir: &Path, image: &UploadedImage) -> Result<String, BackendError> {
    let file_name = format!(
        "{}-{}.{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        image.extension
    );

    tokio::fs::write(upload_dir.join(&file_name), &image.bytes).await?;
    tracing::debug!(file = %file_name, bytes = image.bytes.len(), "Stored upload");

    Ok(format!("{UPLOADS_PREFIX}{file_name}"))
}

/// Remove a stored image given its public path
///
/// Best effort: failures are logged, never returned. Paths that do not name
/// a plain file directly inside the upload directory are ignored.
pub async fn remove_image(upload_dir: &Path, public_path: &str) {
    let Some(file_name) = stored_file_name(public_path) else {
        tracing::warn!(path = %public_path, "Not removing image outside the upload directory");
        return;
    };

    if let Err(e) = tokio::fs::remove_file(upload_dir.join(file_name)).await {
        tracing::warn!(file = %file_name, "Failed to remove image: {}", e);
    }
}

fn stored_file_name(public_path: &str) -> Option<&str> {
    let name = public_path.strip_prefix(UPLOADS_PREFIX)?;
    let is_plain = !name.is_empty()
        && Path::new(name).file_name().and_then(|n| n.to_str()) == Some(name)
        && name != ".."
        && !name.contains('\\');
    is_plain.then_some(name)
}
