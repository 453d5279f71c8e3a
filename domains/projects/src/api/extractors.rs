//! Request body extractor for project submissions
//!
//! Project forms arrive as `multipart/form-data` with an optional
//! `projectBanner` file part. Scalar-only updates may also be sent as JSON
//! or urlencoded bodies.

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use portfolio_common::Error;
use tempfile::NamedTempFile;

use crate::domain::entities::{BannerFile, ProjectFields};

/// Multipart part carrying the banner image
pub const BANNER_FIELD: &str = "projectBanner";

/// Banner bytes spooled to a temp file. The file is removed on drop.
#[derive(Debug)]
struct SpooledBanner {
    file: NamedTempFile,
    size_bytes: u64,
}

/// Parsed project submission: scalar fields plus the optional banner
#[derive(Debug, Default)]
pub struct ProjectForm {
    pub fields: ProjectFields,
    banner: Option<SpooledBanner>,
}

impl ProjectForm {
    /// The spooled banner, if one was attached. Only valid while the form
    /// is alive.
    pub fn banner(&self) -> Option<BannerFile> {
        self.banner
            .as_ref()
            .map(|spooled| BannerFile::new(spooled.file.path(), spooled.size_bytes))
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, Error> {
        let mut form = ProjectForm::default();

        while let Some(field) = multipart.next_field().await.map_err(malformed)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == BANNER_FIELD {
                let bytes = field.bytes().await.map_err(malformed)?;
                form.banner = Some(spool(&bytes).await?);
            } else if ProjectFields::NAMES.contains(&name.as_str()) {
                let value = field.text().await.map_err(malformed)?;
                form.fields.set(&name, value);
            } else {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
        }

        Ok(form)
    }
}

fn malformed(e: axum::extract::multipart::MultipartError) -> Error {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return Error::PayloadTooLarge(e.body_text());
    }
    Error::Validation(format!("Malformed form data: {}", e.body_text()))
}

/// Map a body rejection onto the envelope, keeping 413 for oversized bodies
fn rejected(status: StatusCode, body_text: String) -> Error {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge(body_text)
    } else {
        Error::Validation(body_text)
    }
}

async fn spool(bytes: &[u8]) -> Result<SpooledBanner, Error> {
    let file = NamedTempFile::new()
        .map_err(|e| Error::Internal(format!("Failed to create banner temp file: {}", e)))?;
    tokio::fs::write(file.path(), bytes)
        .await
        .map_err(|e| Error::Internal(format!("Failed to spool banner: {}", e)))?;

    tracing::debug!(path = %file.path().display(), size_bytes = bytes.len(), "Banner spooled");
    Ok(SpooledBanner {
        file,
        size_bytes: bytes.len() as u64,
    })
}

impl<S> FromRequest<S> for ProjectForm
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| rejected(e.status(), e.body_text()))?;
            Self::from_multipart(multipart).await
        } else if content_type.starts_with("application/json") {
            let Json(fields) = Json::<ProjectFields>::from_request(req, state)
                .await
                .map_err(|e| rejected(e.status(), e.body_text()))?;
            Ok(ProjectForm {
                fields,
                banner: None,
            })
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<ProjectFields>::from_request(req, state)
                .await
                .map_err(|e| rejected(e.status(), e.body_text()))?;
            Ok(ProjectForm {
                fields,
                banner: None,
            })
        } else if content_type.is_empty() {
            Ok(ProjectForm::default())
        } else {
            Err(Error::Validation(format!(
                "Unsupported content type: {}",
                content_type
            )))
        }
    }
}
