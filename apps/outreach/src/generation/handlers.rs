//! Axum route handlers for the Generation API.

use std::path::Path;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::extract::{extract_resume_text, ExtractError, ResumeFormat};
use crate::generation::generator::{generate_email_body, EmailBrief};
use crate::state::AppState;
use crate::workflow::session::EmailType;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    #[serde(rename = "emailBody")]
    pub email_body: String,
}

struct UploadedResume {
    file_name: String,
    content_type: String,
    content: Bytes,
}

#[derive(Default)]
struct UploadForm {
    file: Option<UploadedResume>,
    company_name: Option<String>,
    job_title: Option<String>,
    template: Option<String>,
}

fn malformed(e: MultipartError) -> AppError {
    AppError::Validation(format!("Malformed multipart body: {e}"))
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let content = field.bytes().await.map_err(malformed)?;
                form.file = Some(UploadedResume {
                    file_name,
                    content_type,
                    content,
                });
            }
            "companyName" => form.company_name = Some(field.text().await.map_err(malformed)?),
            "jobTitle" => form.job_title = Some(field.text().await.map_err(malformed)?),
            "template" => form.template = Some(field.text().await.map_err(malformed)?),
            _ => {}
        }
    }
    Ok(form)
}

fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

/// Writes the upload under `dir` with a unique prefix. Only the final path
/// component of the client-supplied name is used.
async fn archive_upload(dir: &Path, resume: &UploadedResume) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    let base_name = Path::new(&resume.file_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());
    let path = dir.join(format!("{}-{base_name}", Uuid::new_v4()));
    tokio::fs::write(&path, &resume.content).await?;
    info!("Archived upload to {}", path.display());
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/resume/upload
///
/// Multipart fields: `file`, `companyName`, `jobTitle` (optional for inquiries), `template`.
/// Returns `{"emailBody": "..."}`.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let form = read_form(multipart).await?;

    let resume = form
        .file
        .ok_or_else(|| AppError::Validation("file is required".to_string()))?;
    let company_name = required(form.company_name, "companyName")?;
    let template: EmailType = required(form.template, "template")?
        .parse()
        .map_err(AppError::Validation)?;
    let job_title = form.job_title.unwrap_or_default();
    if template == EmailType::Application && job_title.trim().is_empty() {
        return Err(AppError::Validation(
            "jobTitle is required for application emails".to_string(),
        ));
    }

    let format = ResumeFormat::from_content_type(&resume.content_type).ok_or_else(|| {
        warn!("Rejected upload with content type '{}'", resume.content_type);
        ExtractError::UnsupportedType
    })?;

    if let Some(dir) = &state.config.upload_dir {
        archive_upload(dir, &resume).await?;
    }

    let resume_text = extract_resume_text(format, resume.content).await?;
    info!(
        "Extracted {} chars from {} ({:?})",
        resume_text.len(),
        resume.file_name,
        format
    );

    let brief = EmailBrief {
        resume_text: &resume_text,
        company_name: &company_name,
        job_title: &job_title,
        template,
        candidate_background: state.config.candidate_background.as_deref(),
    };
    let email_body = generate_email_body(&state.llm, &brief).await?;

    Ok(Json(UploadResponse { email_body }))
}
