//! Axum route handlers for the send operations.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::backend::{ApplicationEmail, InquiryEmail};
use crate::errors::AppError;
use crate::mail::templates::{render_application, render_inquiry};
use crate::state::AppState;
use crate::workflow::error::SEND_SUCCEEDED;

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub message: &'static str,
}

fn require_recipient(to: &str) -> Result<(), AppError> {
    if to.trim().is_empty() {
        return Err(AppError::Validation("to cannot be empty".to_string()));
    }
    Ok(())
}

/// POST /api/resume/send_job/email
pub async fn handle_send_application(
    State(state): State<AppState>,
    Query(params): Query<ApplicationEmail>,
) -> Result<Json<SendResponse>, AppError> {
    require_recipient(&params.to)?;
    state.mailer.send(render_application(&params)?).await?;
    Ok(Json(SendResponse {
        message: SEND_SUCCEEDED,
    }))
}

/// POST /api/resume/send/email
pub async fn handle_send_inquiry(
    State(state): State<AppState>,
    Query(params): Query<InquiryEmail>,
) -> Result<Json<SendResponse>, AppError> {
    require_recipient(&params.to)?;
    state.mailer.send(render_inquiry(&params)?).await?;
    Ok(Json(SendResponse {
        message: SEND_SUCCEEDED,
    }))
}
