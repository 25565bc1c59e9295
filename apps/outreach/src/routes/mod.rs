pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::backend::http::{SEND_APPLICATION_PATH, SEND_INQUIRY_PATH, UPLOAD_PATH};
use crate::generation::handlers as generation;
use crate::mail::handlers as mail;
use crate::state::AppState;

/// Résumé uploads up to 10 MB.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            UPLOAD_PATH,
            post(generation::handle_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(SEND_APPLICATION_PATH, post(mail::handle_send_application))
        .route(SEND_INQUIRY_PATH, post(mail::handle_send_inquiry))
        .with_state(state)
}
