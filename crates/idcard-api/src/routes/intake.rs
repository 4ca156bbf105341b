//! # Public Intake
//!
//! Routes:
//! - GET  / — submission form, with any pending flash notices
//! - POST /submit — validate, relay the photo, persist one entry, redirect to `/`
//!
//! A submission either persists exactly one complete entry or nothing. Each
//! check runs only if the previous one passed: required text fields, photo
//! present, then the relay. Every outcome is a redirect with one flash notice,
//! including bodies that are not multipart or exceed the size cap; only a
//! store write failure surfaces as an error response.

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::{DefaultBodyLimit, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::Router;
use idcard_core::SubmissionFields;

use crate::error::AppError;
use crate::extractors::read_submission_form;
use crate::pages;
use crate::session::{FlashKind, Session};
use crate::state::AppState;

/// Request body cap for submissions (photo included).
pub const MAX_SUBMISSION_BYTES: usize = 16 * 1024 * 1024;

/// Notice when a required text field is absent or blank.
pub const MISSING_FIELDS_NOTICE: &str = "Please fill in all required fields before submitting.";
/// Notice when no photo file was attached.
pub const MISSING_PHOTO_NOTICE: &str = "Please upload a photo for your ID card.";
/// Notice after an entry has been stored.
pub const SUCCESS_NOTICE: &str =
    "✅ Submission successful! Your ID card details have been received.";

/// Build the intake router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(show_form)).route(
        "/submit",
        post(submit).layer(DefaultBodyLimit::max(MAX_SUBMISSION_BYTES)),
    )
}

/// GET / — Render the submission form.
async fn show_form(session: Session) -> (Session, Html<String>) {
    let flashes = session.take_flashes();
    (session, Html(pages::submission_form(&flashes)))
}

/// POST /submit — Handle one form submission.
async fn submit(
    State(state): State<AppState>,
    session: Session,
    body: Result<Multipart, MultipartRejection>,
) -> Result<(Session, Redirect), AppError> {
    let form = read_submission_form(body).await;

    let fields = match SubmissionFields::from_form(|name| form.text(name)) {
        Ok(fields) => fields,
        Err(err) => {
            tracing::debug!(error = %err, "submission rejected");
            session.flash(FlashKind::Danger, MISSING_FIELDS_NOTICE);
            return Ok((session, Redirect::to("/")));
        }
    };

    let Some(photo) = form
        .photo
        .as_ref()
        .filter(|photo| !photo.filename.trim().is_empty())
    else {
        tracing::debug!("submission rejected: no photo attached");
        session.flash(FlashKind::Danger, MISSING_PHOTO_NOTICE);
        return Ok((session, Redirect::to("/")));
    };

    let photo_url = match state.relay.upload(photo).await {
        Ok(url) => url,
        Err(err) => {
            if err.is_upstream() {
                tracing::warn!(error = %err, "photo relay failed");
            } else {
                tracing::debug!(error = %err, filename = %photo.filename, "photo rejected");
            }
            session.flash(FlashKind::Danger, err.to_string());
            return Ok((session, Redirect::to("/")));
        }
    };

    let entry = fields.into_entry(photo_url);
    let store = state.store.clone();
    let count = tokio::task::spawn_blocking(move || store.append(&entry)).await??;

    tracing::info!(entries = count, "submission stored");
    session.flash(FlashKind::Success, SUCCESS_NOTICE);
    Ok((session, Redirect::to("/")))
}
