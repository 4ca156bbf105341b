//! # Admin Listing
//!
//! Routes:
//! - GET  /admin — password prompt while locked, full entry table once unlocked
//! - POST /admin — check the shared password, then redirect to `GET /admin`
//!
//! Unlocking sets the session's admin flag for the life of the session.
//! There is no logout and no lockout after repeated failures.

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;

use crate::auth::password_matches;
use crate::error::AppError;
use crate::pages;
use crate::session::{FlashKind, Session};
use crate::state::AppState;

/// Notice when the admin password does not match.
pub const WRONG_PASSWORD_NOTICE: &str = "Incorrect admin password. Please try again.";

/// Body of the password prompt.
#[derive(Debug, Default, Deserialize)]
pub struct AdminLogin {
    #[serde(default)]
    pub password: String,
}

/// Build the admin router.
pub fn router() -> Router<AppState> {
    Router::new().route("/admin", get(admin_panel).post(unlock))
}

/// GET /admin — Prompt for the password, or list every entry.
async fn admin_panel(
    State(state): State<AppState>,
    session: Session,
) -> Result<(Session, Html<String>), AppError> {
    let flashes = session.take_flashes();
    if !session.is_admin() {
        return Ok((session, Html(pages::admin_login(&flashes))));
    }

    let store = state.store.clone();
    let entries = tokio::task::spawn_blocking(move || store.load()).await?;
    Ok((session, Html(pages::admin_entries(&entries, &flashes))))
}

/// POST /admin — Check the shared password.
///
/// An unreadable body counts as an empty password.
async fn unlock(
    State(state): State<AppState>,
    session: Session,
    body: Result<Form<AdminLogin>, FormRejection>,
) -> (Session, Redirect) {
    let login = body.map(|Form(login)| login).unwrap_or_default();

    if password_matches(&login.password, &state.config.admin_password) {
        session.mark_admin();
        tracing::info!("admin listing unlocked");
    } else {
        tracing::warn!("admin unlock failed: wrong password");
        session.flash(FlashKind::Danger, WRONG_PASSWORD_NOTICE);
    }

    (session, Redirect::to("/admin"))
}
