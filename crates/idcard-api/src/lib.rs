//! # idcard-api — Axum Service for ID-Card Requests
//!
//! A visitor fills in six personal fields and attaches a photo. The photo is
//! relayed to a third-party image host, and the fields plus the hosted URL
//! are appended to a flat JSON file. An admin view, unlocked by one shared
//! password held in a server-side session, lists every submission.
//!
//! ## Surface
//!
//! | Route | Module | Purpose |
//! |-------|--------|---------|
//! | `GET /` | [`routes::intake`] | Submission form |
//! | `POST /submit` | [`routes::intake`] | Validate, relay, persist, redirect |
//! | `GET\|POST /admin` | [`routes::admin`] | Password prompt / entry listing |
//! | `GET /health/*` | this module | Liveness and readiness probes |
//!
//! ## Flow
//!
//! ```text
//! submit → field validation → photo check → relay → append to store → redirect + notice
//! admin  → password check → session flag → store read → listing
//! ```
//!
//! Every outcome a visitor can cause is reported as a flash notice after a
//! redirect. Only server faults surface as [`AppError`].

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;

pub use error::AppError;
pub use state::AppState;

use axum::Router;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes are mounted outside the trace layer.
pub fn app(state: AppState) -> Router {
    let pages = Router::new()
        .merge(routes::intake::router())
        .merge(routes::admin::router())
        .layer(middleware::tracing_layer::layer())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(pages)
}

/// Liveness probe: 200 while the process is up.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 once the router is serving.
async fn readiness() -> &'static str {
    "ready"
}
