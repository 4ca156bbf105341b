//! # Route Modules
//!
//! - `intake` — public submission form (`GET /`) and submission handling
//!   (`POST /submit`).
//! - `admin` — password-gated listing of every stored entry (`GET|POST /admin`).

pub mod admin;
pub mod intake;
