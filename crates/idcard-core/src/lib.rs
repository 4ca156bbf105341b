#![deny(missing_docs)]

//! # idcard-core — Foundational Types for the ID-Card Intake Service
//!
//! Every other crate in the workspace builds on the types defined here. The
//! crate has no internal dependencies and no async code.
//!
//! ## Contents
//!
//! - [`Entry`]: one persisted submission: six text fields plus the hosted
//!   photo URL.
//! - [`SubmissionFields`]: the six required text fields, trimmed and checked
//!   for blanks before anything else happens to a submission.
//! - [`RecordStore`]: the flat JSON file holding every [`Entry`] in
//!   insertion order.
//!
//! ## Store Read Rule
//!
//! A store file that is missing, empty, not valid JSON, or valid JSON but not
//! an array reads as an empty store. Reads never fail.

pub mod entry;
pub mod error;
pub mod store;

pub use entry::{Entry, SubmissionFields, REQUIRED_FIELDS};
pub use error::{StoreError, ValidationError};
pub use store::RecordStore;
