//! # Middleware Modules
//!
//! Tower middleware layers for the intake service.

pub mod tracing_layer;
