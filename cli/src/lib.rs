//! wcnprune-cli library: exposed for integration tests.

pub mod app;
pub mod args;
pub mod error;
