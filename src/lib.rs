//! EPSS Fetcher Library
//!
//! A Rust library for mirroring daily EPSS vulnerability score snapshots
//! from the FIRST EPSS distribution host. Provides idempotent, concurrent
//! downloading with multi-format output.

pub mod app;
pub mod cli;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
