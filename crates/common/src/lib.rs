//! Replaylens Common Utilities
//!
//! Shared infrastructure for all Replaylens crates:
//! - Error types and result aliases
//! - Match clock: frame and window indices to match time
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
