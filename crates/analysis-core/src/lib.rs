//! Replaylens Analysis Core
//!
//! Analyzes a two-player action stream to produce behavioral analytics:
//! - **Windowing:** Bucket each player's actions into fixed-size frame windows
//! - **Metrics:** Per-window APM, attack counts, and mean positions; player aggregates and bot flag
//! - **Spatial:** Windows where both players act close together (engagements)
//! - **Highlights:** Notable windows merged into a short, sorted review list
//!
//! This crate is pure computation with no I/O and no global state.
//! All inputs are data; all outputs are data. Progress is reported through
//! an explicit [`AnalysisReporter`] passed to [`MatchAnalyzer::analyze`].

pub mod analyzer;
pub mod error;
pub mod highlights;
pub mod metrics;
pub mod reporter;
pub mod spatial;
pub mod windowing;

pub use analyzer::{MatchAnalysis, MatchAnalyzer};
pub use error::AnalysisError;
pub use reporter::{AnalysisReporter, NullReporter, TracingReporter};
