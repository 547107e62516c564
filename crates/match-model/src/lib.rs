//! Replaylens Match Model
//!
//! Defines the core data contracts for a recorded two-player match:
//! - **Actions:** Frame-stamped player orders with an action code and map position
//! - **Players:** The two participant slots and their display metadata
//! - **Replay:** A replay folder on disk (`action.csv` plus optional metadata files)
//!
//! Frames are the finest time unit; converting them to match time is the
//! job of [`replaylens_common::MatchClock`].

pub mod action;
pub mod replay;

pub use action::*;
pub use replay::*;
