//! Match clock: converts frame and window indices into match time.
//!
//! A replay records time as discrete simulation frames. Analysis groups
//! frames into fixed-size windows, so every reported moment is either a
//! frame number or a window index. This module provides utilities for:
//! - Converting frames and windows to seconds
//! - Rendering seconds as `mm:ss` for highlight lists

/// Frame timing for a single match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchClock {
    /// Frames per analysis window.
    window_size: u64,

    /// Seconds per frame.
    frame_duration_secs: f64,
}

impl MatchClock {
    /// Create a clock for the given window size (frames) and frame duration (seconds).
    pub fn new(window_size: u64, frame_duration_secs: f64) -> Self {
        Self {
            window_size,
            frame_duration_secs,
        }
    }

    /// Frames per analysis window.
    pub fn window_size(&self) -> u64 {
        self.window_size
    }

    /// Seconds per frame.
    pub fn frame_duration_secs(&self) -> f64 {
        self.frame_duration_secs
    }

    /// Seconds elapsed at the given frame.
    pub fn frame_to_secs(&self, frame: u64) -> f64 {
        frame as f64 * self.frame_duration_secs
    }

    /// Seconds elapsed at the start of the given window.
    pub fn window_start_secs(&self, window: u64) -> f64 {
        self.frame_to_secs(window.saturating_mul(self.window_size))
    }

    /// Length of one window in seconds.
    pub fn window_duration_secs(&self) -> f64 {
        self.window_size as f64 * self.frame_duration_secs
    }

    /// `mm:ss` label for the start of the given window.
    pub fn window_label(&self, window: u64) -> String {
        format_mm_ss(self.window_start_secs(window))
    }
}

/// Render seconds as `mm:ss`, truncating fractional seconds.
///
/// Minutes are not wrapped into hours, so a 75-minute match renders as `75:00`.
/// Negative and non-finite inputs render as `00:00`.
pub fn format_mm_ss(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}
