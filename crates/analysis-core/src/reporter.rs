//! Progress reporting sink for the analysis pipeline.
//!
//! The analyzer never logs on its own; it hands each finished stage to the
//! reporter it was given. Callers choose whether that goes to `tracing`,
//! nowhere, or a test recorder.

use replaylens_match_model::PlayerSlot;

use crate::highlights::{AttackRecord, HighlightSet};
use crate::metrics::PlayerProfile;
use crate::spatial::EngagementScan;

/// Receives pipeline milestones. Every method defaults to doing nothing.
pub trait AnalysisReporter {
    /// Actions were bucketed for a player.
    fn windows_grouped(&mut self, _player: PlayerSlot, _window_count: usize) {}

    /// A player's metrics and aggregate are ready.
    fn player_profiled(&mut self, _profile: &PlayerProfile) {}

    /// Spatial correlation finished.
    fn engagements_found(&mut self, _scan: &EngagementScan) {}

    /// A player's attack records were compressed.
    fn attack_hotspots(&mut self, _player: PlayerSlot, _hotspots: &[AttackRecord]) {}

    /// The highlight list is final.
    fn highlights_selected(&mut self, _highlights: &HighlightSet) {}
}

/// Discards every milestone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl AnalysisReporter for NullReporter {}

/// Forwards milestones to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl AnalysisReporter for TracingReporter {
    fn windows_grouped(&mut self, player: PlayerSlot, window_count: usize) {
        tracing::debug!(%player, window_count, "Grouped actions into windows");
    }

    fn player_profiled(&mut self, profile: &PlayerProfile) {
        let a = &profile.aggregate;
        tracing::info!(
            player = %a.player,
            min_apm = a.min_apm.value,
            min_window = a.min_apm.window,
            avg_apm = a.avg_apm,
            max_apm = a.max_apm.value,
            max_window = a.max_apm.window,
            bot = a.is_bot,
            "Player profiled"
        );
        if a.is_bot {
            tracing::warn!(player = %a.player, avg_apm = a.avg_apm, "Average APM above bot threshold");
        }
    }

    fn engagements_found(&mut self, scan: &EngagementScan) {
        tracing::info!(count = scan.len(), windows = ?scan.windows(), "Common engagements");
    }

    fn attack_hotspots(&mut self, player: PlayerSlot, hotspots: &[AttackRecord]) {
        tracing::debug!(%player, hotspots = hotspots.len(), "Compressed attack records");
    }

    fn highlights_selected(&mut self, highlights: &HighlightSet) {
        if highlights.is_empty() {
            tracing::info!("No highlight candidates");
            return;
        }
        tracing::info!(
            candidates = highlights.candidate_count,
            highlights = highlights.len(),
            "Highlights selected"
        );
    }
}
