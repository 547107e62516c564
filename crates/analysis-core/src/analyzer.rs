//! Match analysis: the full windowing → metrics → spatial → highlights pipeline.

use std::num::NonZeroU64;

use replaylens_common::{AnalysisConfig, MatchClock};
use replaylens_match_model::{ActionEvent, PlayerSlot};
use serde::Serialize;

use crate::error::AnalysisError;
use crate::highlights::{compress_attack_records, AttackRecord, HighlightSelector, HighlightSet};
use crate::metrics::{MetricsEngine, PlayerProfile};
use crate::reporter::AnalysisReporter;
use crate::spatial::{find_engagements, EngagementScan};
use crate::windowing::WindowedActions;

/// Everything derived from one match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchAnalysis {
    /// Player profiles, indexed by [`PlayerSlot::index`].
    pub profiles: [PlayerProfile; 2],
    /// Compressed attack-intensity records, indexed by [`PlayerSlot::index`].
    pub attack_hotspots: [Vec<AttackRecord>; 2],
    pub engagements: EngagementScan,
    pub highlights: HighlightSet,
}

impl MatchAnalysis {
    pub fn profile(&self, slot: PlayerSlot) -> &PlayerProfile {
        &self.profiles[slot.index()]
    }

    pub fn attack_hotspots(&self, slot: PlayerSlot) -> &[AttackRecord] {
        &self.attack_hotspots[slot.index()]
    }
}

/// The match analyzer.
#[derive(Debug, Clone)]
pub struct MatchAnalyzer {
    config: AnalysisConfig,
    window_size: NonZeroU64,
    metrics: MetricsEngine,
    selector: HighlightSelector,
}

impl MatchAnalyzer {
    /// Create a new analyzer, rejecting configurations that cannot produce rates.
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        let window_size = validate(&config)?;
        Ok(Self {
            window_size,
            metrics: MetricsEngine::new(&config),
            selector: HighlightSelector::new(&config),
            config,
        })
    }

    /// Create an analyzer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(AnalysisConfig::default()).expect("default analysis config is valid")
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn clock(&self) -> MatchClock {
        self.config.clock()
    }

    /// Analyze a match. Any failure aborts the whole run.
    pub fn analyze(
        &self,
        actions: &[ActionEvent],
        reporter: &mut dyn AnalysisReporter,
    ) -> Result<MatchAnalysis, AnalysisError> {
        let windowed = WindowedActions::group(actions, self.window_size);
        for slot in PlayerSlot::ALL {
            reporter.windows_grouped(slot, windowed.player(slot).len());
        }

        let [p1, p2] = self.profile_players(&windowed);
        let (p1, p2) = (p1?, p2?);
        reporter.player_profiled(&p1);
        reporter.player_profiled(&p2);

        let engagements = if self.config.detect_engagements {
            find_engagements(&p1.windows, &p2.windows, self.config.distance_threshold)
        } else {
            EngagementScan::default()
        };
        reporter.engagements_found(&engagements);

        let attack_hotspots = [&p1, &p2].map(|profile| {
            compress_attack_records(&profile.attack_records(), self.config.attack_compression)
        });
        for slot in PlayerSlot::ALL {
            reporter.attack_hotspots(slot, &attack_hotspots[slot.index()]);
        }

        let highlights = self.selector.select(&p1, &p2, &engagements);
        reporter.highlights_selected(&highlights);

        Ok(MatchAnalysis {
            profiles: [p1, p2],
            attack_hotspots,
            engagements,
            highlights,
        })
    }

    /// Profile both players. The two computations share no data, so they
    /// run on the rayon pool when `parallel` is set.
    fn profile_players(
        &self,
        windowed: &WindowedActions,
    ) -> [Result<PlayerProfile, AnalysisError>; 2] {
        let profile = |slot: PlayerSlot| self.metrics.profile(slot, windowed.player(slot));

        if self.config.parallel {
            let (p1, p2) = rayon::join(|| profile(PlayerSlot::One), || profile(PlayerSlot::Two));
            [p1, p2]
        } else {
            [profile(PlayerSlot::One), profile(PlayerSlot::Two)]
        }
    }
}

fn validate(config: &AnalysisConfig) -> Result<NonZeroU64, AnalysisError> {
    let window_size = NonZeroU64::new(config.window_size)
        .ok_or_else(|| AnalysisError::invalid_config("window_size must be at least 1 frame"))?;

    if !(config.frame_duration_secs.is_finite() && config.frame_duration_secs > 0.0) {
        return Err(AnalysisError::invalid_config(format!(
            "frame_duration_secs must be positive, got {}",
            config.frame_duration_secs
        )));
    }
    if !config.bot_threshold_apm.is_finite() {
        return Err(AnalysisError::invalid_config(
            "bot_threshold_apm must be finite",
        ));
    }
    if !(config.distance_threshold.is_finite() && config.distance_threshold >= 0.0) {
        return Err(AnalysisError::invalid_config(format!(
            "distance_threshold must be non-negative, got {}",
            config.distance_threshold
        )));
    }

    Ok(window_size)
}
