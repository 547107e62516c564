//! Per-window action metrics and player aggregates.
//!
//! # Algorithm
//!
//! 1. **Enumerate** a player's windows in ascending window order.
//! 2. **Measure** each window: action count, APM, attack count, mean position.
//! 3. **Track** the minimum and maximum APM with strict comparisons, so a tie
//!    keeps the earliest window.
//! 4. **Aggregate** the APM series into an average and compare it against the
//!    bot threshold.

use replaylens_common::AnalysisConfig;
use replaylens_match_model::{ActionEvent, PlayerSlot};
use serde::Serialize;

use crate::error::AnalysisError;
use crate::highlights::AttackRecord;
use crate::windowing::{PlayerWindows, WindowIndex};

/// Metrics for one player in one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowMetrics {
    pub window: WindowIndex,
    pub action_count: usize,
    /// Actions per minute over the window.
    pub apm: f64,
    /// Number of attack orders.
    pub attack_count: usize,
    /// Mean position over all actions (unrounded).
    pub mean_x: f64,
    pub mean_y: f64,
    /// Mean position of attack orders only. Populated when attack-location
    /// tracking is enabled and the window holds at least one attack.
    pub attack_location: Option<(f64, f64)>,
}

impl WindowMetrics {
    pub fn mean_position(&self) -> (f64, f64) {
        (self.mean_x, self.mean_y)
    }
}

/// An APM extreme and the window where it first occurred.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApmExtreme {
    pub value: f64,
    pub window: WindowIndex,
}

/// Match-level statistics for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerAggregate {
    pub player: PlayerSlot,
    pub min_apm: ApmExtreme,
    pub max_apm: ApmExtreme,
    pub avg_apm: f64,
    /// Average APM strictly above the bot threshold.
    pub is_bot: bool,
    pub window_count: usize,
    pub total_actions: usize,
    pub total_attacks: usize,
}

/// A player's aggregate together with the per-window series it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProfile {
    pub aggregate: PlayerAggregate,
    /// Window metrics, ascending by window index.
    pub windows: Vec<WindowMetrics>,
}

/// Dense series over a player's active windows, for charting collaborators.
///
/// All vectors share one index: entry `i` describes `windows[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerSeries {
    pub windows: Vec<WindowIndex>,
    pub apm: Vec<f64>,
    pub attack_count: Vec<usize>,
    pub mean_position: Vec<(f64, f64)>,
}

impl PlayerProfile {
    pub fn player(&self) -> PlayerSlot {
        self.aggregate.player
    }

    /// Metrics for a single window, if the player was active in it.
    pub fn window(&self, window: WindowIndex) -> Option<&WindowMetrics> {
        self.windows
            .binary_search_by_key(&window, |m| m.window)
            .ok()
            .map(|i| &self.windows[i])
    }

    /// Windows containing at least one attack order, ascending.
    pub fn attack_windows(&self) -> impl Iterator<Item = WindowIndex> + '_ {
        self.windows
            .iter()
            .filter(|m| m.attack_count > 0)
            .map(|m| m.window)
    }

    /// Attack-intensity records, ascending by window.
    pub fn attack_records(&self) -> Vec<AttackRecord> {
        self.windows
            .iter()
            .filter(|m| m.attack_count > 0)
            .map(|m| AttackRecord {
                count: m.attack_count,
                window: m.window,
            })
            .collect()
    }

    pub fn series(&self) -> PlayerSeries {
        let mut series = PlayerSeries::default();
        for m in &self.windows {
            series.windows.push(m.window);
            series.apm.push(m.apm);
            series.attack_count.push(m.attack_count);
            series.mean_position.push(m.mean_position());
        }
        series
    }
}

/// Computes window metrics and player aggregates.
#[derive(Debug, Clone)]
pub struct MetricsEngine {
    window_size: u64,
    frame_duration_secs: f64,
    bot_threshold_apm: f64,
    track_attack_locations: bool,
}

impl MetricsEngine {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            window_size: config.window_size,
            frame_duration_secs: config.frame_duration_secs,
            bot_threshold_apm: config.bot_threshold_apm,
            track_attack_locations: config.track_attack_locations,
        }
    }

    /// APM for a window holding `action_count` actions.
    pub fn apm(&self, action_count: usize) -> f64 {
        action_count as f64 * 60.0 / (self.window_size as f64 * self.frame_duration_secs)
    }

    /// Measure a single window, or `None` when it holds no actions.
    pub fn window_metrics(
        &self,
        window: WindowIndex,
        actions: &[ActionEvent],
    ) -> Option<WindowMetrics> {
        let action_count = actions.len();
        let (mean_x, mean_y) = mean_position(actions.iter())?;
        let attack_count = actions.iter().filter(|a| a.is_attack()).count();

        let attack_location = if self.track_attack_locations {
            mean_position(actions.iter().filter(|a| a.is_attack()))
        } else {
            None
        };

        Some(WindowMetrics {
            window,
            action_count,
            apm: self.apm(action_count),
            attack_count,
            mean_x,
            mean_y,
            attack_location,
        })
    }

    /// Build a player's profile from their windowed actions.
    pub fn profile(
        &self,
        player: PlayerSlot,
        windows: &PlayerWindows,
    ) -> Result<PlayerProfile, AnalysisError> {
        let metrics: Vec<WindowMetrics> = windows
            .iter()
            // Grouped windows always hold at least one action.
            .filter_map(|(window, actions)| self.window_metrics(window, actions))
            .collect();

        let Some(first) = metrics.first() else {
            return Err(AnalysisError::InsufficientData { player });
        };

        let mut min_apm = ApmExtreme {
            value: first.apm,
            window: first.window,
        };
        let mut max_apm = min_apm;
        let mut apm_sum = 0.0;
        let mut total_actions = 0;
        let mut total_attacks = 0;

        for m in &metrics {
            if m.apm < min_apm.value {
                min_apm = ApmExtreme {
                    value: m.apm,
                    window: m.window,
                };
            }
            if m.apm > max_apm.value {
                max_apm = ApmExtreme {
                    value: m.apm,
                    window: m.window,
                };
            }
            apm_sum += m.apm;
            total_actions += m.action_count;
            total_attacks += m.attack_count;
        }

        let avg_apm = apm_sum / metrics.len() as f64;

        Ok(PlayerProfile {
            aggregate: PlayerAggregate {
                player,
                min_apm,
                max_apm,
                avg_apm,
                is_bot: avg_apm > self.bot_threshold_apm,
                window_count: metrics.len(),
                total_actions,
                total_attacks,
            },
            windows: metrics,
        })
    }
}

/// Arithmetic mean of action positions, or `None` for no actions.
fn mean_position<'a>(actions: impl Iterator<Item = &'a ActionEvent>) -> Option<(f64, f64)> {
    let (count, sum_x, sum_y) = actions.fold((0usize, 0.0, 0.0), |(n, sx, sy), a| {
        (n + 1, sx + a.x as f64, sy + a.y as f64)
    });
    if count == 0 {
        return None;
    }
    Some((sum_x / count as f64, sum_y / count as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windowing::WindowedActions;
    use proptest::prelude::*;
    use std::num::NonZeroU64;

    fn engine() -> MetricsEngine {
        MetricsEngine::new(&AnalysisConfig::default())
    }

    fn windows_for(frames_and_types: &[(u64, i32, i64, i64)]) -> PlayerWindows {
        let actions: Vec<ActionEvent> = frames_and_types
            .iter()
            .map(|(f, t, x, y)| ActionEvent::new(PlayerSlot::One, *f, *t, *x, *y))
            .collect();
        WindowedActions::group(&actions, NonZeroU64::new(100).unwrap())
            .player(PlayerSlot::One)
            .clone()
    }

    #[test]
    fn test_five_actions_apm() {
        let apm = engine().apm(5);
        assert!((apm - 300.0 / 4.2).abs() < 1e-9);
        assert!((apm - 71.43).abs() < 0.01);
    }

    #[test]
    fn test_window_metrics_means_and_attacks() {
        let windows = windows_for(&[
            (510, 14, 100, 90),
            (520, 1, 110, 100),
            (530, 8, 90, 110),
            (540, 1, 100, 100),
        ]);
        let profile = engine().profile(PlayerSlot::One, &windows).unwrap();
        let m = profile.window(5).unwrap();

        assert_eq!(m.action_count, 4);
        assert_eq!(m.attack_count, 2);
        assert!((m.mean_x - 100.0).abs() < 1e-9);
        assert!((m.mean_y - 100.0).abs() < 1e-9);
        assert_eq!(m.attack_location, None);
    }

    #[test]
    fn test_empty_window_has_no_metrics() {
        assert_eq!(engine().window_metrics(3, &[]), None);

        let action = ActionEvent::new(PlayerSlot::One, 310, 8, 40, 60);
        let m = engine().window_metrics(3, &[action]).unwrap();
        assert_eq!(m.action_count, 1);
        assert_eq!(m.mean_position(), (40.0, 60.0));
    }

    #[test]
    fn test_mean_position_is_unrounded() {
        let windows = windows_for(&[(0, 1, 0, 0), (1, 1, 1, 0), (2, 1, 1, 0)]);
        let profile = engine().profile(PlayerSlot::One, &windows).unwrap();
        assert!((profile.windows[0].mean_x - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_attack_location_tracking() {
        let engine = MetricsEngine::new(&AnalysisConfig {
            track_attack_locations: true,
            ..Default::default()
        });
        let windows = windows_for(&[
            (10, 8, 200, 200),
            (20, 14, 300, 100),
            (30, 1, 0, 0),
            (110, 1, 50, 50),
        ]);
        let profile = engine.profile(PlayerSlot::One, &windows).unwrap();

        assert_eq!(profile.windows[0].attack_location, Some((250.0, 150.0)));
        assert_eq!(profile.windows[1].attack_location, None);
    }

    #[test]
    fn test_extremes_keep_first_window_on_tie() {
        // Windows 0 and 3 share the maximum; windows 1 and 2 share the minimum.
        let windows = windows_for(&[
            (0, 1, 0, 0),
            (1, 1, 0, 0),
            (150, 1, 0, 0),
            (250, 1, 0, 0),
            (300, 1, 0, 0),
            (301, 1, 0, 0),
        ]);
        let aggregate = engine()
            .profile(PlayerSlot::One, &windows)
            .unwrap()
            .aggregate;

        assert_eq!(aggregate.max_apm.window, 0);
        assert_eq!(aggregate.min_apm.window, 1);
        assert_eq!(aggregate.window_count, 4);
        assert_eq!(aggregate.total_actions, 6);
    }

    #[test]
    fn test_average_and_bot_flag() {
        // 29 actions in one window: 29 * 60 / 4.2 ≈ 414.3 APM.
        let frames: Vec<_> = (0..29).map(|f| (f, 1, 0, 0)).collect();
        let aggregate = engine()
            .profile(PlayerSlot::One, &windows_for(&frames))
            .unwrap()
            .aggregate;
        assert!(aggregate.avg_apm > 400.0);
        assert!(aggregate.is_bot);

        let frames: Vec<_> = (0..28).map(|f| (f, 1, 0, 0)).collect();
        let aggregate = engine()
            .profile(PlayerSlot::One, &windows_for(&frames))
            .unwrap()
            .aggregate;
        assert!(!aggregate.is_bot);
    }

    #[test]
    fn test_bot_threshold_is_strict() {
        let base = engine();
        let threshold = base.apm(5);
        let engine = MetricsEngine::new(&AnalysisConfig {
            bot_threshold_apm: threshold,
            ..Default::default()
        });

        let frames: Vec<_> = (0..5).map(|f| (f, 1, 0, 0)).collect();
        let aggregate = engine
            .profile(PlayerSlot::One, &windows_for(&frames))
            .unwrap()
            .aggregate;
        assert_eq!(aggregate.avg_apm, threshold);
        assert!(!aggregate.is_bot);
    }

    #[test]
    fn test_empty_player_is_insufficient_data() {
        let err = engine()
            .profile(PlayerSlot::Two, &PlayerWindows::default())
            .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientData {
                player: PlayerSlot::Two
            }
        );
    }

    #[test]
    fn test_series_is_aligned() {
        let windows = windows_for(&[(10, 8, 2, 4), (720, 1, 6, 8)]);
        let series = engine().profile(PlayerSlot::One, &windows).unwrap().series();
        assert_eq!(series.windows, vec![0, 7]);
        assert_eq!(series.attack_count, vec![1, 0]);
        assert_eq!(series.mean_position, vec![(2.0, 4.0), (6.0, 8.0)]);
        assert_eq!(series.apm.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_apm_strictly_increasing_in_count(count in 0usize..10_000) {
            let engine = engine();
            prop_assert!(engine.apm(count + 1) > engine.apm(count));
        }

        #[test]
        fn prop_extremes_bound_average(counts in proptest::collection::vec(1u64..40, 1..30)) {
            let mut frames = vec![];
            for (window, count) in counts.iter().enumerate() {
                for i in 0..*count {
                    frames.push((window as u64 * 100 + i, 1, 0, 0));
                }
            }
            let aggregate = engine()
                .profile(PlayerSlot::One, &windows_for(&frames))
                .unwrap()
                .aggregate;
            prop_assert!(aggregate.min_apm.value <= aggregate.avg_apm + 1e-9);
            prop_assert!(aggregate.avg_apm <= aggregate.max_apm.value + 1e-9);
        }
    }
}
