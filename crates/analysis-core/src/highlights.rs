//! Highlight selection and compression.
//!
//! # Algorithm
//!
//! 1. **Collect** candidate windows: each player's peak-APM window, every
//!    window with an attack order, and every engagement window.
//! 2. **Sort** candidates ascending, keeping duplicates.
//! 3. **Compress** in one left-to-right pass: when the gap between a window
//!    and its right neighbour is within the compression length, the right
//!    neighbour becomes their floored midpoint and the left one is dropped.
//!    The merged value is what the next pair compares against; nothing is
//!    ever re-checked against its left neighbour. Drops are applied after
//!    the scan.
//!
//! Attack-intensity records are compressed the same way, summing counts.

use replaylens_common::{AnalysisConfig, MatchClock};
use serde::Serialize;

use crate::metrics::PlayerProfile;
use crate::spatial::EngagementScan;
use crate::windowing::WindowIndex;

/// Number of attack orders a player issued in a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttackRecord {
    pub count: usize,
    pub window: WindowIndex,
}

/// A window selected for review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub window: WindowIndex,
    /// Match time at the start of the window.
    pub start_secs: f64,
    /// `mm:ss` rendering of `start_secs`.
    pub time: String,
}

/// Selected highlights. An empty list is a valid result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HighlightSet {
    /// Number of candidates before compression, duplicates included.
    pub candidate_count: usize,
    /// Highlights ascending by window.
    pub highlights: Vec<Highlight>,
}

impl HighlightSet {
    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }

    pub fn len(&self) -> usize {
        self.highlights.len()
    }

    pub fn windows(&self) -> Vec<WindowIndex> {
        self.highlights.iter().map(|h| h.window).collect()
    }
}

/// `floor((a + b) / 2)` without overflow.
fn floor_midpoint(a: u64, b: u64) -> u64 {
    a / 2 + b / 2 + (a % 2 + b % 2) / 2
}

/// One forward merge pass over `items`, which must be sorted by `key`.
fn merge_adjacent<T: Clone>(
    items: &[T],
    max_gap: u64,
    key: impl Fn(&T) -> u64,
    merge: impl Fn(&T, &T) -> T,
) -> Vec<T> {
    let mut merged = items.to_vec();
    let mut dropped = vec![false; merged.len()];

    for i in 1..merged.len() {
        if key(&merged[i]).abs_diff(key(&merged[i - 1])) <= max_gap {
            merged[i] = merge(&merged[i - 1], &merged[i]);
            dropped[i - 1] = true;
        }
    }

    merged
        .into_iter()
        .zip(dropped)
        .filter(|(_, dropped)| !dropped)
        .map(|(item, _)| item)
        .collect()
}

/// Compress a sorted list of highlight windows.
///
/// ```
/// use replaylens_analysis_core::highlights::compress_highlights;
///
/// assert_eq!(compress_highlights(&[10, 11, 20], 2), vec![10, 20]);
/// ```
pub fn compress_highlights(sorted: &[WindowIndex], compression_length: u64) -> Vec<WindowIndex> {
    merge_adjacent(sorted, compression_length, |w| *w, |a, b| floor_midpoint(*a, *b))
}

/// Compress attack records sorted by window: nearby records sum their
/// counts and move to the floored midpoint window.
pub fn compress_attack_records(sorted: &[AttackRecord], attack_compression: u64) -> Vec<AttackRecord> {
    merge_adjacent(
        sorted,
        attack_compression,
        |r| r.window,
        |a, b| AttackRecord {
            count: a.count + b.count,
            window: floor_midpoint(a.window, b.window),
        },
    )
}

/// Candidate windows for the highlight list, sorted ascending with duplicates.
pub fn collect_candidates(
    p1: &PlayerProfile,
    p2: &PlayerProfile,
    engagements: &EngagementScan,
) -> Vec<WindowIndex> {
    let mut candidates = vec![p1.aggregate.max_apm.window, p2.aggregate.max_apm.window];
    candidates.extend(p1.attack_windows());
    candidates.extend(p2.attack_windows());
    candidates.extend(engagements.engagements.iter().map(|e| e.window));
    candidates.sort_unstable();
    candidates
}

/// Turns player profiles and engagements into a highlight list.
#[derive(Debug, Clone)]
pub struct HighlightSelector {
    compression_length: u64,
    compress: bool,
    clock: MatchClock,
}

impl HighlightSelector {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            compression_length: config.compression_length,
            compress: config.compress_highlights,
            clock: config.clock(),
        }
    }

    pub fn select(
        &self,
        p1: &PlayerProfile,
        p2: &PlayerProfile,
        engagements: &EngagementScan,
    ) -> HighlightSet {
        let candidates = collect_candidates(p1, p2, engagements);

        let windows = if self.compress {
            compress_highlights(&candidates, self.compression_length)
        } else {
            let mut windows = candidates.clone();
            windows.dedup();
            windows
        };

        HighlightSet {
            candidate_count: candidates.len(),
            highlights: windows.into_iter().map(|w| self.highlight(w)).collect(),
        }
    }

    fn highlight(&self, window: WindowIndex) -> Highlight {
        Highlight {
            window,
            start_secs: self.clock.window_start_secs(window),
            time: self.clock.window_label(window),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsEngine;
    use crate::spatial::find_engagements;
    use crate::windowing::WindowedActions;
    use proptest::prelude::*;
    use replaylens_match_model::{ActionEvent, PlayerSlot};
    use std::num::NonZeroU64;

    #[test]
    fn test_single_pass_compression() {
        assert_eq!(compress_highlights(&[10, 11, 20], 2), vec![10, 20]);
    }

    #[test]
    fn test_merged_value_carries_forward() {
        // 10,12 -> 11; then 11 vs 14 has gap 3, so 14 survives on its own.
        assert_eq!(compress_highlights(&[10, 12, 14], 2), vec![11, 14]);
        // 1,3 -> 2; 2,4 -> 3; 3,6 -> gap 3, kept apart.
        assert_eq!(compress_highlights(&[1, 3, 4, 6], 2), vec![3, 6]);
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(compress_highlights(&[1, 5, 5, 5, 5, 9], 2), vec![1, 5, 9]);
    }

    #[test]
    fn test_compression_edge_inputs() {
        assert!(compress_highlights(&[], 2).is_empty());
        assert_eq!(compress_highlights(&[7], 2), vec![7]);
        assert_eq!(compress_highlights(&[7, 8], 0), vec![7, 8]);
    }

    #[test]
    fn test_attack_compression_sums_counts() {
        let records = [
            AttackRecord { count: 2, window: 1 },
            AttackRecord { count: 3, window: 2 },
            AttackRecord { count: 1, window: 9 },
        ];
        assert_eq!(
            compress_attack_records(&records, 2),
            vec![
                AttackRecord { count: 5, window: 1 },
                AttackRecord { count: 1, window: 9 },
            ]
        );
    }

    #[test]
    fn test_floor_midpoint_handles_large_values() {
        assert_eq!(floor_midpoint(u64::MAX, u64::MAX), u64::MAX);
        assert_eq!(floor_midpoint(u64::MAX - 1, u64::MAX), u64::MAX - 1);
        assert_eq!(floor_midpoint(3, 4), 3);
    }

    fn profiles(config: &AnalysisConfig, actions: &[ActionEvent]) -> (PlayerProfile, PlayerProfile) {
        let windowed = WindowedActions::group(actions, NonZeroU64::new(config.window_size).unwrap());
        let engine = MetricsEngine::new(config);
        (
            engine
                .profile(PlayerSlot::One, windowed.player(PlayerSlot::One))
                .unwrap(),
            engine
                .profile(PlayerSlot::Two, windowed.player(PlayerSlot::Two))
                .unwrap(),
        )
    }

    #[test]
    fn test_selector_combines_candidate_sources() {
        let config = AnalysisConfig::default();
        let actions = vec![
            ActionEvent::new(PlayerSlot::One, 10, 1, 0, 0),
            ActionEvent::new(PlayerSlot::One, 20, 1, 0, 0),
            ActionEvent::new(PlayerSlot::One, 2_010, 8, 0, 0),
            ActionEvent::new(PlayerSlot::Two, 4_000, 1, 1_000, 1_000),
            ActionEvent::new(PlayerSlot::Two, 2_050, 1, 10, 10),
        ];
        let (p1, p2) = profiles(&config, &actions);
        let engagements = find_engagements(&p1.windows, &p2.windows, config.distance_threshold);

        assert_eq!(collect_candidates(&p1, &p2, &engagements), vec![0, 20, 20, 20]);

        let set = HighlightSelector::new(&config).select(&p1, &p2, &engagements);
        assert_eq!(set.candidate_count, 4);
        assert_eq!(set.windows(), vec![0, 20]);
        assert_eq!(set.highlights[1].time, "01:24");
    }

    #[test]
    fn test_selector_without_compression_dedups() {
        let config = AnalysisConfig {
            compress_highlights: false,
            ..Default::default()
        };
        let actions = vec![
            ActionEvent::new(PlayerSlot::One, 1_000, 8, 0, 0),
            ActionEvent::new(PlayerSlot::Two, 1_100, 8, 0, 0),
        ];
        let (p1, p2) = profiles(&config, &actions);

        let set = HighlightSelector::new(&config).select(&p1, &p2, &EngagementScan::default());
        assert_eq!(set.windows(), vec![10, 11]);
    }

    proptest! {
        #[test]
        fn prop_compression_sorted_and_not_longer(
            mut windows in proptest::collection::vec(0u64..500, 0..60),
            length in 0u64..6,
        ) {
            windows.sort_unstable();
            let compressed = compress_highlights(&windows, length);
            prop_assert!(compressed.len() <= windows.len());
            prop_assert!(compressed.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn prop_wide_gaps_are_untouched(
            starts in proptest::collection::vec(0u64..50, 1..20),
            length in 0u64..5,
        ) {
            let mut windows = vec![];
            let mut current = 0;
            for step in starts {
                current += step + length + 1;
                windows.push(current);
            }
            prop_assert_eq!(compress_highlights(&windows, length), windows);
        }

        #[test]
        fn prop_attack_compression_preserves_total(
            counts in proptest::collection::vec((1usize..10, 0u64..4), 0..40),
        ) {
            let mut window = 0;
            let records: Vec<_> = counts
                .iter()
                .map(|(count, step)| {
                    window += step;
                    AttackRecord { count: *count, window }
                })
                .collect();
            let compressed = compress_attack_records(&records, 2);
            let before: usize = records.iter().map(|r| r.count).sum();
            let after: usize = compressed.iter().map(|r| r.count).sum();
            prop_assert_eq!(before, after);
        }
    }
}
