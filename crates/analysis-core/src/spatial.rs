//! Spatial correlation between the two players' mean action positions.
//!
//! A window where both players' mean positions lie within the distance
//! threshold on each axis is treated as a likely engagement. The two series
//! are joined on window index: a window only one player was active in is
//! never compared against whatever the other player did at the same
//! position in their series.

use std::cmp::Ordering;

use serde::Serialize;

use crate::metrics::WindowMetrics;
use crate::windowing::WindowIndex;

/// A window where both players acted close together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Engagement {
    pub window: WindowIndex,
    /// Midpoint of the two mean positions.
    pub avg_x: f64,
    pub avg_y: f64,
    /// Player one's mean position.
    pub p1_x: f64,
    pub p1_y: f64,
    /// Player two's mean position.
    pub p2_x: f64,
    pub p2_y: f64,
}

/// Engagements found in a match, ascending by window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngagementScan {
    pub engagements: Vec<Engagement>,
}

impl EngagementScan {
    /// Engagement window indices, ascending.
    pub fn windows(&self) -> Vec<WindowIndex> {
        self.engagements.iter().map(|e| e.window).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.engagements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.engagements.len()
    }
}

/// Test one shared window against the per-axis threshold.
pub fn engagement_at(
    p1: &WindowMetrics,
    p2: &WindowMetrics,
    distance_threshold: f64,
) -> Option<Engagement> {
    debug_assert_eq!(p1.window, p2.window);

    let close = (p1.mean_x - p2.mean_x).abs() < distance_threshold
        && (p1.mean_y - p2.mean_y).abs() < distance_threshold;
    if !close {
        return None;
    }

    Some(Engagement {
        window: p1.window,
        avg_x: (p1.mean_x + p2.mean_x) / 2.0,
        avg_y: (p1.mean_y + p2.mean_y) / 2.0,
        p1_x: p1.mean_x,
        p1_y: p1.mean_y,
        p2_x: p2.mean_x,
        p2_y: p2.mean_y,
    })
}

/// Find engagements across two window series, each ascending by window.
pub fn find_engagements(
    p1: &[WindowMetrics],
    p2: &[WindowMetrics],
    distance_threshold: f64,
) -> EngagementScan {
    let mut engagements = vec![];
    let (mut i, mut j) = (0, 0);

    while i < p1.len() && j < p2.len() {
        match p1[i].window.cmp(&p2[j].window) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                if let Some(engagement) = engagement_at(&p1[i], &p2[j], distance_threshold) {
                    engagements.push(engagement);
                }
                i += 1;
                j += 1;
            }
        }
    }

    EngagementScan { engagements }
}
