//! Action windowing: bucket each player's actions into fixed-size frame windows.
//!
//! Windows are sparse. A window index only appears in a player's map once
//! at least one of that player's actions falls into it, so a quiet stretch
//! of the match leaves a gap rather than an empty bucket.

use std::collections::BTreeMap;
use std::num::NonZeroU64;

use replaylens_match_model::{ActionEvent, Frame, PlayerSlot};

/// Index of a fixed-size frame window, counted from the start of the match.
pub type WindowIndex = u64;

/// Window containing the given frame.
pub fn window_index(frame: Frame, window_size: NonZeroU64) -> WindowIndex {
    frame / window_size.get()
}

/// One player's actions keyed by window index.
///
/// Iteration is always ascending by window index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerWindows {
    windows: BTreeMap<WindowIndex, Vec<ActionEvent>>,
}

impl PlayerWindows {
    fn push(&mut self, window: WindowIndex, action: ActionEvent) {
        self.windows.entry(window).or_default().push(action);
    }

    /// Number of non-empty windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Actions in a window, in arrival order.
    pub fn get(&self, window: WindowIndex) -> Option<&[ActionEvent]> {
        self.windows.get(&window).map(Vec::as_slice)
    }

    /// Windows and their actions, ascending by window index.
    pub fn iter(&self) -> impl Iterator<Item = (WindowIndex, &[ActionEvent])> + '_ {
        self.windows
            .iter()
            .map(|(window, actions)| (*window, actions.as_slice()))
    }

    /// Window indices, ascending.
    pub fn indices(&self) -> impl Iterator<Item = WindowIndex> + '_ {
        self.windows.keys().copied()
    }
}

/// Both players' windowed actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowedActions {
    window_size: NonZeroU64,
    players: [PlayerWindows; 2],
}

impl WindowedActions {
    /// Group actions by player and window. Input order does not matter.
    pub fn group(actions: &[ActionEvent], window_size: NonZeroU64) -> Self {
        let mut players: [PlayerWindows; 2] = Default::default();
        for action in actions {
            let window = window_index(action.frame, window_size);
            players[action.player.index()].push(window, *action);
        }
        Self {
            window_size,
            players,
        }
    }

    pub fn window_size(&self) -> NonZeroU64 {
        self.window_size
    }

    pub fn player(&self, slot: PlayerSlot) -> &PlayerWindows {
        &self.players[slot.index()]
    }
}
