//! Player action types for the Replaylens action stream.
//!
//! Actions are read from a replay's `action.csv`, one record per line with
//! no header row. Column layout:
//!
//! | column | field         | notes                                   |
//! |--------|---------------|-----------------------------------------|
//! | 0      | `player`      | 1-based player number, `1` or `2`       |
//! | 1      | `frame`       | non-negative frame number               |
//! | 2      | `action_type` | integer action code                     |
//! | 3      | `x`           | map x coordinate                        |
//! | 4      | `y`           | map y coordinate                        |
//!
//! Any further columns are ignored.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::replay::ReplayError;

/// Replay frame number.
pub type Frame = u64;

/// Action codes that denote an attack order.
pub const ATTACK_ACTION_TYPES: [i32; 2] = [8, 14];

/// One of the two match participants.
///
/// Replays number players from 1; internally slots index from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    /// Both slots in replay order.
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// Map a 1-based replay player number to a slot.
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            _ => None,
        }
    }

    /// 1-based player number as written in replays.
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// 0-based index for per-player arrays.
    pub fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// A single recorded player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEvent {
    /// Acting player.
    pub player: PlayerSlot,

    /// Frame at which the action was issued.
    pub frame: Frame,

    /// Opaque action code; see [`ATTACK_ACTION_TYPES`].
    pub action_type: i32,

    /// Map position of the order.
    pub x: i64,
    pub y: i64,
}

impl ActionEvent {
    pub fn new(player: PlayerSlot, frame: Frame, action_type: i32, x: i64, y: i64) -> Self {
        Self {
            player,
            frame,
            action_type,
            x,
            y,
        }
    }

    /// Whether this action is an attack order.
    pub fn is_attack(&self) -> bool {
        ATTACK_ACTION_TYPES.contains(&self.action_type)
    }

    /// Build an action from one `action.csv` record. `row` is 1-based and only
    /// used for error reporting.
    pub fn from_record(record: &csv::StringRecord, row: u64) -> Result<Self, ReplayError> {
        let number: u8 = parse_field(record, 0, "player", row)?;
        let player = PlayerSlot::from_number(number).ok_or_else(|| {
            ReplayError::MalformedAction {
                row,
                field: "player",
                value: number.to_string(),
            }
        })?;

        Ok(Self {
            player,
            frame: parse_field(record, 1, "frame", row)?,
            action_type: parse_field(record, 2, "action_type", row)?,
            x: parse_field(record, 3, "x", row)?,
            y: parse_field(record, 4, "y", row)?,
        })
    }
}

fn parse_field<T: FromStr>(
    record: &csv::StringRecord,
    index: usize,
    field: &'static str,
    row: u64,
) -> Result<T, ReplayError> {
    let raw = record.get(index).map(str::trim).unwrap_or_default();
    raw.parse().map_err(|_| ReplayError::MalformedAction {
        row,
        field,
        value: raw.to_string(),
    })
}

/// Parse actions from headerless `action.csv` content.
///
/// Blank lines are skipped. The first malformed record aborts parsing.
pub fn parse_actions<R: Read>(reader: R) -> Result<Vec<ActionEvent>, ReplayError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut actions = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = record.position().map(|p| p.line()).unwrap_or(i as u64 + 1);
        actions.push(ActionEvent::from_record(&record, row)?);
    }
    Ok(actions)
}
