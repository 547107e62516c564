//! Replay folders and match metadata.
//!
//! A replay folder holds the tables exported from one recorded match:
//!
//! ```text
//! <replay>/
//! ├─ action.csv        (required) player actions, see crate::action
//! ├─ replay.csv        (optional) replay identifier, map name
//! └─ playerreplay.csv  (optional) player names, one row per slot
//! ```
//!
//! Metadata is only ever used for reporting; analysis runs on actions alone.

use std::fs::File;
use std::path::{Path, PathBuf};

use replaylens_common::ReplaylensError;
use serde::{Deserialize, Serialize};

use crate::action::{parse_actions, ActionEvent, Frame, PlayerSlot};

pub const ACTION_FILE: &str = "action.csv";
pub const REPLAY_FILE: &str = "replay.csv";
pub const PLAYER_FILE: &str = "playerreplay.csv";

/// Identity of the recorded match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayInfo {
    /// Replay identifier (usually the replay file name).
    pub replay_id: String,

    /// Map the match was played on, if recorded.
    pub map_name: Option<String>,
}

/// Display metadata for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub slot: PlayerSlot,
    pub name: String,
}

/// Reporting metadata for a match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchMetadata {
    pub replay: Option<ReplayInfo>,
    pub players: Vec<PlayerInfo>,
}

impl MatchMetadata {
    /// Recorded name for a slot, if any.
    pub fn player_name(&self, slot: PlayerSlot) -> Option<&str> {
        self.players
            .iter()
            .find(|p| p.slot == slot)
            .map(|p| p.name.as_str())
    }

    /// Recorded name, or the slot label when the replay carries no names.
    pub fn display_name(&self, slot: PlayerSlot) -> String {
        self.player_name(slot)
            .map(str::to_string)
            .unwrap_or_else(|| slot.to_string())
    }
}

/// The complete in-memory representation of a loaded replay folder.
#[derive(Debug, Clone)]
pub struct LoadedReplay {
    /// Filesystem path to the replay folder.
    pub root: PathBuf,

    /// Reporting metadata.
    pub metadata: MatchMetadata,

    /// All actions in file order.
    pub actions: Vec<ActionEvent>,
}

impl LoadedReplay {
    /// Load a replay from a folder.
    ///
    /// `action.csv` must exist and parse completely; the metadata files are
    /// optional, but present ones must be readable.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let root = root.as_ref().to_path_buf();

        let action_path = root.join(ACTION_FILE);
        if !action_path.exists() {
            return Err(ReplayError::MissingFile { path: action_path });
        }
        let file = File::open(&action_path).map_err(|e| ReplayError::IoError {
            path: action_path.clone(),
            source: e,
        })?;
        let actions = parse_actions(file)?;

        let metadata = MatchMetadata {
            replay: load_replay_info(&root.join(REPLAY_FILE))?,
            players: load_players(&root.join(PLAYER_FILE))?,
        };

        tracing::debug!(
            root = %root.display(),
            actions = actions.len(),
            players = metadata.players.len(),
            "Loaded replay"
        );

        Ok(Self {
            root,
            metadata,
            actions,
        })
    }

    /// Number of actions issued by a player.
    pub fn action_count(&self, slot: PlayerSlot) -> usize {
        self.actions.iter().filter(|a| a.player == slot).count()
    }

    /// Number of attack orders issued by a player.
    pub fn attack_count(&self, slot: PlayerSlot) -> usize {
        self.actions
            .iter()
            .filter(|a| a.player == slot && a.is_attack())
            .count()
    }

    /// Highest frame in the action log.
    pub fn last_frame(&self) -> Option<Frame> {
        self.actions.iter().map(|a| a.frame).max()
    }

    /// List optional metadata files that are absent from the folder.
    pub fn missing_metadata_files(&self) -> Vec<String> {
        [REPLAY_FILE, PLAYER_FILE]
            .iter()
            .filter(|name| !self.root.join(name).exists())
            .map(|name| format!("Metadata file missing: {name}"))
            .collect()
    }
}

fn metadata_reader(path: &Path) -> Result<Option<csv::Reader<File>>, ReplayError> {
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(path).map_err(|e| ReplayError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Some(
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file),
    ))
}

fn load_replay_info(path: &Path) -> Result<Option<ReplayInfo>, ReplayError> {
    let Some(mut reader) = metadata_reader(path)? else {
        return Ok(None);
    };

    let Some(record) = reader.records().next().transpose()? else {
        return Ok(None);
    };

    let replay_id = record.get(0).unwrap_or_default().to_string();
    if replay_id.is_empty() {
        return Ok(None);
    }
    let map_name = record
        .get(1)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    Ok(Some(ReplayInfo {
        replay_id,
        map_name,
    }))
}

fn load_players(path: &Path) -> Result<Vec<PlayerInfo>, ReplayError> {
    let Some(mut reader) = metadata_reader(path)? else {
        return Ok(vec![]);
    };

    let mut players = vec![];
    for (slot, record) in PlayerSlot::ALL.into_iter().zip(reader.records()) {
        let record = record?;
        if let Some(name) = record.get(0).filter(|name| !name.is_empty()) {
            players.push(PlayerInfo {
                slot,
                name: name.to_string(),
            });
        }
    }
    Ok(players)
}

/// Errors that can occur when loading a replay.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("Required replay file missing: {path}")]
    MissingFile { path: PathBuf },

    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed action at row {row}: field `{field}` has value {value:?}")]
    MalformedAction {
        row: u64,
        field: &'static str,
        value: String,
    },
}

impl ReplayError {
    /// Stable label for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingFile { .. } => "missing_file",
            Self::IoError { .. } => "io",
            Self::Csv(_) => "csv",
            Self::MalformedAction { .. } => "malformed_action",
        }
    }
}

impl From<ReplayError> for ReplaylensError {
    fn from(err: ReplayError) -> Self {
        ReplaylensError::replay(err.kind(), err.to_string())
    }
}
