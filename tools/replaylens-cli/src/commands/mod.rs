pub mod analyze;
pub mod info;
pub mod series;
pub mod validate;

use std::path::Path;

use replaylens_common::ReplaylensError;
use replaylens_match_model::LoadedReplay;

/// Load a replay folder, keeping the loader's failure kind in the error.
pub fn load_replay(path: &Path) -> anyhow::Result<LoadedReplay> {
    LoadedReplay::load(path).map_err(|e| {
        anyhow::Error::new(ReplaylensError::from(e))
            .context(format!("Failed to load replay at {}", path.display()))
    })
}
