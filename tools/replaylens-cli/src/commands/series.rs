//! Export per-window series for charting.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use replaylens_analysis_core::{MatchAnalyzer, NullReporter};
use replaylens_common::{AnalysisConfig, ReplaylensError};
use replaylens_match_model::PlayerSlot;
use serde::Serialize;

#[derive(Serialize)]
struct SeriesRow {
    player: u8,
    window: u64,
    time_secs: f64,
    apm: f64,
    attack_count: usize,
    mean_x: f64,
    mean_y: f64,
}

pub fn run(path: PathBuf, config: AnalysisConfig, output: Option<PathBuf>) -> anyhow::Result<()> {
    let replay = super::load_replay(&path)?;

    let analyzer = MatchAnalyzer::new(config).map_err(ReplaylensError::from)?;
    let analysis = analyzer
        .analyze(&replay.actions, &mut NullReporter)
        .map_err(ReplaylensError::from)?;
    let clock = analyzer.clock();

    let sink: Box<dyn Write> = match &output {
        Some(out) => Box::new(
            std::fs::File::create(out)
                .with_context(|| format!("Failed to create {}", out.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut writer = csv::Writer::from_writer(sink);

    let mut rows = 0;
    for slot in PlayerSlot::ALL {
        let series = analysis.profile(slot).series();
        for i in 0..series.windows.len() {
            let (mean_x, mean_y) = series.mean_position[i];
            writer.serialize(SeriesRow {
                player: slot.number(),
                window: series.windows[i],
                time_secs: clock.window_start_secs(series.windows[i]),
                apm: series.apm[i],
                attack_count: series.attack_count[i],
                mean_x,
                mean_y,
            })?;
            rows += 1;
        }
    }
    writer.flush()?;

    if let Some(out) = output {
        tracing::info!(rows, path = %out.display(), "Series written");
    }
    Ok(())
}
