//! Run match analysis on a replay folder.

use std::path::PathBuf;
use std::time::Instant;

use replaylens_analysis_core::{MatchAnalysis, MatchAnalyzer, TracingReporter};
use replaylens_common::{AnalysisConfig, MatchClock, ReplaylensError};
use replaylens_match_model::{MatchMetadata, PlayerSlot};
use serde::Serialize;

/// Serialized form of a finished analysis run.
#[derive(Serialize)]
struct MatchReport<'a> {
    generated_at: String,
    replay_path: String,
    metadata: &'a MatchMetadata,
    config: &'a AnalysisConfig,
    analysis: &'a MatchAnalysis,
}

pub fn run(path: PathBuf, config: AnalysisConfig, json: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    tracing::info!(path = %path.display(), "Started");

    let replay = super::load_replay(&path)?;
    let metadata = &replay.metadata;

    if let Some(info) = &metadata.replay {
        tracing::info!(replay = %info.replay_id, map = ?info.map_name, "Analysing replay");
    }
    tracing::info!(
        "Players: {} vs {}",
        metadata.display_name(PlayerSlot::One),
        metadata.display_name(PlayerSlot::Two)
    );

    let analyzer = MatchAnalyzer::new(config).map_err(ReplaylensError::from)?;
    let analysis = analyzer
        .analyze(&replay.actions, &mut TracingReporter)
        .map_err(ReplaylensError::from)?;

    if json {
        let report = MatchReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            replay_path: path.display().to_string(),
            metadata,
            config: analyzer.config(),
            analysis: &analysis,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text_report(metadata, &analysis, &analyzer.clock());
    }

    tracing::info!(
        elapsed_secs = started.elapsed().as_secs_f64(),
        "Finished"
    );
    Ok(())
}

fn print_text_report(metadata: &MatchMetadata, analysis: &MatchAnalysis, clock: &MatchClock) {
    match &metadata.replay {
        Some(info) => match &info.map_name {
            Some(map) => println!("Replay: {} ({map})", info.replay_id),
            None => println!("Replay: {}", info.replay_id),
        },
        None => println!("Replay: (no metadata)"),
    }
    println!(
        "Players: {} vs {}",
        metadata.display_name(PlayerSlot::One),
        metadata.display_name(PlayerSlot::Two)
    );
    println!();

    println!("APM:");
    for slot in PlayerSlot::ALL {
        let a = &analysis.profile(slot).aggregate;
        println!(
            "  {}: min {:.2} @ {}, avg {:.2}, max {:.2} @ {}, bot {}",
            metadata.display_name(slot),
            a.min_apm.value,
            clock.window_label(a.min_apm.window),
            a.avg_apm,
            a.max_apm.value,
            clock.window_label(a.max_apm.window),
            if a.is_bot { "yes" } else { "no" }
        );
    }
    println!();

    println!("Engagements: {}", analysis.engagements.len());
    for e in &analysis.engagements.engagements {
        println!(
            "  {}  at ({:.1}, {:.1})  {} ({:.1}, {:.1}) / {} ({:.1}, {:.1})",
            clock.window_label(e.window),
            e.avg_x,
            e.avg_y,
            metadata.display_name(PlayerSlot::One),
            e.p1_x,
            e.p1_y,
            metadata.display_name(PlayerSlot::Two),
            e.p2_x,
            e.p2_y
        );
    }
    println!();

    println!("Attack hotspots:");
    for slot in PlayerSlot::ALL {
        let hotspots = analysis.attack_hotspots(slot);
        let listed = if hotspots.is_empty() {
            "none".to_string()
        } else {
            hotspots
                .iter()
                .map(|h| format!("{} @ {}", h.count, clock.window_label(h.window)))
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("  {}: {listed}", metadata.display_name(slot));
    }
    println!();

    let highlights = &analysis.highlights;
    println!(
        "Highlights: {} (from {} candidates)",
        highlights.len(),
        highlights.candidate_count
    );
    for h in &highlights.highlights {
        println!("  {}  window {}", h.time, h.window);
    }
}
