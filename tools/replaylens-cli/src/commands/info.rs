//! Show replay information.

use std::path::PathBuf;

use replaylens_common::{format_mm_ss, AnalysisConfig};
use replaylens_match_model::PlayerSlot;

pub fn run(path: PathBuf, config: &AnalysisConfig) -> anyhow::Result<()> {
    let replay = super::load_replay(&path)?;
    let metadata = &replay.metadata;
    let clock = config.clock();

    println!("Replay folder: {}", replay.root.display());
    match &metadata.replay {
        Some(info) => {
            println!("  ID: {}", info.replay_id);
            println!("  Map: {}", info.map_name.as_deref().unwrap_or("unknown"));
        }
        None => println!("  No replay metadata"),
    }
    println!();

    println!("Players:");
    for slot in PlayerSlot::ALL {
        println!(
            "  {}: {} actions, {} attacks",
            metadata.display_name(slot),
            replay.action_count(slot),
            replay.attack_count(slot)
        );
    }
    println!();

    println!("Timeline:");
    println!("  Actions: {}", replay.actions.len());
    match replay.last_frame() {
        Some(frame) => {
            println!("  Last frame: {frame}");
            println!(
                "  Duration: {} (at {}s per frame)",
                format_mm_ss(clock.frame_to_secs(frame)),
                clock.frame_duration_secs()
            );
            if let Some(last_window) = frame.checked_div(clock.window_size()) {
                println!(
                    "  Windows: {} of {} frames ({:.1}s each)",
                    last_window + 1,
                    clock.window_size(),
                    clock.window_duration_secs()
                );
            }
        }
        None => println!("  Empty action log"),
    }

    let missing = replay.missing_metadata_files();
    if !missing.is_empty() {
        println!();
        for issue in &missing {
            println!("  - {issue}");
        }
    }

    Ok(())
}
