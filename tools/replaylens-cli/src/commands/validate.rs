//! Validate a replay folder.

use std::path::PathBuf;

use replaylens_match_model::PlayerSlot;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating replay at: {}", path.display());

    let replay = super::load_replay(&path)?;

    println!("  Actions: {}", replay.actions.len());
    for slot in PlayerSlot::ALL {
        println!(
            "  {}: {} actions",
            replay.metadata.display_name(slot),
            replay.action_count(slot)
        );
    }

    let mut issues = replay.missing_metadata_files();
    for slot in PlayerSlot::ALL {
        if replay.action_count(slot) == 0 {
            tracing::warn!(player = %slot, "No actions recorded");
            issues.push(format!("{slot} has no actions; analysis will fail"));
        }
    }

    if issues.is_empty() {
        println!("\nReplay is valid.");
    } else {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
        println!(
            "\n{} issue(s) found. Replay may not be fully usable.",
            issues.len()
        );
    }

    Ok(())
}
