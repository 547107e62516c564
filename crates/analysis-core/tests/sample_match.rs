use std::path::PathBuf;

use replaylens_analysis_core::highlights::AttackRecord;
use replaylens_analysis_core::{MatchAnalyzer, NullReporter};
use replaylens_common::AnalysisConfig;
use replaylens_match_model::{LoadedReplay, PlayerSlot};

fn load_fixture() -> LoadedReplay {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-match");

    LoadedReplay::load(path).expect("fixture replay should load")
}

const APM_PER_ACTION: f64 = 60.0 / (100.0 * 0.042);

#[test]
fn sample_match_player_aggregates() {
    let replay = load_fixture();
    let analysis = MatchAnalyzer::with_defaults()
        .analyze(&replay.actions, &mut NullReporter)
        .unwrap();

    let p1 = &analysis.profile(PlayerSlot::One).aggregate;
    assert_eq!(p1.window_count, 3);
    assert_eq!(p1.total_actions, 9);
    assert_eq!(p1.total_attacks, 3);
    assert_eq!(p1.min_apm.window, 1);
    assert!((p1.min_apm.value - 2.0 * APM_PER_ACTION).abs() < 1e-9);
    assert_eq!(p1.max_apm.window, 5);
    assert!((p1.max_apm.value - 4.0 * APM_PER_ACTION).abs() < 1e-9);
    assert!((p1.avg_apm - 3.0 * APM_PER_ACTION).abs() < 1e-9);
    assert!(!p1.is_bot);

    let p2 = &analysis.profile(PlayerSlot::Two).aggregate;
    assert_eq!(p2.window_count, 4);
    assert_eq!(p2.min_apm.window, 0);
    assert_eq!(p2.max_apm.window, 9);
    assert!((p2.avg_apm - 11.0 / 4.0 * APM_PER_ACTION).abs() < 1e-9);
    assert!(!p2.is_bot);
}

#[test]
fn sample_match_engagements_and_highlights() {
    let replay = load_fixture();
    let analysis = MatchAnalyzer::with_defaults()
        .analyze(&replay.actions, &mut NullReporter)
        .unwrap();

    assert_eq!(analysis.engagements.windows(), vec![5]);
    let engagement = &analysis.engagements.engagements[0];
    assert!((engagement.avg_x - 110.0).abs() < 1e-9);
    assert!((engagement.avg_y - 105.0).abs() < 1e-9);

    // Candidates: [5, 9] peaks, [1, 5] + [5] attacks, [5] engagement.
    assert_eq!(analysis.highlights.candidate_count, 6);
    assert_eq!(analysis.highlights.windows(), vec![1, 5, 9]);
    let times: Vec<_> = analysis
        .highlights
        .highlights
        .iter()
        .map(|h| h.time.as_str())
        .collect();
    assert_eq!(times, vec!["00:04", "00:21", "00:37"]);

    assert_eq!(
        analysis.attack_hotspots(PlayerSlot::One),
        &[
            AttackRecord { count: 2, window: 1 },
            AttackRecord { count: 1, window: 5 },
        ]
    );
    assert_eq!(
        analysis.attack_hotspots(PlayerSlot::Two),
        &[AttackRecord { count: 1, window: 5 }]
    );
}

#[test]
fn sample_match_wider_attack_compression_merges_hotspots() {
    let replay = load_fixture();
    let analyzer = MatchAnalyzer::new(AnalysisConfig {
        attack_compression: 4,
        ..Default::default()
    })
    .unwrap();
    let analysis = analyzer.analyze(&replay.actions, &mut NullReporter).unwrap();

    assert_eq!(
        analysis.attack_hotspots(PlayerSlot::One),
        &[AttackRecord { count: 3, window: 3 }]
    );
}

#[test]
fn sample_match_metadata_is_reporting_only() {
    let replay = load_fixture();
    assert_eq!(replay.metadata.display_name(PlayerSlot::One), "Ares");
    assert_eq!(replay.metadata.display_name(PlayerSlot::Two), "Brood");

    let mut renamed = replay.clone();
    renamed.metadata.players.clear();

    let analyzer = MatchAnalyzer::with_defaults();
    let a = analyzer.analyze(&replay.actions, &mut NullReporter).unwrap();
    let b = analyzer.analyze(&renamed.actions, &mut NullReporter).unwrap();
    assert_eq!(a, b);
}

#[test]
fn shuffled_actions_give_identical_analysis() {
    let replay = load_fixture();
    let mut reversed = replay.actions.clone();
    reversed.reverse();

    let analyzer = MatchAnalyzer::with_defaults();
    let a = analyzer.analyze(&replay.actions, &mut NullReporter).unwrap();
    let b = analyzer.analyze(&reversed, &mut NullReporter).unwrap();

    assert_eq!(a.profiles[0].aggregate, b.profiles[0].aggregate);
    assert_eq!(a.profiles[1].aggregate, b.profiles[1].aggregate);
    assert_eq!(a.highlights, b.highlights);
    assert_eq!(a.engagements, b.engagements);
}
