//! Replays the bundled sample scripts end to end.

use std::path::PathBuf;

use swipe_replay::{run, Script};

fn load(name: &str) -> Script {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scripts")
        .join(name);
    Script::load(&path).expect("sample script")
}

#[test]
fn list_batch_script_reports_one_descending_batch() {
    let script = load("list_batch.json");
    let report = run(&script, script.resolve_config(None)).expect("replay");

    // Row 4 is locked and the press during the touch scroll is ignored.
    assert_eq!(report.dismissed, vec![vec![2, 1]]);
    assert_eq!(report.touches.container_cancels, 1);
    assert_eq!(report.consumed.len(), 16);
    assert!(report
        .rows
        .iter()
        .all(|row| row.translation_x.abs() < 1e-3 && (row.alpha - 1.0).abs() < 1e-3));
}

#[test]
fn card_fling_script_dismisses_left() {
    let script = load("card_fling.json");
    let config = script.resolve_config(Some(3.0));
    assert_eq!(config.animation_duration.as_millis(), 250);

    let report = run(&script, config).expect("replay");
    assert_eq!(report.dismissed, vec![vec![0]]);
    assert!(report.finished_at_ms >= 35 + 500);
}

#[test]
fn report_serializes_to_json() {
    let script = load("list_batch.json");
    let report = run(&script, script.resolve_config(None)).expect("replay");
    let json = serde_json::to_value(&report).expect("json");
    assert!(json["rows"][0].get("id").is_none());
    assert_eq!(json["dismissed"][0][0], 2);
}
