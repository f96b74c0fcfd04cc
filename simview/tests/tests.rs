use simview::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("simview-{}-{}", name, std::process::id()));
    create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn json_summary_is_written() {
    let dir = scratch_dir("json");
    let json_path = dir.join("summary.json");
    let cfg = Config {
        out_dir:    dir.clone(),
        plots:      false,
        json:       Some(json_path.clone()),
        ..Config::default()
    };
    let mut sink: Vec<u8> = vec![];
    run(Scenario::classroom().unwrap(), &cfg, &mut sink).unwrap();

    let text = std::fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v["strategies"].as_array().unwrap().len(), 3);
    assert_eq!(v["strategies"][1]["outcome"]["fragmentation"], 10);
    assert_eq!(v["safety"]["deadlocked"], serde_json::json!([]));
    // No images unless asked for.
    assert!(!dir.join("comparison.png").exists());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn console_report_covers_both_halves() {
    let cfg = Config {
        plots:      false,
        strategies: vec![Strategy::Best],
        ..Config::default()
    };
    let mut sink: Vec<u8> = vec![];
    run(Scenario::classroom().unwrap(), &cfg, &mut sink).unwrap();
    let text = String::from_utf8(sink).unwrap();

    assert!(text.contains("Best Fit Allocation:"));
    assert!(!text.contains("First Fit Allocation:"));
    assert!(text.contains("Process 1 -> Block 3 (20 -> Remaining: 0)"));
    assert!(text.contains("Total Fragmentation: 10"));
    assert!(text.contains("Available resources: 3"));
    assert!(text.contains("Safe sequence: P2 -> P1 -> P3 -> P0 -> P4 -> P5 -> P6 -> P7 -> P8 -> P9"));
}
