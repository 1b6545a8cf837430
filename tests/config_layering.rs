use std::fs;

use merge_drop::core::config::config::GameConfig;

#[test]
fn local_layer_overrides_only_its_keys() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("game.ron");
    let local = dir.path().join("game.local.ron");
    fs::write(
        &base,
        r#"(
            window: (width: 600.0, height: 900.0, title: "Base"),
            drop: (cooldown_secs: 0.25),
            capacity: (max_balls: 100, evict_count: 10),
        )"#,
    )
    .unwrap();
    fs::write(&local, r#"(window: (title: "Local"), capacity: (evict_count: 20))"#).unwrap();

    let (cfg, used, errors) = GameConfig::load_layered([&base, &local]);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(used.len(), 2);
    assert_eq!(cfg.window.title, "Local");
    assert_eq!(cfg.window.width, 600.0);
    assert_eq!(cfg.drop.cooldown_secs, 0.25);
    assert_eq!(cfg.capacity.max_balls, 100);
    assert_eq!(cfg.capacity.evict_count, 20);
}

#[test]
fn missing_layers_are_skipped_silently() {
    let dir = tempfile::tempdir().unwrap();
    let (cfg, used, errors) = GameConfig::load_layered([dir.path().join("nope.ron")]);
    assert!(used.is_empty());
    assert!(errors.is_empty());
    assert_eq!(cfg, GameConfig::default());
}

#[test]
fn broken_layer_is_reported_and_others_still_apply() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.ron");
    let bad = dir.path().join("bad.ron");
    fs::write(&good, "(drop: (cooldown_secs: 1.0))").unwrap();
    fs::write(&bad, "(drop: (cooldown_secs: ").unwrap();

    let (cfg, used, errors) = GameConfig::load_layered([&good, &bad]);
    assert_eq!(used.len(), 1);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("parse error"));
    assert_eq!(cfg.drop.cooldown_secs, 1.0);
}

#[test]
fn shipped_config_parses_and_validates() {
    let (cfg, used, errors) = GameConfig::load_layered([concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/assets/config/game.ron"
    )]);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(used.len(), 1);
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    assert_eq!(cfg.capacity_config().max_balls, 180);
    assert!(cfg.leaderboard.url.is_some());
}
