use gpui_stream_dashboard::config::DashboardConfig;

#[test]
fn test_defaults() {
    let config = DashboardConfig::default();
    assert_eq!(config.stream.initial_count, 10_000);
    assert_eq!(config.stream.max_points, 50_000);
    assert_eq!(config.stream.tick_interval_ms, 100);
    assert_eq!(config.stream.auto_start_delay_ms, 1_000);
    assert_eq!(config.stream.grow_increment, 5_000);
    assert_eq!(config.stream.seed, None);
    assert_eq!(config.server.bind, "127.0.0.1:3000");
    assert_eq!(config.server.default_count, 10_000);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config =
        DashboardConfig::from_json(r#"{"stream": {"max_points": 2000, "seed": 5}}"#).unwrap();
    assert_eq!(config.stream.max_points, 2_000);
    assert_eq!(config.stream.seed, Some(5));
    assert_eq!(config.stream.initial_count, 10_000);
    assert_eq!(config.server, DashboardConfig::default().server);

    assert_eq!(DashboardConfig::from_json("{}").unwrap(), DashboardConfig::default());
}

#[test]
fn test_invalid_configs_rejected() {
    assert!(DashboardConfig::from_json(r#"{"stream": {"max_points": 0}}"#).is_err());
    assert!(DashboardConfig::from_json(r#"{"stream": {"tick_interval_ms": 0}}"#).is_err());
    assert!(DashboardConfig::from_json("not json").is_err());
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!(
        "stream-dashboard-config-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, r#"{"server": {"bind": "0.0.0.0:8080", "max_count": 50}}"#).unwrap();
    let config = DashboardConfig::load(&path);
    std::fs::remove_file(&path).ok();

    let config = config.unwrap();
    assert_eq!(config.server.bind, "0.0.0.0:8080");
    assert_eq!(config.server.max_count, 50);

    let missing = DashboardConfig::load(std::env::temp_dir().join("does-not-exist.json"));
    assert!(missing.is_err());
}
