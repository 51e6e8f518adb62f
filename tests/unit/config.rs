use super::*;

#[test]
fn empty_json_is_all_defaults() {
    let cfg = CompilerConfig::from_json("{}").unwrap();
    assert_eq!(cfg.default_frame_rate, 30);
    assert_eq!(cfg.default_duration_ms, 3000.0);
    assert_eq!(cfg.default_canvas, Canvas::default());
    assert_eq!(cfg.resolver.segment_route, "/api/segment");
    assert_eq!(cfg.resolver.mode, ResolutionMode::LocalFile);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let cfg = CompilerConfig::from_json(
        r#"{"resolver": {"store_root": "/srv/store", "mode": "remote_passthrough"}, "default_frame_rate": 25}"#,
    )
    .unwrap();
    assert_eq!(cfg.resolver.store_root, PathBuf::from("/srv/store"));
    assert_eq!(cfg.resolver.mode, ResolutionMode::RemotePassthrough);
    assert_eq!(cfg.resolver.remote_base_url, "http://localhost:8080");
    assert_eq!(cfg.default_fps().unwrap().get(), 25);
}

#[test]
fn malformed_json_is_a_validation_error() {
    let err = CompilerConfig::from_json("{not json").unwrap_err();
    assert!(err.to_string().contains("config parse error"));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let path = std::env::temp_dir().join(format!(
        "reelcut_missing_config_{}.json",
        std::process::id()
    ));
    let cfg = CompilerConfig::load_or_default(Some(&path)).unwrap();
    assert_eq!(cfg.default_frame_rate, 30);
    assert_eq!(CompilerConfig::load_or_default(None).unwrap().default_frame_rate, 30);
}

#[test]
fn validate_flags_zero_frame_rate_and_empty_route() {
    let mut cfg = CompilerConfig::default();
    cfg.default_frame_rate = 0;
    cfg.resolver.segment_route = "/".into();
    cfg.resolver.mode = ResolutionMode::RemotePassthrough;
    let warnings = cfg.validate();
    assert_eq!(warnings.len(), 2);
    let err = cfg.default_fps().unwrap_err().to_string();
    assert_eq!(err, "validation error: default_frame_rate must be > 0");
}
