use super::*;

#[test]
fn defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.min_loop_iteration, Duration::from_millis(25));
    assert!(!config.isolation);
    assert_eq!(config.isolated_namespace(), None);
}

#[test]
fn isolated_namespace_uses_file_stem() {
    let config = EngineConfig {
        script_name: Some("scripts/mining.uos".to_string()),
        ..EngineConfig::default()
    };
    assert_eq!(config.isolated_namespace().as_deref(), Some("mining"));

    let bare = EngineConfig {
        script_name: Some("healer".to_string()),
        ..EngineConfig::default()
    };
    assert_eq!(bare.isolated_namespace().as_deref(), Some("healer"));
}
