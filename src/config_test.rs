use super::*;

#[test]
fn default_uses_seventeen_ms_fallback() {
    let config = Config::default();
    assert_eq!(config.fallback_interval_ms, 17);
    assert!(!config.force_timer_fallback);
}

#[test]
fn from_json_empty_object_is_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn from_json_reads_camel_case_fields() {
    let config = Config::from_json(r#"{"fallbackIntervalMs": 33, "forceTimerFallback": true}"#).unwrap();
    assert_eq!(config.fallback_interval_ms, 33);
    assert!(config.force_timer_fallback);
}

#[test]
fn from_json_partial_keeps_other_defaults() {
    let config = Config::from_json(r#"{"forceTimerFallback": true}"#).unwrap();
    assert_eq!(config.fallback_interval_ms, 17);
    assert!(config.force_timer_fallback);
}

#[test]
fn from_json_rejects_zero_interval() {
    let err = Config::from_json(r#"{"fallbackIntervalMs": 0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroInterval));
}

#[test]
fn from_json_rejects_malformed_input() {
    let err = Config::from_json("not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn from_json_rejects_wrong_types() {
    let err = Config::from_json(r#"{"fallbackIntervalMs": "fast"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
