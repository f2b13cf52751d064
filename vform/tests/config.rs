//! Tests for validation timing configuration.

use vform::prelude::*;

#[test]
fn test_defaults() {
    let timing = TimingConfig::default();
    assert!(timing.validate_on_change);
    assert!(timing.validate_on_blur);
    assert!(!timing.validate_on_mount);
    assert!(!timing.validate_on_submit);
    assert!(timing.is_live());
}

#[test]
fn test_from_json_fills_missing_keys() {
    let timing = TimingConfig::from_json(r#"{ "validateOnSubmit": true }"#).unwrap();
    assert!(timing.validate_on_submit);
    assert!(timing.validate_on_change);
    assert!(timing.validate_on_blur);
}

#[test]
fn test_from_json_rejects_bad_input() {
    let err = TimingConfig::from_json(r#"{ "validateOnBlur": "yes" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().contains("invalid timing configuration"));
}

#[test]
fn test_submit_only_forces_live_flags_off() {
    let timing = TimingConfig::default()
        .validate_on_mount(true)
        .validate_on_submit(true);
    let effective = timing.effective();
    assert!(!effective.validate_on_change);
    assert!(!effective.validate_on_blur);
    assert!(!effective.validate_on_mount);
    assert!(!timing.is_live());
}

#[test]
fn test_may_validate_respects_event_flag() {
    let timing = TimingConfig::default().validate_on_blur(false);
    assert!(!timing.may_validate(FieldEventKind::Blur, true));
    assert!(timing.may_validate(FieldEventKind::Change, false));
}
