//! # Configuration Tests
//!
//! Defaults, profiles, JSON loading, and validation.

use std::io::Write;

use rstest::rstest;
use skidcheck::config::{ClockConfig, Config, DutConfig, ResetKind, RunConfig, TimeUnit};
use skidcheck::{ConfigError, Pattern, Profile};
use tempfile::NamedTempFile;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.name, "default");
    assert_eq!(config.dut.data_width, 8);
    assert!(!config.dut.reg_output);
    assert_eq!(config.dut.reset, ResetKind::Sync);
    assert!(config.validate().is_ok());
}

#[test]
fn test_clock_config_defaults() {
    let clock = ClockConfig::default();
    assert_eq!(clock.period, 10);
    assert_eq!(clock.half_period(), 5);
    assert_eq!(clock.unit, TimeUnit::Ns);
}

#[test]
fn test_run_config_defaults() {
    let run = RunConfig::default();
    assert_eq!(run.reset_cycles, 3);
    assert_eq!(run.item_count, 100);
    assert_eq!(run.patterns, Pattern::ALL.to_vec());
    assert_eq!(run.quiescent_cycles, 2);
    assert_eq!(run.drain_cycles, 4);
    assert_eq!(run.handshake_timeout, 1_000);
    assert_eq!(run.max_cycles, 100_000);
    assert!((run.ready_probability - 0.5).abs() < f64::EPSILON);
    assert!((run.valid_probability - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_profiles() {
    let small = Config::for_profile(Profile::Small);
    assert_eq!(small.name, "small");
    assert_eq!(small.dut.data_width, 1);
    assert!(!small.dut.reg_output);

    let big = Config::for_profile(Profile::Big);
    assert_eq!(big.name, "big");
    assert_eq!(big.dut.data_width, 32);
    assert!(big.dut.reg_output);
    assert_eq!(big.run, RunConfig::default());
}

#[rstest]
#[case("small", Profile::Small)]
#[case("BIG", Profile::Big)]
#[case("Big", Profile::Big)]
fn test_profile_from_str(#[case] text: &str, #[case] expected: Profile) {
    assert_eq!(text.parse::<Profile>().unwrap(), expected);
}

#[test]
fn test_profile_from_str_rejects_unknown() {
    let err = "medium".parse::<Profile>().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "profile", .. }));
}

#[test]
fn test_empty_json_is_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn test_json_overrides() {
    let json = r#"{
        "name": "async-wide",
        "dut": { "data_width": 64, "reset": "async" },
        "clock": { "period": 4, "unit": "ps" },
        "run": { "seed": 7, "patterns": ["RandomValid", "NoBackpressure"], "valid_probability": 0.25 }
    }"#;
    let config = Config::from_json(json).unwrap();

    assert_eq!(config.name, "async-wide");
    assert_eq!(
        config.dut,
        DutConfig {
            data_width: 64,
            reg_output: false,
            reset: ResetKind::Async,
        }
    );
    assert_eq!(config.clock.unit, TimeUnit::Ps);
    assert_eq!(config.clock.half_period(), 2);
    assert_eq!(config.run.seed, 7);
    assert_eq!(
        config.run.patterns,
        vec![Pattern::RandomValid, Pattern::NoBackpressure]
    );
    assert!((config.run.valid_probability - 0.25).abs() < f64::EPSILON);
    assert_eq!(config.run.item_count, 100);
}

#[test]
fn test_from_json_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "dut": {{ "data_width": 16, "reg_output": true }} }}"#).unwrap();

    let config = Config::from_json_file(file.path()).unwrap();
    assert_eq!(config.dut.data_width, 16);
    assert!(config.dut.reg_output);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_json_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        Config::from_json("{ \"dut\": "),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        Config::from_json(r#"{ "run": { "patterns": ["Sometimes"] } }"#),
        Err(ConfigError::Json(_))
    ));
}

#[rstest]
#[case(r#"{ "dut": { "data_width": 0 } }"#, "dut.data_width")]
#[case(r#"{ "dut": { "data_width": 65 } }"#, "dut.data_width")]
#[case(r#"{ "clock": { "period": 7 } }"#, "clock.period")]
#[case(r#"{ "clock": { "period": 0 } }"#, "clock.period")]
#[case(r#"{ "run": { "reset_cycles": 0 } }"#, "run.reset_cycles")]
#[case(r#"{ "run": { "patterns": [] } }"#, "run.patterns")]
#[case(r#"{ "run": { "handshake_timeout": 0 } }"#, "run.handshake_timeout")]
#[case(r#"{ "run": { "max_cycles": 0 } }"#, "run.max_cycles")]
#[case(r#"{ "run": { "ready_probability": 0.0 } }"#, "run.ready_probability")]
#[case(r#"{ "run": { "valid_probability": 1.5 } }"#, "run.valid_probability")]
fn test_validation_names_field(#[case] json: &str, #[case] expected: &str) {
    match Config::from_json(json) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
        other => panic!("expected {expected} to be rejected, got {other:?}"),
    }
}

#[test]
fn test_serialize_round_trip() {
    let config = Config::for_profile(Profile::Big);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(Config::from_json(&json).unwrap(), config);
}
