// tests/config_env.rs
//
// Config and lexicon loading driven by environment variables. Serialized because
// the process environment is shared between tests.

use std::{env, fs};

use feedback_sentiment::{
    config::{
        sentiment::{ENV_BIND_ADDR, ENV_CONFIG_PATH, ENV_RELIABILITY_THRESHOLD},
        AnalyzerConfig,
    },
    lexicon::{LexiconStore, ENV_LEXICON_PATH},
};

fn clear_env() {
    for key in [ENV_CONFIG_PATH, ENV_RELIABILITY_THRESHOLD, ENV_BIND_ADDR, ENV_LEXICON_PATH] {
        env::remove_var(key);
    }
}

#[serial_test::serial]
#[test]
fn missing_config_file_means_defaults() {
    clear_env();
    let tmp = tempfile::tempdir().unwrap();
    env::set_var(ENV_CONFIG_PATH, tmp.path().join("nope.toml"));

    let cfg = AnalyzerConfig::from_toml().unwrap();
    assert_eq!(cfg, AnalyzerConfig::default());
    clear_env();
}

#[serial_test::serial]
#[test]
fn partial_toml_keeps_other_defaults() {
    clear_env();
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("sentiment.toml");
    fs::write(
        &path,
        r#"
[scorer]
intensifier_multiplier = 3.0

[server]
bind_addr = "127.0.0.1:9100"
"#,
    )
    .unwrap();
    env::set_var(ENV_CONFIG_PATH, &path);

    let cfg = AnalyzerConfig::from_toml().unwrap();
    let d = AnalyzerConfig::default();
    assert_eq!(cfg.scorer.intensifier_multiplier, 3.0);
    assert_eq!(cfg.scorer.diminisher_multiplier, d.scorer.diminisher_multiplier);
    assert_eq!(cfg.server.bind_addr, "127.0.0.1:9100");
    assert_eq!(cfg.classifier, d.classifier);
    clear_env();
}

#[serial_test::serial]
#[test]
fn env_overrides_apply_after_file() {
    clear_env();
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("sentiment.toml");
    fs::write(&path, "[language]\nreliability_threshold = 0.5\n").unwrap();
    env::set_var(ENV_CONFIG_PATH, &path);

    assert_eq!(AnalyzerConfig::from_toml().unwrap().language.reliability_threshold, 0.5);

    env::set_var(ENV_RELIABILITY_THRESHOLD, "0.9");
    env::set_var(ENV_BIND_ADDR, " 0.0.0.0:7000 ");
    let cfg = AnalyzerConfig::from_toml().unwrap();
    assert_eq!(cfg.language.reliability_threshold, 0.9);
    assert_eq!(cfg.server.bind_addr, "0.0.0.0:7000");

    // out of range clamps, garbage is ignored
    env::set_var(ENV_RELIABILITY_THRESHOLD, "7");
    assert_eq!(AnalyzerConfig::from_toml().unwrap().language.reliability_threshold, 1.0);
    env::set_var(ENV_RELIABILITY_THRESHOLD, "high");
    assert_eq!(AnalyzerConfig::from_toml().unwrap().language.reliability_threshold, 0.5);
    clear_env();
}

#[serial_test::serial]
#[test]
fn invalid_config_file_is_an_error() {
    clear_env();
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("broken.toml");
    fs::write(&path, "[scorer\nintensifier_multiplier = ").unwrap();
    env::set_var(ENV_CONFIG_PATH, &path);

    let err = AnalyzerConfig::from_toml().unwrap_err();
    assert!(err.to_string().contains("Invalid sentiment config"));
    assert_eq!(AnalyzerConfig::from_env_or_default(), AnalyzerConfig::default());
    clear_env();
}

#[serial_test::serial]
#[test]
fn lexicon_path_merges_custom_entries() {
    clear_env();
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("custom.json");
    fs::write(
        &path,
        r#"[
            {"word": "lodi", "sentiment": "positive", "weight": 1.5},
            {"word": "pangit", "sentiment": "neutral", "weight": 1.0},
            {"word": "", "sentiment": "positive", "weight": 1.0}
        ]"#,
    )
    .unwrap();
    env::set_var(ENV_LEXICON_PATH, &path);

    let store = LexiconStore::from_env();
    assert_eq!(store.word("lodi").map(|e| e.weight), Some(1.5));
    assert!(store.word("pangit").is_none());
    assert!(store.word("maganda").is_some());
    clear_env();
}

#[serial_test::serial]
#[test]
fn unusable_lexicon_path_falls_back_to_defaults() {
    clear_env();
    let tmp = tempfile::tempdir().unwrap();
    let defaults = LexiconStore::defaults();

    env::set_var(ENV_LEXICON_PATH, tmp.path().join("missing.json"));
    assert_eq!(LexiconStore::from_env().len(), defaults.len());

    let bad = tmp.path().join("bad.json");
    fs::write(&bad, "{ not json").unwrap();
    env::set_var(ENV_LEXICON_PATH, &bad);
    assert_eq!(LexiconStore::from_env().len(), defaults.len());
    clear_env();
}
