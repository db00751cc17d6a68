use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

use super::*;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

fn temp_path(name: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    env::temp_dir().join(format!("todo_board_{name}_{}_{suffix}.toml", std::process::id()))
}

#[test]
fn defaults_point_at_local_server() {
    let settings = ClientSettings::default();
    assert_eq!(settings.server_url, "http://127.0.0.1:8000");
    assert_eq!(settings.poll_interval(), Duration::from_millis(1000));
    settings.validate().expect("default settings are valid");
}

#[test]
fn toml_overrides_defaults() {
    let mut settings = ClientSettings::default();
    settings
        .apply_toml("server_url = \"http://todo.internal:9000\"\npoll_interval_ms = 250\n")
        .expect("apply");
    assert_eq!(settings.server_url, "http://todo.internal:9000");
    assert_eq!(settings.poll_interval_ms, 250);
}

#[test]
fn toml_accepts_string_interval_and_ignores_zero() {
    let mut settings = ClientSettings::default();
    settings.apply_toml("poll_interval_ms = \"400\"").expect("apply");
    assert_eq!(settings.poll_interval_ms, 400);

    settings.apply_toml("poll_interval_ms = 0").expect("apply");
    assert_eq!(settings.poll_interval_ms, 400);

    settings.apply_toml("poll_interval_ms = -5").expect("apply");
    assert_eq!(settings.poll_interval_ms, 400);
}

#[test]
fn invalid_toml_is_an_error() {
    let mut settings = ClientSettings::default();
    assert!(settings.apply_toml("server_url = ").is_err());
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let mut settings = ClientSettings::default();
    settings
        .apply_toml("server_url = \"http://from-file:1\"")
        .expect("apply");
    settings.apply_env(env_from(&[
        ("TODO_SERVER_URL", "http://from-env:2"),
        ("APP__SERVER_URL", "http://from-app-env:3"),
        ("APP__POLL_INTERVAL_MS", "1500"),
    ]));
    assert_eq!(settings.server_url, "http://from-app-env:3");
    assert_eq!(settings.poll_interval_ms, 1500);
}

#[test]
fn unparsable_env_interval_is_ignored() {
    let mut settings = ClientSettings::default();
    settings.apply_env(env_from(&[("APP__POLL_INTERVAL_MS", "soon")]));
    assert_eq!(settings.poll_interval_ms, 1000);
}

#[test]
fn validate_rejects_non_http_urls() {
    let mut settings = ClientSettings::default();
    settings.server_url = "ftp://127.0.0.1".into();
    assert!(settings.validate().is_err());
    settings.server_url = "not a url".into();
    assert!(settings.validate().is_err());
}

#[test]
fn load_settings_reads_explicit_file() {
    let path = temp_path("explicit");
    fs::write(&path, "poll_interval_ms = 750\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.poll_interval_ms, 750);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn load_settings_requires_explicit_file_to_exist() {
    let path = temp_path("missing");
    let err = load_settings(Some(&path)).expect_err("missing file must fail");
    assert!(err.to_string().contains("failed to read"));
}
