//! Test plan for the `chatsync-config` crate.
//!
//! These tests exercise the configuration loader across default handling,
//! file discovery, environment overrides, and validation behaviour.

use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use chatsync_config::{load, ApiConfig, ClientConfig, SearchConfig, SessionConfig};

const ENV_VARS_TO_RESET: &[&str] = &[
    "CHATSYNC_CONFIG",
    "CHATSYNC__API__BASE_URL",
    "CHATSYNC__API__REQUEST_TIMEOUT_SECONDS",
    "CHATSYNC__SESSION__PATH",
    "CHATSYNC__SEARCH__MAX_RESULTS",
];

struct TestContext {
    vars: Vec<(String, Option<String>)>,
    original_dir: Option<PathBuf>,
}

impl TestContext {
    fn new() -> Self {
        Self {
            vars: Vec::new(),
            original_dir: None,
        }
    }

    fn reset_environment(&mut self) {
        for key in ENV_VARS_TO_RESET {
            self.remove_var(key);
        }
    }

    fn set_var(&mut self, key: &str, value: impl AsRef<str>) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value.as_ref());
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }

    fn set_current_dir(&mut self, dir: &Path) {
        if self.original_dir.is_none() {
            self.original_dir =
                Some(std::env::current_dir().expect("failed to capture current directory"));
        }
        std::env::set_current_dir(dir).expect("failed to set current directory");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(original) = self.original_dir.take() {
            let _ = std::env::set_current_dir(original);
        }

        while let Some((key, value)) = self.vars.pop() {
            match value {
                Some(val) => std::env::set_var(&key, val),
                None => std::env::remove_var(&key),
            }
        }
    }
}

fn write_config_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create config directories");
    }
    fs::write(path, contents).expect("failed to write config file");
}

fn isolated() -> (TempDir, TestContext) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());
    (temp_dir, ctx)
}

#[test]
#[serial]
fn load_uses_default_values_when_no_files_found() {
    let (_temp_dir, _ctx) = isolated();

    let config = load().expect("configuration load should succeed without files");
    let defaults = ClientConfig::default();

    assert_eq!(config.api.base_url, defaults.api.base_url);
    assert_eq!(
        config.api.request_timeout_seconds,
        defaults.api.request_timeout_seconds
    );
    assert_eq!(config.session.path, defaults.session.path);
    assert_eq!(config.search.max_results, defaults.search.max_results);
}

#[test]
#[serial]
fn load_picks_first_available_file_in_search_order() {
    let (temp_dir, _ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "chatsync.toml",
        r#"
        [api]
        request_timeout_seconds = 5
        "#,
    );
    write_config_file(
        temp_dir.path(),
        "config/chatsync.toml",
        r#"
        [api]
        request_timeout_seconds = 9
        "#,
    );

    let config = load().expect("configuration load should pick the first file");
    assert_eq!(config.api.request_timeout_seconds, 5);
}

#[test]
#[serial]
fn load_merges_partial_file_with_defaults() {
    let (temp_dir, _ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "chatsync.toml",
        r#"
        [api]
        base_url = "https://chat.example.com"

        [search]
        max_results = 10
        "#,
    );

    let config = load().expect("configuration load should succeed");
    let defaults = ClientConfig::default();

    assert_eq!(config.api.base_url, "https://chat.example.com");
    assert_eq!(
        config.api.request_timeout_seconds,
        defaults.api.request_timeout_seconds
    );
    assert_eq!(config.search.max_results, 10);
    assert_eq!(config.session.path, defaults.session.path);
}

#[test]
#[serial]
fn load_applies_environment_overrides() {
    let (temp_dir, mut ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "chatsync.toml",
        r#"
        [api]
        request_timeout_seconds = 12
        "#,
    );

    ctx.set_var("CHATSYNC__API__REQUEST_TIMEOUT_SECONDS", "3");

    let config = load().expect("configuration load should honour env overrides");
    assert_eq!(config.api.request_timeout_seconds, 3);
}

#[test]
#[serial]
fn load_reads_explicit_config_path() {
    let (temp_dir, mut ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "elsewhere/client.toml",
        r#"
        [session]
        path = "/tmp/chatsync-session.json"
        "#,
    );
    let explicit = temp_dir.path().join("elsewhere/client.toml");
    ctx.set_var("CHATSYNC_CONFIG", explicit.display().to_string());

    let config = load().expect("configuration load should read CHATSYNC_CONFIG");
    assert_eq!(
        config.session.path,
        PathBuf::from("/tmp/chatsync-session.json")
    );
}

#[test]
#[serial]
fn load_strips_trailing_slash_from_base_url() {
    let (_temp_dir, mut ctx) = isolated();

    ctx.set_var("CHATSYNC__API__BASE_URL", "https://chat.example.com/");

    let config = load().expect("configuration load should succeed");
    assert_eq!(config.api.base_url, "https://chat.example.com");
}

#[test]
#[serial]
fn load_errors_on_invalid_toml_contents() {
    let (temp_dir, _ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "chatsync.toml",
        r#"
        [api]
        request_timeout_seconds = "not-a-number
        "#,
    );

    let error = load().expect_err("invalid TOML should cause load to fail");
    let message = error.to_string();
    assert!(
        message.contains("invalid configuration")
            || message.contains("unable to build configuration"),
        "unexpected error message: {message}"
    );
}

#[test]
fn api_config_defaults_match_local_server() {
    let defaults = ApiConfig::default();
    assert_eq!(defaults.base_url, "http://127.0.0.1:5000");
    assert_eq!(defaults.request_timeout().as_secs(), 30);
}

#[test]
fn session_and_search_defaults() {
    assert_eq!(SessionConfig::default().path, PathBuf::from("userInfo.json"));
    assert_eq!(SearchConfig::default().max_results, 50);
}
