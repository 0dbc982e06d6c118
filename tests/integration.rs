//! Integration tests for the offline artdesk subcommands

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

/// Temp directory holding an optional config file
struct TestEnv {
    _temp_dir: TempDir,
    config_path: PathBuf,
}

impl TestEnv {
    /// No config file on disk; offline commands fall back to defaults
    fn empty() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        Self {
            _temp_dir: temp_dir,
            config_path,
        }
    }

    fn with_config(contents: &str) -> Self {
        let env = Self::empty();
        fs::write(&env.config_path, contents).unwrap();
        env
    }

    fn cmd(&self) -> AssertCommand {
        let mut cmd = artdesk_cmd();
        cmd.env_remove("ARTDESK_API_URL")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config_path);
        cmd
    }
}

fn artdesk_cmd() -> AssertCommand {
    AssertCommand::cargo_bin("artdesk").unwrap()
}

// =============================================================================
// Query codec
// =============================================================================

#[test]
fn test_encode_builds_canonical_query() {
    let env = TestEnv::empty();
    env.cmd()
        .args([
            "encode", "--search", "lo fi", "--country", "US", "--tag", "Pop", "--tag", "Hip Hop",
            "--page", "2",
        ])
        .assert()
        .success()
        .stdout("search=lo+fi&country=us&tags=hiphop&tags=pop&page=2\n");
}

#[test]
fn test_encode_default_filter_is_empty() {
    let env = TestEnv::empty();
    env.cmd().arg("encode").assert().success().stdout("\n");
}

#[test]
fn test_encode_rejects_unknown_tag() {
    let env = TestEnv::empty();
    env.cmd()
        .args(["encode", "--tag", "polka"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tag `polka`"));
}

#[test]
fn test_encode_rejects_unknown_country() {
    let env = TestEnv::empty();
    env.cmd()
        .args(["encode", "--country", "zz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown country code `zz`"));
}

#[test]
fn test_decode_explains_query() {
    let env = TestEnv::empty();
    env.cmd()
        .args(["decode", "?tags=pop&search=abc&country=us&tags=hiphop&page=3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("search:  abc"))
        .stdout(predicate::str::contains("country: United States (us)"))
        .stdout(predicate::str::contains("tags:    hiphop, pop"))
        .stdout(predicate::str::contains("page:    3"))
        .stdout(predicate::str::contains(
            "query:   search=abc&country=us&tags=hiphop&tags=pop&page=3",
        ));
}

#[test]
fn test_decode_drops_unknown_values() {
    let env = TestEnv::empty();
    env.cmd()
        .args(["decode", "country=zz&tags=retired&page=0&utm=x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("country: -"))
        .stdout(predicate::str::contains("tags:    -"))
        .stdout(predicate::str::contains("page:    1"));
}

// =============================================================================
// Catalogs
// =============================================================================

#[test]
fn test_countries_filter_by_title() {
    let env = TestEnv::empty();
    env.cmd()
        .args(["countries", "united"])
        .assert()
        .success()
        .stdout(predicate::str::contains("US\tUnited States"))
        .stdout(predicate::str::contains("GB\tUnited Kingdom"))
        .stdout(predicate::str::contains("France").not());
}

#[test]
fn test_tags_lists_builtin_vocabulary() {
    let env = TestEnv::empty();
    env.cmd()
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("pop\tPop\n"))
        .stdout(predicate::str::contains("hiphop\tHip Hop"));
}

#[test]
fn test_tags_uses_configured_vocabulary() {
    let env = TestEnv::with_config(
        r#"
        [catalog]
        tags = ["Ambient", "Drum and Bass"]
        "#,
    );
    env.cmd()
        .arg("tags")
        .assert()
        .success()
        .stdout("ambient\tAmbient\ndrumandbass\tDrum and Bass\n");

    env.cmd()
        .args(["encode", "--tag", "drum and bass"])
        .assert()
        .success()
        .stdout("tags=drumandbass\n");
}

#[test]
fn test_slug_collision_is_a_config_error() {
    let env = TestEnv::with_config(
        r#"
        [catalog]
        tags = ["Hip Hop", "HipHop"]
        "#,
    );
    env.cmd()
        .arg("tags")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid [catalog] tags"));
}

#[test]
fn test_invalid_toml_is_reported() {
    let env = TestEnv::with_config("api_url = ");
    env.cmd()
        .arg("tags")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

// =============================================================================
// Network commands without a usable configuration
// =============================================================================

#[test]
fn test_search_requires_config_file() {
    let env = TestEnv::empty();
    env.cmd()
        .arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn test_search_requires_api_url() {
    let env = TestEnv::with_config("request_timeout_secs = 5\n");
    env.cmd()
        .arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("`api_url` must be specified"));
}

#[test]
fn test_edit_rejects_bad_api_url_scheme() {
    let env = TestEnv::with_config("api_url = \"ftp://example.com\"\n");
    env.cmd()
        .args(["edit", "42", "--set", "bio=x", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_url must use http or https"));
}
