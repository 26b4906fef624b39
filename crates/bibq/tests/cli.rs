//! CLI integration tests for bibq commands.
//!
//! These tests focus on exit codes and the data each command emits, not on table layout.

#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to run `bibq` with HOME and the working directory isolated to `dir`.
fn bibq_in(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("bibq").unwrap();
    cmd.env("HOME", dir).env_remove("RUST_LOG").current_dir(dir);
    cmd
}

/// Runs a command expected to succeed and parses its stdout as JSON.
fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

mod compile {
    use super::*;

    #[test]
    fn json_units() {
        let dir = temp_dir();
        let value = json_output(bibq_in(dir.path()).args([
            "compile",
            "--json",
            "ellis muon or kaon not title:\"dark matter\"",
        ]));
        assert_eq!(
            value,
            json!([
                ["|", "ellis", "", "w"],
                ["+", "muon", "", "w"],
                ["|", "kaon", "", "w"],
                ["-", "dark matter", "title", "a"],
            ])
        );
    }

    #[test]
    fn field_and_mode_overrides() {
        let dir = temp_dir();
        let value = json_output(bibq_in(dir.path()).args([
            "compile",
            "--json",
            "-f",
            "title",
            "-m",
            "partial",
            "the word",
        ]));
        assert_eq!(value, json!([["|", "%the word%", "title", "a"]]));
    }

    #[test]
    fn tag_prefix_is_exact() {
        let dir = temp_dir();
        let value = json_output(bibq_in(dir.path()).args(["compile", "--json", "100__a:ellis"]));
        assert_eq!(value, json!([["|", "ellis", "100__a", "a"]]));
    }

    #[test]
    fn blank_pattern_yields_empty_array() {
        let dir = temp_dir();
        let value = json_output(bibq_in(dir.path()).args(["compile", "--json", "   "]));
        assert_eq!(value, json!([]));
    }

    #[test]
    fn table_output() {
        let dir = temp_dir();
        bibq_in(dir.path())
            .args(["compile", "muon kaon"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Term"))
            .stdout(predicate::str::contains("kaon"));
    }

    #[test]
    fn uses_config_default_field() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".bibq.toml"),
            "[search]\ndefault_field = \"author\"\nmatching = \"any\"\n\n[fields]\nauthor = \"100__a\"\n",
        )
        .unwrap();

        let value = json_output(bibq_in(dir.path()).args(["compile", "--json", "ellis cern"]));
        assert_eq!(
            value,
            json!([["|", "ellis", "author", "w"], ["|", "cern", "author", "w"]])
        );
    }

    #[test]
    fn no_config_ignores_config() {
        let dir = temp_dir();
        fs::write(dir.path().join(".bibq.toml"), "[search]\nmatching = \"exact\"\n").unwrap();

        let value = json_output(bibq_in(dir.path()).args([
            "compile",
            "--json",
            "--no-config",
            "muon kaon",
        ]));
        assert_eq!(value, json!([["|", "muon", "", "w"], ["+", "kaon", "", "w"]]));
    }

    #[test]
    fn invalid_config_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join(".bibq.toml"), "[search\n").unwrap();

        bibq_in(dir.path())
            .args(["compile", "muon"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }

    #[test]
    fn wash_before_compile() {
        let dir = temp_dir();
        let value = json_output(bibq_in(dir.path()).args([
            "compile",
            "--json",
            "--wash",
            "  ellis*   muon ",
        ]));
        assert_eq!(value, json!([["|", "ellis", "", "w"], ["+", "muon", "", "w"]]));
    }

    #[test]
    fn unknown_mode_fails() {
        let dir = temp_dir();
        bibq_in(dir.path())
            .args(["compile", "-m", "fuzzy", "muon"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("matching modes are"));
    }
}

mod wash {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        let dir = temp_dir();
        bibq_in(dir.path())
            .args(["wash", "  muon    kaon  "])
            .assert()
            .success()
            .stdout("muon kaon\n");
    }
}

mod strip {
    use super::*;

    #[test]
    fn removes_accents() {
        let dir = temp_dir();
        bibq_in(dir.path())
            .args(["strip", "Ellis, Jönathan Ă. Müller"])
            .assert()
            .success()
            .stdout("Ellis, Jonathan A. Muller\n");
    }
}

mod arg {
    use super::*;

    #[test]
    fn int_scalar() {
        let dir = temp_dir();
        let value = json_output(bibq_in(dir.path()).args(["arg", "--kind", "int", "42"]));
        assert_eq!(value, json!(42));
    }

    #[test]
    fn int_from_sequence_head() {
        let dir = temp_dir();
        let value = json_output(bibq_in(dir.path()).args(["arg", "-k", "int", "7", "8"]));
        assert_eq!(value, json!(7));
    }

    #[test]
    fn bad_int_is_zero() {
        let dir = temp_dir();
        let value = json_output(bibq_in(dir.path()).args(["arg", "-k", "int", "ten"]));
        assert_eq!(value, json!(0));
    }

    #[test]
    fn list_from_scalar() {
        let dir = temp_dir();
        let value = json_output(bibq_in(dir.path()).args(["arg", "-k", "list", "x"]));
        assert_eq!(value, json!(["x"]));
    }

    #[test]
    fn str_from_sequence() {
        let dir = temp_dir();
        let value = json_output(bibq_in(dir.path()).args(["arg", "-k", "str", "--sequence", "a"]));
        assert_eq!(value, json!("a"));
    }

    #[test]
    fn unknown_kind_fails() {
        let dir = temp_dir();
        bibq_in(dir.path())
            .args(["arg", "-k", "float", "1"])
            .assert()
            .failure();
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let dir = temp_dir();
        bibq_in(dir.path()).arg("init").assert().success();

        let contents = fs::read_to_string(dir.path().join(".bibq.toml")).unwrap();
        assert!(contents.contains("# [search]"));
        assert!(contents.contains("# [fields]"));
    }

    #[test]
    fn fails_if_config_exists() {
        let dir = temp_dir();
        fs::write(dir.path().join(".bibq.toml"), "existing").unwrap();

        bibq_in(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn force_overwrites() {
        let dir = temp_dir();
        fs::write(dir.path().join(".bibq.toml"), "existing").unwrap();

        bibq_in(dir.path()).args(["init", "--force"]).assert().success();
        let contents = fs::read_to_string(dir.path().join(".bibq.toml")).unwrap();
        assert!(contents.contains("# [search]"));
    }

    #[test]
    fn global_writes_home_config() {
        let home = temp_dir();
        let work = temp_dir();

        #[allow(deprecated)]
        Command::cargo_bin("bibq")
            .unwrap()
            .env("HOME", home.path())
            .current_dir(work.path())
            .args(["init", "--global"])
            .assert()
            .success();

        assert!(home.path().join(".bibq.toml").exists());
        assert!(!work.path().join(".bibq.toml").exists());
    }
}

mod check {
    use super::*;

    #[test]
    fn no_config_is_ok() {
        let dir = temp_dir();
        bibq_in(dir.path())
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("No configuration files found"));
    }

    #[test]
    fn clean_config_is_ok() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".bibq.toml"),
            "[fields]\ntitle = [\"245__a\", \"246__a\"]\n",
        )
        .unwrap();

        bibq_in(dir.path())
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("No issues found"));
    }

    #[test]
    fn warnings_fail() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".bibq.toml"),
            "[search]\ndefault_field = \"journal\"\n",
        )
        .unwrap();

        bibq_in(dir.path())
            .arg("check")
            .assert()
            .failure()
            .stdout(predicate::str::contains("default field 'journal'"));
    }

    #[test]
    fn invalid_config_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join(".bibq.toml"), "[search]\nmatching = 3\n").unwrap();

        bibq_in(dir.path())
            .arg("check")
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }
}

mod config {
    use super::*;

    #[test]
    fn prints_effective_toml() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".bibq.toml"),
            "[search]\nmatching = \"o\"\n\n[fields]\nauthor = \"100__a\"\n",
        )
        .unwrap();

        bibq_in(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("matching = \"any\""))
            .stdout(predicate::str::contains("100__a"));
    }
}
