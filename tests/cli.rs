use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LEADS: &str = r#"[
    {"name": "Acme Inc", "source": "Website", "stage": "New", "amount": 1200},
    {"name": "Tech Corp", "source": "Referral", "stage": "Qualified", "amount": 300},
    {"name": "Globex", "source": "website form", "stage": "Qualified", "amount": 950},
    {"name": "Initech", "stage": "Lost", "amount": 10}
]"#;

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("leads.json"), LEADS).unwrap();
        Self { dir }
    }

    fn leads(&self) -> PathBuf {
        self.dir.path().join("leads.json")
    }

    fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("sieve").unwrap();
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("SIEVE_DATA_DIR", self.data_dir())
            .env("NO_COLOR", "1")
            .env_remove("SIEVE_STORAGE_KEY")
            .env_remove("SIEVE_STRICT_OPERATORS")
            .env_remove("SIEVE_LOG")
            .env_remove("RUST_LOG");
        cmd
    }

    fn save_view(&self, key: &str, name: &str, conditions: &[&str]) {
        let mut cmd = self.cmd();
        cmd.args(["-k", key, "view", "save", name]);
        for c in conditions {
            cmd.args(["-w", c]);
        }
        cmd.assert().success();
    }
}

fn blob(data_dir: &Path, key: &str) -> serde_json::Value {
    let raw = std::fs::read_to_string(data_dir.join("filters").join(format!("{}.json", key)))
        .unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn apply_with_conditions_filters_records() {
    let env = Env::new();
    env.cmd()
        .arg("apply")
        .arg(env.leads())
        .args(["-w", "source:contains:web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Inc"))
        .stdout(predicate::str::contains("Globex"))
        .stdout(predicate::str::contains("Tech Corp").not())
        .stderr(predicate::str::contains("2 of 4 records match"));
}

#[test]
fn apply_conditions_are_conjunctive() {
    let env = Env::new();
    env.cmd()
        .arg("apply")
        .arg(env.leads())
        .args(["-w", "source:contains:web", "-w", "stage:equals:qualified"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Globex"))
        .stdout(predicate::str::contains("Acme Inc").not());
}

#[test]
fn apply_json_output_is_parseable() {
    let env = Env::new();
    let output = env
        .cmd()
        .arg("apply")
        .arg(env.leads())
        .args(["-w", "amount:greaterThan:500", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = records.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Acme Inc", "Globex"]);
}

#[test]
fn unknown_operator_is_rejected() {
    let env = Env::new();
    env.cmd()
        .arg("apply")
        .arg(env.leads())
        .args(["-w", "name:near:acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown operator: near"));
}

#[test]
fn malformed_condition_is_rejected() {
    let env = Env::new();
    env.cmd()
        .arg("apply")
        .arg(env.leads())
        .args(["-w", "name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected field:operator:value"));
}

#[test]
fn first_saved_view_becomes_default_and_applies() {
    let env = Env::new();
    env.save_view("leads", "Web", &["source:contains:web"]);
    env.save_view("leads", "Lost", &["stage:equals:lost"]);

    env.cmd()
        .args(["-k", "leads", "view", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Web"))
        .stdout(predicate::str::contains("Lost"));

    env.cmd()
        .args(["-k", "leads", "apply"])
        .arg(env.leads())
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Inc"))
        .stdout(predicate::str::contains("Initech").not())
        .stderr(predicate::str::contains("Using default view 'Web'"));

    env.cmd()
        .args(["-k", "leads", "apply", "--all"])
        .arg(env.leads())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initech"));
}

#[test]
fn toggling_default_keeps_at_most_one() {
    let env = Env::new();
    env.save_view("leads", "Web", &["source:contains:web"]);
    env.save_view("leads", "Lost", &["stage:equals:lost"]);

    env.cmd()
        .args(["-k", "leads", "view", "default", "Lost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("'Lost' is now the default view"));

    let stored = blob(&env.data_dir(), "leads");
    let defaults: Vec<&str> = stored["filters"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|f| f["isDefault"] == serde_json::Value::Bool(true))
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(defaults, vec!["Lost"]);

    env.cmd()
        .args(["-k", "leads", "view", "default", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no longer the default"));

    env.cmd()
        .args(["-k", "leads", "apply"])
        .arg(env.leads())
        .assert()
        .success()
        .stderr(predicate::str::contains("4 of 4 records match"));
}

#[test]
fn view_by_selector_and_delete() {
    let env = Env::new();
    env.save_view("leads", "Web", &["source:contains:web"]);
    env.save_view("leads", "Qualified", &["stage:equals:qualified"]);

    env.cmd()
        .args(["-k", "leads", "apply", "--view", "Qualified"])
        .arg(env.leads())
        .assert()
        .success()
        .stdout(predicate::str::contains("Tech Corp"))
        .stdout(predicate::str::contains("Acme Inc").not());

    env.cmd()
        .args(["-k", "leads", "view", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted view 'Web'"));

    env.cmd()
        .args(["-k", "leads", "view", "show", "Web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Saved filter not found"));
}

#[test]
fn storage_keys_are_isolated() {
    let env = Env::new();
    env.save_view("leads", "Web", &["source:contains:web"]);
    env.save_view("products", "Cheap", &["amount:lessThan:100"]);

    env.cmd()
        .args(["-k", "products", "view", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cheap"))
        .stdout(predicate::str::contains("Web").not());

    env.cmd()
        .arg("keys")
        .assert()
        .success()
        .stdout(predicate::str::contains("leads"))
        .stdout(predicate::str::contains("products"));
}

#[test]
fn save_requires_name() {
    let env = Env::new();
    env.cmd()
        .args(["view", "save", "  ", "-w", "name:contains:a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("a name is required"));
}

#[test]
fn save_checks_fields_against_records() {
    let env = Env::new();
    env.cmd()
        .args(["view", "save", "Big", "-w", "amount:greaterThan:10", "--records"])
        .arg(env.leads())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Field 'amount' is not filterable"));
}

#[test]
fn corrupt_store_reads_as_empty() {
    let env = Env::new();
    let filters_dir = env.data_dir().join("filters");
    std::fs::create_dir_all(&filters_dir).unwrap();
    std::fs::write(filters_dir.join("leads.json"), "{ not json").unwrap();

    env.cmd()
        .args(["-k", "leads", "apply"])
        .arg(env.leads())
        .assert()
        .success()
        .stderr(predicate::str::contains("4 of 4 records match"));

    env.save_view("leads", "Web", &["source:contains:web"]);
    let stored = blob(&env.data_dir(), "leads");
    assert_eq!(stored["version"], 1);
    assert_eq!(stored["filters"].as_array().unwrap().len(), 1);
}

#[test]
fn values_lists_distinct_sorted_values() {
    let env = Env::new();
    env.cmd()
        .arg("values")
        .arg(env.leads())
        .arg("stage")
        .assert()
        .success()
        .stdout("Lost\nNew\nQualified\n");
}

#[test]
fn fields_marks_numeric_columns() {
    let env = Env::new();
    env.cmd()
        .arg("fields")
        .arg(env.leads())
        .assert()
        .success()
        .stdout(predicate::str::contains("amount"))
        .stdout(predicate::str::contains("numeric, not filterable"));
}

#[test]
fn operators_lists_registry() {
    let env = Env::new();
    env.cmd()
        .arg("operators")
        .assert()
        .success()
        .stdout(predicate::str::contains("contains"))
        .stdout(predicate::str::contains("startsWith"))
        .stdout(predicate::str::contains("lessThan"));
}

#[test]
fn invalid_storage_key_is_rejected() {
    let env = Env::new();
    env.cmd()
        .args(["-k", "../escape", "view", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid storage key"));
}

#[test]
fn numeric_view_name_is_matched_by_name_first() {
    let env = Env::new();
    env.save_view("leads", "2", &["stage:equals:lost"]);
    env.save_view("leads", "Other", &["source:contains:web"]);

    env.cmd()
        .args(["-k", "leads", "view", "delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted view '2'"));

    env.cmd()
        .args(["-k", "leads", "view", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Other"));
}
