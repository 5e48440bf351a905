//! End-to-end CLI tests
//!
//! Each test runs the labeling-workflow binary inside a temp directory with
//! its own catalog export and project store.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs::write;
use std::process::Command;
use tempfile::TempDir;

/// Temp working directory holding a catalog and an empty project store
pub struct CliTestEnvironment {
    pub temp_dir: TempDir,
}

impl CliTestEnvironment {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let catalog = json!({
            "workspaces": [
                {"id": 10, "team_id": 1, "name": "Streets"},
                {"id": 20, "team_id": 2, "name": "Harbor"}
            ],
            "classes": [
                {"title": "car", "shape": "rectangle", "color": "#FF0000"},
                {"title": "person", "shape": "polygon"}
            ],
            "users": [
                {"id": 1, "login": "anna", "role": "reviewer", "team_ids": [1, 2]},
                {"id": 2, "login": "bob", "role": "annotator", "team_ids": [1, 2]}
            ]
        });
        write(temp_dir.path().join("catalog.json"), catalog.to_string())?;
        Ok(Self { temp_dir })
    }

    pub fn write_plan(&self, plan: Value) -> Result<(), Box<dyn std::error::Error>> {
        write(self.temp_dir.path().join("plan.json"), plan.to_string())?;
        Ok(())
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("labeling-workflow").unwrap();
        cmd.current_dir(self.temp_dir.path())
            .env("LABELING_WORKFLOW__CATALOG__PATH", "catalog.json")
            .env("LABELING_WORKFLOW__STORE__DIRECTORY", "projects")
            .env("LABELING_WORKFLOW__WORKFLOW__NUMBER_OF_TEAMS", "2")
            .env_remove("PROJECT_ID")
            .env_remove("DATASET_ID")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn stored_project(&self, project_id: u64) -> Option<Value> {
        let path = self.temp_dir.path().join("projects").join(format!("{project_id}.json"));
        let contents = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents).ok()
    }
}

fn complete_plan() -> Value {
    json!({
        "teams": [
            {"workspace_id": 10, "classes": ["car"], "reviewers": [1], "labelers": [2]},
            {"workspace_id": 20, "classes": ["person"], "reviewers": [1], "labelers": [2]}
        ]
    })
}

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("labeling-workflow").unwrap();

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("layout"))
        .stdout(predicate::str::contains("init-config"));
}

#[test]
fn test_plan_saves_and_show_reads_back() {
    let env = CliTestEnvironment::new().unwrap();
    env.write_plan(complete_plan()).unwrap();

    env.command()
        .args(["plan", "plan.json", "--project", "7", "--dataset", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Team 1: Selected classes: car"))
        .stdout(predicate::str::contains("💾 Saved 2 step(s)"));

    let stored = env.stored_project(7).expect("project document written");
    let dataset = &stored["multi_team_labeling_workflow"]["42"];
    assert_eq!(dataset["1"]["workspace_id"], json!(10));
    assert_eq!(dataset["2"]["team_id"], json!(2));
    assert_eq!(dataset["2"]["selected_classes"][0]["title"], json!("person"));

    env.command()
        .args(["show", "--project", "7", "--dataset", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored configuration for project 7, dataset 42"))
        .stdout(predicate::str::contains("Team 2:"))
        .stdout(predicate::str::contains("Classes: person"));
}

#[test]
fn test_show_prints_ids_the_catalog_no_longer_offers() {
    let env = CliTestEnvironment::new().unwrap();
    let stored = json!({
        "multi_team_labeling_workflow": {
            "42": {
                "1": {
                    "step_number": 1,
                    "team_id": 1,
                    "workspace_id": 10,
                    "selected_classes": [{"title": "truck", "shape": "rectangle"}],
                    "reviewer_ids": [99],
                    "labeler_ids": [2]
                }
            }
        }
    });
    std::fs::create_dir_all(env.temp_dir.path().join("projects")).unwrap();
    write(env.temp_dir.path().join("projects").join("7.json"), stored.to_string()).unwrap();

    env.command()
        .args(["show", "--project", "7", "--dataset", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Classes: truck"))
        .stdout(predicate::str::contains("Reviewers: [99]"));
}

#[test]
fn test_incomplete_plan_fails_without_writing() {
    let env = CliTestEnvironment::new().unwrap();
    env.write_plan(json!({
        "teams": [{"workspace_id": 10, "classes": [], "reviewers": [1], "labelers": [2]}]
    }))
    .unwrap();

    env.command()
        .args(["plan", "plan.json", "--project", "7", "--dataset", "42"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("At least one class must be selected."))
        .stderr(predicate::str::contains("Workflow is incomplete"));

    assert!(env.stored_project(7).is_none());
}

#[test]
fn test_dry_run_leaves_store_untouched() {
    let env = CliTestEnvironment::new().unwrap();
    env.write_plan(complete_plan()).unwrap();

    env.command()
        .args(["plan", "plan.json", "--project", "7", "--dataset", "42", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(env.stored_project(7).is_none());
}

#[test]
fn test_layout_prints_widget_tree() {
    let env = CliTestEnvironment::new().unwrap();

    let output = env
        .command()
        .args(["layout", "--project", "7", "--dataset", "42"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let start = stdout.find('{').expect("layout JSON on stdout");
    let layout: Value = serde_json::from_str(&stdout[start..]).unwrap();
    assert_eq!(layout["type"], json!("container"));
    assert_eq!(layout["widgets"][0]["content_top_right"]["label"], json!("Save Workflow"));
    assert_eq!(layout["widgets"][0]["content_top_right"]["enabled"], json!(false));
}

#[test]
fn test_init_config_refuses_to_overwrite() {
    let env = CliTestEnvironment::new().unwrap();

    env.command().arg("init-config").assert().success();
    assert!(env.temp_dir.path().join("labeling-workflow.toml").exists());

    env.command()
        .arg("init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    env.command().args(["init-config", "--force"]).assert().success();
}
