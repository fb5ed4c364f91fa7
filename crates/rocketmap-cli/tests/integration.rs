#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rocketmap(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rocketmap").unwrap();
    cmd.current_dir(dir.path()).env("ROCKETMAP_ROOT", dir.path());
    cmd
}

fn init_project(dir: &TempDir) {
    rocketmap(dir).arg("init").assert().success();
}

fn create_canvas(dir: &TempDir, title: &str) {
    rocketmap(dir)
        .args(["canvas", "create", "--title", title])
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// rocketmap init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_directory_tree() {
    let dir = TempDir::new().unwrap();
    rocketmap(&dir).arg("init").assert().success();

    assert!(dir.path().join(".rocketmap").is_dir());
    assert!(dir.path().join(".rocketmap/canvases").is_dir());
    assert!(dir.path().join(".rocketmap/config.yaml").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    rocketmap(&dir).arg("init").assert().success();
    rocketmap(&dir).arg("init").assert().success();
}

// ---------------------------------------------------------------------------
// rocketmap canvas create / list / show
// ---------------------------------------------------------------------------

#[test]
fn canvas_create_and_list() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    rocketmap(&dir)
        .args(["canvas", "create", "--title", "Dog Walking App"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dog-walking-app"));

    rocketmap(&dir)
        .args(["canvas", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dog-walking-app"))
        .stdout(predicate::str::contains("Dog Walking App"));
}

#[test]
fn duplicate_title_gets_suffixed_slug() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_canvas(&dir, "Same Idea");
    create_canvas(&dir, "Same Idea");

    rocketmap(&dir)
        .args(["canvas", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("same-idea"))
        .stdout(predicate::str::contains("same-idea-2"));
}

#[test]
fn canvas_show_lists_all_nine_blocks() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_canvas(&dir, "Show Me");

    rocketmap(&dir)
        .args(["canvas", "show", "show-me"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Problem"))
        .stdout(predicate::str::contains("Unique Value Proposition"))
        .stdout(predicate::str::contains("Revenue Streams"));
}

#[test]
fn canvas_show_unknown_slug_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    rocketmap(&dir)
        .args(["canvas", "show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn set_block_updates_content() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_canvas(&dir, "Blocks");

    rocketmap(&dir)
        .args([
            "canvas",
            "set-block",
            "blocks",
            "--block",
            "problem",
            "--content",
            "Owners can't find walkers",
        ])
        .assert()
        .success();

    rocketmap(&dir)
        .args(["canvas", "show", "blocks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Owners can't find walkers"));
}

#[test]
fn set_block_rejects_unknown_block_type() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_canvas(&dir, "Blocks");

    rocketmap(&dir)
        .args([
            "canvas",
            "set-block",
            "blocks",
            "--block",
            "moat",
            "--content",
            "x",
        ])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// rocketmap assumption add / list / update
// ---------------------------------------------------------------------------

#[test]
fn assumption_add_and_list() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_canvas(&dir, "Risky");

    rocketmap(&dir)
        .args([
            "assumption",
            "add",
            "risky",
            "--statement",
            "Owners will pay $20/walk",
            "--category",
            "market",
            "--severity",
            "8",
            "--block",
            "revenue_streams",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Owners will pay"));

    // Severity 8 derives a high risk level.
    rocketmap(&dir)
        .args(["assumption", "list", "risky", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"risk_level\": \"high\""))
        .stdout(predicate::str::contains("\"status\": \"untested\""));
}

#[test]
fn assumption_add_rejects_bad_severity() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_canvas(&dir, "Risky");

    rocketmap(&dir)
        .args([
            "assumption",
            "add",
            "risky",
            "--statement",
            "x",
            "--category",
            "ops",
            "--severity",
            "11",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("severity"));
}

#[test]
fn assumption_update_confidence() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_canvas(&dir, "Risky");

    let out = rocketmap(&dir)
        .args([
            "assumption",
            "add",
            "risky",
            "--statement",
            "Churn stays under 5%",
            "--category",
            "ops",
            "--severity",
            "3",
            "--json",
        ])
        .output()
        .unwrap();
    let added: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let id = added["id"].as_str().unwrap();

    rocketmap(&dir)
        .args([
            "assumption",
            "update",
            "risky",
            id,
            "--confidence",
            "65",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"confidence_score\": 65.0"));
}

// ---------------------------------------------------------------------------
// rocketmap experiment add / complete
// ---------------------------------------------------------------------------

#[test]
fn experiment_lifecycle_validates_assumption() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_canvas(&dir, "Lab");

    let out = rocketmap(&dir)
        .args([
            "assumption",
            "add",
            "lab",
            "--statement",
            "Walkers accept 80/20 split",
            "--category",
            "product",
            "--severity",
            "7",
            "--json",
        ])
        .output()
        .unwrap();
    let added: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let aid = added["id"].as_str().unwrap().to_string();

    let out = rocketmap(&dir)
        .args([
            "experiment",
            "add",
            "lab",
            &aid,
            "--type",
            "interview",
            "--criteria",
            "8 of 10 walkers agree",
            "--json",
        ])
        .output()
        .unwrap();
    let experiment: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let eid = experiment["id"].as_str().unwrap().to_string();

    // Planning an experiment moves an untested assumption to testing.
    rocketmap(&dir)
        .args(["assumption", "list", "lab", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"testing\""));

    rocketmap(&dir)
        .args([
            "experiment",
            "complete",
            "lab",
            &aid,
            &eid,
            "--result",
            "supports",
            "--evidence",
            "9 of 10 agreed",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("validated"));

    // Completing twice is an error.
    rocketmap(&dir)
        .args([
            "experiment",
            "complete",
            "lab",
            &aid,
            &eid,
            "--result",
            "supports",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already completed"));
}

// ---------------------------------------------------------------------------
// rocketmap risk
// ---------------------------------------------------------------------------

#[test]
fn risk_table_covers_all_blocks() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_canvas(&dir, "Heat");

    rocketmap(&dir)
        .args(["risk", "heat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("problem"))
        .stdout(predicate::str::contains("revenue_streams"))
        .stdout(predicate::str::contains("neutral"));
}

#[test]
fn risk_json_scores_untested_high() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_canvas(&dir, "Heat");

    rocketmap(&dir)
        .args([
            "assumption",
            "add",
            "heat",
            "--statement",
            "People want this at all",
            "--category",
            "market",
            "--severity",
            "9",
            "--block",
            "problem",
        ])
        .assert()
        .success();

    let out = rocketmap(&dir)
        .args(["risk", "heat", "--json"])
        .output()
        .unwrap();
    let map: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(map["problem"]["risk_score"], 30);
    assert_eq!(map["problem"]["untested_high_risk"], 1);
    assert_eq!(map["solution"]["risk_score"], 0);
}

#[test]
fn risk_respects_assumption_cap() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_canvas(&dir, "Capped");
    std::fs::write(
        dir.path().join(".rocketmap/config.yaml"),
        "project: capped-project\nlimits:\n  max_assumptions: 1\n",
    )
    .unwrap();

    for statement in ["First high-risk claim", "Second high-risk claim"] {
        rocketmap(&dir)
            .args([
                "assumption",
                "add",
                "capped",
                "--statement",
                statement,
                "--category",
                "market",
                "--severity",
                "9",
                "--block",
                "problem",
            ])
            .assert()
            .success();
    }

    let out = rocketmap(&dir)
        .args(["risk", "capped", "--json"])
        .output()
        .unwrap();
    let map: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    // Only the first assumption is visible once the cap kicks in.
    assert_eq!(map["problem"]["untested_high_risk"], 1);
    assert_eq!(map["problem"]["risk_score"], 30);
}

// ---------------------------------------------------------------------------
// rocketmap viability
// ---------------------------------------------------------------------------

#[test]
fn viability_show_without_record() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_canvas(&dir, "Fresh");

    rocketmap(&dir)
        .args(["viability", "show", "fresh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No viability record"));
}

#[test]
fn viability_score_rejects_incomplete_canvas() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_canvas(&dir, "Empty");

    rocketmap(&dir)
        .args(["viability", "score", "empty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("problem"));
}
