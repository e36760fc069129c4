use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use httpmock::prelude::*;
use httpmock::Mock;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::{json, Value};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Settings with retries off so failing endpoints fail fast.
fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let exclusions = dir.path().join("crew_codes_to_exclude.json");
    fs::write(&exclusions, r#"["ML", "CEOPS"]"#).expect("write exclusions");

    let config = dir.path().join("crewsync.yaml");
    fs::write(
        &config,
        format!(
            "exclusions_path: {}\nretry:\n  max_retries: 0\n  backoff_factor_ms: 0\nhttp:\n  timeout_secs: 5\n",
            exclusions.display()
        ),
    )
    .expect("write config");
    config
}

fn crewsync_cmd(config: &Path, ipaas: &MockServer, planon: &MockServer) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("crewsync"));
    cmd.env_remove("RUST_LOG")
        .env("DARTMOUTH_API_URL", ipaas.base_url())
        .env("DARTMOUTH_API_KEY", "ipaas-key")
        .env("PLANON_API_URL", planon.base_url())
        .env("PLANON_API_KEY", "planon-key")
        .arg("--json-logs");
    cmd.env("CREWSYNC_CONFIG", config);
    cmd
}

fn mock_ipaas(server: &MockServer, employees: Value) {
    server.mock(|when, then| {
        when.method(POST).path("/api/jwt").header("Authorization", "ipaas-key");
        then.status(200).json_body(json!({"jwt": "token-123"}));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/employees")
            .header("Authorization", "Bearer token-123")
            .query_param("page", "1");
        then.status(200).json_body(employees);
    });
}

fn mock_planon_reads(server: &MockServer, persons: Value) {
    server.mock(|when, then| {
        when.method(POST).path("/read/Trade");
        then.status(200).json_body(json!([
            {"Syscode": 263, "Code": "BAS"},
            {"Syscode": 264, "Code": "BR"},
            {"Syscode": 265, "Code": "TS"}
        ]));
    });
    server.mock(|when, then| {
        when.method(POST).path("/read/WorkingHoursTariffGroup");
        then.status(200).json_body(json!([
            {"Syscode": 93, "Code": "BAS"},
            {"Syscode": 94, "Code": "BR"},
            {"Syscode": 95, "Code": "TS"}
        ]));
    });
    server.mock(|when, then| {
        when.method(POST).path("/read/Person");
        then.status(200).json_body(persons);
    });
}

fn mock_update(server: &MockServer, syscode: i64, body: Value) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(PUT)
            .path(format!("/update/Person/{syscode}"))
            .json_body(body.clone());
        then.status(200)
            .json_body(json!({"Syscode": syscode, "FreeString7": "x", "TradeRef": body["TradeRef"], "WorkingHoursTariffGroupRef": body["WorkingHoursTariffGroupRef"]}));
    })
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_updates_changed_person_and_exits_zero() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(&dir);
    let ipaas = MockServer::start();
    let planon = MockServer::start();
    mock_ipaas(
        &ipaas,
        json!([
            {"netid": "f00207h", "jobs": [{"job_current_status": "Active", "maintenance_crew": {"crew_code": "BR"}}]},
            {"netid": "d20171b", "jobs": [{"job_current_status": "Active", "maintenance_crew": {"crew_code": "TS"}}]}
        ]),
    );
    mock_planon_reads(
        &planon,
        json!([
            {"Syscode": 1, "FreeString7": "f00207h", "TradeRef": 263, "WorkingHoursTariffGroupRef": 93},
            {"Syscode": 2, "FreeString7": "d20171b", "TradeRef": 265, "WorkingHoursTariffGroupRef": 95}
        ]),
    );
    let update = mock_update(&planon, 1, json!({"TradeRef": 264, "WorkingHoursTariffGroupRef": 94}));

    let assert = crewsync_cmd(&config, &ipaas, &planon)
        .args(["run", "--json"])
        .assert()
        .success();

    update.assert_hits(1);
    let report = stdout_json(assert.get_output());
    assert_eq!(report["updated"], json!(["f00207h"]));
    assert_eq!(report["skipped"], json!(["d20171b"]));
    assert_eq!(report["failed"], json!([]));
}

#[test]
fn verbose_summary_lists_skipped_netids() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(&dir);
    let ipaas = MockServer::start();
    let planon = MockServer::start();
    mock_ipaas(
        &ipaas,
        json!([{"netid": "d20171b", "jobs": [{"job_current_status": "Active", "maintenance_crew": {"crew_code": "TS"}}]}]),
    );
    mock_planon_reads(
        &planon,
        json!([{"Syscode": 2, "FreeString7": "d20171b", "TradeRef": 265, "WorkingHoursTariffGroupRef": 95}]),
    );

    crewsync_cmd(&config, &ipaas, &planon)
        .arg("run")
        .assert()
        .success()
        .stdout(contains("1 unchanged"))
        .stdout(contains("d20171b").not());

    crewsync_cmd(&config, &ipaas, &planon)
        .args(["run", "--verbose"])
        .assert()
        .success()
        .stdout(contains("·  d20171b"));
}

#[test]
fn dry_run_issues_no_updates() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(&dir);
    let ipaas = MockServer::start();
    let planon = MockServer::start();
    mock_ipaas(
        &ipaas,
        json!([{"netid": "f00207h", "jobs": [{"job_current_status": "Active", "maintenance_crew": {"crew_code": "BR"}}]}]),
    );
    mock_planon_reads(
        &planon,
        json!([{"Syscode": 1, "FreeString7": "f00207h", "TradeRef": null, "WorkingHoursTariffGroupRef": null}]),
    );
    let update = mock_update(&planon, 1, json!({"TradeRef": 264, "WorkingHoursTariffGroupRef": 94}));

    crewsync_cmd(&config, &ipaas, &planon)
        .args(["run", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("[dry-run]"))
        .stdout(contains("f00207h"));

    update.assert_hits(0);
}

#[test]
fn unknown_person_exits_unstable() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(&dir);
    let ipaas = MockServer::start();
    let planon = MockServer::start();
    mock_ipaas(
        &ipaas,
        json!([{"netid": "nobody", "jobs": [{"job_current_status": "Active", "maintenance_crew": {"crew_code": "BAS"}}]}]),
    );
    mock_planon_reads(&planon, json!([]));

    let assert = crewsync_cmd(&config, &ipaas, &planon)
        .args(["run", "--json"])
        .assert()
        .code(57);

    let report = stdout_json(assert.get_output());
    assert_eq!(report["failed"][0]["netid"], "nobody");
    assert_eq!(report["failed"][0]["kind"], "lookup_miss");
}

#[test]
fn conflict_alone_exits_zero() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(&dir);
    let ipaas = MockServer::start();
    let planon = MockServer::start();
    mock_ipaas(
        &ipaas,
        json!([{"netid": "f0040dx", "jobs": [
            {"job_current_status": "Active", "maintenance_crew": {"crew_code": "BAS"}},
            {"job_current_status": "Active", "maintenance_crew": {"crew_code": "BR"}}
        ]}]),
    );
    mock_planon_reads(
        &planon,
        json!([{"Syscode": 1, "FreeString7": "f0040dx", "TradeRef": null, "WorkingHoursTariffGroupRef": null}]),
    );

    let assert = crewsync_cmd(&config, &ipaas, &planon)
        .args(["run", "--json"])
        .assert()
        .success();

    let report = stdout_json(assert.get_output());
    assert_eq!(report["failed"][0]["kind"], "conflict");
}

#[test]
fn rejected_api_key_is_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(&dir);
    let ipaas = MockServer::start();
    let planon = MockServer::start();
    ipaas.mock(|when, then| {
        when.method(POST).path("/api/jwt");
        then.status(401)
            .json_body(json!({"Failed to obtain a jwt": "invalid api key"}));
    });

    crewsync_cmd(&config, &ipaas, &planon)
        .arg("run")
        .assert()
        .code(1)
        .stderr(contains("failed to fetch employees"))
        .stderr(contains("invalid api key"));
}

#[test]
fn missing_exclusion_file_is_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(&dir);
    let ipaas = MockServer::start();
    let planon = MockServer::start();

    crewsync_cmd(&config, &ipaas, &planon)
        .args(["run", "--exclusions"])
        .arg(dir.path().join("absent.json"))
        .assert()
        .code(1)
        .stderr(contains("crew-code exclusions"));
}

// ---------------------------------------------------------------------------
// crew-codes / catalogs
// ---------------------------------------------------------------------------

#[test]
fn crew_codes_prints_resolved_codes() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(&dir);
    let ipaas = MockServer::start();
    let planon = MockServer::start();
    mock_ipaas(
        &ipaas,
        json!([
            {"netid": "a", "jobs": [{"job_current_status": "Active", "maintenance_crew": {"crew_code": "ML"}}]},
            {"netid": "b", "jobs": [
                {"job_current_status": "Active", "maintenance_crew": {"crew_code": "BAS"}},
                {"job_current_status": "Active", "maintenance_crew": {"crew_code": "BR"}}
            ]},
            {"netid": "c", "jobs": null}
        ]),
    );

    let assert = crewsync_cmd(&config, &ipaas, &planon)
        .args(["crew-codes", "--json", "--netid", "a", "--netid", "b"])
        .assert()
        .success();

    let rows = stdout_json(assert.get_output());
    assert_eq!(rows.as_array().map(Vec::len), Some(2));
    assert_eq!(rows[0]["crew_code"], "");
    assert_eq!(rows[1]["conflict"], json!(["BAS", "BR"]));
}

#[test]
fn catalogs_lists_trades_and_labor_groups() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(&dir);
    let ipaas = MockServer::start();
    let planon = MockServer::start();
    mock_planon_reads(&planon, json!([]));

    let assert = crewsync_cmd(&config, &ipaas, &planon)
        .args(["catalogs", "--json"])
        .assert()
        .success();

    let catalogs = stdout_json(assert.get_output());
    assert_eq!(catalogs["trades"][0], json!({"code": "BAS", "syscode": 263}));
    assert_eq!(catalogs["labor_groups"].as_array().map(Vec::len), Some(3));
}

#[test]
fn catalogs_does_not_accept_exclusions() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(&dir);
    let ipaas = MockServer::start();
    let planon = MockServer::start();

    crewsync_cmd(&config, &ipaas, &planon)
        .args(["catalogs", "--exclusions"])
        .arg(dir.path().join("crew_codes_to_exclude.json"))
        .assert()
        .code(2)
        .stderr(contains("--exclusions"));
}
