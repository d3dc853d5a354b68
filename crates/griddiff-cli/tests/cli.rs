use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_network(path: &Path, id: &str, vlhv2_voltage: f64, with_extra_branch: bool) {
    let extra_branch = if with_extra_branch {
        r#",
            {
                "id": "NGEN_NHV1",
                "terminal1": {"p": 605.6, "q": 225.3},
                "terminal2": {"p": -604.9, "q": -197.5}
            }"#
    } else {
        ""
    };
    let json = format!(
        r#"{{
        "id": "{id}",
        "voltage_levels": [
            {{
                "id": "VLHV1",
                "nominal_v": 380.0,
                "low_voltage_limit": 300.0,
                "high_voltage_limit": 420.0,
                "buses": [{{"id": "NHV1", "v": 402.14}}]
            }},
            {{
                "id": "VLHV2",
                "nominal_v": 380.0,
                "low_voltage_limit": 300.0,
                "high_voltage_limit": 420.0,
                "buses": [{{"id": "NHV2", "v": {vlhv2_voltage}}}]
            }}
        ],
        "branches": [
            {{
                "id": "NHV1_NHV2_1",
                "terminal1": {{"p": 302.4, "q": 98.7}},
                "terminal2": {{"p": -300.4, "q": -137.1}}
            }}{extra_branch}
        ]
    }}"#
    );
    fs::write(path, json).unwrap();
}

#[test]
fn test_identical_networks_produce_empty_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("network.json");
    let output = dir.path().join("report.json");
    write_network(&input, "sim1", 389.95, true);

    Command::cargo_bin("griddiff")
        .unwrap()
        .arg("--input-file1")
        .arg(&input)
        .arg("--input-file2")
        .arg(&input)
        .arg("--output-file")
        .arg(&output)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report["network1"], "sim1");
    assert_eq!(report["network2"], "sim1");
    assert_eq!(report["diff.VoltageLevels"].as_array().unwrap().len(), 0);
    assert_eq!(report["diff.Branches"].as_array().unwrap().len(), 0);
}

#[test]
fn test_changed_voltage_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input1 = dir.path().join("before.json");
    let input2 = dir.path().join("after.json");
    let output = dir.path().join("report.json");
    write_network(&input1, "before", 389.95, false);
    write_network(&input2, "after", 350.0, false);

    Command::cargo_bin("griddiff")
        .unwrap()
        .arg("--input-file1")
        .arg(&input1)
        .arg("--input-file2")
        .arg(&input2)
        .arg("--output-file")
        .arg(&output)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let vls = report["diff.VoltageLevels"].as_array().unwrap();
    assert_eq!(vls.len(), 1);
    assert_eq!(vls[0]["vl.vlId1"], "VLHV2");
    assert_eq!(vls[0]["vl.isDifferent"], true);
    assert_eq!(report["diff.Branches"].as_array().unwrap().len(), 0);
}

#[test]
fn test_voltage_threshold_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let input1 = dir.path().join("before.json");
    let input2 = dir.path().join("after.json");
    let output = dir.path().join("report.json");
    let config = dir.path().join("griddiff.toml");
    write_network(&input1, "before", 389.95, false);
    write_network(&input2, "after", 350.0, false);
    fs::write(&config, "[networks-diff]\nvoltage-threshold = 50.0\n").unwrap();

    Command::cargo_bin("griddiff")
        .unwrap()
        .arg("--input-file1")
        .arg(&input1)
        .arg("--input-file2")
        .arg(&input2)
        .arg("--output-file")
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report["diff.VoltageLevels"].as_array().unwrap().len(), 0);
}

#[test]
fn test_equipment_type_and_id_selection() {
    let dir = tempfile::tempdir().unwrap();
    let input1 = dir.path().join("before.json");
    let input2 = dir.path().join("after.json");
    let output = dir.path().join("report.json");
    write_network(&input1, "before", 389.95, false);
    write_network(&input2, "after", 350.0, false);

    Command::cargo_bin("griddiff")
        .unwrap()
        .arg("--input-file1")
        .arg(&input1)
        .arg("--input-file2")
        .arg(&input2)
        .arg("--output-file")
        .arg(&output)
        .arg("--equipment-types")
        .arg("voltage-levels")
        .arg("--vl-ids")
        .arg("VLHV1")
        .assert()
        .success();

    // VLHV1 is unchanged and VLHV2 was not selected
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report["diff.VoltageLevels"].as_array().unwrap().len(), 0);
    assert_eq!(report["diff.Branches"].as_array().unwrap().len(), 0);
}

#[test]
fn test_missing_required_args_fail() {
    Command::cargo_bin("griddiff")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input-file1"));
}

#[test]
fn test_missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("network.json");
    let output = dir.path().join("report.json");
    write_network(&input, "sim1", 389.95, false);

    Command::cargo_bin("griddiff")
        .unwrap()
        .arg("--input-file1")
        .arg(&input)
        .arg("--input-file2")
        .arg(dir.path().join("nonexistent.json"))
        .arg("--output-file")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nonexistent.json"));
}
