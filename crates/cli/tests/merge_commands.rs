use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

#[allow(deprecated)]
fn tooltip_merge() -> Command {
    let mut cmd = Command::cargo_bin("tooltip-merge").expect("binary");
    cmd.arg("--quiet");
    cmd
}

#[test]
fn fuzzy_merges_stdin_lines() {
    tooltip_merge()
        .arg("fuzzy")
        .write_stdin(r#"["Hoplite: +10% Damage.", "Toxotes: +10% Damage."]"#)
        .assert()
        .success()
        .stdout("Hoplite or Toxotes: +10% Damage.\n");
}

#[test]
fn fuzzy_keeps_numeric_variants_apart() {
    let output = tooltip_merge()
        .arg("--json")
        .arg("fuzzy")
        .write_stdin(r#"["Slows target by 10%.", "Slows target by 20%."]"#)
        .output()
        .expect("command run");

    assert!(output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(
        body,
        serde_json::json!(["Slows target by 10%.", "Slows target by 20%."])
    );
}

#[test]
fn tiers_reads_input_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("tiers.json");
    fs::write(
        &path,
        r#"{"0": "Range +1m.", "1": "Range +2m.", "2": "Range +3m."}"#,
    )
    .unwrap();

    tooltip_merge()
        .arg("tiers")
        .arg("--input")
        .arg(&path)
        .assert()
        .success()
        .stdout("Range +1/2/3m.\n");
}

#[test]
fn tiers_reports_word_count_mismatch() {
    tooltip_merge()
        .arg("tiers")
        .arg("--key")
        .arg("STR_RANGE")
        .write_stdin(r#"{"0": "Range +1m.", "1": "Range +2m. Armor +1."}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("STR_RANGE"));
}

#[test]
fn sections_print_one_line_per_section() {
    tooltip_merge()
        .arg("sections")
        .write_stdin(
            r#"[
                {"label": "Classical Age", "variants": {"0": "Armor +1.", "1": "Armor +2."}},
                {"label": "Heroic Age", "variants": {"0": "Armor +3.", "1": "Armor +4."}}
            ]"#,
        )
        .assert()
        .success()
        .stdout("Classical Age: Armor +1/2.\nHeroic Age: Armor +3/4.\n");
}

#[test]
fn combine_renders_merged_responses() {
    tooltip_merge()
        .arg("combine")
        .write_stdin(
            r#"[
                {"affects": ["Hoplite"], "text": "Damage +10%"},
                {"affects": ["Toxotes"], "text": "Damage +10%"},
                {"affects": ["Villager"], "text": "{combinable} gather rate +5%", "combinable_targets": ["Food"]},
                {"affects": ["Villager"], "text": "{combinable} gather rate +5%", "combinable_targets": ["Wood"]}
            ]"#,
        )
        .assert()
        .success()
        .stdout("Hoplite and Toxotes: Damage +10%.\nVillager: Food and Wood gather rate +5%.\n");
}

#[test]
fn config_file_overrides_defaults() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("merge.toml");
    fs::write(&path, "conjunction = \"and\"\n").unwrap();

    tooltip_merge()
        .arg("--config")
        .arg(&path)
        .arg("fuzzy")
        .write_stdin(r#"["Hoplite: +10% Damage.", "Toxotes: +10% Damage."]"#)
        .assert()
        .success()
        .stdout("Hoplite and Toxotes: +10% Damage.\n");
}

#[test]
fn invalid_fraction_is_rejected() {
    tooltip_merge()
        .arg("fuzzy")
        .arg("--fraction")
        .arg("3")
        .write_stdin(r#"["a", "b"]"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_replacement_fraction"));
}

#[test]
fn empty_stdin_is_an_error() {
    tooltip_merge()
        .arg("fuzzy")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input is empty"));
}
