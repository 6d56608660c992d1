use std::fs;
use std::process::Command;

use serde_json::Value;
use tempfile::tempdir;

fn frag_sim() -> Command {
    Command::new(env!("CARGO_BIN_EXE_frag-sim"))
}

#[test]
fn run_writes_csv_and_manifest() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("first.csv");
    let output = frag_sim()
        .args(["run", "--events", "4", "--seed", "7", "--out"])
        .arg(&out)
        .output()
        .expect("run frag-sim");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("Event Generation Statistics"));

    let csv = fs::read_to_string(&out).expect("csv");
    assert!(csv.starts_with("Event,Index,Name,ID,Status,px,py,pz,E,m,"));
    assert!(csv.lines().count() >= 2);

    let manifest: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("first.manifest.json")).expect("manifest"))
            .expect("json");
    assert_eq!(manifest["events_requested"], 4);
    assert_eq!(manifest["provenance"]["seed"], 7);
}

#[test]
fn runs_are_reproducible_for_a_fixed_seed() {
    let dir = tempdir().expect("tempdir");
    let mut contents = Vec::new();
    for name in ["a.csv", "b.csv"] {
        let out = dir.path().join(name);
        let status = frag_sim()
            .args(["run", "--preset", "leading-pion", "--events", "5", "--no-manifest", "--out"])
            .arg(&out)
            .status()
            .expect("run frag-sim");
        assert!(status.success());
        contents.push(fs::read_to_string(&out).expect("csv"));
    }
    assert_eq!(contents[0], contents[1]);
    assert!(contents[0].starts_with("Event,Particle,Particle_pz,Particle_pT"));
    assert!(!dir.path().join("a.manifest.json").exists());
}

#[test]
fn inspect_prints_a_report() {
    let output = frag_sim().args(["inspect"]).output().expect("inspect");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("=== Event 0"));
    assert!(stdout.contains("First hadron group"));
}

#[test]
fn presets_can_be_listed_and_shown() {
    let output = frag_sim().arg("presets").output().expect("presets");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    for name in ["first-hadron", "final-hadrons", "leading-pion", "first-final"] {
        assert!(stdout.contains(name));
    }

    let output = frag_sim()
        .args(["presets", "--show", "first-final"])
        .output()
        .expect("presets --show");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("type: first-final"));
}

#[test]
fn unknown_preset_fails() {
    let status = frag_sim()
        .args(["run", "--preset", "nope"])
        .status()
        .expect("run frag-sim");
    assert!(!status.success());
}

#[test]
fn version_prints_the_package_version() {
    let output = frag_sim().arg("version").output().expect("version");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).expect("utf8").trim(),
        env!("CARGO_PKG_VERSION")
    );
}
