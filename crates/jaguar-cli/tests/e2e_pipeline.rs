//! E2E pipeline test against stand-in simulator and renderer scripts.
//!
//! Kept in its own test binary: the scripts are written and marked
//! executable before any subprocess is spawned.

#![cfg(unix)]

use assert_cmd::Command;
use serde_json::Value;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

const SIMULATOR: &str = r#"#!/bin/sh
cat > "$1-statespace.dot" <<'DOT'
digraph statespace {
  "1 1" -> "0 0";
  "0 1" -> "1 0";
  "1 0" -> "0 1";
  "0 0" -> "0 0";
}
DOT
"#;

// Called as: <renderer> -Tsvg -o OUT IN
const RENDERER: &str = r#"#!/bin/sh
printf '<svg>%s</svg>\n' "$(head -n 1 "$4")" > "$3"
"#;

fn install_script(path: &Path, body: &str) {
    std::fs::create_dir_all(path.parent().expect("script has a parent")).expect("mkdir");
    std::fs::write(path, body).expect("write script");
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
}

fn jaguar_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("jaguar"));
    cmd.current_dir(dir);
    cmd.env("JAGUAR_LOG", "error");
    cmd.env_remove("JAGUAR_SIMULATOR");
    cmd.env_remove("JAGUAR_RENDERER");
    cmd.env_remove("FORMAT");
    cmd
}

#[test]
fn run_and_view_with_stand_in_tools() {
    let dir = TempDir::new().expect("tempdir");
    install_script(&dir.path().join("bin/simFDS"), SIMULATOR);
    let renderer = dir.path().join("tools/fake-dot");
    install_script(&renderer, RENDERER);
    std::fs::write(
        dir.path().join("jaguar.toml"),
        format!("[renderer]\nprogram = \"{}\"\n", renderer.display()),
    )
    .expect("write config");
    std::fs::write(dir.path().join("system.pds"), "x1 = x2\nx2 = x1\n").expect("write");

    let output = jaguar_cmd(dir.path())
        .args(["run", "system.pds", "--out-dir", "out", "--json"])
        .output()
        .expect("jaguar should not crash");
    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");

    let statespace_dot = json["statespace_dot"].as_str().expect("statespace_dot");
    assert!(statespace_dot.starts_with("digraph statespace {\n  \"0 0\" -> \"0 0\";"));
    assert!(statespace_dot.ends_with("\n}"));

    assert_eq!(json["limit_cycles_source"], "computed");
    assert_eq!(
        json["limit_cycles"],
        "fixed point: 0 0\ncycle of length 2: 0 1 -> 1 0 -> 0 1"
    );
    assert_eq!(json["statespace_svg"], "<svg>digraph statespace {</svg>\n");
    assert_eq!(json["depgraph_svg"], "<svg>digraph dep {</svg>\n");

    for name in [
        "statespace.svg",
        "dependency.svg",
        "statespace.dot",
        "dependency.dot",
        "limitcycles.txt",
    ] {
        assert!(dir.path().join("out").join(name).is_file(), "{name} missing");
    }

    jaguar_cmd(dir.path())
        .args(["view", "statespace", "--format", "text"])
        .assert()
        .success()
        .stdout("<svg>digraph statespace {</svg>\n");
}
