use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::Path;

use ruthscore_core::{fixtures, ArtifactRole};

pub fn ruthscore() -> Command {
    let mut cmd = cargo_bin_cmd!("ruthscore");
    cmd.env_remove("RUST_LOG").env_remove("RUTHSCORE_LOG");
    cmd
}

#[allow(dead_code)]
pub fn write_artifact(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

#[allow(dead_code)]
pub fn write_complete_project(root: &Path) {
    for role in ArtifactRole::ALL {
        write_artifact(root, role.default_path(), fixtures::sample(role));
    }
}
