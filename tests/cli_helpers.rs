#![allow(dead_code)]

use anyhow::{bail, Result};
use assert_cmd::cargo;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const FIXTURE: &str = "tests/fixtures/cnbc_world.html";

pub struct Workspace {
    pub dir: TempDir,
    pub config: PathBuf,
}

impl Workspace {
    pub fn raw_html(&self) -> PathBuf {
        self.dir.path().join("raw_data").join("web_data.html")
    }

    pub fn market_csv(&self) -> PathBuf {
        self.dir.path().join("processed_data").join("market_data.csv")
    }

    pub fn news_csv(&self) -> PathBuf {
        self.dir.path().join("processed_data").join("news_data.csv")
    }

    /// Seed the raw document as if `fetch` had already run.
    pub fn seed_raw_html(&self, source: &Path) {
        std::fs::create_dir_all(self.raw_html().parent().unwrap())
            .expect("failed to create raw_data dir");
        std::fs::copy(source, self.raw_html()).expect("failed to copy fixture");
    }
}

/// Temp directory plus a config file pointing every path inside it.
pub fn setup_workspace(extra_toml: &str) -> Workspace {
    let dir = TempDir::new().expect("failed to create temp dir");
    let config = dir.path().join("tickertape.toml");
    let toml = format!(
        "[paths]\nraw_html = {:?}\nmarket_csv = {:?}\nnews_csv = {:?}\n{}",
        dir.path().join("raw_data").join("web_data.html"),
        dir.path().join("processed_data").join("market_data.csv"),
        dir.path().join("processed_data").join("news_data.csv"),
        extra_toml
    );
    std::fs::write(&config, toml).expect("failed to write config");
    Workspace { dir, config }
}

pub fn base_cmd(workspace: &Workspace) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("tickertape"));
    cmd.env_remove("RUST_LOG");
    cmd.arg("--no-color").arg("--config").arg(&workspace.config);
    cmd
}

pub fn run_cmd(workspace: &Workspace, args: &[&str]) -> Result<Output> {
    let mut cmd = base_cmd(workspace);
    cmd.args(args);
    let output = cmd.output()?;
    if !output.status.success() {
        bail!(
            "command failed: {:?}\nstdout: {}\nstderr: {}",
            args,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}

pub fn run_cmd_json(workspace: &Workspace, args: &[&str]) -> Result<Value> {
    let output = run_cmd(workspace, args)?;
    let stdout = String::from_utf8(output.stdout)?;
    Ok(serde_json::from_str(&stdout)?)
}
