//! CloudSploit provisioning and invocation.
//!
//! CloudSploit is not packaged; it is cloned from its public repository
//! on first use (shallow, hooks disabled), its npm dependencies are
//! installed once, and then it is driven through `node index.js`.

use crate::error::{AuditError, Result};
use crate::layout::ReportLayout;
use crate::tools::Tool;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

pub const CLOUDSPLOIT_REPO: &str = "https://github.com/aquasecurity/cloudsploit.git";

pub struct CloudSploit {
    install_dir: PathBuf,
}

impl Default for CloudSploit {
    fn default() -> Self {
        Self::new(PathBuf::from("cloudsploit"))
    }
}

impl CloudSploit {
    pub fn new(install_dir: PathBuf) -> Self {
        Self { install_dir }
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// True once a checkout with its entry point exists locally.
    pub fn is_installed(&self) -> bool {
        self.install_dir.join("index.js").exists()
    }

    /// Clone the repository and install npm dependencies if needed.
    pub fn ensure_available(&self) -> Result<()> {
        if self.is_installed() {
            debug!(dir = %self.install_dir.display(), "CloudSploit already present");
            return Ok(());
        }

        info!(repo = CLOUDSPLOIT_REPO, "Cloning CloudSploit");
        self.clone_repo()?;

        info!("Installing CloudSploit npm dependencies");
        self.npm_install()
    }

    fn clone_repo(&self) -> Result<()> {
        let mut cmd = Command::new("git");
        // Hooks disabled; this checkout is only ever executed explicitly.
        cmd.env("GIT_TEMPLATE_DIR", "");
        cmd.args([
            "clone",
            "--depth",
            "1",
            "--single-branch",
            "--no-tags",
            "-c",
            "core.hooksPath=/dev/null",
            CLOUDSPLOIT_REPO,
        ]);
        cmd.arg(&self.install_dir);

        let output = cmd.output().map_err(|e| AuditError::CloneFailed {
            url: CLOUDSPLOIT_REPO.to_string(),
            message: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(AuditError::CloneFailed {
                url: CLOUDSPLOIT_REPO.to_string(),
                message: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }
        Ok(())
    }

    fn npm_install(&self) -> Result<()> {
        let output = Command::new("npm")
            .arg("install")
            .current_dir(&self.install_dir)
            .output()
            .map_err(|e| AuditError::CommandFailed {
                command: "npm install".to_string(),
                status: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(AuditError::CommandFailed {
                command: "npm install".to_string(),
                status: output.status.to_string(),
            });
        }
        Ok(())
    }

    /// `node index.js --cloud aws --compliance cis --json <results path>`
    ///
    /// CloudSploit only takes part in AWS audits. The command runs from
    /// inside the checkout, so the results path must be absolute.
    pub fn command(&self, layout: &ReportLayout) -> Command {
        let results = layout
            .tool_dir(Tool::CloudSploit)
            .join("cloudsploit_results.json");
        let results = std::path::absolute(&results).unwrap_or(results);

        let mut cmd = Command::new("node");
        cmd.arg("index.js")
            .args(["--cloud", "aws", "--compliance", "cis"])
            .arg("--json")
            .arg(results)
            .current_dir(&self.install_dir);
        cmd
    }
}
