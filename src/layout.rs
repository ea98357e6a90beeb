//! Report directory layout.
//!
//! One invocation owns one timestamped tree:
//!
//! ```text
//! security_reports_<YYYYMMDD_HHMMSS>/
//!   prowler/ scoutsuite/ cloudsploit/ checkov/ pacu/
//!   logs/<tool>_<provider>.log
//!   SECURITY_SUMMARY.txt
//!   audit_manifest.json
//! ```
//!
//! The full subdirectory set is created before any subprocess starts,
//! regardless of which provider was selected, so every tool has a distinct
//! pre-created output path.

use crate::error::{AuditError, Result};
use crate::tools::Tool;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Subdirectories created under the report root. `pacu` is reserved for
/// manual exploitation-framework output and stays empty during a run.
pub const SUBDIRS: [&str; 6] = [
    "prowler",
    "scoutsuite",
    "cloudsploit",
    "checkov",
    "pacu",
    "logs",
];

pub const SUMMARY_FILE: &str = "SECURITY_SUMMARY.txt";
pub const MANIFEST_FILE: &str = "audit_manifest.json";

#[derive(Debug, Clone)]
pub struct ReportLayout {
    root: PathBuf,
}

impl ReportLayout {
    /// Create a fresh timestamped report tree under `parent`.
    pub fn create(parent: &Path) -> Result<Self> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        Self::create_at(parent.join(format!("security_reports_{stamp}")))
    }

    /// Create the full subdirectory set under an explicit root.
    pub fn create_at(root: PathBuf) -> Result<Self> {
        for sub in SUBDIRS {
            let path = root.join(sub);
            fs::create_dir_all(&path)
                .map_err(|source| AuditError::LayoutCreation { path, source })?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tool_dir(&self, tool: Tool) -> PathBuf {
        self.root.join(tool.dir_name())
    }

    /// Log file capturing one tool invocation's combined stdout/stderr.
    pub fn log_path(&self, tool: Tool, provider: &str) -> PathBuf {
        self.root
            .join("logs")
            .join(format!("{}_{}.log", tool.as_str(), provider))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.root.join(SUMMARY_FILE)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }
}
