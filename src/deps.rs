//! Upfront dependency check.
//!
//! Every binary the selected run needs must be resolvable before any
//! scan starts. Missing tools are collected and reported as one list,
//! then the run aborts; there is no partial operation.

use crate::cli::Cloud;
use crate::config::RunConfig;
use crate::error::{AuditError, Result};
use std::process::{Command, Stdio};
use tracing::debug;

/// Binaries the configured run will invoke.
pub fn required_tools(config: &RunConfig) -> Vec<&'static str> {
    let mut tools = vec!["prowler", "scout"];
    // CloudSploit is cloned and driven through node, AWS runs only.
    if config.provider.targets().contains(&Cloud::Aws) {
        tools.extend(["git", "node", "npm"]);
    }
    if config.scan_iac {
        tools.push("checkov");
    }
    tools
}

/// Verify that every listed tool is invocable, aggregating all misses.
pub fn check(required: &[&str]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|tool| !tool_available(tool))
        .map(|tool| tool.to_string())
        .collect();

    if missing.is_empty() {
        debug!(tools = ?required, "All required tools available");
        Ok(())
    } else {
        Err(AuditError::MissingTools(missing))
    }
}

fn tool_available(tool: &str) -> bool {
    Command::new(tool)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}
