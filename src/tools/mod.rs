//! Command builders for the external scanners.
//!
//! Each submodule knows how to assemble the argument list for one tool;
//! none of them execute anything. Execution and log capture live in
//! [`crate::runner`].

pub mod checkov;
pub mod cloudsploit;
pub mod prowler;
pub mod scoutsuite;

use crate::cli::Cloud;
use serde::Serialize;
use std::fmt;

pub use cloudsploit::CloudSploit;

/// The external scanners this orchestrator knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Prowler,
    ScoutSuite,
    CloudSploit,
    Checkov,
}

impl Tool {
    /// Subdirectory of the report tree this tool writes into.
    pub fn dir_name(self) -> &'static str {
        match self {
            Tool::Prowler => "prowler",
            Tool::ScoutSuite => "scoutsuite",
            Tool::CloudSploit => "cloudsploit",
            Tool::Checkov => "checkov",
        }
    }

    pub fn as_str(self) -> &'static str {
        self.dir_name()
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed, ordered scanner sequence for one cloud.
///
/// Checkov is never part of a provider sequence; the IaC scan is a
/// separate, run-wide step.
pub fn sequence_for(cloud: Cloud) -> &'static [Tool] {
    match cloud {
        Cloud::Aws => &[Tool::Prowler, Tool::ScoutSuite, Tool::CloudSploit],
        Cloud::Azure | Cloud::Gcp => &[Tool::Prowler, Tool::ScoutSuite],
    }
}
