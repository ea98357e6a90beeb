use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Provider selection from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Azure,
    Gcp,
    All,
}

impl Provider {
    /// Resolve the selection to the concrete clouds it covers.
    pub fn targets(self) -> &'static [Cloud] {
        match self {
            Provider::Aws => &[Cloud::Aws],
            Provider::Azure => &[Cloud::Azure],
            Provider::Gcp => &[Cloud::Gcp],
            Provider::All => &[Cloud::Aws, Cloud::Azure, Cloud::Gcp],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Aws => "aws",
            Provider::Azure => "azure",
            Provider::Gcp => "gcp",
            Provider::All => "all",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single concrete cloud to audit. `Provider::All` expands to all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cloud {
    Aws,
    Azure,
    Gcp,
}

impl Cloud {
    pub fn as_str(self) -> &'static str {
        match self {
            Cloud::Aws => "aws",
            Cloud::Azure => "azure",
            Cloud::Gcp => "gcp",
        }
    }
}

impl fmt::Display for Cloud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "cloud-audit",
    version,
    about = "Runs third-party cloud security scanners and collects their reports",
    long_about = "cloud-audit orchestrates Prowler, ScoutSuite, CloudSploit and Checkov \
against cloud provider APIs, collecting every tool's output and logs under a \
timestamped report directory."
)]
pub struct Cli {
    /// Cloud provider to audit
    #[arg(short, long, value_enum, required_unless_present = "install")]
    pub provider: Option<Provider>,

    /// Install the scanner toolchain via pip3 and exit
    #[arg(short, long)]
    pub install: bool,

    /// Scan Infrastructure-as-Code definitions in the working tree with Checkov
    #[arg(short = 's', long = "scan-iac")]
    pub scan_iac: bool,

    /// Run independent provider audits concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Per-tool timeout in seconds
    #[arg(long, default_value_t = 3600)]
    pub timeout: u64,

    /// Directory under which the report tree is created
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Skip the upfront check for scanner binaries on PATH
    #[arg(long, hide = true)]
    pub skip_dep_check: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
