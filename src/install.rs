//! Install mode.
//!
//! Installs the pip-packaged scanners and exits. CloudSploit is not
//! installed here; it is cloned on demand during the first AWS audit.

use std::process::Command;
use tracing::{info, warn};

/// Scanners installable through pip3.
pub const PIP_PACKAGES: [&str; 3] = ["prowler", "scoutsuite", "checkov"];

#[derive(Debug, Clone)]
pub struct InstallReport {
    pub results: Vec<(String, bool)>,
}

impl InstallReport {
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|(_, ok)| *ok)
    }

    pub fn failures(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|(_, ok)| !ok)
            .map(|(pkg, _)| pkg.as_str())
            .collect()
    }
}

/// Install every scanner package, continuing past individual failures.
pub fn install_toolchain() -> InstallReport {
    let results = PIP_PACKAGES
        .iter()
        .map(|pkg| (pkg.to_string(), install_package(pkg)))
        .collect();
    InstallReport { results }
}

fn install_package(package: &str) -> bool {
    info!(package, "Installing via pip3");
    match Command::new("pip3")
        .args(["install", "--upgrade", package])
        .status()
    {
        Ok(status) if status.success() => true,
        Ok(status) => {
            warn!(package, %status, "pip3 install failed");
            false
        }
        Err(e) => {
            warn!(package, error = %e, "Failed to launch pip3");
            false
        }
    }
}
