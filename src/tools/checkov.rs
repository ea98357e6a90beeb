//! Checkov IaC scan.
//!
//! Runs once across the whole working tree, independent of any provider,
//! and only when at least one of the marker directories exists.

use crate::layout::ReportLayout;
use crate::tools::Tool;
use std::path::Path;
use std::process::Command;

/// Directories whose presence indicates scannable IaC definitions.
pub const IAC_MARKERS: [&str; 3] = ["terraform", "cloudformation", "kubernetes"];

/// True when `base` holds at least one marker directory.
pub fn has_iac_markers(base: &Path) -> bool {
    IAC_MARKERS.iter().any(|marker| base.join(marker).is_dir())
}

/// `checkov -d . --framework terraform cloudformation kubernetes
/// --output json --output-file <results path>`
pub fn command(layout: &ReportLayout) -> Command {
    let mut cmd = Command::new("checkov");
    cmd.args(["-d", "."])
        .arg("--framework")
        .args(IAC_MARKERS)
        .args(["--output", "json"])
        .arg("--output-file")
        .arg(layout.tool_dir(Tool::Checkov).join("checkov_results.json"));
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_markers() {
        let tmp = TempDir::new().unwrap();
        assert!(!has_iac_markers(tmp.path()));
    }

    #[test]
    fn test_any_marker_triggers() {
        for marker in IAC_MARKERS {
            let tmp = TempDir::new().unwrap();
            std::fs::create_dir(tmp.path().join(marker)).unwrap();
            assert!(has_iac_markers(tmp.path()), "marker {marker} not detected");
        }
    }

    #[test]
    fn test_marker_must_be_directory() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("terraform"), b"not a dir").unwrap();
        assert!(!has_iac_markers(tmp.path()));
    }

    #[test]
    fn test_command_shape() {
        let tmp = TempDir::new().unwrap();
        let layout = ReportLayout::create(tmp.path()).unwrap();
        let cmd = command(&layout);
        assert_eq!(cmd.get_program(), "checkov");
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert!(args.contains(&"--framework".to_string()));
        assert!(args.contains(&"kubernetes".to_string()));
        assert!(args.last().unwrap().ends_with("checkov_results.json"));
    }
}
