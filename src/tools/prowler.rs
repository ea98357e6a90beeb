//! Prowler invocation.

use crate::cli::Cloud;
use crate::layout::ReportLayout;
use crate::tools::Tool;
use std::process::Command;

/// CIS benchmark id Prowler uses for each cloud.
pub fn compliance_id(cloud: Cloud) -> &'static str {
    match cloud {
        Cloud::Aws => "cis_2.0_aws",
        Cloud::Azure => "cis_2.0_azure",
        Cloud::Gcp => "cis_2.0_gcp",
    }
}

/// `prowler <provider> --compliance <id> --output-formats json html csv
/// --output-directory <dir> --verbose`
pub fn command(cloud: Cloud, layout: &ReportLayout) -> Command {
    let mut cmd = Command::new("prowler");
    cmd.arg(cloud.as_str())
        .args(["--compliance", compliance_id(cloud)])
        .args(["--output-formats", "json", "html", "csv"])
        .arg("--output-directory")
        .arg(layout.tool_dir(Tool::Prowler))
        .arg("--verbose");
    cmd
}
