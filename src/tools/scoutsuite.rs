//! ScoutSuite invocation.
//!
//! Azure credentials and the GCP service-account path are forwarded from
//! the environment as explicit flags; the credential gate has already
//! confirmed they are present, so empty fallbacks only soften a race
//! with the environment.

use crate::cli::Cloud;
use crate::layout::ReportLayout;
use crate::tools::Tool;
use std::env;
use std::process::Command;

/// `scout <provider> --report-dir <dir> --force [provider auth flags]`
pub fn command(cloud: Cloud, layout: &ReportLayout) -> Command {
    let mut cmd = Command::new("scout");
    cmd.arg(cloud.as_str())
        .arg("--report-dir")
        .arg(layout.tool_dir(Tool::ScoutSuite))
        .arg("--force");

    match cloud {
        Cloud::Aws => {}
        Cloud::Azure => {
            cmd.arg("--client-id")
                .arg(env::var("AZURE_CLIENT_ID").unwrap_or_default())
                .arg("--client-secret")
                .arg(env::var("AZURE_CLIENT_SECRET").unwrap_or_default())
                .arg("--tenant-id")
                .arg(env::var("AZURE_TENANT_ID").unwrap_or_default());
        }
        Cloud::Gcp => {
            cmd.arg("--service-account")
                .arg(env::var("GOOGLE_APPLICATION_CREDENTIALS").unwrap_or_default());
        }
    }
    cmd
}
