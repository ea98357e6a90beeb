//! Summary and manifest output.
//!
//! Written unconditionally after dispatch, even when every scan failed,
//! so the user always has a manifest of where to look. The plain-text
//! summary is the human entry point; `audit_manifest.json` carries the
//! same run record for machines.

use crate::config::RunConfig;
use crate::error::{AuditError, Result};
use crate::layout::ReportLayout;
use crate::orchestrator::{DispatchReport, ProviderReport};
use crate::runner::{ToolOutcome, ToolStatus};
use crate::tools::Tool;
use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Serialize)]
struct RunManifest<'a> {
    generated_at: String,
    provider: crate::cli::Provider,
    parallel: bool,
    scan_iac: bool,
    report_root: &'a Path,
    providers: &'a [ProviderReport],
    iac: &'a Option<ToolOutcome>,
}

pub struct SummaryWriter<'a> {
    config: &'a RunConfig,
    layout: &'a ReportLayout,
    report: &'a DispatchReport,
}

impl<'a> SummaryWriter<'a> {
    pub fn new(config: &'a RunConfig, layout: &'a ReportLayout, report: &'a DispatchReport) -> Self {
        Self {
            config,
            layout,
            report,
        }
    }

    /// Write `SECURITY_SUMMARY.txt` and `audit_manifest.json`.
    pub fn write(&self) -> Result<()> {
        let summary_path = self.layout.summary_path();
        fs::write(&summary_path, self.render_text()).map_err(|source| AuditError::WriteFailed {
            path: summary_path,
            source,
        })?;

        let manifest = RunManifest {
            generated_at: Local::now().to_rfc3339(),
            provider: self.config.provider,
            parallel: self.config.parallel,
            scan_iac: self.config.scan_iac,
            report_root: self.layout.root(),
            providers: &self.report.providers,
            iac: &self.report.iac,
        };
        let manifest_path = self.layout.manifest_path();
        let json = serde_json::to_string_pretty(&manifest)?;
        fs::write(&manifest_path, json).map_err(|source| AuditError::WriteFailed {
            path: manifest_path,
            source,
        })?;
        Ok(())
    }

    /// The fixed-format plain-text summary.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("==========================================\n");
        out.push_str(" CLOUD SECURITY AUDIT SUMMARY\n");
        out.push_str("==========================================\n\n");
        out.push_str(&format!(
            "Timestamp: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!("Provider:  {}\n", self.config.provider));
        out.push_str(&format!(
            "Report directory: {}\n\n",
            self.layout.root().display()
        ));

        out.push_str("Provider audits:\n");
        for provider in &self.report.providers {
            if provider.was_skipped() {
                out.push_str(&format!(
                    "  {}: skipped (missing {})\n",
                    provider.cloud,
                    provider.missing_credentials.join(", ")
                ));
                continue;
            }
            for outcome in &provider.outcomes {
                out.push_str(&format!(
                    "  {}: {} {}\n",
                    provider.cloud,
                    outcome.tool,
                    status_label(&outcome.status)
                ));
            }
        }
        match &self.report.iac {
            Some(outcome) => out.push_str(&format!(
                "  iac: checkov {}\n",
                status_label(&outcome.status)
            )),
            None if self.config.scan_iac => out.push_str("  iac: skipped (no IaC directories)\n"),
            None => {}
        }

        let failed = self.report.failed_invocations();
        let total = self.report.total_invocations();
        out.push_str(&format!("\n{failed} of {total} tool invocations failed\n\n"));

        out.push_str("Report locations:\n");
        for tool in [
            Tool::Prowler,
            Tool::ScoutSuite,
            Tool::CloudSploit,
            Tool::Checkov,
        ] {
            out.push_str(&format!(
                "  {:<12} {}\n",
                format!("{tool}:"),
                self.layout.tool_dir(tool).display()
            ));
        }
        out.push_str(&format!(
            "  {:<12} {}\n",
            "logs:",
            self.layout.root().join("logs").display()
        ));
        out
    }
}

fn status_label(status: &ToolStatus) -> String {
    match status {
        ToolStatus::Succeeded => "OK".to_string(),
        ToolStatus::Failed { code: Some(code) } => format!("FAILED (exit {code})"),
        ToolStatus::Failed { code: None } => "FAILED (killed)".to_string(),
        ToolStatus::TimedOut { after_secs } => format!("TIMED OUT ({after_secs}s)"),
        ToolStatus::LaunchFailed { .. } => "FAILED TO LAUNCH".to_string(),
    }
}
