//! Provider dispatch.
//!
//! Resolves the selected provider to its concrete clouds, gates each on
//! credentials, and drives the fixed scanner sequence per cloud. Every
//! failure mode short of a pre-run fatal is absorbed: a skipped provider
//! or failing tool never stops the remaining work.

use crate::cli::Cloud;
use crate::config::RunConfig;
use crate::credentials::{self, CredentialStatus};
use crate::layout::ReportLayout;
use crate::runner::{ToolOutcome, ToolRunner, ToolStatus};
use crate::tools::{self, CloudSploit, Tool, checkov, prowler, scoutsuite};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::thread;
use tracing::{info, warn};

/// Everything that happened for one cloud.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderReport {
    pub cloud: Cloud,
    /// Required environment variables that were unset or empty. A
    /// non-empty list means the cloud's scans were skipped entirely.
    pub missing_credentials: Vec<&'static str>,
    pub outcomes: Vec<ToolOutcome>,
}

impl ProviderReport {
    pub fn was_skipped(&self) -> bool {
        !self.missing_credentials.is_empty()
    }

    pub fn failed_tools(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| !o.status.is_success())
            .count()
    }
}

/// Result of the full dispatch phase, consumed by the summary writer.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    pub providers: Vec<ProviderReport>,
    pub iac: Option<ToolOutcome>,
}

impl DispatchReport {
    pub fn total_invocations(&self) -> usize {
        self.providers.iter().map(|p| p.outcomes.len()).sum::<usize>()
            + usize::from(self.iac.is_some())
    }

    pub fn failed_invocations(&self) -> usize {
        self.providers.iter().map(ProviderReport::failed_tools).sum::<usize>()
            + self
                .iac
                .as_ref()
                .map(|o| usize::from(!o.status.is_success()))
                .unwrap_or(0)
    }
}

pub struct Orchestrator<'a> {
    config: &'a RunConfig,
    layout: &'a ReportLayout,
    runner: ToolRunner,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a RunConfig, layout: &'a ReportLayout) -> Self {
        Self {
            config,
            layout,
            runner: ToolRunner::new(config.tool_timeout),
        }
    }

    /// Run every selected provider audit, then the optional IaC scan.
    pub fn run(&self) -> DispatchReport {
        let targets = self.config.provider.targets();

        let providers = if self.config.parallel && targets.len() > 1 {
            info!(count = targets.len(), "Dispatching provider audits in parallel");
            thread::scope(|scope| {
                let handles: Vec<_> = targets
                    .iter()
                    .map(|&cloud| scope.spawn(move || self.audit_cloud(cloud)))
                    .collect();
                handles
                    .into_iter()
                    .map(|h| h.join().expect("provider audit thread panicked"))
                    .collect()
            })
        } else {
            targets.iter().map(|&cloud| self.audit_cloud(cloud)).collect()
        };

        let iac = self.scan_iac(Path::new("."));

        DispatchReport { providers, iac }
    }

    /// Credential gate, then the fixed tool sequence for one cloud.
    fn audit_cloud(&self, cloud: Cloud) -> ProviderReport {
        let CredentialStatus { missing, .. } = credentials::check(cloud);
        if !missing.is_empty() {
            warn!(cloud = %cloud, missing = ?missing, "Skipping audit, credentials not set");
            eprintln!(
                "{} {} audit skipped: missing {}",
                "[SKIP]".yellow().bold(),
                cloud,
                missing.join(", ")
            );
            return ProviderReport {
                cloud,
                missing_credentials: missing,
                outcomes: Vec::new(),
            };
        }

        println!("{} auditing {}", "[RUN]".cyan().bold(), cloud);
        let outcomes = tools::sequence_for(cloud)
            .iter()
            .map(|&tool| self.invoke(tool, cloud))
            .collect();

        ProviderReport {
            cloud,
            missing_credentials: Vec::new(),
            outcomes,
        }
    }

    fn invoke(&self, tool: Tool, cloud: Cloud) -> ToolOutcome {
        // The IaC scan is run-wide, not tied to a cloud.
        let label = match tool {
            Tool::Checkov => "iac",
            _ => cloud.as_str(),
        };
        let log_path = self.layout.log_path(tool, label);

        let outcome = match tool {
            Tool::Prowler => self.runner.run(
                tool.as_str(),
                label,
                prowler::command(cloud, self.layout),
                &log_path,
            ),
            Tool::ScoutSuite => self.runner.run(
                tool.as_str(),
                label,
                scoutsuite::command(cloud, self.layout),
                &log_path,
            ),
            Tool::CloudSploit => {
                let cloudsploit = CloudSploit::default();
                match cloudsploit.ensure_available() {
                    Ok(()) => self.runner.run(
                        tool.as_str(),
                        label,
                        cloudsploit.command(self.layout),
                        &log_path,
                    ),
                    Err(e) => {
                        warn!(error = %e, "CloudSploit setup failed");
                        let _ = std::fs::write(&log_path, format!("{e}\n"));
                        ToolOutcome {
                            tool: tool.as_str().to_string(),
                            provider: label.to_string(),
                            status: ToolStatus::LaunchFailed {
                                message: e.to_string(),
                            },
                            log_path: log_path.clone(),
                            duration_secs: 0,
                        }
                    }
                }
            }
            Tool::Checkov => {
                self.runner
                    .run(tool.as_str(), label, checkov::command(self.layout), &log_path)
            }
        };

        self.report_outcome(&outcome);
        outcome
    }

    fn report_outcome(&self, outcome: &ToolOutcome) {
        match &outcome.status {
            ToolStatus::Succeeded => {
                println!(
                    "{} {} ({})",
                    "[OK]".green().bold(),
                    outcome.tool,
                    outcome.provider
                );
            }
            status => {
                // Failure detail lives in the log file; keep the console line short.
                eprintln!(
                    "{} {} ({}): {:?}, see {}",
                    "[FAIL]".red().bold(),
                    outcome.tool,
                    outcome.provider,
                    status,
                    outcome.log_path.display()
                );
            }
        }
    }

    /// One Checkov pass over the working tree, gated on IaC markers.
    fn scan_iac(&self, base: &Path) -> Option<ToolOutcome> {
        if !self.config.scan_iac {
            return None;
        }
        if !checkov::has_iac_markers(base) {
            warn!("No IaC marker directories found, skipping Checkov");
            eprintln!(
                "{} no terraform/, cloudformation/ or kubernetes/ directory found, skipping IaC scan",
                "[SKIP]".yellow().bold()
            );
            return None;
        }
        Some(self.invoke(Tool::Checkov, Cloud::Aws))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use tempfile::TempDir;

    fn config_for(args: &[&str]) -> RunConfig {
        let mut argv = vec!["cloud-audit"];
        argv.extend_from_slice(args);
        RunConfig::from_cli(&Cli::try_parse_from(argv).unwrap()).unwrap()
    }

    fn outcome(tool: &str, status: ToolStatus) -> ToolOutcome {
        ToolOutcome {
            tool: tool.to_string(),
            provider: "aws".to_string(),
            status,
            log_path: "logs/x.log".into(),
            duration_secs: 1,
        }
    }

    #[test]
    fn test_dispatch_report_counts() {
        let report = DispatchReport {
            providers: vec![
                ProviderReport {
                    cloud: Cloud::Aws,
                    missing_credentials: Vec::new(),
                    outcomes: vec![
                        outcome("prowler", ToolStatus::Succeeded),
                        outcome("scoutsuite", ToolStatus::Failed { code: Some(2) }),
                    ],
                },
                ProviderReport {
                    cloud: Cloud::Azure,
                    missing_credentials: vec!["AZURE_CLIENT_ID"],
                    outcomes: Vec::new(),
                },
            ],
            iac: Some(outcome("checkov", ToolStatus::Succeeded)),
        };
        assert_eq!(report.total_invocations(), 3);
        assert_eq!(report.failed_invocations(), 1);
        assert!(report.providers[1].was_skipped());
        assert_eq!(report.providers[0].failed_tools(), 1);
    }

    #[test]
    fn test_iac_scan_skipped_without_markers() {
        let tmp = TempDir::new().unwrap();
        let layout = ReportLayout::create(tmp.path()).unwrap();
        let config = config_for(&["-p", "aws", "--scan-iac"]);
        let orchestrator = Orchestrator::new(&config, &layout);
        assert!(orchestrator.scan_iac(tmp.path()).is_none());
    }

    #[test]
    fn test_iac_scan_disabled_by_default() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("terraform")).unwrap();
        let layout = ReportLayout::create(tmp.path()).unwrap();
        let config = config_for(&["-p", "aws"]);
        let orchestrator = Orchestrator::new(&config, &layout);
        assert!(orchestrator.scan_iac(tmp.path()).is_none());
    }

    #[test]
    fn test_gated_cloud_spawns_nothing() {
        let tmp = TempDir::new().unwrap();
        let layout = ReportLayout::create(tmp.path()).unwrap();
        let config = config_for(&["-p", "azure"]);
        let orchestrator = Orchestrator::new(&config, &layout);

        // Azure credentials are never all set in the test environment;
        // guard the assumption rather than mutating the process env.
        if credentials::check(Cloud::Azure).is_satisfied() {
            return;
        }
        let report = orchestrator.audit_cloud(Cloud::Azure);
        assert!(report.was_skipped());
        assert!(report.outcomes.is_empty());
    }
}
