//! CLI command handlers.
//!
//! Separated from main.rs so the glue between config, dependency check,
//! layout, dispatch and summary stays unit-testable.

use crate::cli::Cli;
use crate::config::RunConfig;
use crate::install;
use crate::layout::ReportLayout;
use crate::orchestrator::Orchestrator;
use crate::summary::SummaryWriter;
use crate::{deps, error::AuditError};
use colored::Colorize;
use std::process::ExitCode;
use tracing::info;

/// Handle `--install`: install the toolchain and exit. Never touches a
/// report directory.
pub fn handle_install() -> ExitCode {
    println!("Installing scanner toolchain via pip3...");
    let report = install::install_toolchain();

    for (package, ok) in &report.results {
        if *ok {
            println!("{} {}", "[OK]".green().bold(), package);
        } else {
            eprintln!("{} {}", "[FAIL]".red().bold(), package);
        }
    }

    if report.all_succeeded() {
        println!("Toolchain installed.");
        ExitCode::SUCCESS
    } else {
        eprintln!(
            "Failed to install: {}. Check pip3 and retry.",
            report.failures().join(", ")
        );
        ExitCode::FAILURE
    }
}

/// Run the full audit: dependency check, report tree, provider dispatch,
/// optional IaC scan, summary.
///
/// Per-tool and per-provider failures are reported in the summary, not
/// the exit code; only pre-run errors abort with a non-zero status.
pub fn run_audit(cli: &Cli) -> ExitCode {
    let Some(config) = RunConfig::from_cli(cli) else {
        // clap enforces this; kept as a guard for programmatic callers.
        eprintln!("Error: no provider selected. Use --provider or --install.");
        return ExitCode::from(2);
    };

    if config.skip_dep_check {
        info!("Skipping dependency check");
    } else if let Err(e) = deps::check(&deps::required_tools(&config)) {
        report_fatal(&e);
        if let AuditError::MissingTools(_) = e {
            eprintln!("Run `cloud-audit --install` to install the pip-packaged scanners.");
        }
        return ExitCode::from(2);
    }

    let layout = match ReportLayout::create(&config.output_root) {
        Ok(layout) => layout,
        Err(e) => {
            report_fatal(&e);
            return ExitCode::from(2);
        }
    };
    println!(
        "Collecting reports under {}",
        layout.root().display().to_string().bold()
    );

    let report = Orchestrator::new(&config, &layout).run();

    if let Err(e) = SummaryWriter::new(&config, &layout, &report).write() {
        report_fatal(&e);
        return ExitCode::FAILURE;
    }

    let failed = report.failed_invocations();
    let total = report.total_invocations();
    if failed == 0 {
        println!(
            "{} audit complete, summary at {}",
            "[DONE]".green().bold(),
            layout.summary_path().display()
        );
    } else {
        println!(
            "{} audit complete with {failed} of {total} tool failures, summary at {}",
            "[DONE]".yellow().bold(),
            layout.summary_path().display()
        );
    }
    ExitCode::SUCCESS
}

fn report_fatal(error: &AuditError) {
    eprintln!("{} {}", "[ERROR]".red().bold(), error);
}
