//! Immutable run configuration.
//!
//! All orchestration steps receive a `RunConfig` built once from the CLI;
//! nothing reads CLI state or ambient globals after construction.

use crate::cli::{Cli, Provider};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub provider: Provider,
    pub install_mode: bool,
    pub scan_iac: bool,
    pub parallel: bool,
    pub tool_timeout: Duration,
    pub output_root: PathBuf,
    pub skip_dep_check: bool,
}

impl RunConfig {
    /// Build the run configuration from parsed CLI arguments.
    ///
    /// Returns `None` when no provider was selected, which clap only
    /// permits in install mode.
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        cli.provider.map(|provider| Self {
            provider,
            install_mode: cli.install,
            scan_iac: cli.scan_iac,
            parallel: cli.parallel,
            tool_timeout: Duration::from_secs(cli.timeout),
            output_root: cli.output_dir.clone(),
            skip_dep_check: cli.skip_dep_check,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli_maps_fields() {
        let cli = Cli::try_parse_from([
            "cloud-audit",
            "--provider",
            "all",
            "--scan-iac",
            "--parallel",
            "--timeout",
            "60",
            "--output-dir",
            "/tmp/out",
        ])
        .unwrap();
        let config = RunConfig::from_cli(&cli).unwrap();
        assert_eq!(config.provider, Provider::All);
        assert!(config.scan_iac);
        assert!(config.parallel);
        assert_eq!(config.tool_timeout, Duration::from_secs(60));
        assert_eq!(config.output_root, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_from_cli_without_provider() {
        let cli = Cli::try_parse_from(["cloud-audit", "--install"]).unwrap();
        assert!(RunConfig::from_cli(&cli).is_none());
    }
}
