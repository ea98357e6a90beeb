//! Subprocess execution with log capture.
//!
//! One primitive drives every external tool: spawn the command with its
//! combined stdout/stderr redirected to a log file, wait with a bounded
//! timeout, and record the exit status. Failures never propagate as
//! errors; they come back as a [`ToolStatus`] so the orchestrator can
//! continue best-effort through the remaining tools.

use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Terminal state of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ToolStatus {
    Succeeded,
    Failed { code: Option<i32> },
    TimedOut { after_secs: u64 },
    LaunchFailed { message: String },
}

impl ToolStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolStatus::Succeeded)
    }
}

/// Record of one tool invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutcome {
    pub tool: String,
    pub provider: String,
    pub status: ToolStatus,
    pub log_path: PathBuf,
    pub duration_secs: u64,
}

/// Runs external tools synchronously with a per-invocation timeout.
#[derive(Debug, Clone)]
pub struct ToolRunner {
    timeout: Duration,
}

impl ToolRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Execute `cmd`, teeing its combined stdout/stderr into `log_path`.
    ///
    /// The child is killed once the timeout elapses. Every exit path
    /// produces a `ToolOutcome`; this never returns an error.
    pub fn run(&self, tool: &str, provider: &str, mut cmd: Command, log_path: &Path) -> ToolOutcome {
        let started = Instant::now();
        debug!(tool, provider, command = ?cmd, "Invoking external tool");

        let status = match self.spawn_and_wait(&mut cmd, log_path, started) {
            Ok(status) => status,
            Err(message) => {
                // Leave a trace in the log file even when the spawn failed.
                let _ = fs::write(log_path, format!("failed to launch {tool}: {message}\n"));
                warn!(tool, provider, %message, "Tool failed to launch");
                ToolStatus::LaunchFailed { message }
            }
        };

        ToolOutcome {
            tool: tool.to_string(),
            provider: provider.to_string(),
            status,
            log_path: log_path.to_path_buf(),
            duration_secs: started.elapsed().as_secs(),
        }
    }

    fn spawn_and_wait(
        &self,
        cmd: &mut Command,
        log_path: &Path,
        started: Instant,
    ) -> std::result::Result<ToolStatus, String> {
        let log = File::create(log_path).map_err(|e| e.to_string())?;
        let log_err = log.try_clone().map_err(|e| e.to_string())?;

        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(log_err))
            .spawn()
            .map_err(|e| e.to_string())?;

        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    return Ok(if status.success() {
                        ToolStatus::Succeeded
                    } else {
                        ToolStatus::Failed {
                            code: status.code(),
                        }
                    });
                }
                Ok(None) => {
                    if started.elapsed() >= self.timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Ok(ToolStatus::TimedOut {
                            after_secs: self.timeout.as_secs(),
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(e.to_string());
                }
            }
        }
    }
}
