//! Linter invocation through a scratch file

use std::io::Write;
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;

use crate::report::{StyleReport, parse_output};
use crate::{Error, Result};

/// How the linter is started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintConfig {
    /// Executable name or path
    pub program: String,

    /// Arguments placed before the scratch file path
    pub args: Vec<String>,

    /// Kill the linter after this long
    pub timeout: Option<Duration>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            program: "flake8".to_string(),
            // Ignore setup.cfg / tox.ini / .flake8 around the service
            args: vec!["--isolated".to_string()],
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

/// Runs the configured linter over code snippets.
///
/// Stateless between calls; each check gets its own scratch file.
#[derive(Debug, Clone, Default)]
pub struct StyleChecker {
    config: LintConfig,
}

impl StyleChecker {
    pub fn new(config: LintConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Check if the linter can be started at all.
    pub async fn is_available(&self) -> bool {
        Command::new(&self.config.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Lint `code` and report its findings.
    ///
    /// The snippet is written verbatim to a `.py` scratch file which is
    /// removed after the run whether it succeeded or not.
    pub async fn check(&self, code: &str) -> Result<StyleReport> {
        let mut scratch = tempfile::Builder::new()
            .prefix("style_check_")
            .suffix(".py")
            .tempfile()
            .map_err(Error::ScratchFile)?;
        scratch
            .write_all(code.as_bytes())
            .and_then(|_| scratch.flush())
            .map_err(Error::ScratchFile)?;
        let scratch_path = scratch.into_temp_path();

        let result = self.run(&scratch_path).await;

        if let Err(e) = scratch_path.close() {
            tracing::warn!(error = %e, "Failed to remove style check scratch file");
        }

        result
    }

    async fn run(&self, scratch_path: &Path) -> Result<StyleReport> {
        let program = &self.config.program;

        let mut cmd = Command::new(program);
        cmd.args(&self.config.args)
            .arg(scratch_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(program = %program, file = %scratch_path.display(), "Running linter");

        let output = match self.config.timeout {
            Some(timeout) => tokio::time::timeout(timeout, cmd.output())
                .await
                .map_err(|_| Error::Timeout {
                    program: program.clone(),
                    timeout,
                })?,
            None => cmd.output().await,
        }
        .map_err(|source| Error::ToolInvocation {
            program: program.clone(),
            source,
        })?;

        self.interpret(output)
    }

    /// Exit status 0 (clean) and 1 (findings) are normal for flake8. A run
    /// that reports no findings is an error unless it exited 0, so a crash
    /// exiting 1 is not mistaken for a clean file.
    fn interpret(&self, output: Output) -> Result<StyleReport> {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let report = parse_output(&stdout);

        if report.is_clean() && output.status.code() != Some(0) {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::ToolFailed {
                program: self.config.program.clone(),
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(report)
    }
}
