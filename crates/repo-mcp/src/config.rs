//! Service configuration
//!
//! Built in three layers: compiled-in defaults, an optional config file
//! (TOML, JSON or YAML via [`ConfigStore`]), then command-line flags and
//! their environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use repo_fs::{ConfigStore, NormalizedPath, WorkspaceRoot, constants::DEFAULT_WORKSPACE_ROOT};
use repo_git::CloneOptions;
use repo_lint::LintConfig;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Flags shared by both service binaries.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Configuration file (.toml, .json, .yaml)
    #[arg(short, long, env = "MCP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "MCP_HOST")]
    pub host: Option<String>,

    /// Directory holding cloned workspaces
    #[arg(long, env = "MCP_WORKSPACE_ROOT")]
    pub workspace_root: Option<PathBuf>,

    /// Linter executable used by the code service
    #[arg(long, env = "MCP_LINT_PROGRAM")]
    pub lint_program: Option<String>,
}

/// Linter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintSection {
    pub program: String,
    pub args: Vec<String>,
    /// Zero disables the timeout
    pub timeout_secs: u64,
}

impl Default for LintSection {
    fn default() -> Self {
        let defaults = LintConfig::default();
        Self {
            program: defaults.program,
            args: defaults.args,
            timeout_secs: defaults.timeout.map_or(0, |t| t.as_secs()),
        }
    }
}

/// Complete configuration of both services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub host: String,
    pub git_port: u16,
    pub code_port: u16,
    pub workspace_root: PathBuf,
    /// Zero disables the timeout
    pub clone_timeout_secs: u64,
    pub lint: LintSection,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            git_port: 8000,
            code_port: 8001,
            workspace_root: PathBuf::from(DEFAULT_WORKSPACE_ROOT),
            clone_timeout_secs: 300,
            lint: LintSection::default(),
        }
    }
}

impl ServiceConfig {
    /// Defaults, overlaid by `file` when given.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => {
                let config = ConfigStore::new().load(&NormalizedPath::new(path))?;
                tracing::debug!(path = %path.display(), "Loaded configuration file");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Load the file named by `args` and apply the flag overrides.
    pub fn from_args(args: &CommonArgs) -> Result<Self> {
        let mut config = Self::load(args.config.as_deref())?;
        config.apply(args);
        Ok(config)
    }

    fn apply(&mut self, args: &CommonArgs) {
        if let Some(host) = &args.host {
            self.host = host.clone();
        }
        if let Some(root) = &args.workspace_root {
            self.workspace_root = root.clone();
        }
        if let Some(program) = &args.lint_program {
            self.lint.program = program.clone();
        }
    }

    pub fn workspace_root(&self) -> WorkspaceRoot {
        WorkspaceRoot::new(self.workspace_root.as_path())
    }

    pub fn clone_options(&self) -> CloneOptions {
        CloneOptions {
            timeout: non_zero_secs(self.clone_timeout_secs),
        }
    }

    pub fn lint_config(&self) -> LintConfig {
        LintConfig {
            program: self.lint.program.clone(),
            args: self.lint.args.clone(),
            timeout: non_zero_secs(self.lint.timeout_secs),
        }
    }
}

fn non_zero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.git_port, 8000);
        assert_eq!(config.code_port, 8001);
        assert_eq!(config.workspace_root, PathBuf::from("temp_repos"));
        assert_eq!(config.lint.program, "flake8");
        assert_eq!(config.clone_options().timeout, Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("services.toml");
        fs::write(&path, "git_port = 9100\n\n[lint]\ntimeout_secs = 0\n").unwrap();

        let config = ServiceConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.git_port, 9100);
        assert_eq!(config.code_port, 8001);
        assert_eq!(config.lint.program, "flake8");
        assert_eq!(config.lint_config().timeout, None);
    }

    #[test]
    fn test_flags_override_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("services.json");
        fs::write(&path, r#"{"host": "0.0.0.0", "workspace_root": "from-file"}"#).unwrap();

        let args = CommonArgs {
            config: Some(path),
            host: None,
            workspace_root: Some(PathBuf::from("from-flag")),
            lint_program: Some("ruff".to_string()),
        };
        let config = ServiceConfig::from_args(&args).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.workspace_root, PathBuf::from("from-flag"));
        assert_eq!(config.lint.program, "ruff");
    }
}
