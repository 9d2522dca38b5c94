//! Style checking for the MCP code service
//!
//! Hands a code snippet to an external linter (flake8 by default) through a
//! scratch file and turns its line-oriented output into a [`StyleReport`].

pub mod checker;
pub mod error;
pub mod report;

pub use checker::{LintConfig, StyleChecker};
pub use error::{Error, Result};
pub use report::{CLEAN_FEEDBACK, StyleIssue, StyleReport, parse_output};
