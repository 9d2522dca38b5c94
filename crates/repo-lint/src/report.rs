//! Linter output parsing

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Feedback line returned when the linter reports nothing.
pub const CLEAN_FEEDBACK: &str = "Code looks good! No style issues found!";

static CODE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<code>[A-Z]+[0-9]+)\s+(?P<text>.*)$").expect("valid regex")
});

/// One finding reported by the linter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleIssue {
    /// Human-readable message, e.g. `E501 line too long (96 > 79 characters)`
    pub message: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub code: Option<String>,
}

/// Outcome of one style check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleReport {
    Clean,
    Issues(Vec<StyleIssue>),
}

impl StyleReport {
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    /// Summary line for the response envelope.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Clean => "No style issues found",
            Self::Issues(_) => "Flake8 found style issues",
        }
    }

    /// Messages in linter order, or the single clean sentinel.
    pub fn feedback(&self) -> Vec<String> {
        match self {
            Self::Clean => vec![CLEAN_FEEDBACK.to_string()],
            Self::Issues(issues) => issues.iter().map(|i| i.message.clone()).collect(),
        }
    }

    pub fn issues(&self) -> &[StyleIssue] {
        match self {
            Self::Clean => &[],
            Self::Issues(issues) => issues,
        }
    }
}

/// Parse linter stdout.
///
/// Each line is split on `:` into at most four parts (`path:line:col:
/// message`). With all four present only the trimmed message is kept;
/// otherwise the whole trimmed line is. Blank lines are skipped.
pub fn parse_output(stdout: &str) -> StyleReport {
    let issues: Vec<StyleIssue> = stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect();

    if issues.is_empty() {
        StyleReport::Clean
    } else {
        StyleReport::Issues(issues)
    }
}

fn parse_line(line: &str) -> StyleIssue {
    let parts: Vec<&str> = line.splitn(4, ':').collect();
    let [_, line_no, column, message] = parts.as_slice() else {
        return StyleIssue {
            message: line.trim().to_string(),
            line: None,
            column: None,
            code: None,
        };
    };

    let message = message.trim().to_string();
    let code = CODE_PREFIX
        .captures(&message)
        .map(|caps| caps["code"].to_string());

    StyleIssue {
        line: line_no.trim().parse().ok(),
        column: column.trim().parse().ok(),
        code,
        message,
    }
}
