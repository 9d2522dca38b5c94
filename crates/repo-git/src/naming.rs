//! Remote URL to workspace directory name mapping

use repo_fs::RepoPath;

/// Name used when a URL yields nothing usable.
const FALLBACK_NAME: &str = "repo";

/// Derive a directory name from the trailing segment of a remote URL.
///
/// `https://github.com/org/project.git` -> `project`,
/// `git@host:org/project` -> `project`. Characters outside
/// `[A-Za-z0-9._-]` become dashes.
pub fn workspace_name_from_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches(['/', '\\']);
    let last = trimmed
        .rsplit(['/', '\\', ':'])
        .next()
        .unwrap_or_default();
    let stem = last.strip_suffix(RepoPath::GitSuffix.as_str()).unwrap_or(last);

    let name = sanitize(stem);
    if name.is_empty() || name.chars().all(|c| c == '.') {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_spaces() {
        assert_eq!(sanitize("my repo"), "my-repo");
    }

    #[test]
    fn test_dots_only_fall_back() {
        assert_eq!(workspace_name_from_url("https://example.com/.."), "repo");
    }
}
