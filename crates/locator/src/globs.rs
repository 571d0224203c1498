//! Glob matching against files below a base directory.

use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

/// Whether any entry below `base` matches any of `globs`.
///
/// Patterns are relative to `base` and use `/` as separator on every
/// platform. A missing `base` or an empty pattern list never matches.
pub fn any_glob_matches(base: &Path, globs: &[String]) -> bool {
    if globs.is_empty() || !base.is_dir() {
        return false;
    }

    let patterns: Vec<String> = globs.iter().map(|g| normalize(g)).collect();

    let mut walker = WalkDir::new(base).min_depth(1);
    if let Some(depth) = max_depth(&patterns) {
        walker = walker.max_depth(depth);
    }

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(base = %base.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let Ok(rel) = entry.path().strip_prefix(base) else {
            continue;
        };
        let rel = rel.to_string_lossy().replace('\\', "/");

        if patterns.iter().any(|p| glob_match::glob_match(p, &rel)) {
            debug!(base = %base.display(), path = %rel, "glob matched");
            return true;
        }
    }

    false
}

/// Normalizes a pattern to forward slashes without a leading `./` or `/`.
fn normalize(pattern: &str) -> String {
    let pattern = pattern.replace('\\', "/");
    let pattern = pattern.strip_prefix("./").unwrap_or(&pattern);
    pattern.trim_start_matches('/').to_string()
}

/// Deepest level any pattern can reach, or `None` when a `**` makes it
/// unbounded.
fn max_depth(patterns: &[String]) -> Option<usize> {
    let mut depth = 0;
    for pattern in patterns {
        if pattern.contains("**") {
            return None;
        }
        depth = depth.max(pattern.split('/').count());
    }
    Some(depth)
}
