//! Resolution of the input argument into container paths.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::{ExtractorError, Result};

/// Expand a path or glob pattern into the matching paths, sorted.
///
/// An existing path is returned as-is even if it contains glob
/// metacharacters. Fails with [`ExtractorError::InputPatternEmpty`] when
/// nothing matches.
pub fn resolve_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    if Path::new(pattern).exists() {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let entries = glob::glob(pattern).map_err(|e| ExtractorError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => debug!(path = %e.path().display(), error = %e.error(), "skipping unreadable path"),
        }
    }

    if paths.is_empty() {
        return Err(ExtractorError::InputPatternEmpty {
            pattern: pattern.to_string(),
        });
    }
    paths.sort();
    Ok(paths)
}

/// Whether the path has a `.pdf` extension (any case).
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Keep only `.pdf` paths, preserving order.
pub fn filter_pdfs(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths.iter().filter(|p| is_pdf(p)).cloned().collect()
}
