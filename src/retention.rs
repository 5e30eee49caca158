//! Local file retention after upload
//!
//! Uploaded local files are deleted unless their path matches the
//! configured keep pattern.

use crate::Result;
use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

/// Compile a keep pattern. An empty pattern compiles to `None`.
pub fn compile(pattern: &str) -> Result<Option<Regex>> {
    if pattern.is_empty() {
        return Ok(None);
    }
    Ok(Some(Regex::new(pattern)?))
}

/// Whether `path` survives the upload under `pattern`.
pub fn should_keep(pattern: Option<&Regex>, path: &Path) -> bool {
    pattern.is_some_and(|re| re.is_match(&path.to_string_lossy()))
}

/// Outcome of applying the retention pattern to one uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    Kept,
    Deleted,
    DeleteFailed,
}

/// Keep or delete `path`. A failed delete is logged and reported, never
/// raised: the upload it follows has already succeeded.
pub async fn apply(pattern: Option<&Regex>, path: &Path) -> Retention {
    if should_keep(pattern, path) {
        debug!("Keeping {} (matches keep pattern)", path.display());
        return Retention::Kept;
    }

    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!("Deleted uploaded file {}", path.display());
            Retention::Deleted
        }
        Err(e) => {
            warn!("Failed to delete uploaded file {}: {}", path.display(), e);
            Retention::DeleteFailed
        }
    }
}
