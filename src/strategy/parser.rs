use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use tracing::debug;

use super::ExtractionStrategy;
use crate::container::{ContainerParser, ParseConfig};
use crate::core::{AttachmentSet, Result};

/// Extraction through the container parser, staged in a scratch directory.
///
/// The scratch directory is a [`TempDir`]: it is removed when the attempt
/// returns, whether it succeeded, found nothing or failed.
pub struct ParserStrategy {
    name: String,
    parser: Arc<dyn ContainerParser>,
    config: ParseConfig,
    prefix: String,
    scratch_root: Option<PathBuf>,
}

impl ParserStrategy {
    pub fn new(name: impl Into<String>, parser: Arc<dyn ContainerParser>, config: ParseConfig) -> Self {
        Self {
            name: name.into(),
            parser,
            config,
            prefix: "zugferd_extract_".to_string(),
            scratch_root: None,
        }
    }

    pub fn scratch_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Create scratch directories under `root` rather than the system
    /// temporary directory.
    pub fn scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    fn scratch_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(&self.prefix);
        let dir = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(dir)
    }
}

impl ExtractionStrategy for ParserStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn attempt_extract(&self, container: &Path) -> Result<AttachmentSet> {
        let scratch = self.scratch_dir()?;
        debug!(strategy = %self.name, scratch = %scratch.path().display(), "using scratch directory");

        self.parser
            .extract_attachments(container, scratch.path(), &self.config)?;

        read_extracted_files(scratch.path())
    }
}

/// Read every regular file in `dir` into memory. Unreadable entries are
/// skipped and logged.
fn read_extracted_files(dir: &Path) -> Result<AttachmentSet> {
    let mut attachments = AttachmentSet::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        match fs::read(entry.path()) {
            Ok(data) => {
                debug!(name = %name, bytes = data.len(), "read attachment");
                attachments.insert(name, data);
            }
            Err(e) => debug!(name = %name, error = %e, "could not read extracted attachment"),
        }
    }

    Ok(attachments)
}
