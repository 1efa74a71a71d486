//! Single-document extraction: strategy chain, discovery, output path, write.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::classify::{InvoiceFlavor, guideline_id, is_structurally_valid};
use crate::core::{
    ErrorKind, ExtractionError, ExtractorError, FilenamePriority, Result, Stage,
};
use crate::discovery::discover;
use crate::strategy::StrategyChain;

/// A successfully extracted invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extracted {
    pub input: PathBuf,
    pub output_path: PathBuf,
    /// Attachment name the XML was found under.
    pub source_name: String,
    pub byte_len: usize,
    /// Result of the advisory structural check.
    pub structurally_valid: bool,
    #[serde(serialize_with = "serialize_flavor")]
    pub flavor: InvoiceFlavor,
    /// Profile URN from the guideline parameter, when readable.
    pub guideline: Option<String>,
    /// Whether an existing file was replaced.
    pub overwritten: bool,
}

fn serialize_flavor<S: serde::Serializer>(flavor: &InvoiceFlavor, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(flavor.label())
}

/// Terminal result of one extraction, as reported by the CLI and batch runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionOutcome {
    Success(Extracted),
    Failure {
        input: PathBuf,
        kind: ErrorKind,
        stage: Stage,
        detail: String,
    },
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn input(&self) -> &Path {
        match self {
            Self::Success(extracted) => &extracted.input,
            Self::Failure { input, .. } => input,
        }
    }
}

impl From<std::result::Result<Extracted, ExtractionError>> for ExtractionOutcome {
    fn from(result: std::result::Result<Extracted, ExtractionError>) -> Self {
        match result {
            Ok(extracted) => Self::Success(extracted),
            Err(e) => Self::Failure {
                kind: e.kind(),
                stage: e.stage,
                detail: e.source.to_string(),
                input: e.input,
            },
        }
    }
}

/// Extracts the embedded invoice XML from one container.
///
/// Holds only read-only configuration, so one instance can serve many
/// worker threads at once.
#[derive(Debug, Default)]
pub struct Extractor {
    chain: StrategyChain,
    priority: FilenamePriority,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chain(mut self, chain: StrategyChain) -> Self {
        self.chain = chain;
        self
    }

    pub fn with_priority(mut self, priority: FilenamePriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn priority(&self) -> &FilenamePriority {
        &self.priority
    }

    /// Run the full pipeline for `input`.
    ///
    /// `output` is used verbatim when given; otherwise the path is derived
    /// with [`default_output_path`]. Existing files are overwritten.
    pub fn extract(
        &self,
        input: &Path,
        output: Option<&Path>,
    ) -> std::result::Result<Extracted, ExtractionError> {
        debug!(input = %input.display(), "processing container");
        let fail = |stage, source| ExtractionError::new(input, stage, source);

        let attachments = self
            .chain
            .extract(input)
            .map_err(|e| fail(Stage::Attachments, e))?;
        if attachments.is_empty() {
            return Err(fail(Stage::Empty, ExtractorError::NoAttachments));
        }
        debug!(
            count = attachments.len(),
            names = ?attachments.names().collect::<Vec<_>>(),
            "attachments found"
        );

        let candidate =
            discover(attachments, &self.priority).map_err(|e| fail(Stage::Discovery, e))?;

        let output_path = match output {
            Some(path) => path.to_path_buf(),
            None => default_output_path(input, &candidate.name, &self.priority),
        };

        let overwritten =
            persist(&candidate.data, &output_path).map_err(|e| fail(Stage::Write, e))?;

        let structurally_valid = is_structurally_valid(&candidate.data);
        let guideline = guideline_id(&candidate.data);
        info!(
            input = %input.display(),
            output = %output_path.display(),
            source = %candidate.name,
            bytes = candidate.data.len(),
            "extracted invoice XML"
        );
        if structurally_valid {
            debug!("XML looks like a valid ZUGFeRD/Factur-X document");
        } else {
            debug!(output = %output_path.display(), "XML may not be a valid ZUGFeRD/Factur-X document");
        }
        if let Some(id) = &guideline {
            debug!(guideline = %id, "guideline parameter");
        }

        Ok(Extracted {
            input: input.to_path_buf(),
            output_path,
            byte_len: candidate.data.len(),
            flavor: InvoiceFlavor::sniff(&candidate.data),
            source_name: candidate.name,
            structurally_valid,
            guideline,
            overwritten,
        })
    }
}

/// Output path when none was configured: next to the container, named after
/// the attachment if it is canonical, else `<container stem>.xml`.
pub fn default_output_path(input: &Path, source_name: &str, priority: &FilenamePriority) -> PathBuf {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    if priority.is_canonical(source_name) {
        dir.join(source_name)
    } else {
        dir.join(stem_xml_name(input))
    }
}

/// `<dir>/<container stem>.xml`, the naming used for batch output directories.
pub fn batch_output_path(input: &Path, dir: &Path) -> PathBuf {
    dir.join(stem_xml_name(input))
}

fn stem_xml_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "invoice".to_string());
    format!("{stem}.xml")
}

/// Write `data` to `path`, creating parent directories. Returns whether an
/// existing file was replaced.
fn persist(data: &[u8], path: &Path) -> Result<bool> {
    let write_failed = |source| ExtractorError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(write_failed)?;
    }

    let overwritten = path.exists();
    if overwritten {
        debug!(path = %path.display(), "output file exists and will be overwritten");
    }

    fs::write(path, data).map_err(write_failed)?;
    Ok(overwritten)
}
