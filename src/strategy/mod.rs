//! Escalating attachment extraction.
//!
//! | Order | Strategy | Approach |
//! |-------|----------|----------|
//! | 1 | `standard` | container parser, strict configuration |
//! | 2 | `relaxed` | container parser, relaxed configuration |
//! | 3 | `byte-scan` | search raw bytes for CII XML |
//!
//! The chain stops at the first strategy that yields at least one attachment.
//! An empty result counts as a failure and falls through to the next one.

mod parser;
mod scan;

pub use parser::ParserStrategy;
pub use scan::{ByteScanStrategy, END_MARKERS, START_MARKERS, slice_xml_at};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::container::{ContainerParser, ParseConfig, PdfParser};
use crate::core::{AttachmentSet, ExtractorError, Result, StrategyFailure};

/// One way of turning a container into an [`AttachmentSet`].
pub trait ExtractionStrategy: Send + Sync {
    /// Short identifier used in diagnostics and error messages.
    fn name(&self) -> &str;

    fn attempt_extract(&self, container: &Path) -> Result<AttachmentSet>;
}

/// Ordered list of strategies tried until one yields attachments.
pub struct StrategyChain {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl StrategyChain {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// The default three-step chain (standard, relaxed, byte scan) around
    /// the given container parser.
    pub fn standard<P: ContainerParser + 'static>(parser: P) -> Self {
        Self::build(Arc::new(parser), None)
    }

    /// Like [`StrategyChain::standard`], placing scratch directories under
    /// `scratch_root` instead of the system temporary directory.
    pub fn with_scratch_root<P: ContainerParser + 'static>(
        parser: P,
        scratch_root: impl Into<PathBuf>,
    ) -> Self {
        Self::build(Arc::new(parser), Some(scratch_root.into()))
    }

    fn build(parser: Arc<dyn ContainerParser>, scratch_root: Option<PathBuf>) -> Self {
        let standard = ParserStrategy::new(
            "standard",
            Arc::clone(&parser),
            ParseConfig::strict(),
        )
        .scratch_prefix("zugferd_extract_");
        let relaxed = ParserStrategy::new("relaxed", parser, ParseConfig::relaxed())
            .scratch_prefix("zugferd_extract_relaxed_");

        let (standard, relaxed) = match scratch_root {
            Some(root) => (
                standard.scratch_root(root.clone()),
                relaxed.scratch_root(root),
            ),
            None => (standard, relaxed),
        };

        Self::new(vec![
            Box::new(standard),
            Box::new(relaxed),
            Box::new(ByteScanStrategy::new()),
        ])
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Run the strategies in order and return the first non-empty set.
    ///
    /// Individual failures are recovered here; only exhaustion of every
    /// strategy is reported, as [`ExtractorError::ContainerUnreadable`].
    pub fn extract(&self, container: &Path) -> Result<AttachmentSet> {
        let mut attempts = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            debug!(strategy = strategy.name(), container = %container.display(), "trying extraction strategy");
            match strategy.attempt_extract(container) {
                Ok(set) if !set.is_empty() => {
                    debug!(strategy = strategy.name(), attachments = set.len(), "extraction strategy succeeded");
                    return Ok(set);
                }
                Ok(_) => {
                    debug!(strategy = strategy.name(), "extraction strategy found no attachments");
                    attempts.push(StrategyFailure::new(strategy.name(), "no attachments found"));
                }
                Err(e) => {
                    debug!(strategy = strategy.name(), error = %e, "extraction strategy failed");
                    attempts.push(StrategyFailure::new(strategy.name(), e.to_string()));
                }
            }
        }

        Err(ExtractorError::ContainerUnreadable { attempts })
    }
}

impl Default for StrategyChain {
    fn default() -> Self {
        Self::standard(PdfParser::new())
    }
}

impl std::fmt::Debug for StrategyChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyChain")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}
