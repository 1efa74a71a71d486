//! Container parsing capability.
//!
//! A [`ContainerParser`] writes every embedded object of a container into a
//! directory. The extraction strategies call it with either a strict or a
//! relaxed [`ParseConfig`]; [`PdfParser`] is the lopdf-backed implementation.

mod names;
mod pdf;

pub use pdf::PdfParser;

use std::path::Path;

use crate::core::Result;

/// How strictly the container structure is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Walk only the declared attachment structures; any inconsistency fails.
    Strict,
    /// Look for attachments anywhere and skip broken entries.
    Relaxed,
}

/// Parser settings for one extraction attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    pub validation: ValidationMode,
    /// When set, every attachment stream must decode; otherwise undecodable
    /// streams are written as stored.
    pub decode_all_streams: bool,
}

impl ParseConfig {
    pub const fn strict() -> Self {
        Self {
            validation: ValidationMode::Strict,
            decode_all_streams: true,
        }
    }

    pub const fn relaxed() -> Self {
        Self {
            validation: ValidationMode::Relaxed,
            decode_all_streams: false,
        }
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self::strict()
    }
}

/// External capability: write all embedded objects of `container` as
/// separate files into `dest`, or fail.
///
/// Returns the number of files written.
pub trait ContainerParser: Send + Sync {
    fn extract_attachments(&self, container: &Path, dest: &Path, config: &ParseConfig)
    -> Result<usize>;
}

impl<P: ContainerParser + ?Sized> ContainerParser for std::sync::Arc<P> {
    fn extract_attachments(
        &self,
        container: &Path,
        dest: &Path,
        config: &ParseConfig,
    ) -> Result<usize> {
        (**self).extract_attachments(container, dest, config)
    }
}
