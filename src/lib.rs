//! # zugferd-extractor
//!
//! Locates and extracts the embedded structured invoice (ZUGFeRD 1.x/2.x,
//! Factur-X, XRechnung) from PDF containers, one at a time or as a
//! concurrent batch.
//!
//! Filenames inside a container are not trusted: attachments are pulled out
//! by an escalating [`strategy::StrategyChain`] (strict parse, relaxed
//! parse, raw byte scan) and the invoice is picked by content through
//! [`discovery::discover`] and the [`classify`] predicates.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use zugferd_extractor::Extractor;
//!
//! let extractor = Extractor::new();
//! let extracted = extractor.extract(Path::new("rechnung.pdf"), None).unwrap();
//! println!("{} -> {}", extracted.source_name, extracted.output_path.display());
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`classify`] | Invoice sniffing, structural advisory check, flavor detection |
//! | [`container`] | Container parser capability (lopdf backed) |
//! | [`strategy`] | Standard / relaxed / byte-scan extraction chain |
//! | [`discovery`] | Candidate selection by canonical name and content |
//! | [`extractor`] | Single-document pipeline and output paths |
//! | [`batch`] | Worker-pool batch processing |
//! | [`input`] | Glob resolution and PDF filtering |

pub mod batch;
pub mod classify;
pub mod container;
pub mod core;
pub mod discovery;
pub mod extractor;
pub mod input;
pub mod strategy;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export the main entry points at crate root for convenience
pub use crate::batch::{BatchConfig, BatchProcessor, BatchReport};
pub use crate::core::*;
pub use crate::extractor::{ExtractionOutcome, Extracted, Extractor};
