#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

use core::fmt::Debug;
use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;

pub mod annotations;
pub mod domain;
pub mod enrichment;
pub mod parser;
mod progress;
pub mod stats;
pub mod term;

pub use annotations::{Background, BackgroundBuilder, GoAnnotationIndex, GoTermMetadata};
pub use domain::{DomainCache, DomainLookup, DomainResolver};
pub use enrichment::{EnrichmentAnalyzer, EnrichmentRecord, EnrichmentResult, Outcome};
pub use progress::Progress;
pub use term::{GoDomain, GoGroup, GoTermId};

/// Significance threshold used when the caller does not configure one
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Upper bound for a single remote GO domain lookup
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// QuickGO endpoint returning a single GO term as OBO-XML
pub const QUICKGO_TERM_URL: &str = "https://www.ebi.ac.uk/QuickGO/GTerm?format=oboxml&id=";

/// Inline capacity of a [`GoGroup`], most proteins carry fewer terms
const DEFAULT_TERMS_PER_PROTEIN: usize = 12;

/// Main Error type for this crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GoeaError {
    /// Term or protein does not exist
    #[error("term does not exist")]
    DoesNotExist,
    /// Parsing of an integer failed
    #[error("unable to parse Integer")]
    ParseIntError,
    /// Failed to parse a line of input data
    #[error("invalid input data: {0}")]
    InvalidInput(String),
    /// Failed to open a file
    #[error("cannot open file {0}")]
    CannotOpenFile(String),
    /// The analysis was started without a background species
    #[error("a background species must be selected before running the analysis")]
    ConfigurationRequired,
    /// Significance levels must be in the open interval (0, 1)
    #[error("invalid significance level {0}, must be between 0 and 1")]
    InvalidSignificanceLevel(f64),
    /// A remote GO domain lookup failed
    #[error("GO domain lookup failed: {0}")]
    Lookup(String),
    /// A remote GO domain lookup did not answer in time
    #[error("GO domain lookup timed out after {0:?}")]
    Timeout(Duration),
}

impl From<ParseIntError> for GoeaError {
    fn from(_: ParseIntError) -> Self {
        GoeaError::ParseIntError
    }
}

/// Shortcut for `Result<T, GoeaError>`
pub type GoeaResult<T> = Result<T, GoeaError>;

/// Protein and term counts are `u64`, percentages and probabilities `f64`.
/// Counts never reach the precision limit of `f64` in practice,
/// this method panics if they do.
fn f64_from_u64(n: u64) -> f64 {
    let intermediate: u32 = n
        .try_into()
        .expect("cannot safely create f64 from large u64");
    intermediate.into()
}

/// Same as [`f64_from_u64`], for `usize`
fn f64_from_usize(n: usize) -> f64 {
    let intermediate: u32 = n
        .try_into()
        .expect("cannot safely create f64 from large usize");
    intermediate.into()
}

/// Converts a `usize` count into the `u64` domain of the statistics module
fn u64_from_usize(n: usize) -> u64 {
    n.try_into().expect("usize always fits into u64")
}
