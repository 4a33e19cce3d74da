//! Gene Ontology enrichment analysis of a protein dataset
//!
//! The analysis compares how often each GO term occurs among the proteins
//! of a dataset with how often it occurs in the background (e.g. the whole
//! proteome of a species). For every term it calculates
//!
//! - the percentage of GO-mapped background and dataset proteins with the term
//! - the log2 fold change between both percentages
//! - a p-value based on the hypergeometric distribution
//! - a p-value corrected for multiple testing
//!
//! and flags terms whose corrected p-value is below the significance level.
//!
//! # Examples
//!
//! ```
//! use goea::annotations::ProteinMatch;
//! use goea::enrichment::Outcome;
//! use goea::{BackgroundBuilder, EnrichmentAnalyzer, GoTermId, Progress};
//!
//! let binding = GoTermId::try_from("GO:0005515").unwrap();
//! let membrane = GoTermId::try_from("GO:0016020").unwrap();
//!
//! let mut builder = BackgroundBuilder::new();
//! builder.species("Homo sapiens");
//! builder.add_term(binding, "protein binding");
//! builder.add_term(membrane, "membrane");
//! for i in 0..50 {
//!     let protein = format!("P{i}");
//!     builder.add_annotation(protein.as_str(), binding);
//!     if i < 5 {
//!         builder.add_annotation(protein.as_str(), membrane);
//!     }
//! }
//!
//! let analyzer = EnrichmentAnalyzer::builder()
//!     .background(builder.build().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let dataset = (0..10).map(|i| ProteinMatch::new(format!("P{i}")).validated(true));
//!
//! let Outcome::Completed(result) = analyzer.analyze(dataset, &Progress::new()).unwrap() else {
//!     panic!("the analysis was not completed");
//! };
//!
//! let record = result.record(&membrane).unwrap();
//! assert_eq!(record.name(), "membrane");
//! assert!((record.percent_background() - 10.0).abs() < 1e-9);
//! assert!((record.percent_dataset() - 50.0).abs() < 1e-9);
//! ```

mod analyzer;
mod dataset;
mod record;
mod result;

use std::fmt::Display;

pub use analyzer::{AnalyzerBuilder, EnrichmentAnalyzer};
pub use dataset::DatasetMembership;
pub use record::{EnrichmentRecord, Representation};
pub use result::{EnrichmentResult, PlotPoint, RepresentationCounts};

use crate::{GoeaError, GoeaResult, DEFAULT_SIGNIFICANCE_LEVEL};

/// The threshold below which a corrected p-value is significant
///
/// Any value in the open interval (0, 1) is accepted.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SignificanceLevel(f64);

impl SignificanceLevel {
    /// 5 %
    pub const FIVE_PERCENT: SignificanceLevel = SignificanceLevel(0.05);
    /// 1 %
    pub const ONE_PERCENT: SignificanceLevel = SignificanceLevel(0.01);

    /// Constructs a new significance level
    ///
    /// # Errors
    ///
    /// [`GoeaError::InvalidSignificanceLevel`] if `level` is not between 0 and 1
    pub fn new(level: f64) -> GoeaResult<Self> {
        if level > 0.0 && level < 1.0 {
            Ok(Self(level))
        } else {
            Err(GoeaError::InvalidSignificanceLevel(level))
        }
    }

    /// The level as `f64`
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for SignificanceLevel {
    fn default() -> Self {
        Self(DEFAULT_SIGNIFICANCE_LEVEL)
    }
}

impl TryFrom<f64> for SignificanceLevel {
    type Error = GoeaError;
    fn try_from(level: f64) -> GoeaResult<Self> {
        Self::new(level)
    }
}

impl Display for SignificanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why an analysis did not produce any record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// None of the eligible dataset proteins carries a GO term
    NoMappedProteins,
    /// There was no GO term to test
    NoTerms,
}

/// The outcome of an enrichment analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// All terms were scored and corrected
    Completed(EnrichmentResult),
    /// No statistics could be calculated
    Empty(EmptyReason),
    /// The analysis was canceled after `scored` terms.
    /// No multiple testing correction was applied.
    Canceled {
        /// The number of terms scored before cancellation
        scored: usize,
    },
}

impl Outcome {
    /// Returns `true` if the analysis was completed
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    /// The result of a completed analysis
    pub fn completed(self) -> Option<EnrichmentResult> {
        match self {
            Outcome::Completed(result) => Some(result),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn significance_levels() {
        assert!(SignificanceLevel::new(0.05).is_ok());
        assert!(SignificanceLevel::new(0.2).is_ok());
        assert!(matches!(
            SignificanceLevel::new(0.0),
            Err(GoeaError::InvalidSignificanceLevel(_))
        ));
        assert!(SignificanceLevel::new(1.0).is_err());
        assert!(SignificanceLevel::try_from(f64::NAN).is_err());
        assert_eq!(SignificanceLevel::default(), SignificanceLevel::FIVE_PERCENT);
        assert_eq!(SignificanceLevel::ONE_PERCENT.to_string(), "0.01");
    }

    #[test]
    fn outcomes() {
        let outcome = Outcome::Empty(EmptyReason::NoTerms);
        assert!(!outcome.is_completed());
        assert!(outcome.completed().is_none());
        assert!(Outcome::Canceled { scored: 3 }.completed().is_none());
    }
}
