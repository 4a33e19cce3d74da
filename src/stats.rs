//! Statistical building blocks of the enrichment analysis
//!
//! - [`hypergeom`]: the hypergeometric distribution used to score each GO term
//! - [`correction`]: multiple testing correction over all scored terms
//! - [`FoldChange`]: log2 ratio of dataset and background frequencies,
//!   keeping track of non-finite values

pub mod correction;
mod fold_change;
pub mod hypergeom;

pub use correction::Correction;
pub use fold_change::FoldChange;
pub use hypergeom::{Hypergeometric, PValueKind};
