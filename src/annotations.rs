//! Proteins are linked to GO terms and make up the background universe
//!
//! This module contains the structs representing the background against which
//! enrichment is measured:
//!
//! - [`GoAnnotationIndex`]: which proteins carry which GO term (and vice versa)
//! - [`GoTermMetadata`]: name and ontology domain of each GO term
//! - [`Background`]: both of the above, for one reference species
//!
//! as well as the [`ProteinMatch`]es of an analyzed dataset.
//!
//! The underlying principle is the same as for any annotation:
//! - Each protein has a unique [`ProteinAccession`]
//! - Each protein is annotated with a set of GO terms ([`crate::GoGroup`])
//! - Each GO term knows the set of proteins it is annotated to

mod background;
mod index;
mod metadata;
mod protein;

pub use background::{Background, BackgroundBuilder};
pub use index::{GoAnnotationIndex, Proteins};
pub use metadata::{GoTermMetadata, TermInfo};
pub use protein::{ProteinAccession, ProteinMatch};
