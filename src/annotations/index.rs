use std::collections::{HashMap, HashSet};

use crate::annotations::ProteinAccession;
use crate::{u64_from_usize, GoGroup, GoTermId};

/// A set of proteins
///
/// Currently implemented using [`HashSet`] but any other implementation
/// should work as well given that each [`ProteinAccession`] must appear only once
pub type Proteins = HashSet<ProteinAccession>;

/// Mapping of GO terms to the proteins they are annotated to, and back
///
/// The index is the background universe of an enrichment analysis.
/// It can only be modified through [`crate::BackgroundBuilder`] and is
/// immutable once the [`crate::Background`] is built.
#[derive(Debug, Default, Clone)]
pub struct GoAnnotationIndex {
    terms: HashMap<GoTermId, Proteins>,
    proteins: HashMap<ProteinAccession, GoGroup>,
}

impl GoAnnotationIndex {
    /// Links `protein` and `term` in both directions
    ///
    /// Returns `false` if the link was already present
    pub(crate) fn insert(&mut self, protein: ProteinAccession, term: GoTermId) -> bool {
        let new_link = self
            .proteins
            .entry(protein.clone())
            .or_default()
            .insert(term);
        self.terms.entry(term).or_default().insert(protein);
        new_link
    }

    /// The number of background proteins annotated with `term`
    ///
    /// Returns `0` for unknown terms
    pub fn frequency(&self, term: &GoTermId) -> u64 {
        self.terms
            .get(term)
            .map_or(0, |proteins| u64_from_usize(proteins.len()))
    }

    /// The proteins annotated with `term`
    pub fn proteins(&self, term: &GoTermId) -> Option<&Proteins> {
        self.terms.get(term)
    }

    /// The GO terms annotated to `protein`
    ///
    /// Returns `None` if the protein is not part of the background
    pub fn terms_of(&self, protein: &str) -> Option<&GoGroup> {
        self.proteins.get(protein)
    }

    /// The number of distinct proteins that carry at least one GO term
    pub fn mapped_protein_count(&self) -> u64 {
        u64_from_usize(
            self.proteins
                .values()
                .filter(|group| !group.is_empty())
                .count(),
        )
    }

    /// Iterates all annotated GO terms, in arbitrary order
    pub fn term_ids(&self) -> impl Iterator<Item = &GoTermId> {
        self.terms.keys()
    }

    /// The number of GO terms with at least one annotated protein
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if no protein is annotated with any GO term
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn index() -> GoAnnotationIndex {
        let mut index = GoAnnotationIndex::default();
        index.insert("P1".into(), 1u32.into());
        index.insert("P1".into(), 2u32.into());
        index.insert("P2".into(), 1u32.into());
        index.insert("P3".into(), 3u32.into());
        index
    }

    #[test]
    fn frequencies() {
        let index = index();
        assert_eq!(index.frequency(&1u32.into()), 2);
        assert_eq!(index.frequency(&2u32.into()), 1);
        assert_eq!(index.frequency(&99u32.into()), 0);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn mapped_proteins() {
        let index = index();
        assert_eq!(index.mapped_protein_count(), 3);
        assert_eq!(index.terms_of("P1").map(GoGroup::len), Some(2));
        assert!(index.terms_of("P4").is_none());
    }

    #[test]
    fn duplicate_links() {
        let mut index = index();
        assert!(!index.insert("P1".into(), 1u32.into()));
        assert_eq!(index.frequency(&1u32.into()), 2);
        assert_eq!(index.mapped_protein_count(), 3);
    }

    #[test]
    fn proteins_of_term() {
        let index = index();
        let proteins = index.proteins(&1u32.into()).unwrap();
        assert!(proteins.contains("P1"));
        assert!(proteins.contains("P2"));
        assert!(!proteins.contains("P3"));
    }
}
