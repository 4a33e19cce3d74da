use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::annotations::{GoAnnotationIndex, ProteinAccession, ProteinMatch};
use crate::{GoGroup, GoTermId, Progress};

/// The GO terms of the proteins of an analyzed dataset
///
/// Holds, for every GO term, how many eligible dataset proteins are
/// annotated with it, and the total number of eligible dataset proteins
/// with at least one GO term.
///
/// # Examples
///
/// ```
/// use goea::annotations::ProteinMatch;
/// use goea::enrichment::DatasetMembership;
/// use goea::{BackgroundBuilder, GoTermId};
///
/// let term = GoTermId::from(16020u32);
/// let mut builder = BackgroundBuilder::new();
/// builder.species("Homo sapiens");
/// builder.add_annotation("P1", term);
/// builder.add_annotation("P2", term);
/// let background = builder.build().unwrap();
///
/// let matches = vec![
///     ProteinMatch::new("P1").validated(true),
///     ProteinMatch::new("P2").validated(true).decoy(true),
///     ProteinMatch::new("P3").validated(true),
/// ];
///
/// let dataset = DatasetMembership::from_matches(background.index(), matches);
/// assert_eq!(dataset.count(&term), 1);
/// assert_eq!(dataset.total_mapped(), 1);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DatasetMembership {
    counts: HashMap<GoTermId, u64>,
    total_mapped: u64,
}

impl DatasetMembership {
    /// Derives the membership of all eligible `matches`
    ///
    /// Each protein accession is counted only once, no matter how often
    /// it appears in `matches`. Proteins that are not part of `index` do
    /// not count as GO-mapped.
    pub fn from_matches<I>(index: &GoAnnotationIndex, matches: I) -> Self
    where
        I: IntoIterator<Item = ProteinMatch>,
    {
        Self::collect(index, matches, &Progress::new())
            .expect("a new progress is never canceled")
    }

    /// Same as [`DatasetMembership::from_matches`], but cancelable
    ///
    /// `progress` is incremented for every protein match.
    /// Returns `None` if the progress was canceled.
    pub fn collect<I>(index: &GoAnnotationIndex, matches: I, progress: &Progress) -> Option<Self>
    where
        I: IntoIterator<Item = ProteinMatch>,
    {
        let mut seen: HashSet<ProteinAccession> = HashSet::new();
        let mut membership = DatasetMembership::default();

        for protein in matches {
            if progress.is_canceled() {
                debug!("Collecting dataset proteins canceled");
                return None;
            }
            progress.increment();

            if !protein.is_eligible() {
                trace!("Skipping {}", protein.accession());
                continue;
            }
            if !seen.insert(protein.accession().clone()) {
                continue;
            }
            match index.terms_of(protein.accession().as_str()) {
                Some(terms) if !terms.is_empty() => membership.add_protein(terms),
                _ => trace!("{} has no GO term", protein.accession()),
            }
        }
        debug!(
            "Dataset: {} eligible proteins, {} GO-mapped, {} GO terms",
            seen.len(),
            membership.total_mapped,
            membership.counts.len()
        );
        Some(membership)
    }

    /// Constructs a membership from precomputed counts
    pub fn from_counts(counts: HashMap<GoTermId, u64>, total_mapped: u64) -> Self {
        Self {
            counts,
            total_mapped,
        }
    }

    fn add_protein(&mut self, terms: &GoGroup) {
        self.total_mapped += 1;
        for term in terms {
            self.counts
                .entry(term)
                .and_modify(|count| *count += 1)
                .or_insert(1);
        }
    }

    /// The number of dataset proteins annotated with `term`
    pub fn count(&self, term: &GoTermId) -> u64 {
        self.counts.get(term).copied().unwrap_or_default()
    }

    /// The number of dataset proteins with at least one GO term
    pub fn total_mapped(&self) -> u64 {
        self.total_mapped
    }

    /// Returns `true` if no dataset protein carries a GO term
    pub fn is_empty(&self) -> bool {
        self.total_mapped == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::BackgroundBuilder;

    fn index() -> GoAnnotationIndex {
        let mut builder = BackgroundBuilder::new();
        builder.species("test");
        builder.add_annotation("P1", 1u32.into());
        builder.add_annotation("P1", 2u32.into());
        builder.add_annotation("P2", 1u32.into());
        builder.add_annotation("P3", 3u32.into());
        builder.build().unwrap().index().clone()
    }

    #[test]
    fn counts_distinct_proteins() {
        let matches = vec![
            ProteinMatch::new("P1").validated(true),
            ProteinMatch::new("P1").validated(true),
            ProteinMatch::new("P2").validated(true),
        ];
        let dataset = DatasetMembership::from_matches(&index(), matches);
        assert_eq!(dataset.total_mapped(), 2);
        assert_eq!(dataset.count(&1u32.into()), 2);
        assert_eq!(dataset.count(&2u32.into()), 1);
        assert_eq!(dataset.count(&3u32.into()), 0);
    }

    #[test]
    fn skips_ineligible_and_unmapped() {
        let matches = vec![
            ProteinMatch::new("P1"),
            ProteinMatch::new("P2").validated(true).hidden(true),
            ProteinMatch::new("P3").validated(true).decoy(true),
            ProteinMatch::new("P9").validated(true),
        ];
        let dataset = DatasetMembership::from_matches(&index(), matches);
        assert!(dataset.is_empty());
        assert_eq!(dataset.count(&1u32.into()), 0);
    }

    #[test]
    fn canceled() {
        let progress = Progress::new();
        progress.cancel();
        let matches = vec![ProteinMatch::new("P1").validated(true)];
        assert!(DatasetMembership::collect(&index(), matches, &progress).is_none());
    }

    #[test]
    fn progress_counts_every_match() {
        let progress = Progress::new();
        let matches = vec![
            ProteinMatch::new("P1").validated(true),
            ProteinMatch::new("P2"),
            ProteinMatch::new("P1").validated(true),
        ];
        let dataset = DatasetMembership::collect(&index(), matches, &progress).unwrap();
        assert_eq!(progress.processed(), 3);
        assert_eq!(dataset.total_mapped(), 1);
    }

    #[test]
    fn precomputed_counts() {
        let mut counts = HashMap::new();
        counts.insert(GoTermId::from(7u32), 3);
        let dataset = DatasetMembership::from_counts(counts, 5);
        assert_eq!(dataset.count(&7u32.into()), 3);
        assert_eq!(dataset.total_mapped(), 5);
    }
}
