use crate::enrichment::{EnrichmentRecord, Representation, SignificanceLevel};
use crate::GoTermId;

/// The result of a completed enrichment analysis
///
/// Records are ordered like the terms of the analysis (alphabetically
/// by name, unless configured otherwise).
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentResult {
    records: Vec<EnrichmentRecord>,
    total_background_mapped: u64,
    total_dataset_mapped: u64,
    significance_level: SignificanceLevel,
}

/// Number of significantly over- and underrepresented terms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepresentationCounts {
    /// Significant terms that are more frequent in the dataset
    pub over: usize,
    /// Significant terms that are less frequent in the dataset
    pub under: usize,
}

/// A single term prepared for plotting
///
/// Non-finite fold changes are replaced by `0.0`, the p-values are the
/// unchanged statistics of the record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint<'a> {
    /// The GO accession
    pub id: GoTermId,
    /// The name of the term
    pub name: &'a str,
    /// The fold change, `0.0` if it is not finite
    pub log2_fold_change: f64,
    /// The raw p-value
    pub pvalue: f64,
    /// The corrected p-value
    pub corrected_pvalue: f64,
    /// Whether the term is significant
    pub significant: bool,
}

impl EnrichmentResult {
    pub(crate) fn new(
        mut records: Vec<EnrichmentRecord>,
        total_background_mapped: u64,
        total_dataset_mapped: u64,
        significance_level: SignificanceLevel,
    ) -> Self {
        for record in &mut records {
            record.update_significance(significance_level.value());
        }
        Self {
            records,
            total_background_mapped,
            total_dataset_mapped,
            significance_level,
        }
    }

    /// All records, in analysis order
    pub fn records(&self) -> &[EnrichmentRecord] {
        &self.records
    }

    /// Iterates all records, in analysis order
    pub fn iter(&self) -> std::slice::Iter<'_, EnrichmentRecord> {
        self.records.iter()
    }

    /// The record of `term`
    pub fn record(&self, term: &GoTermId) -> Option<&EnrichmentRecord> {
        self.records.iter().find(|record| record.id() == *term)
    }

    /// The record of `term`, e.g. to change its plot selection
    pub fn record_mut(&mut self, term: &GoTermId) -> Option<&mut EnrichmentRecord> {
        self.records.iter_mut().find(|record| record.id() == *term)
    }

    /// The number of scored terms
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no term was scored
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The number of GO-mapped background proteins
    pub fn total_background_mapped(&self) -> u64 {
        self.total_background_mapped
    }

    /// The number of GO-mapped dataset proteins
    pub fn total_dataset_mapped(&self) -> u64 {
        self.total_dataset_mapped
    }

    /// The significance level the flags are based on
    pub fn significance_level(&self) -> SignificanceLevel {
        self.significance_level
    }

    /// Changes the significance level and updates the significance of all records
    ///
    /// None of the p-values change.
    pub fn set_significance_level(&mut self, level: SignificanceLevel) {
        self.significance_level = level;
        for record in &mut self.records {
            record.update_significance(level.value());
        }
    }

    /// The number of significant terms
    pub fn significant_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.is_significant())
            .count()
    }

    /// The number of significantly over- and underrepresented terms
    pub fn representation_counts(&self) -> RepresentationCounts {
        self.records
            .iter()
            .filter(|record| record.is_significant())
            .fold(RepresentationCounts::default(), |mut counts, record| {
                match record.representation() {
                    Representation::Over => counts.over += 1,
                    Representation::Under => counts.under += 1,
                    Representation::Neutral => {}
                }
                counts
            })
    }

    /// The largest absolute, finite fold change
    ///
    /// Useful to scale plot axes symmetrically. Returns `None` if no
    /// record has a finite fold change.
    pub fn max_abs_log2_fold_change(&self) -> Option<f64> {
        self.records
            .iter()
            .filter_map(|record| record.fold_change().finite())
            .map(f64::abs)
            .reduce(f64::max)
    }

    /// All records selected for plotting
    pub fn plot_points(&self) -> impl Iterator<Item = PlotPoint<'_>> {
        self.records
            .iter()
            .filter(|record| record.is_selected_for_plot())
            .map(|record| PlotPoint {
                id: record.id(),
                name: record.name(),
                log2_fold_change: record.fold_change().plot_value(),
                pvalue: record.pvalue(),
                corrected_pvalue: record.corrected_pvalue(),
                significant: record.is_significant(),
            })
    }
}

impl<'a> IntoIterator for &'a EnrichmentResult {
    type Item = &'a EnrichmentRecord;
    type IntoIter = std::slice::Iter<'a, EnrichmentRecord>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::enrichment::record::TermScore;
    use crate::stats::FoldChange;

    fn record(id: u32, fold_change: FoldChange, corrected_pvalue: f64) -> EnrichmentRecord {
        TermScore {
            id: id.into(),
            name: format!("term {id}"),
            domain: None,
            background_frequency: 1,
            dataset_frequency: 1,
            percent_background: 1.0,
            percent_dataset: 1.0,
            fold_change,
            pvalue: corrected_pvalue,
        }
        .into_record(corrected_pvalue)
    }

    fn result() -> EnrichmentResult {
        EnrichmentResult::new(
            vec![
                record(1, FoldChange::Finite(1.5), 0.001),
                record(2, FoldChange::Finite(-3.0), 0.02),
                record(3, FoldChange::PositiveInfinity, 0.03),
                record(4, FoldChange::Finite(0.5), 0.5),
            ],
            100,
            20,
            SignificanceLevel::FIVE_PERCENT,
        )
    }

    #[test]
    fn significance_counts() {
        let mut result = result();
        assert_eq!(result.significant_count(), 3);
        assert_eq!(
            result.representation_counts(),
            RepresentationCounts { over: 2, under: 1 }
        );

        result.set_significance_level(SignificanceLevel::ONE_PERCENT);
        assert_eq!(result.significant_count(), 1);
        assert_eq!(
            result.representation_counts(),
            RepresentationCounts { over: 1, under: 0 }
        );
        assert_eq!(result.significance_level(), SignificanceLevel::ONE_PERCENT);
        assert!((result.record(&2u32.into()).unwrap().corrected_pvalue() - 0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn max_fold_change_ignores_infinite() {
        let result = result();
        assert_eq!(result.max_abs_log2_fold_change(), Some(3.0));

        let result = EnrichmentResult::new(
            vec![record(1, FoldChange::Undefined, 0.5)],
            10,
            2,
            SignificanceLevel::FIVE_PERCENT,
        );
        assert_eq!(result.max_abs_log2_fold_change(), None);
    }

    #[test]
    fn plot_points() {
        let mut result = result();
        result
            .record_mut(&4u32.into())
            .unwrap()
            .set_selected_for_plot(false);

        let points: Vec<PlotPoint> = result.plot_points().collect();
        assert_eq!(points.len(), 3);
        let infinite = points.iter().find(|p| p.id == GoTermId::from(3u32)).unwrap();
        assert!(infinite.log2_fold_change == 0.0);
        assert!((infinite.pvalue - 0.03).abs() < f64::EPSILON);
        assert_eq!(result.significant_count(), 3);
    }

    #[test]
    fn lookup_records() {
        let result = result();
        assert_eq!(result.len(), 4);
        assert!(!result.is_empty());
        assert!(result.record(&9u32.into()).is_none());
        assert_eq!(result.iter().count(), 4);
        assert_eq!((&result).into_iter().next().unwrap().name(), "term 1");
        assert_eq!(result.total_background_mapped(), 100);
        assert_eq!(result.total_dataset_mapped(), 20);
    }
}
