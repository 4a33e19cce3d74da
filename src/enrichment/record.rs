use crate::stats::FoldChange;
use crate::{GoDomain, GoTermId};

/// Whether a GO term is more or less frequent in the dataset than in the background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// The term is more frequent in the dataset
    Over,
    /// The term is less frequent in the dataset
    Under,
    /// Equal frequencies or an undefined fold change
    Neutral,
}

/// The enrichment statistics of a single GO term
///
/// Records are created once per analysis. Only the significance flag
/// (when the significance level changes) and the plot selection
/// can change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentRecord {
    id: GoTermId,
    name: String,
    domain: Option<GoDomain>,
    background_frequency: u64,
    dataset_frequency: u64,
    percent_background: f64,
    percent_dataset: f64,
    fold_change: FoldChange,
    pvalue: f64,
    corrected_pvalue: f64,
    significant: bool,
    selected_for_plot: bool,
}

/// The raw statistics of a term, before multiple testing correction
#[derive(Debug)]
pub(crate) struct TermScore {
    pub id: GoTermId,
    pub name: String,
    pub domain: Option<GoDomain>,
    pub background_frequency: u64,
    pub dataset_frequency: u64,
    pub percent_background: f64,
    pub percent_dataset: f64,
    pub fold_change: FoldChange,
    pub pvalue: f64,
}

impl TermScore {
    pub(crate) fn into_record(self, corrected_pvalue: f64) -> EnrichmentRecord {
        EnrichmentRecord {
            id: self.id,
            name: self.name,
            domain: self.domain,
            background_frequency: self.background_frequency,
            dataset_frequency: self.dataset_frequency,
            percent_background: self.percent_background,
            percent_dataset: self.percent_dataset,
            fold_change: self.fold_change,
            pvalue: self.pvalue,
            corrected_pvalue,
            significant: false,
            selected_for_plot: true,
        }
    }
}

impl EnrichmentRecord {
    /// The GO accession
    pub fn id(&self) -> GoTermId {
        self.id
    }

    /// The name of the GO term
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ontology domain, `None` if it could not be resolved
    pub fn domain(&self) -> Option<GoDomain> {
        self.domain
    }

    /// The number of background proteins annotated with the term
    pub fn background_frequency(&self) -> u64 {
        self.background_frequency
    }

    /// The number of dataset proteins annotated with the term
    pub fn dataset_frequency(&self) -> u64 {
        self.dataset_frequency
    }

    /// Percentage of GO-mapped background proteins annotated with the term
    pub fn percent_background(&self) -> f64 {
        self.percent_background
    }

    /// Percentage of GO-mapped dataset proteins annotated with the term
    pub fn percent_dataset(&self) -> f64 {
        self.percent_dataset
    }

    /// `log2(percent_dataset / percent_background)`
    pub fn fold_change(&self) -> FoldChange {
        self.fold_change
    }

    /// The p-value before multiple testing correction
    pub fn pvalue(&self) -> f64 {
        self.pvalue
    }

    /// The p-value after multiple testing correction
    pub fn corrected_pvalue(&self) -> f64 {
        self.corrected_pvalue
    }

    /// Returns `true` if the corrected p-value is below the significance level
    pub fn is_significant(&self) -> bool {
        self.significant
    }

    /// Returns `true` if the term should be shown in plots
    pub fn is_selected_for_plot(&self) -> bool {
        self.selected_for_plot
    }

    /// Shows or hides the term in plots, without affecting any statistic
    pub fn set_selected_for_plot(&mut self, selected: bool) {
        self.selected_for_plot = selected;
    }

    /// Over- or underrepresentation, based on the sign of the fold change
    pub fn representation(&self) -> Representation {
        match self.fold_change {
            FoldChange::PositiveInfinity => Representation::Over,
            FoldChange::NegativeInfinity => Representation::Under,
            FoldChange::Finite(value) if value > 0.0 => Representation::Over,
            FoldChange::Finite(value) if value < 0.0 => Representation::Under,
            _ => Representation::Neutral,
        }
    }

    pub(crate) fn update_significance(&mut self, level: f64) {
        self.significant = self.corrected_pvalue < level;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn record(fold_change: FoldChange, corrected_pvalue: f64) -> EnrichmentRecord {
        TermScore {
            id: 1u32.into(),
            name: "membrane".to_string(),
            domain: None,
            background_frequency: 10,
            dataset_frequency: 4,
            percent_background: 10.0,
            percent_dataset: 20.0,
            fold_change,
            pvalue: corrected_pvalue / 2.0,
        }
        .into_record(corrected_pvalue)
    }

    #[test]
    fn significance() {
        let mut rec = record(FoldChange::Finite(1.0), 0.03);
        assert!(!rec.is_significant());
        rec.update_significance(0.05);
        assert!(rec.is_significant());
        rec.update_significance(0.01);
        assert!(!rec.is_significant());
    }

    #[test]
    fn representations() {
        assert_eq!(
            record(FoldChange::Finite(1.0), 0.1).representation(),
            Representation::Over
        );
        assert_eq!(
            record(FoldChange::Finite(-0.5), 0.1).representation(),
            Representation::Under
        );
        assert_eq!(
            record(FoldChange::PositiveInfinity, 0.1).representation(),
            Representation::Over
        );
        assert_eq!(
            record(FoldChange::NegativeInfinity, 0.1).representation(),
            Representation::Under
        );
        assert_eq!(
            record(FoldChange::Finite(0.0), 0.1).representation(),
            Representation::Neutral
        );
        assert_eq!(
            record(FoldChange::Undefined, 0.1).representation(),
            Representation::Neutral
        );
    }

    #[test]
    fn plot_selection() {
        let mut rec = record(FoldChange::Finite(1.0), 0.1);
        assert!(rec.is_selected_for_plot());
        rec.set_selected_for_plot(false);
        assert!(!rec.is_selected_for_plot());
        assert!((rec.corrected_pvalue() - 0.1).abs() < f64::EPSILON);
    }
}
