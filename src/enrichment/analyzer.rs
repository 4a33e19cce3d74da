use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::annotations::{Background, ProteinMatch};
use crate::enrichment::record::TermScore;
use crate::enrichment::{
    DatasetMembership, EmptyReason, EnrichmentResult, Outcome, SignificanceLevel,
};
use crate::stats::{Correction, FoldChange, Hypergeometric, PValueKind};
use crate::{f64_from_u64, DomainResolver, GoTermId, GoeaError, GoeaResult, Progress};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Calculates the enrichment of GO terms in a dataset compared to a [`Background`]
///
/// The analyzer is configured once with [`EnrichmentAnalyzer::builder`] and
/// can then analyze any number of datasets. Each analysis is synchronous and
/// independent, so one analyzer can be shared between threads.
///
/// ```mermaid
/// flowchart LR
///     M[Protein matches] -->|eligible, GO-mapped| D[DatasetMembership]
///     B[Background] --> S
///     D --> S[Score each term]
///     R[DomainResolver] -.->|missing domains| S
///     S -->|all terms scored| C[Multiple testing correction]
///     C --> E[EnrichmentResult]
/// ```
///
/// # Examples
///
/// ```
/// use goea::enrichment::{DatasetMembership, EmptyReason, Outcome};
/// use goea::{BackgroundBuilder, EnrichmentAnalyzer, GoTermId, Progress};
///
/// let mut builder = BackgroundBuilder::new();
/// builder.species("Homo sapiens");
/// builder.add_annotation("P1", GoTermId::from(16020u32));
///
/// let analyzer = EnrichmentAnalyzer::builder()
///     .background(builder.build().unwrap())
///     .build()
///     .unwrap();
///
/// // a dataset without GO-mapped proteins cannot be analyzed
/// let outcome = analyzer
///     .score(&DatasetMembership::default(), &Progress::new())
///     .unwrap();
/// assert_eq!(outcome, Outcome::Empty(EmptyReason::NoMappedProteins));
/// ```
#[derive(Debug)]
pub struct EnrichmentAnalyzer {
    background: Arc<Background>,
    terms: Vec<GoTermId>,
    significance_level: SignificanceLevel,
    pvalue_kind: PValueKind,
    correction: Correction,
    domains: Option<Arc<DomainResolver>>,
}

impl EnrichmentAnalyzer {
    /// Returns a builder to configure the analyzer
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::default()
    }

    /// The background of the analysis
    pub fn background(&self) -> &Background {
        &self.background
    }

    /// The tested GO terms, in the order of the records
    pub fn terms(&self) -> &[GoTermId] {
        &self.terms
    }

    /// Analyzes a dataset of protein matches
    ///
    /// Only validated, non-decoy, non-hidden matches are used, see
    /// [`DatasetMembership::collect`]. `progress` is reset at the start of
    /// each step and can be used to cancel the analysis.
    ///
    /// # Errors
    ///
    /// See [`EnrichmentAnalyzer::score`]
    pub fn analyze<I>(&self, matches: I, progress: &Progress) -> GoeaResult<Outcome>
    where
        I: IntoIterator<Item = ProteinMatch>,
    {
        progress.set_total(0);
        let Some(dataset) = DatasetMembership::collect(self.background.index(), matches, progress)
        else {
            return Ok(Outcome::Canceled { scored: 0 });
        };
        self.score(&dataset, progress)
    }

    /// Scores all GO terms for the given dataset membership
    ///
    /// Cancellation is checked before each term and once more after the
    /// last one. A canceled analysis never applies the multiple testing
    /// correction.
    ///
    /// # Errors
    ///
    /// [`GoeaError::InvalidInput`] if the dataset has more GO-mapped
    /// proteins than the background
    pub fn score(&self, dataset: &DatasetMembership, progress: &Progress) -> GoeaResult<Outcome> {
        let total_dataset = dataset.total_mapped();
        if total_dataset == 0 {
            info!("No GO-mapped proteins in the dataset");
            return Ok(Outcome::Empty(EmptyReason::NoMappedProteins));
        }
        let total_background = self.background.mapped_protein_count();

        progress.set_total(self.terms.len());
        let mut scores = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            if progress.is_canceled() {
                info!("Enrichment analysis canceled after {} terms", scores.len());
                return Ok(Outcome::Canceled {
                    scored: scores.len(),
                });
            }
            scores.push(self.score_term(*term, dataset, total_background, total_dataset)?);
            progress.increment();
        }
        if progress.is_canceled() {
            info!("Enrichment analysis canceled after the last term");
            return Ok(Outcome::Canceled {
                scored: scores.len(),
            });
        }

        if scores.is_empty() {
            info!("No GO terms to test");
            return Ok(Outcome::Empty(EmptyReason::NoTerms));
        }

        let pvalues: Vec<(GoTermId, f64)> = scores.iter().map(|s| (s.id, s.pvalue)).collect();
        let corrected = self.correction.apply(&pvalues);
        let records = scores
            .into_iter()
            .zip(corrected)
            .map(|(score, corrected)| score.into_record(corrected))
            .collect();

        let result = EnrichmentResult::new(
            records,
            total_background,
            total_dataset,
            self.significance_level,
        );
        info!(
            "{} of {} GO terms significant at {}",
            result.significant_count(),
            result.len(),
            self.significance_level
        );
        Ok(Outcome::Completed(result))
    }

    fn score_term(
        &self,
        term: GoTermId,
        dataset: &DatasetMembership,
        total_background: u64,
        total_dataset: u64,
    ) -> GoeaResult<TermScore> {
        let metadata = self.background.metadata();
        let background_frequency = self.background.index().frequency(&term);
        let dataset_frequency = dataset.count(&term);

        let percent_background =
            100.0 * f64_from_u64(background_frequency) / f64_from_u64(total_background);
        let percent_dataset =
            100.0 * f64_from_u64(dataset_frequency) / f64_from_u64(total_dataset);

        let hyper = Hypergeometric::new(
            // GO-mapped proteins in the background
            // ==> population
            total_background,
            // background proteins annotated with the term
            // ==> successes
            background_frequency,
            // GO-mapped proteins in the dataset
            // ==> draws
            total_dataset,
        )
        .map_err(|_| {
            GoeaError::InvalidInput(format!(
                "{total_dataset} GO-mapped dataset proteins exceed {total_background} background proteins"
            ))
        })?;
        let pvalue = self.pvalue_kind.pvalue(&hyper, dataset_frequency);
        debug!(
            "Term:{}\tPopulation: {}, Successes: {}, Draws: {}, Observed: {}",
            term, total_background, background_frequency, total_dataset, dataset_frequency
        );

        let domain = metadata.domain(&term).or_else(|| {
            self.domains
                .as_ref()
                .and_then(|resolver| resolver.resolve(term))
        });

        Ok(TermScore {
            id: term,
            name: metadata
                .name(&term)
                .map_or_else(|| term.to_string(), str::to_string),
            domain,
            background_frequency,
            dataset_frequency,
            percent_background,
            percent_dataset,
            fold_change: FoldChange::from_percentages(percent_dataset, percent_background),
            pvalue,
        })
    }
}

/// Builder for an [`EnrichmentAnalyzer`]
#[derive(Debug, Default)]
pub struct AnalyzerBuilder {
    background: Option<Arc<Background>>,
    term_names: Option<Vec<String>>,
    significance_level: SignificanceLevel,
    pvalue_kind: PValueKind,
    correction: Correction,
    domains: Option<Arc<DomainResolver>>,
}

impl AnalyzerBuilder {
    /// Sets the background of the analysis (required)
    #[must_use]
    pub fn background<B: Into<Arc<Background>>>(mut self, background: B) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Sets the significance level, defaults to 5 %
    #[must_use]
    pub fn significance_level(mut self, level: SignificanceLevel) -> Self {
        self.significance_level = level;
        self
    }

    /// Sets how p-values are derived, defaults to [`PValueKind::PointProbability`]
    #[must_use]
    pub fn pvalue_kind(mut self, kind: PValueKind) -> Self {
        self.pvalue_kind = kind;
        self
    }

    /// Sets the multiple testing correction, defaults to [`Correction::BenjaminiHochberg`]
    #[must_use]
    pub fn correction(mut self, correction: Correction) -> Self {
        self.correction = correction;
        self
    }

    /// Restricts the analysis to the given term names, in the given order
    ///
    /// By default all terms annotated to at least one background protein
    /// are tested, alphabetically by name. Named terms listed here are
    /// tested even without background proteins.
    #[must_use]
    pub fn term_names(mut self, names: Vec<String>) -> Self {
        self.term_names = Some(names);
        self
    }

    /// Resolves missing GO domains with `resolver`
    #[must_use]
    pub fn domains(mut self, resolver: Arc<DomainResolver>) -> Self {
        self.domains = Some(resolver);
        self
    }

    /// Finishes the [`EnrichmentAnalyzer`]
    ///
    /// # Errors
    ///
    /// [`GoeaError::ConfigurationRequired`] if no background was set
    pub fn build(self) -> GoeaResult<EnrichmentAnalyzer> {
        let background = self.background.ok_or(GoeaError::ConfigurationRequired)?;
        let metadata = background.metadata();
        let index = background.index();

        let terms = match self.term_names {
            Some(names) => {
                let mut seen = HashSet::with_capacity(names.len());
                names
                    .iter()
                    .filter_map(|name| {
                        let id = metadata.id_by_name(name);
                        if id.is_none() {
                            warn!("Unknown GO term name: {}", name);
                        }
                        id
                    })
                    .filter(|id| seen.insert(*id))
                    .collect()
            }
            None => metadata
                .iter()
                .map(|(_, id)| id)
                .filter(|id| index.frequency(id) > 0)
                .collect(),
        };

        Ok(EnrichmentAnalyzer {
            background,
            terms,
            significance_level: self.significance_level,
            pvalue_kind: self.pvalue_kind,
            correction: self.correction,
            domains: self.domains,
        })
    }
}
