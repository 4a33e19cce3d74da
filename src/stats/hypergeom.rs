//! The hypergeometric distribution and the p-value of a single GO term
//!
//! Drawing the GO-mapped proteins of a dataset from the GO-mapped proteins
//! of the background is modelled as sampling without replacement:
//!
//! - population: all GO-mapped background proteins
//! - successes: background proteins annotated with the term
//! - draws: all GO-mapped dataset proteins
//!
//! The observed value is the number of dataset proteins annotated with the term.
//!
//! Binomial coefficients are calculated in log space, so populations of
//! whole proteomes do not overflow.
use std::cmp;

use statrs::function::factorial::ln_binomial;

use crate::{GoeaError, GoeaResult};

/// How the p-value of a term is derived from the hypergeometric distribution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PValueKind {
    /// Probability of observing exactly the observed count, `P(X = k)`
    ///
    /// This is the default to stay comparable with established results,
    /// even though enrichment tests usually rely on the tail probability.
    #[default]
    PointProbability,
    /// Probability of observing the observed count or more, `P(X >= k)`
    UpperTail,
}

impl PValueKind {
    /// The p-value of `observed` successes in `hyper`
    pub fn pvalue(self, hyper: &Hypergeometric, observed: u64) -> f64 {
        match self {
            PValueKind::PointProbability => hyper.pmf(observed),
            // subtracting 1, because we want to test including observed
            // e.g. "7 or more", but sf by default calculates "more than 7"
            PValueKind::UpperTail => match observed.checked_sub(1) {
                Some(x) => hyper.sf(x),
                None => 1.0,
            },
        }
    }
}

/// The hypergeometric distribution
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Hypergeometric {
    population: u64,
    successes: u64,
    draws: u64,
}

impl Hypergeometric {
    /// Constructs a new hypergeometric distribution
    /// with a population (N) of `population`, number
    /// of successes (K) of `successes`, and number of draws
    /// (n) of `draws`
    ///
    /// # Errors
    ///
    /// [`GoeaError::InvalidInput`] if `successes > population` or `draws > population`
    pub fn new(population: u64, successes: u64, draws: u64) -> GoeaResult<Hypergeometric> {
        if successes > population || draws > population {
            Err(GoeaError::InvalidInput(format!(
                "invalid hypergeometric parameters: population {population}, successes {successes}, draws {draws}"
            )))
        } else {
            Ok(Hypergeometric {
                population,
                successes,
                draws,
            })
        }
    }

    /// Returns the minimum value in the domain of the
    /// hypergeometric distribution
    ///
    /// # Formula
    ///
    /// ```text
    /// max(0, n + K - N)
    /// ```
    ///
    /// where `N` is population, `K` is successes, and `n` is draws
    pub fn min(&self) -> u64 {
        (self.draws + self.successes).saturating_sub(self.population)
    }

    /// Returns the maximum value in the domain of the
    /// hypergeometric distribution
    ///
    /// # Formula
    ///
    /// ```text
    /// min(K, n)
    /// ```
    ///
    /// where `K` is successes and `n` is draws
    pub fn max(&self) -> u64 {
        cmp::min(self.successes, self.draws)
    }

    /// Calculates the probability mass function for the hypergeometric
    /// distribution at `x`
    ///
    /// # Formula
    ///
    /// ```text
    /// (K choose x) * (N-K choose n-x) / (N choose n)
    /// ```
    ///
    /// where `N` is population, `K` is successes and `n` is draws.
    /// Values outside of the support have a probability of exactly `0.0`.
    pub fn pmf(&self, x: u64) -> f64 {
        if x < self.min() || x > self.max() {
            return 0.0;
        }
        (ln_binomial(self.successes, x)
            + ln_binomial(self.population - self.successes, self.draws - x)
            - ln_binomial(self.population, self.draws))
        .exp()
        .min(1.0)
    }

    /// Calculates the survival function for the hypergeometric
    /// distribution at `x`, i.e. `P(X > x)`
    ///
    /// Calculated as a discrete integral over the probability mass
    /// function evaluated from (x+1)..max
    pub fn sf(&self, x: u64) -> f64 {
        if x < self.min() {
            1.0
        } else if x >= self.max() {
            0.0
        } else {
            ((x + 1)..=self.max())
                .fold(0.0, |acc, i| acc + self.pmf(i))
                .min(1.0)
        }
    }
}
