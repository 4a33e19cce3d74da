use std::fmt::Display;

/// The log2 fold change of a GO term between dataset and background
///
/// Percentages of `0.0` lead to infinite or undefined fold changes. Those are
/// kept as explicit variants, since they must not take part in scaling or
/// sorting as if they were numbers.
///
/// # Examples
///
/// ```
/// use goea::stats::FoldChange;
///
/// assert_eq!(FoldChange::from_percentages(20.0, 10.0), FoldChange::Finite(1.0));
/// assert_eq!(FoldChange::from_percentages(5.0, 0.0), FoldChange::PositiveInfinity);
/// assert_eq!(FoldChange::from_percentages(0.0, 5.0), FoldChange::NegativeInfinity);
/// assert_eq!(FoldChange::from_percentages(0.0, 0.0), FoldChange::Undefined);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FoldChange {
    /// A regular fold change
    Finite(f64),
    /// The term is present in the dataset but not in the background
    PositiveInfinity,
    /// The term is present in the background but not in the dataset
    NegativeInfinity,
    /// The term is neither present in dataset nor background
    Undefined,
}

impl FoldChange {
    /// Calculates `log2(dataset / background)`
    pub fn from_percentages(dataset: f64, background: f64) -> Self {
        Self::from(dataset / background).log2()
    }

    fn log2(self) -> Self {
        match self {
            FoldChange::Finite(ratio) => FoldChange::from(ratio.log2()),
            other => other,
        }
    }

    /// The fold change as `f64`, non-finite values included
    pub fn value(&self) -> f64 {
        match self {
            FoldChange::Finite(value) => *value,
            FoldChange::PositiveInfinity => f64::INFINITY,
            FoldChange::NegativeInfinity => f64::NEG_INFINITY,
            FoldChange::Undefined => f64::NAN,
        }
    }

    /// The fold change, if it is finite
    pub fn finite(&self) -> Option<f64> {
        match self {
            FoldChange::Finite(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns `true` if the fold change is a regular number
    pub fn is_finite(&self) -> bool {
        matches!(self, FoldChange::Finite(_))
    }

    /// The value to display in a plot, non-finite fold changes are drawn at `0.0`
    pub fn plot_value(&self) -> f64 {
        self.finite().unwrap_or(0.0)
    }
}

impl From<f64> for FoldChange {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            FoldChange::Undefined
        } else if value == f64::INFINITY {
            FoldChange::PositiveInfinity
        } else if value == f64::NEG_INFINITY {
            FoldChange::NegativeInfinity
        } else {
            FoldChange::Finite(value)
        }
    }
}

impl Display for FoldChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FoldChange::Finite(value) => write!(f, "{value:.2}"),
            FoldChange::PositiveInfinity => write!(f, "Inf"),
            FoldChange::NegativeInfinity => write!(f, "-Inf"),
            FoldChange::Undefined => write!(f, "NaN"),
        }
    }
}
