//! Multiple testing correction of the p-values of all scored GO terms
//!
//! # Examples
//!
//! ```
//! use goea::stats::Correction;
//!
//! let scores = [("a", 0.01), ("b", 0.04), ("c", 0.03), ("d", 0.5)];
//! let corrected = Correction::BenjaminiHochberg.apply(&scores);
//!
//! // the largest p-value is never adjusted
//! assert_eq!(corrected[3], 0.5);
//! assert!((corrected[0] - 0.04).abs() < 1e-12);
//! ```

use std::cmp::Ordering;

/// The multiple testing correction applied to the raw p-values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Correction {
    /// No correction, corrected p-values equal the raw p-values
    None,
    /// Benjamini-Hochberg step-up adjustment, without enforcing monotonicity
    ///
    /// Sorted by descending p-value, the value at position `i` (starting at 0)
    /// becomes `p * n / (n - i)`, capped at `1.0`. Adjusted values are not
    /// forced to be monotonic in the raw p-values, so a term can end up with
    /// a larger corrected value than a term with a larger raw p-value.
    #[default]
    BenjaminiHochberg,
    /// Benjamini-Hochberg adjustment with a running minimum from the largest
    /// p-value downwards (textbook FDR q-values)
    BenjaminiHochbergMonotone,
}

impl Correction {
    /// Corrects all p-values of `scores`
    ///
    /// `scores` holds `(key, p-value)` pairs. Ties in p-value are ordered by
    /// ascending key, so the result does not depend on the input order.
    /// The returned values are in the same order as `scores`.
    pub fn apply<K: Ord>(self, scores: &[(K, f64)]) -> Vec<f64> {
        match self {
            Correction::None => scores.iter().map(|(_, p)| *p).collect(),
            Correction::BenjaminiHochberg => benjamini_hochberg(scores, false),
            Correction::BenjaminiHochbergMonotone => benjamini_hochberg(scores, true),
        }
    }
}

fn benjamini_hochberg<K: Ord>(scores: &[(K, f64)], monotone: bool) -> Vec<f64> {
    let n = scores.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| descending(&scores[a], &scores[b]));

    let mut corrected = vec![0.0; n];
    let mut running_min = 1.0f64;
    for (rank_from_top, &idx) in order.iter().enumerate() {
        let pvalue = scores[idx].1;
        // rank_from_top is always smaller than n
        let factor = crate::f64_from_usize(n) / crate::f64_from_usize(n - rank_from_top);
        let mut adjusted = (pvalue * factor).min(1.0);
        if monotone {
            running_min = running_min.min(adjusted);
            adjusted = running_min;
        }
        corrected[idx] = adjusted;
    }
    corrected
}

/// Descending by p-value, ascending by key for ties
fn descending<K: Ord>(a: &(K, f64), b: &(K, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{a} != {b}");
    }

    #[test]
    fn step_up_without_monotonicity() {
        let scores = [(1, 0.01), (2, 0.04), (3, 0.03), (4, 0.5)];
        let corrected = Correction::BenjaminiHochberg.apply(&scores);
        assert_close(corrected[3], 0.5);
        assert_close(corrected[1], 0.04 * 4.0 / 3.0);
        assert_close(corrected[2], 0.06);
        assert_close(corrected[0], 0.04);

        // 0.03 < 0.04 raw, but corrected the order flips
        assert!(corrected[2] > corrected[1]);
    }

    #[test]
    fn step_up_monotone() {
        let scores = [(1, 0.01), (2, 0.04), (3, 0.03), (4, 0.5)];
        let corrected = Correction::BenjaminiHochbergMonotone.apply(&scores);
        assert_close(corrected[3], 0.5);
        assert_close(corrected[1], 0.04 * 4.0 / 3.0);
        assert_close(corrected[2], 0.04 * 4.0 / 3.0);
        assert_close(corrected[0], 0.04);
    }

    #[test]
    fn corrected_never_below_raw_and_capped() {
        let scores: Vec<(usize, f64)> = (0..50)
            .map(|i| (i, (i as f64 * 0.37).sin().abs()))
            .collect();
        let corrected = Correction::BenjaminiHochberg.apply(&scores);
        for ((_, raw), adjusted) in scores.iter().zip(&corrected) {
            assert!(adjusted >= raw);
            assert!(*adjusted <= 1.0);
        }
    }

    #[test]
    fn largest_pvalue_unchanged() {
        let scores = [("x", 0.2), ("y", 0.7), ("z", 0.001)];
        let corrected = Correction::BenjaminiHochberg.apply(&scores);
        assert!((corrected[1] - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn ties_ordered_by_key() {
        let forward = [("GO:1", 0.02), ("GO:2", 0.02), ("GO:3", 0.5)];
        let backward = [("GO:3", 0.5), ("GO:2", 0.02), ("GO:1", 0.02)];

        let a = Correction::BenjaminiHochberg.apply(&forward);
        let b = Correction::BenjaminiHochberg.apply(&backward);

        // GO:1 sorts before GO:2, so it is closer to the top of the descending order
        assert_close(a[0], 0.03);
        assert_close(a[1], 0.06);
        assert_close(b[2], a[0]);
        assert_close(b[1], a[1]);
        assert_close(b[0], a[2]);
    }

    #[test]
    fn no_correction() {
        let scores = [(1, 0.01), (2, 0.04)];
        assert_eq!(Correction::None.apply(&scores), vec![0.01, 0.04]);
    }

    #[test]
    fn empty_input() {
        let scores: [(u32, f64); 0] = [];
        assert!(Correction::BenjaminiHochberg.apply(&scores).is_empty());
    }
}
