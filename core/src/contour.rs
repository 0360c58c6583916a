//! Contour levels to slice a scalar field at.
use serde::{Deserialize, Serialize};

/// Most levels a single linear sequence may hold.
const MAX_LINEAR_LEVELS: f64 = 1e6;

/// Positive levels ascending, negative levels as produced by the generator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContourLevelSet {
    pub positive: Vec<f64>,
    pub negative: Vec<f64>,
}

impl ContourLevelSet {
    /// Equidistant levels: `step, 2 step, ..` up to `pos_lim` and
    /// `neg_lim, neg_lim + step, ..` up to `-step`, most negative first.
    ///
    /// Both limits are inclusive up to a tenth of a step. A step that isn't
    /// strictly positive, or limits that would need more than a million levels,
    /// give no levels at all.
    pub fn linear(step: f64, pos_lim: f64, neg_lim: f64) -> Self {
        if !(step > 0.0 && step.is_finite()) {
            log::debug!("no linear contours for step {step}");
            return Self::default();
        }

        Self {
            positive: arange(step, pos_lim + 0.1 * step, step),
            negative: arange(neg_lim, -step + 0.1 * step, step),
        }
    }

    /// Levels `base * 10^exponent` for every pair of base and exponent. Positive
    /// levels ascend, negative levels descend starting closest to zero.
    pub fn logarithmic(bases: &[f64], exponents: &[f64]) -> Self {
        let mut positive = bases
            .iter()
            .flat_map(|base| exponents.iter().map(move |exponent| base * 10f64.powf(*exponent)))
            .collect::<Vec<_>>();
        positive.sort_by(f64::total_cmp);

        let mut negative = positive.iter().map(|level| -level).collect::<Vec<_>>();
        negative.sort_by(|a, b| b.total_cmp(a));

        Self { positive, negative }
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}

/// Values `start + i * step` below `stop`.
fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let count = ((stop - start) / step).ceil();
    if !(count > 0.0) {
        return Vec::new();
    }
    if count > MAX_LINEAR_LEVELS {
        log::warn!("skipping contours from {start} to {stop} in steps of {step}, too many levels");
        return Vec::new();
    }

    (0..count as usize).map(|i| start + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::ContourLevelSet;

    #[test]
    fn linear_levels_reach_their_limits() {
        let levels = ContourLevelSet::linear(0.05, 2.0, -2.0);

        assert_eq!(levels.positive.len(), 40);
        assert_abs_diff_eq!(levels.positive[0], 0.05);
        assert_abs_diff_eq!(*levels.positive.last().unwrap(), 2.0, epsilon = 0.005);

        assert_eq!(levels.negative.len(), 40);
        assert_abs_diff_eq!(levels.negative[0], -2.0);
        assert_abs_diff_eq!(*levels.negative.last().unwrap(), -0.05, epsilon = 0.005);
        assert!(levels.negative.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn linear_limit_off_the_step_grid() {
        let levels = ContourLevelSet::linear(0.3, 1.0, -0.5);

        assert_eq!(levels.positive.len(), 3);
        assert_abs_diff_eq!(levels.positive[2], 0.9, epsilon = 1e-12);
        assert_eq!(levels.negative, vec![-0.5]);
    }

    #[test]
    fn non_positive_step_gives_no_levels() {
        assert!(ContourLevelSet::linear(0.0, 2.0, -2.0).is_empty());
        assert!(ContourLevelSet::linear(-0.1, 2.0, -2.0).is_empty());
        assert!(ContourLevelSet::linear(f64::NAN, 2.0, -2.0).is_empty());
    }

    #[test]
    fn unbounded_limits_give_no_levels() {
        let levels = ContourLevelSet::linear(0.05, 1e300, -2.0);
        assert!(levels.positive.is_empty());
        assert_eq!(levels.negative.len(), 40);

        assert!(ContourLevelSet::linear(0.05, 2.0, f64::NEG_INFINITY).negative.is_empty());
        assert!(ContourLevelSet::linear(0.05, f64::INFINITY, -2.0).positive.is_empty());
        assert!(ContourLevelSet::linear(1e-300, 2.0, -2.0).is_empty());
    }

    #[test]
    fn limits_inside_the_first_step() {
        let levels = ContourLevelSet::linear(0.5, 0.1, -0.1);

        assert!(levels.positive.is_empty());
        assert!(levels.negative.is_empty());
    }

    #[test]
    fn logarithmic_levels_are_mirrored() {
        let levels = ContourLevelSet::logarithmic(&[1.0, 2.0], &[0.0, 1.0]);

        assert_eq!(levels.positive, vec![1.0, 2.0, 10.0, 20.0]);
        assert_eq!(levels.negative, vec![-1.0, -2.0, -10.0, -20.0]);

        let mirrored = levels.positive.iter().map(|v| -v).collect::<Vec<_>>();
        assert_eq!(levels.negative, mirrored);
    }

    #[test]
    fn logarithmic_negative_exponents() {
        let levels = ContourLevelSet::logarithmic(&[1.0, 2.0, 4.0, 8.0], &[-2.0, -1.0, 0.0]);

        assert_eq!(levels.positive.len(), 12);
        assert_abs_diff_eq!(levels.positive[0], 0.01, epsilon = 1e-12);
        assert_abs_diff_eq!(levels.positive[11], 8.0, epsilon = 1e-12);
        assert!(levels.positive.windows(2).all(|w| w[0] <= w[1]));
        assert!(levels.negative.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn no_bases_or_exponents_gives_no_levels() {
        assert!(ContourLevelSet::logarithmic(&[], &[0.0, 1.0]).is_empty());
        assert!(ContourLevelSet::logarithmic(&[1.0], &[]).is_empty());
    }
}
