use crate::evaluation::estimators::Estimator;

/// Running mean. `NaN` observations are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicEstimator {
    count: u64,
    sum: f64,
}

impl Estimator for BasicEstimator {
    #[inline]
    fn add(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.count += 1;
        self.sum += v;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        if self.count > 0 {
            self.sum / self.count as f64
        } else {
            f64::NAN
        }
    }

    fn observations(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_ignores_nan() {
        let mut e = BasicEstimator::default();
        assert!(e.estimation().is_nan());
        e.add(1.0);
        e.add(f64::NAN);
        e.add(0.0);
        assert_eq!(e.observations(), 2);
        assert!((e.estimation() - 0.5).abs() < 1e-12);
    }
}
