//! Linear value-to-coordinate mapping

use crate::errors::{ChartError, Result};

/// Affine map from `[domain_min, domain_max]` onto `[range_min, range_max]`.
///
/// Construction fails with [`ChartError::DegenerateRange`] when the domain has
/// zero or non-finite width, so a built scale never produces NaN or infinity
/// for finite input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    pub fn new(domain_min: f64, domain_max: f64, range_min: f64, range_max: f64) -> Result<Self> {
        let width = domain_max - domain_min;
        if width == 0.0 || !width.is_finite() {
            return Err(ChartError::DegenerateRange {
                min: domain_min,
                max: domain_max,
            });
        }

        Ok(Self {
            domain_min,
            domain_max,
            range_min,
            range_max,
        })
    }

    /// Map `x` into the output range. Values outside the domain extrapolate.
    #[inline]
    pub fn map(&self, x: f64) -> f64 {
        let t = (x - self.domain_min) / (self.domain_max - self.domain_min);
        // Interpolating from both ends keeps the endpoints exact.
        self.range_min * (1.0 - t) + self.range_max * t
    }
}

/// One-shot form of [`LinearScale::map`].
pub fn scale(
    x: f64,
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
) -> Result<f64> {
    LinearScale::new(domain_min, domain_max, range_min, range_max).map(|s| s.map(x))
}
