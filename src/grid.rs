use crate::errors::{RiskError, RiskResult};

/// Strictly increasing underlying-price samples `from, from + step, ...`
/// stopping before `to`. Sample count is `ceil((to - from) / step)`.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PriceGrid {
    from: f64,
    to: f64,
    step: f64,
    points: Vec<f64>,
}

impl PriceGrid {
    pub fn new(from: f64, to: f64, step: f64) -> RiskResult<Self> {
        if !(from.is_finite() && to.is_finite() && step.is_finite()) {
            return Err(RiskError::InvalidGrid(format!(
                "non-finite bounds: from={from} to={to} step={step}"
            )));
        }
        if step <= 0.0 {
            return Err(RiskError::InvalidGrid(format!("step must be > 0, got {step}")));
        }
        if from >= to {
            return Err(RiskError::InvalidGrid(format!(
                "from ({from}) must be below to ({to})"
            )));
        }

        let n = ((to - from) / step).ceil() as usize;
        let points: Vec<f64> = (0..n).map(|i| from + i as f64 * step).collect();

        if let Some(w) = points.windows(2).find(|w| w[0] >= w[1]) {
            return Err(RiskError::InvalidGrid(format!(
                "step {step} is below float resolution near {}",
                w[0]
            )));
        }

        Ok(Self { from, to, step, points })
    }

    #[inline]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn from_price(&self) -> f64 {
        self.from
    }

    pub fn to_price(&self) -> f64 {
        self.to
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Zero-filled curve aligned to this grid.
    pub fn zeros(&self) -> Vec<f64> {
        vec![0.0; self.points.len()]
    }
}
