// ── Display scaling ──
// Gamma is magnified to delta's peak (or at least 1); payoff is compressed
// into the same envelope without changing its shape.

/// Fraction of peak |delta| treated as the visually negligible band around zero.
const ZERO_DELTA_BAND_FRACTION: f64 = 0.05;

/// max(|x|) over the curve, 0 for an empty curve. NaN samples are ignored.
#[inline]
pub fn abs_max(curve: &[f64]) -> f64 {
    curve.iter().fold(0.0, |m: f64, v| m.max(v.abs()))
}

/// Gamma magnification factor.
///
/// A positive `configured` value always wins. Otherwise
/// `max(peak |delta|, 1) / peak |gamma|`, or 1 for a flat gamma curve.
pub fn compute_gamma_scale(delta: &[f64], gamma: &[f64], configured: Option<f64>) -> f64 {
    if let Some(scale) = configured.filter(|&s| s > 0.0) {
        return scale;
    }

    let mg_max = abs_max(gamma);
    if mg_max > 0.0 {
        abs_max(delta).max(1.0) / mg_max
    } else {
        1.0
    }
}

/// Common visual envelope of the already-scaled greek curves, at least 1.
#[inline]
pub fn visual_max(scaled_delta: &[f64], scaled_gamma: &[f64]) -> f64 {
    abs_max(scaled_delta).max(abs_max(scaled_gamma)).max(1.0)
}

/// Rescales payoff so its peak magnitude equals `visual_max`.
/// An all-zero payoff is returned unchanged.
pub fn scale_payoff(payoff: &[f64], visual_max: f64) -> Vec<f64> {
    let payoff_abs_max = abs_max(payoff);
    if payoff_abs_max > 0.0 {
        let k = visual_max / payoff_abs_max;
        payoff.iter().map(|v| v * k).collect()
    } else {
        payoff.to_vec()
    }
}

/// Half-width of the band around zero delta.
#[inline]
pub fn zero_delta_band(delta: &[f64]) -> f64 {
    abs_max(delta) * ZERO_DELTA_BAND_FRACTION
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct GammaPeak {
    pub index: usize,
    pub price: f64,
    /// Signed raw gamma at the peak.
    pub value: f64,
}

impl GammaPeak {
    /// A flat gamma curve has no peak worth marking.
    #[inline]
    pub fn is_marked(&self) -> bool {
        self.value != 0.0
    }
}

/// Grid point of max |gamma|; the first one on ties. Non-finite samples are
/// skipped. `None` when no finite sample exists.
pub fn gamma_peak(grid: &[f64], gamma: &[f64]) -> Option<GammaPeak> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &g) in gamma.iter().enumerate().take(grid.len()) {
        if !g.is_finite() {
            continue;
        }
        match best {
            Some((_, b)) if g.abs() <= b.abs() => {}
            _ => best = Some((i, g)),
        }
    }
    best.map(|(index, value)| GammaPeak { index, price: grid[index], value })
}

/// Greek and payoff curves after display scaling, before view-type signs.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScaledCurves {
    pub gamma_scale: f64,
    pub visual_max: f64,
    pub delta: Vec<f64>,
    pub gamma: Vec<f64>,
    pub payoff: Vec<f64>,
}

impl ScaledCurves {
    pub fn compute(payoff: &[f64], delta: &[f64], gamma: &[f64], configured_scale: Option<f64>) -> Self {
        let gamma_scale = compute_gamma_scale(delta, gamma, configured_scale);
        let scaled_gamma: Vec<f64> = gamma.iter().map(|g| g * gamma_scale).collect();
        let visual_max = visual_max(delta, &scaled_gamma);
        let scaled_payoff = scale_payoff(payoff, visual_max);

        tracing::debug!(gamma_scale, visual_max, "plot scaling computed");

        Self {
            gamma_scale,
            visual_max,
            delta: delta.to_vec(),
            gamma: scaled_gamma,
            payoff: scaled_payoff,
        }
    }
}
