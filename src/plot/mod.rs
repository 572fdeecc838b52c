pub mod scaling;
pub mod view;

pub use scaling::{
    compute_gamma_scale, gamma_peak, scale_payoff, visual_max, zero_delta_band, GammaPeak,
    ScaledCurves,
};
pub use view::{PlotSeries, ViewType};
