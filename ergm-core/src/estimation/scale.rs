//! Per-component scale tracking for Algorithm S.
//!
//! Algorithm S determines `D_k`, a per-statistic scale later consumed by
//! Algorithm EE's Borisenko update, as a running exponential moving average
//! of the observed `|dzA_k|` magnitude across outer steps.

/// Exponentially smoothed per-component magnitude of `dzA`.
#[derive(Clone, Debug)]
pub struct ScaleTracker {
    ema: Vec<f64>,
    decay: f64,
}

impl ScaleTracker {
    /// Builds a tracker for `num_stats` components with smoothing `decay`
    /// in `[0, 1)`; `ema` starts at zero.
    #[must_use]
    pub fn new(num_stats: usize, decay: f64) -> Self {
        Self {
            ema: vec![0.0; num_stats],
            decay,
        }
    }

    /// Folds one outer step's `dzA` into the running average.
    pub fn observe(&mut self, dz_a: &[f64]) {
        for (slot, value) in self.ema.iter_mut().zip(dz_a) {
            *slot = self.decay * *slot + (1.0 - self.decay) * value.abs();
        }
    }

    /// Current per-component scale estimates, `D_k`.
    #[must_use]
    pub fn scales(&self) -> &[f64] {
        &self.ema
    }
}
