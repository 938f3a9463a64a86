use crate::core::types::{
    AVG_MAG_DECAY, AVG_MAG_FLOOR, AVG_MAG_GAIN, CONTEXT_THRESHOLDS, INITIAL_AVG_MAG,
    INITIAL_WEIGHTS, NUM_TAPS, PRED_SHIFT, TAP_STEPS, WEIGHT_LIMIT,
};

/// 8-tap adaptive predictor over reconstructed quantized deltas.
///
/// The output estimates the *negated* next delta: the coded residual is
/// `delta + predict()` and the delta comes back as `residual - predict()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predictor {
    /// reconstructed deltas, most recent first
    history: [i32; NUM_TAPS],
    weights: [i32; NUM_TAPS],
}

impl Predictor {
    pub fn new() -> Self {
        Predictor {
            history: [0; NUM_TAPS],
            weights: INITIAL_WEIGHTS,
        }
    }

    /// `(Σ history[k] * weight[k]) >> 12`
    pub fn predict(&self) -> i32 {
        let sum: i64 = self
            .history
            .iter()
            .zip(self.weights.iter())
            .map(|(&d, &w)| d as i64 * w as i64)
            .sum();
        (sum >> PRED_SHIFT).clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Sign-sign update against the reconstructed residual.
    ///
    /// A zero error counts as non-positive. Taps with zero history are left alone.
    pub fn adapt(&mut self, err: i32) {
        for k in 0..NUM_TAPS {
            let step = TAP_STEPS[k];
            let d = self.history[k];
            if d > 0 {
                self.weights[k] -= if err > 0 { step } else { -step };
            } else if d < 0 {
                self.weights[k] -= if err > 0 { -step } else { step };
            }
            self.weights[k] = self.weights[k].clamp(-WEIGHT_LIMIT, WEIGHT_LIMIT);
        }
    }

    /// Shift the history and push the newest reconstructed delta.
    pub fn push(&mut self, delta: i32) {
        self.history.copy_within(0..NUM_TAPS - 1, 1);
        self.history[0] = delta;
    }

    pub fn history(&self) -> &[i32; NUM_TAPS] {
        &self.history
    }

    pub fn weights(&self) -> &[i32; NUM_TAPS] {
        &self.weights
    }
}

impl Default for Predictor {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks recent residual activity and picks the model context.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityTracker {
    /// magnitude of the previous reconstructed residual
    prev_mag: i32,
    /// slow running average of residual magnitude
    avg_mag: f64,
}

impl ActivityTracker {
    pub fn new() -> Self {
        ActivityTracker {
            prev_mag: 0,
            avg_mag: INITIAL_AVG_MAG,
        }
    }

    /// Bucket `prev_mag` against `avg_mag` times 1, 3 and 5.
    pub fn context(&self) -> usize {
        CONTEXT_THRESHOLDS
            .iter()
            .take_while(|&&m| self.prev_mag >= (self.avg_mag * m) as i32)
            .count()
    }

    /// Fold in the magnitude of the newest reconstructed residual.
    pub fn observe(&mut self, residual: i32) {
        let magnitude = residual.saturating_abs();
        self.avg_mag = (self.avg_mag * AVG_MAG_DECAY + magnitude as f64 * AVG_MAG_GAIN)
            .max(AVG_MAG_FLOOR);
        self.prev_mag = magnitude;
    }

    pub fn prev_mag(&self) -> i32 {
        self.prev_mag
    }

    pub fn avg_mag(&self) -> f64 {
        self.avg_mag
    }
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new()
    }
}
