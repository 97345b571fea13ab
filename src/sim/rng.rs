//! Injectable randomness for spawn pacing

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Source of uniform draws in `[0, 1)`
pub trait SpawnRng {
    fn next_unit(&mut self) -> f32;

    /// Uniform draw in `[min, max)`
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_unit() * (max - min)
    }
}

impl SpawnRng for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded PCG generator for a run
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Fixed cycling sequence of draws, for replay and tests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceRng {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRng {
    /// Values are clamped into `[0, 1)` and non-finite values become 0;
    /// an empty sequence always yields 0
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        let values = values
            .into_iter()
            .map(|v| {
                if v.is_finite() {
                    v.clamp(0.0, 1.0 - f32::EPSILON)
                } else {
                    0.0
                }
            })
            .collect();
        Self { values, cursor: 0 }
    }

    /// Always returns the same draw
    pub fn constant(value: f32) -> Self {
        Self::new([value])
    }
}

impl SpawnRng for SequenceRng {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        v
    }
}
