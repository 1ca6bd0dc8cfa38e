//! Tank level generators
//!
//! Shapes are built segment by segment at a fixed cadence:
//! hold a level, ramp linearly to another, add noise or glitches on top.
//! Noise comes from a fixed-seed LCG so every run sees the same series.

use outflow_core::{Reading, Timestamp};

use super::SAMPLE_INTERVAL_MS;

/// Builder for synthetic level series
pub struct LevelGenerator {
    values: Vec<f64>,
    start_time: Timestamp,
    interval_ms: u64,
    seed: u32,
}

impl LevelGenerator {
    /// Start at `level` with the transmitter's cadence
    pub fn new(level: f64) -> Self {
        Self {
            values: vec![level],
            start_time: 0,
            interval_ms: SAMPLE_INTERVAL_MS,
            seed: 0x12345678,
        }
    }

    /// Override the sample interval
    pub fn interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Override the first timestamp
    pub fn starting_at(mut self, start_time: Timestamp) -> Self {
        self.start_time = start_time;
        self
    }

    fn last(&self) -> f64 {
        *self.values.last().unwrap_or(&0.0)
    }

    /// Repeat the current level for `samples` more samples
    pub fn hold(mut self, samples: usize) -> Self {
        let level = self.last();
        self.values.extend(std::iter::repeat(level).take(samples));
        self
    }

    /// Move linearly to `target`, reaching it on the last of `samples`
    pub fn ramp_to(mut self, target: f64, samples: usize) -> Self {
        let from = self.last();
        self.values
            .extend((1..=samples).map(|k| from + (target - from) * k as f64 / samples as f64));
        self
    }

    /// Add `delta` to the sample at `index`
    pub fn spike(mut self, index: usize, delta: f64) -> Self {
        if let Some(v) = self.values.get_mut(index) {
            *v += delta;
        }
        self
    }

    /// Add uniform noise in `[-amplitude, amplitude)` to every sample
    pub fn noise(mut self, amplitude: f64) -> Self {
        for i in 0..self.values.len() {
            let u = self.next_uniform();
            self.values[i] += amplitude * (2.0 * u - 1.0);
        }
        self
    }

    /// Add an alternating `-amplitude, +amplitude` pattern
    pub fn chatter(mut self, amplitude: f64) -> Self {
        for (i, v) in self.values.iter_mut().enumerate() {
            *v += if i % 2 == 0 { -amplitude } else { amplitude };
        }
        self
    }

    /// Number of samples generated so far
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Finish into timestamped readings
    pub fn build(self) -> Vec<Reading> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| Reading::new(self.start_time + i as u64 * self.interval_ms, v))
            .collect()
    }

    fn next_uniform(&mut self) -> f64 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.seed >> 8) as f64 / 16777216.0
    }
}

/// Hold `high` for 60 samples, drain to `low` over 60, hold `low` for 180
pub fn single_drain(high: f64, low: f64) -> Vec<Reading> {
    LevelGenerator::new(high).hold(59).ramp_to(low, 60).hold(180).build()
}
