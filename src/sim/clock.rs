//! Frame stepper
//!
//! Turns absolute frame timestamps (milliseconds, as a display refresh
//! callback reports them) into a clamped delta in seconds.

use serde::{Deserialize, Serialize};

/// Clamps a raw delta (seconds) into `[0, max_dt]`
#[inline]
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.max(0.0).min(max_dt)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stepper {
    max_dt: f32,
    last_ms: Option<f64>,
}

impl Stepper {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt,
            last_ms: None,
        }
    }

    /// Forget the previous timestamp; the next step yields `dt = 0`
    pub fn arm(&mut self) {
        self.last_ms = None;
    }

    /// Seed the previous timestamp explicitly
    pub fn arm_at(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Record `now_ms` and return the clamped delta since the last call
    pub fn step(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        clamp_dt(dt, self.max_dt)
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_DT;

    #[test]
    fn test_first_step_is_zero() {
        let mut s = Stepper::new(MAX_DT);
        assert_eq!(s.step(1234.0), 0.0);
        assert_eq!(s.last_timestamp(), Some(1234.0));
    }

    #[test]
    fn test_normal_frame() {
        let mut s = Stepper::new(MAX_DT);
        s.arm_at(1000.0);
        assert!((s.step(1016.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_long_pause_is_clamped() {
        let mut s = Stepper::new(MAX_DT);
        s.arm_at(1000.0);
        assert_eq!(s.step(1500.0), MAX_DT);
        // Clamping does not lose the timestamp
        assert!((s.step(1516.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut s = Stepper::new(MAX_DT);
        s.arm_at(1000.0);
        assert_eq!(s.step(900.0), 0.0);
    }

    #[test]
    fn test_rearm() {
        let mut s = Stepper::new(MAX_DT);
        s.arm_at(0.0);
        s.arm();
        assert_eq!(s.step(10_000.0), 0.0);
    }

    #[test]
    fn test_clamp_dt_nan() {
        assert_eq!(clamp_dt(f32::NAN, MAX_DT), 0.0);
    }
}
