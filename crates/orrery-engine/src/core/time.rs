/// Fixed timestep accumulator.
/// Ensures exhibit logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Simulation clock feeding the orbit kinematics.
///
/// Orbital positions are a pure function of elapsed time, so pausing
/// is modelled by freezing this clock, never by flagging bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    elapsed: f64,
    paused: bool,
    time_scale: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            paused: false,
            time_scale: 1.0,
        }
    }

    /// Advance by one real-time step. Returns the simulated delta actually applied.
    pub fn advance(&mut self, dt: f32) -> f64 {
        if self.paused {
            return 0.0;
        }
        let step = dt as f64 * self.time_scale;
        self.elapsed += step;
        step
    }

    /// Simulated seconds since start.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Negative or non-finite scales are ignored.
    pub fn set_time_scale(&mut self, scale: f64) {
        if scale.is_finite() && scale >= 0.0 {
            self.time_scale = scale;
        }
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0 / 60.0);
        assert_eq!(steps, 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(0.008); // half a frame
        assert_eq!(steps, 0);
        let steps = ts.accumulate(0.010); // over one frame total
        assert_eq!(steps, 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0);
        assert_eq!(steps, 10);
    }

    #[test]
    fn negative_frame_time_is_ignored() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(-5.0), 0);
        assert!(ts.alpha() >= 0.0);
    }

    #[test]
    fn paused_clock_does_not_advance() {
        let mut clock = SimClock::new();
        clock.advance(0.5);
        clock.set_paused(true);
        assert_eq!(clock.advance(0.5), 0.0);
        assert!((clock.elapsed() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn time_scale_multiplies_steps() {
        let mut clock = SimClock::new();
        clock.set_time_scale(4.0);
        clock.advance(0.25);
        assert!((clock.elapsed() - 1.0).abs() < 1e-9);

        clock.set_time_scale(-1.0);
        assert_eq!(clock.time_scale(), 4.0);
    }
}
