//! Progress bar animation for the wizard header

use std::time::{Duration, Instant};

/// Eased transition of the progress bar between step percentages
#[derive(Debug, Clone)]
pub struct ProgressAnimation {
    from: f32,
    to: f32,
    started: Instant,
}

impl ProgressAnimation {
    /// Length of one transition
    pub const DURATION: Duration = Duration::from_millis(500);

    /// Start settled at `percent`
    pub fn new(percent: u16) -> Self {
        let value = percent as f32;
        Self {
            from: value,
            to: value,
            started: Instant::now(),
        }
    }

    /// Begin animating from the currently displayed value toward `percent`
    pub fn retarget(&mut self, percent: u16) {
        self.retarget_at(percent, Instant::now());
    }

    fn retarget_at(&mut self, percent: u16, now: Instant) {
        let target = percent as f32;
        if (target - self.to).abs() < f32::EPSILON {
            return;
        }
        self.from = self.value_after(now.saturating_duration_since(self.started));
        self.to = target;
        self.started = now;
    }

    /// Value `elapsed` after the current transition began
    pub fn value_after(&self, elapsed: Duration) -> f32 {
        if elapsed >= Self::DURATION {
            return self.to;
        }
        let progress = elapsed.as_secs_f32() / Self::DURATION.as_secs_f32();
        let eased = simple_easing::cubic_out(progress);
        self.from + (self.to - self.from) * eased
    }

    /// Value to draw right now, as a 0.0..=1.0 ratio
    pub fn ratio(&self) -> f64 {
        (self.value_after(self.started.elapsed()) / 100.0).clamp(0.0, 1.0) as f64
    }

    pub fn is_settled(&self) -> bool {
        self.started.elapsed() >= Self::DURATION
    }
}
