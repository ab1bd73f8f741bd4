//! Time management utilities

/// Frame timer driven by an external monotonic clock
///
/// The window system owns the clock (GLFW's `glfwGetTime`), so the timer
/// is fed absolute timestamps in seconds rather than sampling `Instant`
/// itself. This keeps frame timing deterministic under test.
#[derive(Debug, Clone)]
pub struct Timer {
    last_frame: Option<f64>,
    delta_time: f32,
    total_time: f64,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: None,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance the timer to `now` (seconds since clock start)
    ///
    /// Should be called exactly once per frame. The first tick measures
    /// from clock start, matching a `lastFrame = 0` initialisation.
    /// A clock that goes backwards yields a zero delta.
    pub fn tick(&mut self, now: f64) -> f32 {
        let last = self.last_frame.unwrap_or(0.0);
        self.delta_time = (now - last).max(0.0) as f32;
        self.total_time = now;
        self.last_frame = Some(now);
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the clock reading of the latest tick
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (based on last frame time)
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tick_computes_delta() {
        let mut timer = Timer::new();
        assert_relative_eq!(timer.tick(0.5), 0.5);
        assert_relative_eq!(timer.tick(0.75), 0.25);
        assert_eq!(timer.frame_count(), 2);
        assert_relative_eq!(timer.total_time(), 0.75);
        assert_relative_eq!(timer.current_fps(), 4.0);
    }

    #[test]
    fn test_backwards_clock_gives_zero_delta() {
        let mut timer = Timer::new();
        timer.tick(2.0);
        assert_relative_eq!(timer.tick(1.0), 0.0);
        assert_relative_eq!(timer.current_fps(), 0.0);
    }
}
