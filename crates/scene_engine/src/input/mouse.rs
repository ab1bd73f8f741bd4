//! Cursor delta tracking
//!
//! The window reports absolute cursor positions; mouse-look needs offsets.
//! The tracker keeps the running last position and seeds it with the first
//! sample it sees, so the first event after startup (or after a reset)
//! produces no camera jump.

/// Converts absolute cursor positions into look offsets
#[derive(Debug, Clone, Default)]
pub struct MouseTracker {
    last: Option<(f64, f64)>,
}

impl MouseTracker {
    /// Create a tracker with no seed position
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed an absolute cursor position, returning `(x_offset, y_offset)`
    ///
    /// The y offset is reversed because window y grows downward while
    /// positive pitch looks up.
    pub fn offset(&mut self, x: f64, y: f64) -> (f32, f32) {
        let (last_x, last_y) = self.last.unwrap_or((x, y));
        self.last = Some((x, y));
        ((x - last_x) as f32, (last_y - y) as f32)
    }

    /// Drop the seed so the next sample is treated as the first one
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// True once a sample has been observed since the last reset
    pub fn is_seeded(&self) -> bool {
        self.last.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_is_zero_offset() {
        for &(x, y) in &[(0.0, 0.0), (400.0, 300.0), (-12.5, 9000.0)] {
            let mut tracker = MouseTracker::new();
            assert_eq!(tracker.offset(x, y), (0.0, 0.0));
            assert!(tracker.is_seeded());
        }
    }

    #[test]
    fn test_offsets_follow_last_position() {
        let mut tracker = MouseTracker::new();
        tracker.offset(100.0, 100.0);
        assert_eq!(tracker.offset(110.0, 95.0), (10.0, 5.0));
        assert_eq!(tracker.offset(105.0, 105.0), (-5.0, -10.0));
    }

    #[test]
    fn test_reset_reseeds() {
        let mut tracker = MouseTracker::new();
        tracker.offset(0.0, 0.0);
        tracker.reset();
        assert!(!tracker.is_seeded());
        assert_eq!(tracker.offset(500.0, 500.0), (0.0, 0.0));
    }
}
