//! Cursor delta filtering
//!
//! Raw cursor samples arrive as absolute positions. The filter differences
//! consecutive samples and averages the last two deltas - a two-tap moving
//! average that smooths pointer jitter at the cost of one frame of latency.

use vantage_math::Vec2;

/// Two-tap moving-average filter over raw cursor positions
///
/// State is explicit and caller-owned; one filter per cursor.
#[derive(Clone, Copy, Debug, Default)]
pub struct CursorFilter {
    previous: Option<Vec2>,
    ring: [Vec2; 2],
    slot: usize,
}

impl CursorFilter {
    /// Create a filter with an empty delta history
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one absolute cursor sample, get the filtered per-frame delta
    ///
    /// The first call seeds the previous position, so the first two outputs
    /// are partially derived from zero deltas - an acceptable start-up
    /// transient.
    pub fn sample(&mut self, raw: Vec2) -> Vec2 {
        let previous = self.previous.unwrap_or(raw);

        self.ring[self.slot] = raw - previous;
        self.previous = Some(raw);
        self.slot = (self.slot + 1) % 2;

        (self.ring[0] + self.ring[1]) * 0.5
    }

    /// Reset the previous position without emitting a delta
    ///
    /// Used when the cursor is re-captured: the jump from the release
    /// position to the capture position must not read as look input.
    pub fn reseed(&mut self, raw: Vec2) {
        self.previous = Some(raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_is_zero() {
        let mut filter = CursorFilter::new();
        assert_eq!(filter.sample(Vec2::new(100.0, 50.0)), Vec2::ZERO);
    }

    #[test]
    fn test_constant_delta_converges_exactly() {
        let mut filter = CursorFilter::new();
        let d = Vec2::new(3.0, -2.0);

        let mut pos = Vec2::new(10.0, 10.0);
        filter.sample(pos);

        // After two samples with the same raw delta, the mean of two
        // identical ring slots is exactly that delta.
        pos += d;
        filter.sample(pos);
        pos += d;
        let out = filter.sample(pos);
        assert_eq!(out, d);

        // And it stays there while the delta is sustained
        pos += d;
        assert_eq!(filter.sample(pos), d);
    }

    #[test]
    fn test_single_spike_is_halved() {
        let mut filter = CursorFilter::new();
        filter.sample(Vec2::ZERO);
        let out = filter.sample(Vec2::new(8.0, 0.0));
        // One 8px delta averaged with the zero slot
        assert_eq!(out, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_reseed_suppresses_jump() {
        let mut filter = CursorFilter::new();
        filter.sample(Vec2::ZERO);
        filter.sample(Vec2::new(1.0, 1.0));

        // Cursor warps far away (capture toggle); reseed so the warp is
        // not interpreted as motion.
        filter.reseed(Vec2::new(500.0, 500.0));
        let out = filter.sample(Vec2::new(500.0, 500.0));
        assert!(out.x.abs() < 1.0 && out.y.abs() < 1.0);
    }

    #[test]
    fn test_alternating_deltas_average() {
        let mut filter = CursorFilter::new();
        filter.sample(Vec2::ZERO);
        filter.sample(Vec2::new(2.0, 0.0)); // delta 2
        let out = filter.sample(Vec2::new(6.0, 0.0)); // delta 4
        assert_eq!(out, Vec2::new(3.0, 0.0));
    }
}
