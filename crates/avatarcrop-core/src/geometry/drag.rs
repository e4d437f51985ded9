//! Drag interpretation: pointer deltas become image translation.

use super::Vec2;

/// Ephemeral pointer-tracking state for one drag gesture.
///
/// Created on drag-start, destroyed on release. Mouse and single-touch input
/// feed it identically; the interpreter has no notion of the input device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    last: Vec2,
}

impl DragSession {
    /// Start tracking at the pressed pointer position.
    pub fn begin(at: Vec2) -> Self {
        Self { last: at }
    }

    /// Advance to a new pointer position, returning the delta since the
    /// previous one. The caller applies the delta to the image offset
    /// directly; scale never enters drag sensitivity.
    pub fn advance(&mut self, to: Vec2) -> Vec2 {
        let delta = to - self.last;
        self.last = to;
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_delta() {
        let mut drag = DragSession::begin(Vec2::new(10.0, 20.0));
        let delta = drag.advance(Vec2::new(13.0, 18.0));
        assert_eq!(delta, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_deltas_are_relative_to_previous_move() {
        let mut drag = DragSession::begin(Vec2::new(0.0, 0.0));
        drag.advance(Vec2::new(5.0, 5.0));
        let delta = drag.advance(Vec2::new(6.0, 3.0));
        assert_eq!(delta, Vec2::new(1.0, -2.0));
    }

    #[test]
    fn test_deltas_sum_to_total_displacement() {
        let start = Vec2::new(40.0, 60.0);
        let end = Vec2::new(12.5, -80.0);
        let mut drag = DragSession::begin(start);

        let mut total = Vec2::default();
        for (x, y) in [(45.0, 55.0), (30.0, 10.0), (12.5, -80.0)] {
            total += drag.advance(Vec2::new(x, y));
        }
        assert_eq!(total, end - start);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
