use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Snapshot of the animator's progress for one redraw.
///
/// `phase_x` drives the left-to-right reveal, `phase_y` scales values toward
/// their final magnitude. Both are fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationPhase {
    phase_x: f64,
    phase_y: f64,
}

impl AnimationPhase {
    /// Fully revealed, unscaled.
    pub const COMPLETE: Self = Self {
        phase_x: 1.0,
        phase_y: 1.0,
    };

    pub fn new(phase_x: f64, phase_y: f64) -> ChartResult<Self> {
        for (name, value) in [("phase_x", phase_x), ("phase_y", phase_y)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "animation `{name}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(Self { phase_x, phase_y })
    }

    /// Builds a phase from raw animator output, clamping into `[0, 1]`.
    ///
    /// Non-finite input collapses to `0.0`.
    #[must_use]
    pub fn clamped(phase_x: f64, phase_y: f64) -> Self {
        Self {
            phase_x: clamp_unit(phase_x),
            phase_y: clamp_unit(phase_y),
        }
    }

    #[must_use]
    pub fn phase_x(self) -> f64 {
        self.phase_x
    }

    #[must_use]
    pub fn phase_y(self) -> f64 {
        self.phase_y
    }

    /// Number of leading points revealed for a series of `len` points.
    #[must_use]
    pub fn reveal_count(self, len: usize) -> usize {
        reveal_count(len, self.phase_x)
    }
}

impl Default for AnimationPhase {
    fn default() -> Self {
        Self::COMPLETE
    }
}

/// `min(ceil(len * phase_x), len)` with `phase_x` clamped into `[0, 1]`.
#[must_use]
pub fn reveal_count(len: usize, phase_x: f64) -> usize {
    let revealed = (len as f64 * clamp_unit(phase_x)).ceil();
    // `revealed` is within [0, len] after clamping.
    (revealed as usize).min(len)
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{AnimationPhase, reveal_count};

    #[test]
    fn reveal_count_rounds_partial_points_up() {
        assert_eq!(reveal_count(10, 0.5), 5);
        assert_eq!(reveal_count(10, 0.51), 6);
        assert_eq!(reveal_count(3, 0.01), 1);
    }

    #[test]
    fn reveal_count_bounds() {
        assert_eq!(reveal_count(10, 0.0), 0);
        assert_eq!(reveal_count(10, 1.0), 10);
        assert_eq!(reveal_count(0, 1.0), 0);
        assert_eq!(reveal_count(4, 7.0), 4);
        assert_eq!(reveal_count(4, f64::NAN), 0);
    }

    #[test]
    fn new_rejects_out_of_range_phase() {
        assert!(AnimationPhase::new(1.5, 1.0).is_err());
        assert!(AnimationPhase::new(0.5, -0.1).is_err());
        assert!(AnimationPhase::new(f64::NAN, 0.0).is_err());
        assert!(AnimationPhase::new(0.0, 1.0).is_ok());
    }

    #[test]
    fn clamped_saturates() {
        let phase = AnimationPhase::clamped(1.2, -3.0);
        assert_eq!(phase.phase_x(), 1.0);
        assert_eq!(phase.phase_y(), 0.0);
    }
}
