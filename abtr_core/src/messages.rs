// abtr_core/src/messages.rs

use nalgebra::{Vector3, Vector6};

// =========================================================================
// == Inbound Command ==
// =========================================================================

/// A 6-DOF velocity command (linear + angular, x/y/z).
///
/// Values are carried verbatim: NaN and infinite components are neither
/// rejected nor clamped. Units are whatever the rest of the system uses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocityCommand {
    pub linear: Vector3<f64>,
    pub angular: Vector3<f64>,
}

impl VelocityCommand {
    pub fn new(linear: Vector3<f64>, angular: Vector3<f64>) -> Self {
        Self { linear, angular }
    }

    /// Builds a command from `[lx, ly, lz, ax, ay, az]`.
    pub fn from_components(c: [f64; 6]) -> Self {
        Self {
            linear: Vector3::new(c[0], c[1], c[2]),
            angular: Vector3::new(c[3], c[4], c[5]),
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// The command as a single `[linear; angular]` vector.
    pub fn as_vector6(&self) -> Vector6<f64> {
        Vector6::new(
            self.linear.x,
            self.linear.y,
            self.linear.z,
            self.angular.x,
            self.angular.y,
            self.angular.z,
        )
    }

    /// Component-wise bit equality. Unlike `==`, this treats two NaNs with the
    /// same payload as equal, which is what "stored verbatim" means.
    pub fn bitwise_eq(&self, other: &Self) -> bool {
        self.as_vector6()
            .iter()
            .zip(other.as_vector6().iter())
            .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

// =========================================================================
// == Outbound Command ==
// =========================================================================

/// A command as it leaves the arbiter. The stamp and frame are assigned at
/// emission time and are never inherited from the inbound command.
#[derive(Debug, Clone, PartialEq)]
pub struct StampedCommand {
    pub command: VelocityCommand,
    /// Emission time in seconds.
    pub timestamp: f64,
    pub frame_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_from_components_maps_linear_then_angular() {
        let cmd = VelocityCommand::from_components([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_abs_diff_eq!(cmd.linear, Vector3::new(1.0, 2.0, 3.0));
        assert_abs_diff_eq!(cmd.angular, Vector3::new(4.0, 5.0, 6.0));
        assert_abs_diff_eq!(
            cmd.as_vector6(),
            Vector6::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
        );
    }

    #[test]
    fn test_bitwise_eq_accepts_nan() {
        let cmd = VelocityCommand::from_components([f64::NAN, 0.0, 0.0, 0.0, 0.0, f64::INFINITY]);
        assert_ne!(cmd, cmd);
        assert!(cmd.bitwise_eq(&cmd));
        assert!(!cmd.bitwise_eq(&VelocityCommand::zero()));
    }
}
