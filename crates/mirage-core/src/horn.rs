//! Toroidal horn magnetic field from Ampère's law.
//!
//! The field gap between the horn's coaxial conductors carries a purely
//! azimuthal field circling the beam axis:
//!   B_phi = mu0 * I / (2 pi r)
//! independent of z; the longitudinal shaping comes entirely from which
//! spatial region the law is attached to, not from the formula.

use crate::field::MagneticField;
use mirage_types::config::HornConfig;
use mirage_types::constants::{MU0_SI, TWOPI};
use mirage_types::error::{MirageError, MirageResult};

/// Radius below which the field is clamped to zero to avoid the 1/r
/// blow-up on the beam axis. Not a physical boundary: the inner-conductor
/// band normally keeps queries away from the axis entirely.
const R_SINGULARITY_M: f64 = 1e-6;

/// Azimuthal field law of one magnetic horn. Immutable after construction;
/// the sign of the current selects the circulation direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToroidalHornField {
    peak_current_a: f64,
}

impl ToroidalHornField {
    pub fn new(peak_current_a: f64) -> MirageResult<Self> {
        if !peak_current_a.is_finite() {
            return Err(MirageError::ConfigError(format!(
                "horn peak current must be finite, got {peak_current_a}"
            )));
        }
        Ok(ToroidalHornField { peak_current_a })
    }

    /// Build from configuration, applying the polarity sign convention.
    pub fn from_config(config: &HornConfig) -> MirageResult<Self> {
        Self::new(config.polarity.signed_current_a(config.peak_current_a))
    }

    /// Signed peak current [A] driving this horn.
    pub fn peak_current_a(&self) -> f64 {
        self.peak_current_a
    }
}

impl MagneticField for ToroidalHornField {
    fn field_at(&self, point: [f64; 4]) -> [f64; 3] {
        let [x, y, _z, _t] = point;
        let r = (x * x + y * y).sqrt();

        if r < R_SINGULARITY_M {
            return [0.0, 0.0, 0.0];
        }

        let b_mag = (MU0_SI * self.peak_current_a) / (TWOPI * r);

        // B_phi in Cartesian components: perpendicular to the radial
        // vector (x, y, 0) at every point.
        [-b_mag * (y / r), b_mag * (x / r), 0.0]
    }
}
