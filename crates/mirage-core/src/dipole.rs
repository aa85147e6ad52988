// ─────────────────────────────────────────────────────────────────────
// SCPN Mirage Beamline — Uniform Dipole Field
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Uniform dipole field regions and the achromatic chicane chain.
//!
//! Each dipole is a box volume carrying a constant in-plane field rotated
//! by a fixed angle about the beam axis. Chaining three regions at 0°,
//! 120° and 240° forms a three-fold symmetric chicane: net transverse
//! displacement cancels for nominal momentum while off-momentum particles
//! separate.

use crate::field::MagneticField;
use crate::layout::ElementExtent;
use mirage_types::config::DipoleConfig;
use mirage_types::error::{MirageError, MirageResult};

/// Constant-field law of one dipole region. The Cartesian components are
/// fixed at construction:
///   Bx = B * sin(theta), By = B * cos(theta), Bz = 0.
/// The field is uniform within its assigned box; querying outside that
/// extent is the geometry host's responsibility to prevent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformDipoleField {
    field_t: f64,
    angle_deg: f64,
    b: [f64; 3],
}

impl UniformDipoleField {
    pub fn new(field_t: f64, angle_deg: f64) -> MirageResult<Self> {
        if !field_t.is_finite() {
            return Err(MirageError::ConfigError(format!(
                "dipole field magnitude must be finite, got {field_t}"
            )));
        }
        if !angle_deg.is_finite() {
            return Err(MirageError::ConfigError(format!(
                "dipole rotation angle must be finite, got {angle_deg}"
            )));
        }
        let angle_rad = angle_deg.to_radians();
        Ok(UniformDipoleField {
            field_t,
            angle_deg,
            b: [field_t * angle_rad.sin(), field_t * angle_rad.cos(), 0.0],
        })
    }

    pub fn from_config(config: &DipoleConfig) -> MirageResult<Self> {
        Self::new(config.field_t, config.angle_deg)
    }

    pub fn field_t(&self) -> f64 {
        self.field_t
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }
}

impl MagneticField for UniformDipoleField {
    fn field_at(&self, _point: [f64; 4]) -> [f64; 3] {
        self.b
    }
}

/// One entry of a dipole chain: a field law plus the box extents that
/// place it along the beamline.
#[derive(Debug, Clone)]
pub struct ChainEntry {
    pub name: String,
    pub field: UniformDipoleField,
    pub half_xy_m: f64,
    pub half_length_m: f64,
    pub gap_before_m: f64,
}

impl ChainEntry {
    pub fn from_config(config: &DipoleConfig) -> MirageResult<Self> {
        if !config.half_xy_m.is_finite() || config.half_xy_m <= 0.0 {
            return Err(MirageError::ConfigError(format!(
                "dipole '{}' transverse half size must be finite and > 0, got {}",
                config.name, config.half_xy_m
            )));
        }
        if !config.half_length_m.is_finite() || config.half_length_m < 0.0 {
            return Err(MirageError::ConfigError(format!(
                "dipole '{}' half length must be finite and >= 0, got {}",
                config.name, config.half_length_m
            )));
        }
        if !config.gap_before_m.is_finite() || config.gap_before_m < 0.0 {
            return Err(MirageError::ConfigError(format!(
                "dipole '{}' gap must be finite and >= 0, got {}",
                config.name, config.gap_before_m
            )));
        }
        Ok(ChainEntry {
            name: config.name.clone(),
            field: UniformDipoleField::from_config(config)?,
            half_xy_m: config.half_xy_m,
            half_length_m: config.half_length_m,
            gap_before_m: config.gap_before_m,
        })
    }
}

/// Ordered sequence of dipole regions at increasing z. Each entry owns its
/// own field law and its own placement extents.
#[derive(Debug, Clone)]
pub struct DipoleChain {
    entries: Vec<ChainEntry>,
}

impl DipoleChain {
    pub fn from_configs(configs: &[DipoleConfig]) -> MirageResult<Self> {
        let entries = configs
            .iter()
            .map(ChainEntry::from_config)
            .collect::<MirageResult<Vec<_>>>()?;
        Ok(DipoleChain { entries })
    }

    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Placement extents in chain order, ready for `layout::place`.
    pub fn extents(&self) -> Vec<ElementExtent> {
        self.entries
            .iter()
            .map(|e| ElementExtent {
                half_length_m: e.half_length_m,
                gap_before_m: e.gap_before_m,
            })
            .collect()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use mirage_types::config::BeamlineConfig;

    #[test]
    fn test_dipole_components_at_zero_degrees() {
        let dipole = UniformDipoleField::new(1.0, 0.0).unwrap();
        let b = dipole.field_at([0.0, 0.0, 0.0, 0.0]);
        assert!(b[0].abs() < 1e-15);
        assert!((b[1] - 1.0).abs() < 1e-15);
        assert_eq!(b[2], 0.0);
    }

    #[test]
    fn test_dipole_components_at_120_degrees() {
        // (B sin 120, B cos 120, 0) = (0.8660 B, -0.5 B, 0)
        let b0 = 1.3;
        let dipole = UniformDipoleField::new(b0, 120.0).unwrap();
        let b = dipole.field_at([0.1, -0.2, 3.0, 0.0]);
        assert!((b[0] - b0 * 0.8660254037844387).abs() < 1e-12);
        assert!((b[1] - b0 * (-0.5)).abs() < 1e-12);
        assert_eq!(b[2], 0.0);
    }

    #[test]
    fn test_dipole_components_at_240_degrees() {
        let b0 = 1.3;
        let dipole = UniformDipoleField::new(b0, 240.0).unwrap();
        let b = dipole.field_at([0.0, 0.0, 0.0, 0.0]);
        assert!((b[0] - b0 * (-0.8660254037844387)).abs() < 1e-12);
        assert!((b[1] - b0 * (-0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_field_independent_of_point() {
        let dipole = UniformDipoleField::new(0.7, 33.0).unwrap();
        let a = dipole.field_at([0.0, 0.0, 0.0, 0.0]);
        let b = dipole.field_at([5.0, -3.0, 100.0, 2.0]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_repeat_evaluation_bit_identical() {
        let dipole = UniformDipoleField::new(1.0, 120.0).unwrap();
        let p = [0.4, 0.1, 8.0, 0.0];
        let first = dipole.field_at(p);
        for _ in 0..100 {
            assert_eq!(dipole.field_at(p), first);
        }
    }

    #[test]
    fn test_chicane_fields_sum_to_zero() {
        // Three-fold symmetric chicane: the vector sum of the three region
        // fields cancels.
        let chain = DipoleChain::from_configs(&BeamlineConfig::default().dipoles).unwrap();
        assert_eq!(chain.len(), 3);
        let mut sum = [0.0_f64; 3];
        for entry in chain.entries() {
            let b = entry.field.field_at([0.0, 0.0, 0.0, 0.0]);
            for i in 0..3 {
                sum[i] += b[i];
            }
        }
        for (i, s) in sum.iter().enumerate() {
            assert!(s.abs() < 1e-12, "component {i} does not cancel: {s:e}");
        }
    }

    #[test]
    fn test_chain_extents_preserve_order() {
        let chain = DipoleChain::from_configs(&BeamlineConfig::default().dipoles).unwrap();
        let extents = chain.extents();
        assert_eq!(extents.len(), 3);
        for extent in &extents {
            assert!((extent.half_length_m - 0.25).abs() < 1e-12);
            assert!((extent.gap_before_m - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_chain_places_through_layout() {
        // Three 0.5 m boxes with 0.5 m gaps, stacked from z = -150 m.
        let chain = DipoleChain::from_configs(&BeamlineConfig::default().dipoles).unwrap();
        let centers = crate::layout::place(-150.0, 150.0, &chain.extents()).unwrap();
        assert!((centers[0] - (-149.25)).abs() < 1e-12);
        assert!((centers[1] - (-148.25)).abs() < 1e-12);
        assert!((centers[2] - (-147.25)).abs() < 1e-12);
    }

    #[test]
    fn test_chain_rejects_bad_extents() {
        let mut configs = BeamlineConfig::default().dipoles;
        configs[1].half_length_m = -0.1;
        assert!(DipoleChain::from_configs(&configs).is_err());

        let mut configs = BeamlineConfig::default().dipoles;
        configs[0].gap_before_m = f64::NAN;
        assert!(DipoleChain::from_configs(&configs).is_err());
    }

    #[test]
    fn test_rejects_non_finite_field() {
        assert!(UniformDipoleField::new(f64::NAN, 0.0).is_err());
        assert!(UniformDipoleField::new(1.0, f64::INFINITY).is_err());
    }
}
