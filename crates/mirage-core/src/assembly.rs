// ─────────────────────────────────────────────────────────────────────
// SCPN Mirage Beamline — Beamline Assembly
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Configuration-driven beamline assembly.
//!
//! One parameterized builder walks a tagged element list (target, horns,
//! dipoles), computes every placement through `layout::place`, and
//! produces placed elements that each own their field law as a plain
//! value. The binding of a field law to its element happens here, once;
//! there are no setters, so it cannot be re-bound after construction.

use crate::dipole::{ChainEntry, UniformDipoleField};
use crate::horn::ToroidalHornField;
use crate::layout::{place, ElementExtent};
use crate::profile::StationProfile;
use mirage_types::config::{
    BeamlineConfig, DipoleConfig, HornConfig, IntegrationConfig, StepperKind, TargetConfig,
    WorldConfig,
};
use mirage_types::error::{MirageError, MirageResult};

/// Tagged element specification, in beamline declaration order.
#[derive(Debug, Clone)]
pub enum ElementSpec {
    Target(TargetConfig),
    Horn(HornConfig),
    Dipole(DipoleConfig),
}

/// Placed production target.
#[derive(Debug, Clone)]
pub struct PlacedTarget {
    pub z_center_m: f64,
    pub config: TargetConfig,
}

/// Placed horn: absolute-z station profile plus the owned field law the
/// geometry host attaches to the field-gap band.
#[derive(Debug, Clone)]
pub struct PlacedHorn {
    pub name: String,
    pub z_center_m: f64,
    pub profile: StationProfile,
    pub field: ToroidalHornField,
}

/// Placed dipole box with its owned uniform field law.
#[derive(Debug, Clone)]
pub struct PlacedDipole {
    pub name: String,
    pub z_center_m: f64,
    pub half_xy_m: f64,
    pub half_length_m: f64,
    pub field: UniformDipoleField,
}

#[derive(Debug, Clone)]
pub enum BeamElement {
    Target(PlacedTarget),
    Horn(PlacedHorn),
    Dipole(PlacedDipole),
}

impl BeamElement {
    pub fn z_center_m(&self) -> f64 {
        match self {
            BeamElement::Target(t) => t.z_center_m,
            BeamElement::Horn(h) => h.z_center_m,
            BeamElement::Dipole(d) => d.z_center_m,
        }
    }
}

/// Fully assembled beamline: placed, validated, immutable. Safe to share
/// across transport worker threads.
#[derive(Debug, Clone)]
pub struct Beamline {
    pub world: WorldConfig,
    pub stepper: StepperKind,
    pub integration: IntegrationConfig,
    elements: Vec<BeamElement>,
}

/// Validated, not-yet-placed element: everything but its z-center.
#[derive(Debug)]
enum PreparedElement {
    Target(TargetConfig),
    Horn {
        name: String,
        profile: StationProfile,
        field: ToroidalHornField,
    },
    Dipole(ChainEntry),
}

impl PreparedElement {
    fn from_spec(spec: ElementSpec) -> MirageResult<(Self, ElementExtent)> {
        match spec {
            ElementSpec::Target(target) => {
                if !target.radius_m.is_finite() || target.radius_m <= 0.0 {
                    return Err(MirageError::ConfigError(format!(
                        "target radius must be finite and > 0, got {}",
                        target.radius_m
                    )));
                }
                let extent = ElementExtent {
                    half_length_m: target.half_length_m,
                    gap_before_m: target.gap_before_m,
                };
                Ok((PreparedElement::Target(target), extent))
            }
            ElementSpec::Horn(horn) => {
                let profile = StationProfile::from_configs(&horn.stations)?;
                let field = ToroidalHornField::from_config(&horn)?;
                let extent = ElementExtent {
                    half_length_m: profile.half_length_m(),
                    gap_before_m: horn.gap_before_m,
                };
                Ok((
                    PreparedElement::Horn {
                        name: horn.name,
                        profile,
                        field,
                    },
                    extent,
                ))
            }
            ElementSpec::Dipole(dipole) => {
                let entry = ChainEntry::from_config(&dipole)?;
                let extent = ElementExtent {
                    half_length_m: entry.half_length_m,
                    gap_before_m: entry.gap_before_m,
                };
                Ok((PreparedElement::Dipole(entry), extent))
            }
        }
    }

    fn into_placed(self, z_center_m: f64) -> BeamElement {
        match self {
            PreparedElement::Target(config) => BeamElement::Target(PlacedTarget {
                z_center_m,
                config,
            }),
            PreparedElement::Horn {
                name,
                profile,
                field,
            } => {
                // Station tables are element-local; shift so the span is
                // centered on the computed placement.
                let profile = profile.translated(z_center_m - profile.z_mid_m());
                BeamElement::Horn(PlacedHorn {
                    name,
                    z_center_m,
                    profile,
                    field,
                })
            }
            PreparedElement::Dipole(entry) => BeamElement::Dipole(PlacedDipole {
                name: entry.name,
                z_center_m,
                half_xy_m: entry.half_xy_m,
                half_length_m: entry.half_length_m,
                field: entry.field,
            }),
        }
    }
}

impl Beamline {
    /// Assemble the full beamline from configuration: target first, then
    /// horns, then dipoles, stacked downstream from the world's upstream
    /// face.
    pub fn build(config: &BeamlineConfig) -> MirageResult<Self> {
        let mut specs = Vec::with_capacity(1 + config.horns.len() + config.dipoles.len());
        specs.push(ElementSpec::Target(config.target.clone()));
        specs.extend(config.horns.iter().cloned().map(ElementSpec::Horn));
        specs.extend(config.dipoles.iter().cloned().map(ElementSpec::Dipole));
        Self::from_specs(&config.world, config.stepper, config.integration, specs)
    }

    /// Assemble from an explicit tagged element list. All validation
    /// happens here; the result never fails a query.
    pub fn from_specs(
        world: &WorldConfig,
        stepper: StepperKind,
        integration: IntegrationConfig,
        specs: Vec<ElementSpec>,
    ) -> MirageResult<Self> {
        if !world.size_xy_m.is_finite() || world.size_xy_m <= 0.0 {
            return Err(MirageError::ConfigError(format!(
                "world transverse size must be finite and > 0, got {}",
                world.size_xy_m
            )));
        }
        if !world.size_z_m.is_finite() || world.size_z_m <= 0.0 {
            return Err(MirageError::ConfigError(format!(
                "world longitudinal size must be finite and > 0, got {}",
                world.size_z_m
            )));
        }

        let mut prepared = Vec::with_capacity(specs.len());
        let mut extents = Vec::with_capacity(specs.len());
        for spec in specs {
            let (element, extent) = PreparedElement::from_spec(spec)?;
            prepared.push(element);
            extents.push(extent);
        }

        let centers = place(world.z_min_m(), world.z_max_m(), &extents)?;
        let elements = prepared
            .into_iter()
            .zip(centers)
            .map(|(element, z_center_m)| element.into_placed(z_center_m))
            .collect();

        Ok(Beamline {
            world: world.clone(),
            stepper,
            integration,
            elements,
        })
    }

    pub fn elements(&self) -> &[BeamElement] {
        &self.elements
    }

    pub fn target(&self) -> Option<&PlacedTarget> {
        self.elements.iter().find_map(|e| match e {
            BeamElement::Target(t) => Some(t),
            _ => None,
        })
    }

    pub fn horns(&self) -> impl Iterator<Item = &PlacedHorn> {
        self.elements.iter().filter_map(|e| match e {
            BeamElement::Horn(h) => Some(h),
            _ => None,
        })
    }

    pub fn dipoles(&self) -> impl Iterator<Item = &PlacedDipole> {
        self.elements.iter().filter_map(|e| match e {
            BeamElement::Dipole(d) => Some(d),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::MagneticField;
    use mirage_types::config::HornPolarity;

    #[test]
    fn test_build_reference_beamline() {
        let beamline = Beamline::build(&BeamlineConfig::default()).unwrap();
        assert_eq!(beamline.elements().len(), 7);
        assert_eq!(beamline.horns().count(), 3);
        assert_eq!(beamline.dipoles().count(), 3);
        assert!(beamline.target().is_some());
        assert_eq!(beamline.stepper, StepperKind::ClassicalRk4);
    }

    #[test]
    fn test_reference_placements() {
        // Hand-computed from the default extents, stacking downstream
        // from z = -150 m.
        let beamline = Beamline::build(&BeamlineConfig::default()).unwrap();

        let target = beamline.target().unwrap();
        assert!((target.z_center_m - (-149.25)).abs() < 1e-9);

        let horn_centers: Vec<f64> = beamline.horns().map(|h| h.z_center_m).collect();
        assert!((horn_centers[0] - (-146.5)).abs() < 1e-9);
        assert!((horn_centers[1] - (-133.1)).abs() < 1e-9);
        assert!((horn_centers[2] - (-113.7)).abs() < 1e-9);

        let dipole_centers: Vec<f64> = beamline.dipoles().map(|d| d.z_center_m).collect();
        assert!((dipole_centers[0] - (-110.45)).abs() < 1e-9);
        assert!((dipole_centers[1] - (-109.45)).abs() < 1e-9);
        assert!((dipole_centers[2] - (-108.45)).abs() < 1e-9);
    }

    #[test]
    fn test_elements_in_increasing_z_order() {
        let beamline = Beamline::build(&BeamlineConfig::default()).unwrap();
        let centers: Vec<f64> = beamline.elements().iter().map(|e| e.z_center_m()).collect();
        for i in 1..centers.len() {
            assert!(centers[i] > centers[i - 1]);
        }
    }

    #[test]
    fn test_horn_profiles_emitted_in_absolute_z() {
        let beamline = Beamline::build(&BeamlineConfig::default()).unwrap();
        let horn = beamline.horns().next().unwrap();
        let stations = horn.profile.stations();
        // Span is centered on the placement: z_center ± half_length.
        let half = horn.profile.half_length_m();
        assert!((stations[0].z_m - (horn.z_center_m - half)).abs() < 1e-9);
        assert!((stations[stations.len() - 1].z_m - (horn.z_center_m + half)).abs() < 1e-9);
        assert!((stations[0].z_m - (-148.0)).abs() < 1e-9);
    }

    #[test]
    fn test_horn_field_polarity_applied() {
        let mut config = BeamlineConfig::default();
        config.horns[0].polarity = HornPolarity::Defocusing;
        let beamline = Beamline::build(&config).unwrap();
        let horns: Vec<&PlacedHorn> = beamline.horns().collect();
        assert!(horns[0].field.peak_current_a() < 0.0);
        assert!(horns[1].field.peak_current_a() > 0.0);

        // Same point, opposite circulation.
        let p = [0.1, 0.05, 0.0, 0.0];
        let a = horns[0].field.field_at(p);
        let b = horns[1].field.field_at(p);
        assert!((a[0] + b[0]).abs() < 1e-15);
        assert!((a[1] + b[1]).abs() < 1e-15);
    }

    #[test]
    fn test_dipole_fields_follow_chain_angles() {
        let beamline = Beamline::build(&BeamlineConfig::default()).unwrap();
        let angles: Vec<f64> = beamline.dipoles().map(|d| d.field.angle_deg()).collect();
        assert_eq!(angles, vec![0.0, 120.0, 240.0]);
    }

    #[test]
    fn test_rejects_overflowing_beamline() {
        let mut config = BeamlineConfig::default();
        config.world.size_z_m = 30.0;
        assert!(Beamline::build(&config).is_err());
    }

    #[test]
    fn test_rejects_invalid_horn_station_table() {
        let mut config = BeamlineConfig::default();
        config.horns[1].stations[2].r1_m = config.horns[1].stations[2].r0_m;
        assert!(Beamline::build(&config).is_err());
    }

    #[test]
    fn test_rejects_negative_target_gap() {
        let mut config = BeamlineConfig::default();
        config.target.gap_before_m = -1.0;
        assert!(Beamline::build(&config).is_err());
    }

    #[test]
    fn test_builds_without_horns_or_dipoles() {
        let mut config = BeamlineConfig::default();
        config.horns.clear();
        config.dipoles.clear();
        let beamline = Beamline::build(&config).unwrap();
        assert_eq!(beamline.elements().len(), 1);
        assert!(beamline.target().is_some());
    }
}
