// ─────────────────────────────────────────────────────────────────────
// SCPN Mirage Beamline — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

/// Top-level beamline configuration.
/// Maps 1:1 to beamline_config.json at the project root.
/// All lengths in metres, currents in ampere, fields in tesla.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamlineConfig {
    pub beamline_name: String,
    pub world: WorldConfig,
    pub target: TargetConfig,
    pub horns: Vec<HornConfig>,
    pub dipoles: Vec<DipoleConfig>,
    #[serde(default)]
    pub stepper: StepperKind,
    #[serde(default)]
    pub integration: IntegrationConfig,
}

/// Enclosing world box. Elements are placed along z inside
/// `[-size_z_m/2, +size_z_m/2]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub size_xy_m: f64,
    pub size_z_m: f64,
}

impl WorldConfig {
    pub fn z_min_m(&self) -> f64 {
        -0.5 * self.size_z_m
    }

    pub fn z_max_m(&self) -> f64 {
        0.5 * self.size_z_m
    }
}

/// Production target: a solid cylinder of target material on the beam axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub radius_m: f64,
    pub half_length_m: f64,
    pub gap_before_m: f64,
    pub material: MaterialConfig,
}

/// Single-element material description consumed by the geometry host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialConfig {
    pub name: String,
    pub z: f64,
    pub a_g_per_mole: f64,
    pub density_g_per_cm3: f64,
}

/// One magnetic horn: a coaxial conductor pair described by a station
/// table, carrying the configured peak current in its field gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HornConfig {
    pub name: String,
    /// Peak current magnitude [A]; circulation direction comes from `polarity`.
    pub peak_current_a: f64,
    #[serde(default)]
    pub polarity: HornPolarity,
    pub gap_before_m: f64,
    /// Station z values are local to the horn; the assembly shifts them to
    /// absolute coordinates after layout.
    pub stations: Vec<StationConfig>,
}

/// One longitudinal station of a horn profile: four radii bounding the
/// inner conductor `[r0,r1]`, field gap `[r1,r2]` and outer conductor
/// `[r2,r3]` annular bands at that z.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StationConfig {
    pub z_m: f64,
    pub r0_m: f64,
    pub r1_m: f64,
    pub r2_m: f64,
    pub r3_m: f64,
}

/// Horn current circulation convention. Focusing selects positive signed
/// current (focuses positive secondaries), defocusing the opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HornPolarity {
    #[default]
    Focusing,
    Defocusing,
}

impl HornPolarity {
    /// Signed current [A] from a peak current magnitude.
    pub fn signed_current_a(&self, peak_current_a: f64) -> f64 {
        match self {
            HornPolarity::Focusing => peak_current_a.abs(),
            HornPolarity::Defocusing => -peak_current_a.abs(),
        }
    }
}

/// One uniform-field dipole region: a box volume with a constant in-plane
/// field rotated by `angle_deg` about the beam axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DipoleConfig {
    pub name: String,
    pub field_t: f64,
    pub angle_deg: f64,
    pub half_xy_m: f64,
    pub half_length_m: f64,
    pub gap_before_m: f64,
}

/// Integrator stepper selection, resolved at setup and handed to the
/// external transport host. Exactly one stepper is active per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StepperKind {
    #[default]
    ClassicalRk4,
    DormandPrince745,
    NystromRk4,
}

/// Chord-finder accuracy knobs consumed by the external transport host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IntegrationConfig {
    #[serde(default = "default_min_step_m")]
    pub min_step_m: f64,
    #[serde(default = "default_delta_one_step_m")]
    pub delta_one_step_m: f64,
    #[serde(default = "default_delta_intersection_m")]
    pub delta_intersection_m: f64,
    #[serde(default = "default_max_allowed_step_m")]
    pub max_allowed_step_m: f64,
}

fn default_min_step_m() -> f64 {
    5.0e-4
}
fn default_delta_one_step_m() -> f64 {
    5.0e-4
}
fn default_delta_intersection_m() -> f64 {
    1.0e-4
}
fn default_max_allowed_step_m() -> f64 {
    1.0e-2
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        IntegrationConfig {
            min_step_m: default_min_step_m(),
            delta_one_step_m: default_delta_one_step_m(),
            delta_intersection_m: default_delta_intersection_m(),
            max_allowed_step_m: default_max_allowed_step_m(),
        }
    }
}

impl BeamlineConfig {
    /// Load from JSON file.
    pub fn from_file(path: &str) -> crate::error::MirageResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

fn station(z_m: f64, r0_m: f64, r1_m: f64, r2_m: f64, r3_m: f64) -> StationConfig {
    StationConfig {
        z_m,
        r0_m,
        r1_m,
        r2_m,
        r3_m,
    }
}

impl Default for BeamlineConfig {
    /// Reference beamline: graphite target, three focusing horns, and a
    /// three-fold dipole chicane at 0°/120°/240°. Matches
    /// beamline_config.json at the project root.
    fn default() -> Self {
        BeamlineConfig {
            beamline_name: "MIRAGE-Reference".to_string(),
            world: WorldConfig {
                size_xy_m: 20.0,
                size_z_m: 300.0,
            },
            target: TargetConfig {
                radius_m: 0.0085,
                half_length_m: 0.75,
                gap_before_m: 0.0,
                material: MaterialConfig {
                    name: "Graphite".to_string(),
                    z: 6.0,
                    a_g_per_mole: 12.0107,
                    density_g_per_cm3: 2.267,
                },
            },
            horns: vec![
                HornConfig {
                    name: "HornA".to_string(),
                    peak_current_a: 200_000.0,
                    polarity: HornPolarity::Focusing,
                    gap_before_m: 0.5,
                    stations: vec![
                        station(0.0, 0.045, 0.05, 0.3, 0.32),
                        station(0.75, 0.0225, 0.0275, 0.3, 0.32),
                        station(1.5, 0.009, 0.014, 0.3, 0.32),
                        station(2.25, 0.0225, 0.0275, 0.3, 0.32),
                        station(3.0, 0.045, 0.05, 0.3, 0.32),
                    ],
                },
                HornConfig {
                    name: "HornB".to_string(),
                    peak_current_a: 200_000.0,
                    polarity: HornPolarity::Focusing,
                    gap_before_m: 10.0,
                    stations: vec![
                        station(0.0, 0.09, 0.1, 0.6, 0.64),
                        station(0.95, 0.045, 0.055, 0.6, 0.64),
                        station(1.9, 0.018, 0.028, 0.6, 0.64),
                        station(2.85, 0.045, 0.055, 0.6, 0.64),
                        station(3.8, 0.09, 0.1, 0.6, 0.64),
                    ],
                },
                HornConfig {
                    name: "HornC".to_string(),
                    peak_current_a: 200_000.0,
                    polarity: HornPolarity::Focusing,
                    gap_before_m: 15.0,
                    stations: vec![
                        station(0.0, 0.135, 0.15, 0.9, 0.96),
                        station(1.25, 0.0675, 0.0825, 0.9, 0.96),
                        station(2.5, 0.027, 0.042, 0.9, 0.96),
                        station(3.75, 0.0675, 0.0825, 0.9, 0.96),
                        station(5.0, 0.135, 0.15, 0.9, 0.96),
                    ],
                },
            ],
            dipoles: vec![
                DipoleConfig {
                    name: "DipoleA".to_string(),
                    field_t: 1.0,
                    angle_deg: 0.0,
                    half_xy_m: 0.25,
                    half_length_m: 0.25,
                    gap_before_m: 0.5,
                },
                DipoleConfig {
                    name: "DipoleB".to_string(),
                    field_t: 1.0,
                    angle_deg: 120.0,
                    half_xy_m: 0.25,
                    half_length_m: 0.25,
                    gap_before_m: 0.5,
                },
                DipoleConfig {
                    name: "DipoleC".to_string(),
                    field_t: 1.0,
                    angle_deg: 240.0,
                    half_xy_m: 0.25,
                    half_length_m: 0.25,
                    gap_before_m: 0.5,
                },
            ],
            stepper: StepperKind::ClassicalRk4,
            integration: IntegrationConfig::default(),
        }
    }
}
