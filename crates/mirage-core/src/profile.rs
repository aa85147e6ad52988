// ─────────────────────────────────────────────────────────────────────
// SCPN Mirage Beamline — Station Profile
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Longitudinal station profile of a horn body-of-revolution.
//!
//! Each station fixes four radii at one z, bounding three nested annular
//! bands: inner conductor `[r0,r1]`, field gap `[r1,r2]`, outer conductor
//! `[r2,r3]`. Consecutive stations sweep a frustum per band; the full
//! ordered sequence forms the three-layer solid the geometry host builds.

use mirage_types::config::StationConfig;
use mirage_types::error::{MirageError, MirageResult};
use ndarray::Array1;

/// One longitudinal sample of the horn radial profile.
/// Invariant (validated on profile construction): `0 <= r0 < r1 < r2 < r3`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Station {
    pub z_m: f64,
    pub r0_m: f64,
    pub r1_m: f64,
    pub r2_m: f64,
    pub r3_m: f64,
}

impl Station {
    fn radii(&self) -> [f64; 4] {
        [self.r0_m, self.r1_m, self.r2_m, self.r3_m]
    }
}

/// The three nested annular bands of a horn cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    InnerConductor,
    FieldGap,
    OuterConductor,
}

/// Profile-by-radius-pairs arrays for one band, in the layout a
/// body-of-revolution solid constructor takes: shared z plane positions
/// with inner/outer radii per plane.
#[derive(Debug, Clone)]
pub struct BandProfile {
    pub z_m: Array1<f64>,
    pub r_inner_m: Array1<f64>,
    pub r_outer_m: Array1<f64>,
}

/// Validated, ordered station sequence. Built once at configuration time,
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct StationProfile {
    stations: Vec<Station>,
}

impl StationProfile {
    pub fn new(stations: Vec<Station>) -> MirageResult<Self> {
        if stations.len() < 2 {
            return Err(MirageError::ConfigError(format!(
                "station profile needs at least 2 stations, got {}",
                stations.len()
            )));
        }
        for (i, s) in stations.iter().enumerate() {
            if !s.z_m.is_finite() || s.radii().iter().any(|r| !r.is_finite()) {
                return Err(MirageError::ConfigError(format!(
                    "station {i} contains non-finite values"
                )));
            }
            if s.r0_m < 0.0 {
                return Err(MirageError::ConfigError(format!(
                    "station {i}: innermost radius must be >= 0, got {}",
                    s.r0_m
                )));
            }
            if !(s.r0_m < s.r1_m && s.r1_m < s.r2_m && s.r2_m < s.r3_m) {
                return Err(MirageError::ConfigError(format!(
                    "station {i}: radii must be strictly increasing, got \
                     r0={}, r1={}, r2={}, r3={}",
                    s.r0_m, s.r1_m, s.r2_m, s.r3_m
                )));
            }
        }
        for i in 1..stations.len() {
            if stations[i].z_m <= stations[i - 1].z_m {
                return Err(MirageError::ConfigError(format!(
                    "station z must be strictly increasing, got z[{}]={} after z[{}]={}",
                    i,
                    stations[i].z_m,
                    i - 1,
                    stations[i - 1].z_m
                )));
            }
        }
        Ok(StationProfile { stations })
    }

    pub fn from_configs(configs: &[StationConfig]) -> MirageResult<Self> {
        Self::new(
            configs
                .iter()
                .map(|c| Station {
                    z_m: c.z_m,
                    r0_m: c.r0_m,
                    r1_m: c.r1_m,
                    r2_m: c.r2_m,
                    r3_m: c.r3_m,
                })
                .collect(),
        )
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Shared z plane positions.
    pub fn z(&self) -> Array1<f64> {
        self.stations.iter().map(|s| s.z_m).collect()
    }

    /// Radius-pair arrays for one band at every z plane.
    pub fn band(&self, band: Band) -> BandProfile {
        let (inner, outer): (Vec<f64>, Vec<f64>) = self
            .stations
            .iter()
            .map(|s| match band {
                Band::InnerConductor => (s.r0_m, s.r1_m),
                Band::FieldGap => (s.r1_m, s.r2_m),
                Band::OuterConductor => (s.r2_m, s.r3_m),
            })
            .unzip();
        BandProfile {
            z_m: self.z(),
            r_inner_m: Array1::from_vec(inner),
            r_outer_m: Array1::from_vec(outer),
        }
    }

    /// Half of the longitudinal span, used as the element half-length
    /// during layout.
    pub fn half_length_m(&self) -> f64 {
        0.5 * (self.stations[self.stations.len() - 1].z_m - self.stations[0].z_m)
    }

    /// Midpoint of the longitudinal span.
    pub fn z_mid_m(&self) -> f64 {
        0.5 * (self.stations[0].z_m + self.stations[self.stations.len() - 1].z_m)
    }

    /// Shift every station by `dz`. The assembly uses this to emit
    /// absolute-z profiles once the element's z-center is known.
    pub fn translated(&self, dz_m: f64) -> StationProfile {
        StationProfile {
            stations: self
                .stations
                .iter()
                .map(|s| Station {
                    z_m: s.z_m + dz_m,
                    ..*s
                })
                .collect(),
        }
    }
}
