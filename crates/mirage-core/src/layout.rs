// ─────────────────────────────────────────────────────────────────────
// SCPN Mirage Beamline — Longitudinal Layout
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Non-overlapping longitudinal placement of beamline elements.
//!
//! Elements stack downstream from the world's upstream face:
//!   z[0] = z_min + gap[0] + half[0]
//!   z[i] = z[i-1] + half[i-1] + gap[i] + half[i]

use mirage_types::error::{MirageError, MirageResult};

/// Placement extent of one element: its half-length along z and the free
/// gap between it and the previous element (or the world face for the
/// first element).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementExtent {
    pub half_length_m: f64,
    pub gap_before_m: f64,
}

/// Compute the z-center of every element, in declaration order.
///
/// Placements are deterministic, strictly increasing and non-overlapping.
/// Fails if any half-length or gap is negative or non-finite, or if an
/// element's far edge would pass `world_z_max_m` (an overflow the
/// geometry host would otherwise reject at placement time).
pub fn place(
    world_z_min_m: f64,
    world_z_max_m: f64,
    extents: &[ElementExtent],
) -> MirageResult<Vec<f64>> {
    if !world_z_min_m.is_finite() || !world_z_max_m.is_finite() {
        return Err(MirageError::ConfigError(format!(
            "world z bounds must be finite, got [{world_z_min_m}, {world_z_max_m}]"
        )));
    }
    if world_z_min_m >= world_z_max_m {
        return Err(MirageError::ConfigError(format!(
            "world z bounds must be ordered, got [{world_z_min_m}, {world_z_max_m}]"
        )));
    }

    let mut centers = Vec::with_capacity(extents.len());
    let mut cursor = world_z_min_m;

    for (i, extent) in extents.iter().enumerate() {
        if !extent.half_length_m.is_finite() || extent.half_length_m < 0.0 {
            return Err(MirageError::ConfigError(format!(
                "element {i}: half length must be finite and >= 0, got {}",
                extent.half_length_m
            )));
        }
        if !extent.gap_before_m.is_finite() || extent.gap_before_m < 0.0 {
            return Err(MirageError::ConfigError(format!(
                "element {i}: gap must be finite and >= 0, got {}",
                extent.gap_before_m
            )));
        }

        let z_center = cursor + extent.gap_before_m + extent.half_length_m;
        let far_edge = z_center + extent.half_length_m;
        if far_edge > world_z_max_m {
            return Err(MirageError::ConfigError(format!(
                "element {i} overflows the world: far edge {far_edge} > {world_z_max_m}"
            )));
        }

        centers.push(z_center);
        cursor = far_edge;
    }

    Ok(centers)
}
