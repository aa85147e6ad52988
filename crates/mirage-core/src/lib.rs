//! Beamline magnetic-field laws and longitudinal geometry profile.
//!
//! Field laws are constructed once from configuration, validated up front,
//! and queried as pure functions by an external transport host.

pub mod assembly;
pub mod dipole;
pub mod field;
pub mod horn;
pub mod layout;
pub mod profile;
