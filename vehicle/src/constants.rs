use serde::{Deserialize, Serialize};

// SDF 1.9 supports degrees="true"; earlier versions want radian literals, so
// these are exported to templates as @d180, @d90, etc.
pub const D180: f64 = std::f64::consts::PI;
pub const D90: f64 = D180 / 2.0;
pub const D45: f64 = D90 / 2.0;
pub const D30: f64 = D90 / 3.0;
pub const D135: f64 = D90 + D45;

/// Physical constants shared by every derivation.
///
/// Published vehicle configs disagree on some of these (998 vs 1000 kg/m³
/// for water, 0.004 vs 0.008 for angular drag), so they are fields with
/// defaults rather than values hard-coded at the use sites. One `Constants`
/// is threaded through the whole run; in particular the same fluid density
/// feeds the buoyancy, drag, and thrust conversions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Constants {
    /// Density of the surrounding fluid (kg/m³).
    pub fluid_density: f64,
    /// Empirical drag coefficient for the forward-facing cross-section.
    pub cd_forward: f64,
    /// Empirical drag coefficient for the side and top cross-sections.
    pub cd_lateral: f64,
    /// Empirical angular drag constant.
    pub cd_angular: f64,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            fluid_density: 1000.0,
            cd_forward: 0.8,
            cd_lateral: 0.95,
            cd_angular: 0.008,
        }
    }
}
