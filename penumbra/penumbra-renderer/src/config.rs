//! Penumbra builder configuration: tolerances, range guard, winding, pooling.

use crate::error::PenumbraError;
use crate::triangulate::WindingOrder;

#[derive(Clone, Debug)]
pub struct PenumbraConfig {
    /// Absolute per-component tolerance for point equality, clip inside tests and
    /// degenerate-polygon detection.
    pub tolerance: f32,
    /// Smallest accepted `dot(light_to_point_dir, light_right_to_point_dir)`. Below it the
    /// fin's range scale blows up and the fin is skipped.
    pub min_range_denominator: f32,
    /// Winding of emitted triangles.
    pub winding: WindingOrder,
    /// Idle fins kept between passes.
    pub fin_pool_capacity: usize,
}

impl Default for PenumbraConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            min_range_denominator: 1e-3,
            winding: WindingOrder::Clockwise,
            fin_pool_capacity: 64,
        }
    }
}

impl PenumbraConfig {
    pub fn validate(&self) -> Result<(), PenumbraError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(PenumbraError::InvalidConfig(format!(
                "tolerance must be finite and > 0, got {}",
                self.tolerance
            )));
        }
        if !self.min_range_denominator.is_finite() || self.min_range_denominator <= 0.0 {
            return Err(PenumbraError::InvalidConfig(format!(
                "min_range_denominator must be finite and > 0, got {}",
                self.min_range_denominator
            )));
        }
        if self.fin_pool_capacity == 0 {
            return Err(PenumbraError::InvalidConfig("fin_pool_capacity must be > 0".to_string()));
        }
        Ok(())
    }
}
