mod error;
mod rate_model;

pub use error::*;
pub use rate_model::*;

use kd_tables::ScalingFactor;

/// Forward and reverse pre-exponential factors of one reversible step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreExponentials {
    pub forward: f64,
    pub reverse: f64,
}

impl PreExponentials {
    pub fn new(forward: f64, reverse: f64) -> Self {
        Self { forward, reverse }
    }

    /// `forward / reverse`; invariant under [`PreExponentials::scaled`].
    pub fn ratio(&self) -> f64 {
        self.forward / self.reverse
    }

    /// Both directions multiplied by the same factor.
    pub fn scaled(&self, scaling: &ScalingFactor) -> Self {
        let s = scaling.multiplier();
        Self {
            forward: self.forward * s,
            reverse: self.reverse * s,
        }
    }
}
