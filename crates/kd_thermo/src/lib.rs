
/// CODATA constants and unit conversions.
mod constants;

/// Errors for non-physical input.
mod error;

/// Vibrational, rotational and translational partition functions.
mod partition;

pub use constants::*;
pub use error::*;
pub use partition::*;

