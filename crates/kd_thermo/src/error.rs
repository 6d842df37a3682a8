use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// Non-physical input: what was wrong and the offending value.
    Domain(&'static str, f64),
    /// Inertia lists describe a linear (1) or non-linear (3) rotor.
    InvalidRotor { found: usize },
}

impl fmt::Display for ThermoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThermoError::Domain(what, value) => {
                write!(f, "Non-physical input: {} (got {})", what, value)
            }
            ThermoError::InvalidRotor { found } => {
                write!(f, "Invalid inertia list: expected 1 (linear) or 3 (non-linear) moments, got {}", found)
            }
        }
    }
}

impl std::error::Error for ThermoError {}

