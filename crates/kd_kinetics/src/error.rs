use std::fmt;
use std::error::Error;

use kd_thermo::ThermoError;

#[derive(Debug, Clone, PartialEq)]
pub enum RateError {
    /// A partition function rejected the input of this step.
    Thermo { step: String, source: ThermoError },
    /// An adsorption step without (or with the wrong) gas species record.
    MissingGasSpecies { step: String, species: String },
}

impl fmt::Display for RateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thermo { step, source } =>
                write!(f, "Step '{step}': {source}"),
            Self::MissingGasSpecies { step, species } =>
                write!(f, "Step '{step}': gas species '{species}' is not defined"),
        }
    }
}

impl Error for RateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Thermo { source, .. } => Some(source),
            _ => None,
        }
    }
}

