use std::fmt;
use std::io;
use std::error::Error;
use std::path::PathBuf;

use kd_tables::TableError;
use kd_kinetics::RateError;

/// Everything that aborts building or writing a deck.
#[derive(Debug)]
pub enum DeckError {
    Table(TableError),
    Rate(RateError),
    /// An adsorption step refers to a gas species the deck does not define.
    UnknownGasSpecies { step: String, species: String },
    /// A free-form tag would shadow a keyword the deck writes itself.
    ReservedTag(String),
    TargetExists(PathBuf),
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::Table(e) => write!(f, "{}", e),
            DeckError::Rate(e) => write!(f, "{}", e),
            DeckError::UnknownGasSpecies { step, species } => {
                write!(f, "Step '{}' adsorbs '{}', which is not in the gas-species table", step, species)
            }
            DeckError::ReservedTag(key) => {
                write!(f, "Tag '{}' is written by the deck itself and cannot be overridden", key)
            }
            DeckError::TargetExists(path) => {
                write!(f, "Target directory '{}' already exists", path.display())
            }
            DeckError::Io(e) => write!(f, "I/O error: {}", e),
            DeckError::Json(e) => write!(f, "Invalid deck input: {}", e),
        }
    }
}

impl Error for DeckError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DeckError::Table(e) => Some(e),
            DeckError::Rate(e) => Some(e),
            DeckError::Io(e) => Some(e),
            DeckError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TableError> for DeckError {
    fn from(e: TableError) -> Self {
        DeckError::Table(e)
    }
}

impl From<RateError> for DeckError {
    fn from(e: RateError) -> Self {
        DeckError::Rate(e)
    }
}

impl From<io::Error> for DeckError {
    fn from(e: io::Error) -> Self {
        DeckError::Io(e)
    }
}

impl From<serde_json::Error> for DeckError {
    fn from(e: serde_json::Error) -> Self {
        DeckError::Json(e)
    }
}
