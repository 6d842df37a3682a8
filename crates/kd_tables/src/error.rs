use std::fmt;

/// Everything that can be wrong with a table row. Each variant names the
/// offending row.
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    MissingField { row: String, field: &'static str },
    InvalidField { row: String, field: &'static str, reason: String },
    InvalidNeighboring { row: String, sites: u32 },
    InvalidLatticeEntry { row: String, entry: String },
    DuplicateName(String),
    UnknownStepKind { row: String, kind: String },
}

impl TableError {
    /// Attach the row name to an error raised before the row was known.
    pub fn in_row(self, name: &str) -> Self {
        match self {
            TableError::InvalidLatticeEntry { entry, .. } => {
                TableError::InvalidLatticeEntry { row: name.to_string(), entry }
            }
            TableError::UnknownStepKind { kind, .. } => {
                TableError::UnknownStepKind { row: name.to_string(), kind }
            }
            e => e,
        }
    }

    /// Name of the row the error refers to.
    pub fn row(&self) -> &str {
        match self {
            TableError::MissingField { row, .. }
            | TableError::InvalidField { row, .. }
            | TableError::InvalidNeighboring { row, .. }
            | TableError::InvalidLatticeEntry { row, .. }
            | TableError::UnknownStepKind { row, .. } => row,
            TableError::DuplicateName(row) => row,
        }
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::MissingField { row, field } => {
                write!(f, "Schema error in '{}': required field '{}' is missing", row, field)
            }
            TableError::InvalidField { row, field, reason } => {
                write!(f, "Schema error in '{}': field '{}' {}", row, field, reason)
            }
            TableError::InvalidNeighboring { row, sites } => {
                write!(f, "Schema error in '{}': neighboring must be given iff sites > 1 (sites = {})", row, sites)
            }
            TableError::InvalidLatticeEntry { row, entry } => {
                write!(f, "Schema error in '{}': invalid lattice-state entry '{}'", row, entry)
            }
            TableError::DuplicateName(name) => {
                write!(f, "Schema error: duplicate name '{}'", name)
            }
            TableError::UnknownStepKind { row, kind } => {
                write!(f, "Unknown step kind '{}' in '{}'", kind, row)
            }
        }
    }
}

impl std::error::Error for TableError {}

