mod error;
mod rows;
mod table;
mod lattice_state;
mod gas_species;
mod cluster;
mod step;

pub use error::*;
pub use rows::*;
pub use table::*;
pub use lattice_state::*;
pub use gas_species::*;
pub use cluster::*;
pub use step::*;

/// A row may span several lattice sites; a neighboring pattern is required
/// exactly when it spans more than one.
pub(crate) fn check_shape(
    row: &str,
    sites: u32,
    neighboring: Option<&str>,
) -> Result<(), TableError> {
    if sites == 0 {
        return Err(TableError::InvalidField {
            row: row.to_string(),
            field: "sites",
            reason: "must be at least 1".into(),
        });
    }
    match (sites > 1, neighboring.is_some()) {
        (true, true) | (false, false) => Ok(()),
        _ => Err(TableError::InvalidNeighboring { row: row.to_string(), sites }),
    }
}

