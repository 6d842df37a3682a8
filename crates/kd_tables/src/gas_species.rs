use crate::Named;
use crate::Table;
use crate::TableError;
use crate::GasSpeciesRow;
use crate::rows::required;

/// A gas-phase molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct GasSpeciesRecord {
    pub name: String,
    /// Molecular weight [g/mol].
    pub molecular_weight: f64,
    /// Electronic degeneracy (defaults to 1).
    pub degeneracy: u32,
    pub symmetry_number: u32,
    /// Moments of inertia [amu Å²]: one for linear, three for non-linear rotors.
    /// The count is checked when the rotational partition function is built.
    pub inertia: Vec<f64>,
    /// Reference energy [eV].
    pub energy: f64,
    pub molar_fraction: f64,
}

impl Named for GasSpeciesRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl TryFrom<GasSpeciesRow> for GasSpeciesRecord {
    type Error = TableError;

    fn try_from(row: GasSpeciesRow) -> Result<Self, Self::Error> {
        let name = row.name.as_str();
        let molecular_weight = required(row.molecular_weight, name, "molecular_weight")?;
        if molecular_weight <= 0. {
            return Err(TableError::InvalidField {
                row: name.to_string(),
                field: "molecular_weight",
                reason: format!("must be positive (got {})", molecular_weight),
            });
        }
        let symmetry_number = row.symmetry_number
            .ok_or_else(|| TableError::MissingField { row: name.to_string(), field: "symmetry_number" })?;
        let inertia = row.inertia.as_ref()
            .ok_or_else(|| TableError::MissingField { row: name.to_string(), field: "inertia" })?
            .values(name, "inertia")?;

        Ok(GasSpeciesRecord {
            molecular_weight,
            degeneracy: row.degeneracy.unwrap_or(1),
            symmetry_number,
            inertia,
            energy: required(row.energy, name, "energy")?,
            molar_fraction: required(row.molar_fraction, name, "molar_fraction")?,
            name: row.name,
        })
    }
}

pub type GasSpeciesTable = Table<GasSpeciesRecord>;

impl TryFrom<Vec<GasSpeciesRow>> for GasSpeciesTable {
    type Error = TableError;

    fn try_from(rows: Vec<GasSpeciesRow>) -> Result<Self, Self::Error> {
        rows.into_iter()
            .map(GasSpeciesRecord::try_from)
            .collect::<Result<Vec<_>, _>>()
            .and_then(Table::try_from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NumberList;

    fn co_row() -> GasSpeciesRow {
        GasSpeciesRow {
            name: "CO".into(),
            molecular_weight: Some(28.0),
            degeneracy: None,
            symmetry_number: Some(1),
            inertia: Some(NumberList::Literal("[1.45]".into())),
            energy: Some(2.14),
            molar_fraction: Some(0.5),
        }
    }

    #[test]
    fn test_gas_species_from_row() {
        let rec = GasSpeciesRecord::try_from(co_row()).unwrap();
        assert_eq!(rec.name, "CO");
        assert_eq!(rec.degeneracy, 1);
        assert_eq!(rec.inertia, vec![1.45]);
        assert_eq!(rec.energy, 2.14);
    }

    #[test]
    fn test_gas_species_missing_fields() {
        let mut row = co_row();
        row.molar_fraction = Some(f64::NAN);
        assert_eq!(GasSpeciesRecord::try_from(row).unwrap_err(),
            TableError::MissingField { row: "CO".into(), field: "molar_fraction" });

        let mut row = co_row();
        row.inertia = None;
        assert_eq!(GasSpeciesRecord::try_from(row).unwrap_err(),
            TableError::MissingField { row: "CO".into(), field: "inertia" });

        let mut row = co_row();
        row.molecular_weight = Some(-1.0);
        assert!(matches!(GasSpeciesRecord::try_from(row),
            Err(TableError::InvalidField { field: "molecular_weight", .. })));
    }

    #[test]
    fn test_gas_species_table_unique_names() {
        let table = GasSpeciesTable::try_from(vec![co_row()]).unwrap();
        assert!(table.contains("CO"));
        let err = GasSpeciesTable::try_from(vec![co_row(), co_row()]).unwrap_err();
        assert_eq!(err, TableError::DuplicateName("CO".into()));
    }
}
