use crate::Named;
use crate::Table;
use crate::TableError;
use crate::ClusterRow;
use crate::LatticeState;
use crate::check_shape;
use crate::rows::{required, present_text};

/// A lattice configuration with an interaction energy.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceClusterRecord {
    pub name: String,
    pub sites: u32,
    /// Present iff `sites > 1`.
    pub neighboring: Option<String>,
    pub lattice_state: LatticeState,
    pub site_types: Option<String>,
    pub graph_multiplicity: Option<u32>,
    pub angles: Option<String>,
    /// Cluster energy [eV].
    pub energy: f64,
}

impl Named for SurfaceClusterRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl TryFrom<ClusterRow> for SurfaceClusterRecord {
    type Error = TableError;

    fn try_from(row: ClusterRow) -> Result<Self, Self::Error> {
        let name = row.name.as_str();
        let sites = row.sites
            .ok_or_else(|| TableError::MissingField { row: name.to_string(), field: "sites" })?;
        let neighboring = present_text(row.neighboring.as_ref());
        check_shape(name, sites, neighboring.as_deref())?;

        let entries = row.lattice_state.as_ref()
            .ok_or_else(|| TableError::MissingField { row: name.to_string(), field: "lattice_state" })?
            .values();
        let lattice_state = LatticeState::parse(name, &entries)?;
        if lattice_state.len() != sites as usize {
            return Err(TableError::InvalidField {
                row: name.to_string(),
                field: "lattice_state",
                reason: format!("has {} entries for {} sites", lattice_state.len(), sites),
            });
        }

        Ok(SurfaceClusterRecord {
            sites,
            neighboring,
            lattice_state,
            site_types: present_text(row.site_types.as_ref()),
            graph_multiplicity: row.graph_multiplicity,
            angles: present_text(row.angles.as_ref()),
            energy: required(row.cluster_eng, name, "cluster_eng")?,
            name: row.name,
        })
    }
}

pub type ClusterTable = Table<SurfaceClusterRecord>;

impl TryFrom<Vec<ClusterRow>> for ClusterTable {
    type Error = TableError;

    fn try_from(rows: Vec<ClusterRow>) -> Result<Self, Self::Error> {
        rows.into_iter()
            .map(SurfaceClusterRecord::try_from)
            .collect::<Result<Vec<_>, _>>()
            .and_then(Table::try_from)
    }
}

impl ClusterTable {
    /// Surface species in order of first appearance, each with its dentate
    /// count: the largest dentate index it carries in any cluster.
    pub fn surface_species(&self) -> Vec<(String, u32)> {
        let mut species: Vec<(String, u32)> = Vec::new();
        for entry in self.iter().flat_map(|c| c.lattice_state.iter()) {
            if !entry.is_adsorbate() {
                continue;
            }
            let dent = entry.dentate_index().unwrap_or(1);
            match species.iter_mut().find(|(name, _)| *name == entry.species) {
                Some((_, d)) => *d = (*d).max(dent),
                None => species.push((entry.species.clone(), dent)),
            }
        }
        species
    }
}
