use std::fmt;
use std::str::FromStr;
use log::debug;

use crate::Named;
use crate::Table;
use crate::TableError;
use crate::ReactionRow;
use crate::NumberList;
use crate::LatticeState;
use crate::ScalingFactor;
use crate::check_shape;
use crate::rows::{required, present, present_text};

/// The three reversible step classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    NonActivatedAdsorption,
    ActivatedAdsorption,
    SurfaceReaction,
}

impl FromStr for StepKind {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "non_activated_adsorption" => Ok(StepKind::NonActivatedAdsorption),
            "activated_adsorption" => Ok(StepKind::ActivatedAdsorption),
            "surface_reaction" => Ok(StepKind::SurfaceReaction),
            other => Err(TableError::UnknownStepKind { row: String::new(), kind: other.to_string() }),
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepKind::NonActivatedAdsorption => "non_activated_adsorption",
            StepKind::ActivatedAdsorption => "activated_adsorption",
            StepKind::SurfaceReaction => "surface_reaction",
        };
        write!(f, "{}", s)
    }
}

impl StepKind {
    pub fn is_adsorption(&self) -> bool {
        !matches!(self, StepKind::SurfaceReaction)
    }
}

/// What an adsorption step needs besides its transition state.
#[derive(Debug, Clone, PartialEq)]
pub struct AdsorptionData {
    /// Name of the adsorbing gas species.
    pub gas_species: String,
    /// Adsorption-site area [Å²].
    pub site_area: f64,
    /// Vibrational modes of the adsorbed state [meV].
    pub vib_ads: Vec<f64>,
    /// Vibrational modes of the gas molecule [meV].
    pub vib_gas: Vec<f64>,
}

/// Kind-specific data of a step: exactly one rate path per kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RateData {
    NonActivatedAdsorption(AdsorptionData),
    ActivatedAdsorption {
        adsorption: AdsorptionData,
        vib_ts: Vec<f64>,
    },
    SurfaceReaction {
        vib_initial: Vec<f64>,
        vib_ts: Vec<f64>,
        vib_final: Vec<f64>,
    },
}

impl RateData {
    pub fn kind(&self) -> StepKind {
        match self {
            RateData::NonActivatedAdsorption(_) => StepKind::NonActivatedAdsorption,
            RateData::ActivatedAdsorption { .. } => StepKind::ActivatedAdsorption,
            RateData::SurfaceReaction { .. } => StepKind::SurfaceReaction,
        }
    }

    pub fn adsorption(&self) -> Option<&AdsorptionData> {
        match self {
            RateData::NonActivatedAdsorption(a) => Some(a),
            RateData::ActivatedAdsorption { adsorption, .. } => Some(adsorption),
            RateData::SurfaceReaction { .. } => None,
        }
    }

    pub fn gas_species(&self) -> Option<&str> {
        self.adsorption().map(|a| a.gas_species.as_str())
    }
}

/// One reversible elementary step.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionStepRecord {
    pub name: String,
    pub sites: u32,
    /// Present iff `sites > 1`.
    pub neighboring: Option<String>,
    pub initial: LatticeState,
    pub final_state: LatticeState,
    pub site_types: Option<String>,
    /// Activation energy [eV].
    pub activation_energy: f64,
    pub prox_factor: Option<f64>,
    pub angles: Option<String>,
    pub rate: RateData,
    pub scaling: Option<ScalingFactor>,
    pub stiffness_scalable: bool,
}

impl Named for ReactionStepRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl ReactionStepRecord {
    pub fn kind(&self) -> StepKind {
        self.rate.kind()
    }
}

fn modes(list: Option<&NumberList>, row: &str, field: &'static str) -> Result<Vec<f64>, TableError> {
    list.ok_or_else(|| TableError::MissingField { row: row.to_string(), field })?
        .values(row, field)
}

fn adsorption_data(row: &ReactionRow) -> Result<AdsorptionData, TableError> {
    let name = row.name.as_str();
    let gas_species = present_text(row.gas_species.as_ref())
        .ok_or_else(|| TableError::MissingField { row: name.to_string(), field: "gas_species" })?;
    let site_area = required(row.site_area, name, "A_site")?;
    if site_area <= 0. {
        return Err(TableError::InvalidField {
            row: name.to_string(),
            field: "A_site",
            reason: format!("must be positive (got {})", site_area),
        });
    }
    Ok(AdsorptionData {
        gas_species,
        site_area,
        vib_ads: modes(row.vib_list_ads.as_ref(), name, "vib_list_ads")?,
        vib_gas: modes(row.vib_list_gas.as_ref(), name, "vib_list_gas")?,
    })
}

impl TryFrom<ReactionRow> for ReactionStepRecord {
    type Error = TableError;

    fn try_from(row: ReactionRow) -> Result<Self, Self::Error> {
        let name = row.name.as_str();
        let kind: StepKind = row.kind.as_deref()
            .ok_or_else(|| TableError::MissingField { row: name.to_string(), field: "type" })?
            .parse()
            .map_err(|e: TableError| e.in_row(name))?;

        let sites = row.sites
            .ok_or_else(|| TableError::MissingField { row: name.to_string(), field: "sites" })?;
        let neighboring = present_text(row.neighboring.as_ref());
        check_shape(name, sites, neighboring.as_deref())?;

        let initial = row.initial.as_ref()
            .ok_or_else(|| TableError::MissingField { row: name.to_string(), field: "initial" })?
            .values();
        let final_state = row.final_state.as_ref()
            .ok_or_else(|| TableError::MissingField { row: name.to_string(), field: "final" })?
            .values();
        let initial = LatticeState::parse(name, &initial)?;
        let final_state = LatticeState::parse(name, &final_state)?;
        for (field, state) in [("initial", &initial), ("final", &final_state)] {
            if state.len() != sites as usize {
                return Err(TableError::InvalidField {
                    row: name.to_string(),
                    field,
                    reason: format!("has {} entries for {} sites", state.len(), sites),
                });
            }
        }

        let rate = match kind {
            StepKind::NonActivatedAdsorption => RateData::NonActivatedAdsorption(adsorption_data(&row)?),
            StepKind::ActivatedAdsorption => RateData::ActivatedAdsorption {
                adsorption: adsorption_data(&row)?,
                vib_ts: modes(row.vib_list_ts.as_ref(), name, "vib_list_ts")?,
            },
            StepKind::SurfaceReaction => RateData::SurfaceReaction {
                vib_initial: modes(row.vib_list_initial.as_ref(), name, "vib_list_initial")?,
                vib_ts: modes(row.vib_list_ts.as_ref(), name, "vib_list_ts")?,
                vib_final: modes(row.vib_list_final.as_ref(), name, "vib_list_final")?,
            },
        };

        if let Some(scaling) = &row.scaling {
            scaling.validate(name)?;
        }
        debug!("Parsed {} step '{}' spanning {} site(s)", kind, name, sites);

        Ok(ReactionStepRecord {
            sites,
            neighboring,
            initial,
            final_state,
            site_types: present_text(row.site_types.as_ref()),
            activation_energy: required(row.activ_eng, name, "activ_eng")?,
            prox_factor: present(row.prox_factor),
            angles: present_text(row.angles.as_ref()),
            rate,
            scaling: row.scaling,
            stiffness_scalable: row.stiffness_scalable,
            name: row.name,
        })
    }
}

pub type ReactionTable = Table<ReactionStepRecord>;

impl TryFrom<Vec<ReactionRow>> for ReactionTable {
    type Error = TableError;

    fn try_from(rows: Vec<ReactionRow>) -> Result<Self, Self::Error> {
        rows.into_iter()
            .map(ReactionStepRecord::try_from)
            .collect::<Result<Vec<_>, _>>()
            .and_then(Table::try_from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextList;

    fn surface_row() -> ReactionRow {
        ReactionRow {
            name: "CO_oxidation".into(),
            kind: Some("surface_reaction".into()),
            sites: Some(2),
            neighboring: Some("1-2".into()),
            initial: Some(TextList::from(vec!["1 CO* 1", "2 O* 1"])),
            final_state: Some(TextList::from(vec!["1 * 1", "2 * 1"])),
            activ_eng: Some(0.95),
            vib_list_initial: Some(NumberList::Values(vec![300.0, 200.0])),
            vib_list_ts: Some(NumberList::Values(vec![250.0])),
            vib_list_final: Some(NumberList::Values(vec![400.0, 100.0, 50.0])),
            ..Default::default()
        }
    }

    fn adsorption_row() -> ReactionRow {
        ReactionRow {
            name: "CO_adsorption".into(),
            kind: Some("non_activated_adsorption".into()),
            gas_species: Some("CO".into()),
            sites: Some(1),
            initial: Some(TextList::from(vec!["1 * 1"])),
            final_state: Some(TextList::from(vec!["1 CO* 1"])),
            activ_eng: Some(0.0),
            site_area: Some(10.0),
            vib_list_ads: Some(NumberList::Values(vec![])),
            vib_list_gas: Some(NumberList::Values(vec![])),
            ..Default::default()
        }
    }

    #[test]
    fn test_step_kind_parsing() {
        assert_eq!("surface_reaction".parse::<StepKind>().unwrap(), StepKind::SurfaceReaction);
        assert_eq!(" activated_adsorption ".parse::<StepKind>().unwrap(), StepKind::ActivatedAdsorption);
        assert_eq!(StepKind::NonActivatedAdsorption.to_string(), "non_activated_adsorption");
        assert!(StepKind::ActivatedAdsorption.is_adsorption());
        assert!(!StepKind::SurfaceReaction.is_adsorption());
    }

    #[test]
    fn test_surface_reaction_from_row() {
        let step = ReactionStepRecord::try_from(surface_row()).unwrap();
        assert_eq!(step.kind(), StepKind::SurfaceReaction);
        assert_eq!(step.initial.len(), 2);
        assert_eq!(step.final_state[1].to_string(), "2 * 1");
        assert_eq!(step.rate.gas_species(), None);
        assert_eq!(step.prox_factor, None);
        assert!(!step.stiffness_scalable);
    }

    #[test]
    fn test_surface_reaction_missing_ts_names_step() {
        let mut row = surface_row();
        row.vib_list_ts = None;
        let err = ReactionStepRecord::try_from(row).unwrap_err();
        assert_eq!(err, TableError::MissingField { row: "CO_oxidation".into(), field: "vib_list_ts" });
        assert!(err.to_string().contains("CO_oxidation"));
        assert!(err.to_string().contains("vib_list_ts"));
    }

    #[test]
    fn test_unknown_step_kind_names_step() {
        let mut row = surface_row();
        row.kind = Some("desorption".into());
        let err = ReactionStepRecord::try_from(row).unwrap_err();
        assert_eq!(err, TableError::UnknownStepKind { row: "CO_oxidation".into(), kind: "desorption".into() });
    }

    #[test]
    fn test_adsorption_requires_gas_linkage() {
        let step = ReactionStepRecord::try_from(adsorption_row()).unwrap();
        assert_eq!(step.rate.gas_species(), Some("CO"));
        assert_eq!(step.rate.adsorption().unwrap().site_area, 10.0);

        let mut row = adsorption_row();
        row.gas_species = None;
        assert_eq!(ReactionStepRecord::try_from(row).unwrap_err(),
            TableError::MissingField { row: "CO_adsorption".into(), field: "gas_species" });

        let mut row = adsorption_row();
        row.vib_list_gas = None;
        assert_eq!(ReactionStepRecord::try_from(row).unwrap_err(),
            TableError::MissingField { row: "CO_adsorption".into(), field: "vib_list_gas" });

        let mut row = adsorption_row();
        row.kind = Some("activated_adsorption".into());
        assert_eq!(ReactionStepRecord::try_from(row).unwrap_err(),
            TableError::MissingField { row: "CO_adsorption".into(), field: "vib_list_ts" });
    }

    #[test]
    fn test_optional_fields_nan_is_absent() {
        let mut row = surface_row();
        row.prox_factor = Some(f64::NAN);
        row.angles = Some("nan".into());
        let step = ReactionStepRecord::try_from(row).unwrap();
        assert_eq!(step.prox_factor, None);
        assert_eq!(step.angles, None);

        let mut row = surface_row();
        row.prox_factor = Some(0.2);
        row.scaling = Some(ScalingFactor::Decades(2));
        let step = ReactionStepRecord::try_from(row).unwrap();
        assert_eq!(step.prox_factor, Some(0.2));
        assert_eq!(step.scaling, Some(ScalingFactor::Decades(2)));
    }

    #[test]
    fn test_reaction_table_order() {
        let table = ReactionTable::try_from(vec![surface_row(), adsorption_row()]).unwrap();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["CO_oxidation", "CO_adsorption"]);
    }
}
