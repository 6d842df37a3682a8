//! Raw, unvalidated rows as they come out of tabular input.
//!
//! Optional columns are `Option`s; a missing column, a JSON `null` and a
//! NaN are all treated as absent. Lists are accepted either as arrays or in
//! the Python-literal form spreadsheets tend to hold (`"[100.0, 250.5]"`,
//! `"['1 CO* 1', '2 * 1']"`).

use serde::{Deserialize, Serialize};

use crate::TableError;

/// A numeric list column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberList {
    Values(Vec<f64>),
    Literal(String),
}

impl From<Vec<f64>> for NumberList {
    fn from(values: Vec<f64>) -> Self {
        NumberList::Values(values)
    }
}

/// A text list column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextList {
    Values(Vec<String>),
    Literal(String),
}

impl<S: Into<String>> From<Vec<S>> for TextList {
    fn from(values: Vec<S>) -> Self {
        TextList::Values(values.into_iter().map(Into::into).collect())
    }
}

fn literal_items(s: &str) -> impl Iterator<Item = &str> {
    let s = s.trim();
    let inner = s.strip_prefix('[').and_then(|x| x.strip_suffix(']'))
        .or_else(|| s.strip_prefix('(').and_then(|x| x.strip_suffix(')')))
        .unwrap_or(s);
    inner.split(',').map(str::trim).filter(|x| !x.is_empty())
}

impl NumberList {
    pub fn values(&self, row: &str, field: &'static str) -> Result<Vec<f64>, TableError> {
        let values = match self {
            NumberList::Values(v) => v.clone(),
            NumberList::Literal(s) => literal_items(s)
                .map(|x| x.parse::<f64>().map_err(|_| TableError::InvalidField {
                    row: row.to_string(),
                    field,
                    reason: format!("contains non-numeric item '{}'", x),
                }))
                .collect::<Result<Vec<_>, _>>()?,
        };
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(TableError::InvalidField {
                row: row.to_string(),
                field,
                reason: format!("contains non-finite value {}", bad),
            });
        }
        Ok(values)
    }
}

impl TextList {
    pub fn values(&self) -> Vec<String> {
        match self {
            TextList::Values(v) => v.clone(),
            TextList::Literal(s) => literal_items(s)
                .map(|x| x.trim_matches(|c| c == '\'' || c == '"').to_string())
                .collect(),
        }
    }
}

/// `Some` only for a value that is present and not NaN.
pub(crate) fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Like [`present`], but an absent value is a schema error.
pub(crate) fn required(value: Option<f64>, row: &str, field: &'static str) -> Result<f64, TableError> {
    present(value).ok_or_else(|| TableError::MissingField { row: row.to_string(), field })
}

/// Treat blank text like a missing column.
pub(crate) fn present_text(value: Option<&String>) -> Option<String> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty() && *s != "nan").map(str::to_string)
}

/// Scaling applied uniformly to both directions of a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingFactor {
    /// Scale down by `10^n`.
    Decades(u32),
    /// Multiply by an explicit positive factor.
    Multiplier(f64),
}

impl ScalingFactor {
    pub fn multiplier(&self) -> f64 {
        match self {
            ScalingFactor::Decades(n) => 10f64.powf(-f64::from(*n)),
            ScalingFactor::Multiplier(x) => *x,
        }
    }

    /// The factor must be positive and finite; huge decade counts underflow to zero.
    pub fn validate(&self, row: &str) -> Result<(), TableError> {
        let m = self.multiplier();
        if m > 0. && m.is_finite() {
            Ok(())
        } else {
            Err(TableError::InvalidField {
                row: row.to_string(),
                field: "scaling",
                reason: format!("must be a positive finite factor (got {})", m),
            })
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GasSpeciesRow {
    pub name: String,
    #[serde(alias = "gas_molec_weight")]
    pub molecular_weight: Option<f64>,
    pub degeneracy: Option<u32>,
    #[serde(alias = "sym_number")]
    pub symmetry_number: Option<u32>,
    #[serde(alias = "inertia_list")]
    pub inertia: Option<NumberList>,
    #[serde(alias = "gas_energy")]
    pub energy: Option<f64>,
    #[serde(alias = "gas_molar_frac")]
    pub molar_fraction: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterRow {
    pub name: String,
    pub sites: Option<u32>,
    pub neighboring: Option<String>,
    pub lattice_state: Option<TextList>,
    pub site_types: Option<String>,
    pub graph_multiplicity: Option<u32>,
    pub angles: Option<String>,
    pub cluster_eng: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionRow {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(alias = "molecule")]
    pub gas_species: Option<String>,
    pub sites: Option<u32>,
    pub neighboring: Option<String>,
    pub initial: Option<TextList>,
    #[serde(rename = "final")]
    pub final_state: Option<TextList>,
    pub site_types: Option<String>,
    pub activ_eng: Option<f64>,
    pub prox_factor: Option<f64>,
    pub angles: Option<String>,
    #[serde(rename = "A_site")]
    pub site_area: Option<f64>,
    pub vib_list_ads: Option<NumberList>,
    pub vib_list_gas: Option<NumberList>,
    pub vib_list_ts: Option<NumberList>,
    pub vib_list_initial: Option<NumberList>,
    pub vib_list_final: Option<NumberList>,
    pub scaling: Option<ScalingFactor>,
    #[serde(default)]
    pub stiffness_scalable: bool,
}
