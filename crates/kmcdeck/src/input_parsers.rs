use std::fs::File;
use std::io::{stdin, BufRead, BufReader, Cursor};
use std::path::Path;

use log::info;
use paste::paste;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use kd_tables::ClusterRow;
use kd_tables::ClusterTable;
use kd_tables::GasSpeciesRow;
use kd_tables::GasSpeciesTable;
use kd_tables::ReactionRow;
use kd_tables::ReactionTable;

use crate::Deck;
use crate::DeckError;
use crate::SimulationSettings;

/// Raw deck tables as read from JSON.
///
/// `tags` is a JSON object; its keys are written to `simulation_input.dat`
/// in the order they appear in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckInput {
    #[serde(default)]
    pub gas_species: Vec<GasSpeciesRow>,
    #[serde(default)]
    pub clusters: Vec<ClusterRow>,
    #[serde(default)]
    pub steps: Vec<ReactionRow>,
    #[serde(default)]
    pub tags: Map<String, Value>,
}

fn tag_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl DeckInput {
    /// Validate all rows and build a [`Deck`]. Input tags come first,
    /// followed by the tags of `settings`.
    pub fn into_deck(self, mut settings: SimulationSettings) -> Result<Deck, DeckError> {
        let gas_species = GasSpeciesTable::try_from(self.gas_species)?;
        let clusters = ClusterTable::try_from(self.clusters)?;
        let steps = ReactionTable::try_from(self.steps)?;

        let mut tags: Vec<(String, String)> = self.tags.into_iter()
            .map(|(k, v)| (k, tag_value(v)))
            .collect();
        tags.append(&mut settings.tags);
        settings.tags = tags;

        Deck::new(gas_species, clusters, steps, settings)
    }
}

pub fn read_deck<R: BufRead>(reader: R) -> Result<DeckInput, DeckError> {
    let input: DeckInput = serde_json::from_reader(reader)?;
    info!("Read {} gas species, {} clusters, {} steps",
        input.gas_species.len(), input.clusters.len(), input.steps.len());
    Ok(input)
}

/// Generate input adapters for a base parser function `fn base<R: BufRead>(R) -> Result<T, E>`
/// with `E: From<std::io::Error>`.
///
/// This expands into:
/// - `base_string(&str)`
/// - `base_file<P: AsRef<Path>>(P)`
/// - `base_stdin()`
/// - `base_input(&str)`  (dispatches "-" → stdin, otherwise → file)
macro_rules! define_input_variants {
    ($base:ident, $ret:ty) => {
        paste! {
            /// Read from a string buffer.
            pub fn [<$base _string>](s: &str) -> $ret {
                $base(Cursor::new(s))
            }

            /// Read from a file path.
            pub fn [<$base _file>]<P: AsRef<Path>>(path: P) -> $ret {
                let reader = BufReader::new(File::open(path)?);
                $base(reader)
            }

            /// Read from stdin.
            pub fn [<$base _stdin>]() -> $ret {
                let reader = BufReader::new(stdin());
                $base(reader)
            }

            /// Read either from stdin ("-") or a file path.
            pub fn [<$base _input>](s: &str) -> $ret {
                if s == "-" {
                    [<$base _stdin>]()
                } else {
                    [<$base _file>](s)
                }
            }
        }
    };
}

type DeckInputResult = Result<DeckInput, DeckError>;

define_input_variants!(read_deck, DeckInputResult);

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use kd_tables::{NumberList, TableError, TextList};
    use crate::testdata::{DECK_JSON, settings};

    #[test]
    fn test_read_deck_string() {
        let input = read_deck_string(DECK_JSON).unwrap();
        assert_eq!(input.gas_species.len(), 2);
        assert_eq!(input.clusters.len(), 3);
        assert_eq!(input.steps.len(), 2);

        // Aliased column names.
        assert_eq!(input.gas_species[1].molecular_weight, Some(32.0));
        assert_eq!(input.gas_species[1].symmetry_number, Some(2));
        assert_eq!(input.steps[0].gas_species.as_deref(), Some("CO"));
        assert_eq!(input.steps[0].site_area, Some(10.0));

        // Python-literal lists stay literal until validation.
        assert_eq!(input.gas_species[1].inertia, Some(NumberList::Literal("[1.94]".into())));
        assert_eq!(input.steps[0].vib_list_gas, Some(NumberList::Literal("[]".into())));
        assert_eq!(input.steps[1].vib_list_initial, Some(NumberList::Values(vec![300.0, 200.0])));
        assert!(matches!(input.clusters[2].lattice_state, Some(TextList::Literal(_))));

        // Absent and null fields.
        assert_eq!(input.steps[0].prox_factor, None);
        assert_eq!(input.steps[0].neighboring, None);
        assert_eq!(input.clusters[0].graph_multiplicity, None);

        let keys: Vec<&str> = input.tags.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["snapshots", "max_steps", "max_time"]);
    }

    #[test]
    fn test_into_deck_tags() {
        let s = SimulationSettings {
            tags: vec![("wall_time".into(), "60".into())],
            ..settings()
        };
        let deck = read_deck_string(DECK_JSON).unwrap().into_deck(s).unwrap();
        let tags: Vec<(&str, &str)> = deck.settings().tags.iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(tags, vec![
            ("snapshots", "on time 0.1"),
            ("max_steps", "infinity"),
            ("max_time", "250.0"),
            ("wall_time", "60"),
        ]);
    }

    #[test]
    fn test_literal_lists_are_validated() {
        let json = r#"{
            "steps": [{
                "name": "bad_row", "type": "surface_reaction", "sites": 1,
                "initial": ["1 H* 1"], "final": ["1 H* 1"], "activ_eng": 0.1,
                "vib_list_initial": "[100.0, abc]", "vib_list_ts": [], "vib_list_final": []
            }]
        }"#;
        let err = read_deck_string(json).unwrap().into_deck(settings()).unwrap_err();
        assert!(matches!(err, DeckError::Table(TableError::InvalidField { ref row, field: "vib_list_initial", .. })
            if row == "bad_row"));
    }

    #[test]
    fn test_duplicate_names() {
        let mut input = read_deck_string(DECK_JSON).unwrap();
        let copy = input.clusters[0].clone();
        input.clusters.push(copy);
        let err = input.into_deck(settings()).unwrap_err();
        assert!(matches!(err, DeckError::Table(TableError::DuplicateName(ref n)) if n == "CO_point"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(read_deck_string("{ \"steps\": 5 }"), Err(DeckError::Json(_))));
    }

    #[test]
    fn test_read_deck_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DECK_JSON.as_bytes()).unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let input = read_deck_input(&path).unwrap();
        assert_eq!(input, read_deck_string(DECK_JSON).unwrap());

        let missing = read_deck_file("/definitely/not/here.json");
        assert!(matches!(missing, Err(DeckError::Io(_))));
    }
}
