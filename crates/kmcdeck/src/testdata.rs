//! A small CO-on-metal deck shared by the unit tests.

use crate::SimulationSettings;
use crate::TagStyle;
use crate::input_parsers::{read_deck_string, DeckInput};

pub const DECK_JSON: &str = r#"{
    "gas_species": [
        {
            "name": "CO", "molecular_weight": 28.0, "degeneracy": 1,
            "symmetry_number": 1, "inertia": [1.45],
            "energy": 2.14, "molar_fraction": 0.8
        },
        {
            "name": "O2", "gas_molec_weight": 32.0, "degeneracy": 3,
            "sym_number": 2, "inertia_list": "[1.94]",
            "gas_energy": 0.0, "gas_molar_frac": 0.2
        }
    ],
    "clusters": [
        {
            "name": "CO_point", "sites": 1, "lattice_state": ["1 CO* 1"],
            "site_types": "top", "cluster_eng": -1.5
        },
        {
            "name": "O_point", "sites": 1, "neighboring": null, "lattice_state": ["1 O* 1"],
            "site_types": "top", "cluster_eng": -0.75
        },
        {
            "name": "O2_bridge", "sites": 2, "neighboring": "1-2",
            "lattice_state": "['1 O2* 1', '2 O2* 2']",
            "site_types": "top top", "graph_multiplicity": 2, "cluster_eng": -0.42
        }
    ],
    "steps": [
        {
            "name": "CO_adsorption", "type": "non_activated_adsorption", "molecule": "CO",
            "sites": 1, "initial": ["1 * 1"], "final": ["1 CO* 1"], "site_types": "top",
            "activ_eng": 0.0, "prox_factor": null, "A_site": 10.0,
            "vib_list_ads": [], "vib_list_gas": "[]"
        },
        {
            "name": "CO_diffusion", "type": "surface_reaction", "sites": 2, "neighboring": "1-2",
            "initial": ["1 CO* 1", "2 * 1"], "final": ["1 * 1", "2 CO* 1"],
            "site_types": "top top", "activ_eng": 0.83, "prox_factor": 0.5,
            "vib_list_initial": [300.0, 200.0], "vib_list_ts": "[250.0]",
            "vib_list_final": [400, 100, 50], "scaling": { "decades": 3 }
        }
    ],
    "tags": {
        "snapshots": "on time 0.1",
        "max_steps": "infinity",
        "max_time": 250.0
    }
}"#;

pub fn deck_input() -> DeckInput {
    read_deck_string(DECK_JSON).unwrap()
}

pub fn settings() -> SimulationSettings {
    SimulationSettings {
        temperature: 300.0,
        pressure: 1.0,
        random_seed: Some(123456),
        tags: Vec::new(),
        tag_style: TagStyle::TabAligned,
    }
}
