use log::debug;
use rand::rng;
use rand::Rng;

use kd_tables::ClusterTable;
use kd_tables::GasSpeciesTable;
use kd_tables::ReactionTable;
use kd_tables::ReactionStepRecord;
use kd_tables::ScalingFactor;
use kd_tables::StepKind;
use kd_kinetics::PreExponentialModel;
use kd_kinetics::PreExponentials;

use crate::DeckError;
use crate::serializer::TagStyle;
use crate::serializer::MechanismOptions;

/// Seeds are drawn from this range unless one is fixed.
pub const SEED_RANGE: std::ops::RangeInclusive<u32> = 100_000..=999_999;

/// Keywords of `simulation_input.dat` the deck writes itself.
pub const RESERVED_TAGS: [&str; 14] = [
    "random_seed",
    "temperature",
    "pressure",
    "n_gas_species",
    "gas_specs_names",
    "gas_energies",
    "gas_molec_weights",
    "gas_molar_fracs",
    "n_surf_species",
    "surf_specs_names",
    "surf_specs_dent",
    "no_restart",
    "finish",
    "end",
];

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSettings {
    /// Kelvin.
    pub temperature: f64,
    /// Bar.
    pub pressure: f64,
    pub random_seed: Option<u32>,
    /// Free-form `simulation_input.dat` keywords, written in this order.
    pub tags: Vec<(String, String)>,
    pub tag_style: TagStyle,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            temperature: 300.0,
            pressure: 1.0,
            random_seed: None,
            tags: Vec::new(),
            tag_style: TagStyle::default(),
        }
    }
}

/// The complete input of one simulator job.
#[derive(Debug, Clone)]
pub struct Deck {
    gas_species: GasSpeciesTable,
    clusters: ClusterTable,
    steps: ReactionTable,
    settings: SimulationSettings,
    random_seed: u32,
}

/// Pre-exponential factors of one step, as they end up in the mechanism.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRates {
    pub name: String,
    pub kind: StepKind,
    pub scaling: Option<ScalingFactor>,
    pub rates: PreExponentials,
}

impl Deck {
    /// Cross-check the tables and fix the random seed of this deck.
    pub fn new(
        gas_species: GasSpeciesTable,
        clusters: ClusterTable,
        steps: ReactionTable,
        settings: SimulationSettings,
    ) -> Result<Self, DeckError> {
        for step in steps.iter() {
            if let Some(species) = step.rate.gas_species() && !gas_species.contains(species) {
                return Err(DeckError::UnknownGasSpecies {
                    step: step.name.clone(),
                    species: species.to_string(),
                });
            }
        }
        if let Some((key, _)) = settings.tags.iter().find(|(k, _)| RESERVED_TAGS.contains(&k.as_str())) {
            return Err(DeckError::ReservedTag(key.clone()));
        }

        let random_seed = settings.random_seed
            .unwrap_or_else(|| rng().random_range(SEED_RANGE));
        debug!("Deck with {} gas species, {} clusters, {} steps (seed {})",
            gas_species.len(), clusters.len(), steps.len(), random_seed);

        Ok(Self { gas_species, clusters, steps, settings, random_seed })
    }

    pub fn gas_species(&self) -> &GasSpeciesTable {
        &self.gas_species
    }

    pub fn clusters(&self) -> &ClusterTable {
        &self.clusters
    }

    pub fn steps(&self) -> &ReactionTable {
        &self.steps
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn temperature(&self) -> f64 {
        self.settings.temperature
    }

    pub fn random_seed(&self) -> u32 {
        self.random_seed
    }

    /// Scaled pre-exponential factors of `step` at the deck temperature.
    pub fn pre_exponentials<M: PreExponentialModel>(
        &self,
        model: &M,
        step: &ReactionStepRecord,
        scaling: Option<&ScalingFactor>,
    ) -> Result<PreExponentials, DeckError> {
        let gas = step.rate.gas_species().and_then(|name| self.gas_species.get(name));
        Ok(model.scaled_pre_exponentials(step, gas, self.temperature(), scaling)?)
    }

    /// Forward, reverse and ratio of every step, in mechanism order.
    pub fn rate_table<M: PreExponentialModel>(
        &self,
        model: &M,
        options: &MechanismOptions,
    ) -> Result<Vec<StepRates>, DeckError> {
        self.steps.iter().map(|step| {
            let scaling = options.scaling_for(step);
            if let Some(s) = &scaling {
                s.validate(&step.name)?;
            }
            Ok(StepRates {
                name: step.name.clone(),
                kind: step.kind(),
                scaling,
                rates: self.pre_exponentials(model, step, scaling.as_ref())?,
            })
        }).collect()
    }
}
