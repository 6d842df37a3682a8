//! Renders a [`Deck`] into the fixed-format simulator input files.
//!
//! Every writer is generic over [`std::io::Write`] and emits records in
//! table order, so the same deck always renders to the same bytes.

mod format;
mod simulation;
mod mechanism;
mod energetics;

pub use format::*;
pub use simulation::*;
pub use mechanism::*;
pub use energetics::*;

use kd_kinetics::PreExponentialModel;

use crate::Deck;
use crate::DeckError;

pub const SIMULATION_INPUT: &str = "simulation_input.dat";
pub const MECHANISM_INPUT: &str = "mechanism_input.dat";
pub const ENERGETICS_INPUT: &str = "energetics_input.dat";
pub const LATTICE_INPUT: &str = "lattice_input.dat";

/// The three generated files of a deck, held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDeck {
    pub simulation: Vec<u8>,
    pub mechanism: Vec<u8>,
    pub energetics: Vec<u8>,
}

impl RenderedDeck {
    pub fn files(&self) -> [(&'static str, &[u8]); 3] {
        [
            (SIMULATION_INPUT, self.simulation.as_slice()),
            (MECHANISM_INPUT, self.mechanism.as_slice()),
            (ENERGETICS_INPUT, self.energetics.as_slice()),
        ]
    }
}

pub struct DeckSerializer<'a, M> {
    deck: &'a Deck,
    model: &'a M,
    options: &'a MechanismOptions,
}

impl<'a, M: PreExponentialModel> DeckSerializer<'a, M> {
    pub fn new(deck: &'a Deck, model: &'a M, options: &'a MechanismOptions) -> Self {
        Self { deck, model, options }
    }

    /// Render all generated files. Fails before producing anything if a
    /// single step cannot be evaluated.
    pub fn render(&self) -> Result<RenderedDeck, DeckError> {
        let mut mechanism = Vec::new();
        write_mechanism(&mut mechanism, self.deck, self.model, self.options)?;

        let mut simulation = Vec::new();
        write_simulation(&mut simulation, self.deck)?;

        let mut energetics = Vec::new();
        write_energetics(&mut energetics, self.deck.clusters())?;

        Ok(RenderedDeck { simulation, mechanism, energetics })
    }
}
