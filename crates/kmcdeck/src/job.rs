use std::fs;
use std::path::Path;

use log::info;
use log::warn;

use kd_kinetics::PreExponentialModel;
use kd_kinetics::TransitionStateTheory;

use crate::Deck;
use crate::DeckError;
use crate::LatticeModel;
use crate::serializer::DeckSerializer;
use crate::serializer::MechanismOptions;
use crate::serializer::RenderedDeck;
use crate::serializer::LATTICE_INPUT;

/// Outcome of [`KmcJob::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Created,
    /// The target existed and was left untouched.
    AlreadyExists,
}

/// One simulator job: a deck, its lattice and the rate model evaluating it.
#[derive(Debug, Clone)]
pub struct KmcJob<M = TransitionStateTheory> {
    deck: Deck,
    lattice: LatticeModel,
    model: M,
    options: MechanismOptions,
}

impl<M: PreExponentialModel> KmcJob<M> {
    pub fn new(deck: Deck, lattice: LatticeModel, model: M, options: MechanismOptions) -> Self {
        Self { deck, lattice, model, options }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn render(&self) -> Result<RenderedDeck, DeckError> {
        DeckSerializer::new(&self.deck, &self.model, &self.options).render()
    }

    /// Write the job directory `path` with all four input files.
    ///
    /// Nothing is created unless every file renders. An existing `path` is
    /// never touched; if a write fails, the new directory is removed again.
    pub fn create<P: AsRef<Path>>(&self, path: P) -> Result<JobStatus, DeckError> {
        let path = path.as_ref();
        let rendered = self.render()?;
        let lattice = self.lattice.to_bytes();

        if path.exists() {
            warn!("{} already exists (nothing done)", path.display());
            return Ok(JobStatus::AlreadyExists);
        }
        fs::create_dir(path)?;

        let files = rendered.files().into_iter().chain([(LATTICE_INPUT, lattice.as_slice())]);
        let written: Result<(), std::io::Error> = files
            .map(|(name, bytes)| fs::write(path.join(name), bytes))
            .collect();
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_dir_all(path) {
                warn!("Could not remove incomplete job {}: {}", path.display(), cleanup);
            }
            return Err(e.into());
        }

        info!("Created job {} (T = {} K, seed {})",
            path.display(), self.deck.temperature(), self.deck.random_seed());
        Ok(JobStatus::Created)
    }

    /// As [`KmcJob::create`], but an existing target is an error.
    pub fn create_new<P: AsRef<Path>>(&self, path: P) -> Result<(), DeckError> {
        match self.create(path.as_ref())? {
            JobStatus::Created => Ok(()),
            JobStatus::AlreadyExists => Err(DeckError::TargetExists(path.as_ref().to_path_buf())),
        }
    }
}
