//! # kmcdeck
//!
//! Input decks for kinetic Monte Carlo simulations of surface chemistry,
//! with pre-exponential factors from harmonic transition-state theory.
//!
//! This crate re-exports the main functionality from its submodules.

pub mod input_parsers;
pub mod job_parsers;
pub mod serializer;

mod error;
mod deck;
mod lattice;
mod job;

#[cfg(test)]
mod testdata;

pub use error::*;
pub use deck::*;
pub use lattice::*;
pub use job::*;
pub use serializer::TagStyle;

pub mod tables {
    pub use ::kd_tables::*;
}

pub mod thermo {
    pub use ::kd_thermo::*;
}

pub mod kinetics {
    pub use ::kd_kinetics::*;
}
