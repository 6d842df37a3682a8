use std::fmt;
use std::ops::Deref;

use crate::TableError;

/// Marks an empty site in a lattice state.
pub const EMPTY_SITE: &str = "*";
/// Matches anything in a lattice state.
pub const WILDCARD: &str = "&";

/// Site or dentate index column: a 1-based index or the wildcard `&`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Index(u32),
    Any,
}

impl TryFrom<&str> for Slot {
    type Error = TableError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s == WILDCARD {
            return Ok(Slot::Any);
        }
        match s.parse::<u32>() {
            Ok(i) if i > 0 => Ok(Slot::Index(i)),
            _ => Err(TableError::InvalidLatticeEntry { row: String::new(), entry: s.to_string() }),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Index(i) => write!(f, "{}", i),
            Slot::Any => write!(f, "{}", WILDCARD),
        }
    }
}

/// One line of a lattice state, e.g. `1 CO* 1`: site index, species,
/// dentate index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LatticeStateEntry {
    pub site: Slot,
    pub species: String,
    pub dentate: Slot,
}

impl LatticeStateEntry {
    /// True if the entry holds an actual adsorbate (not empty, not a wildcard).
    pub fn is_adsorbate(&self) -> bool {
        self.species != EMPTY_SITE && self.species != WILDCARD
    }

    pub fn dentate_index(&self) -> Option<u32> {
        match self.dentate {
            Slot::Index(i) => Some(i),
            Slot::Any => None,
        }
    }
}

impl TryFrom<&str> for LatticeStateEntry {
    type Error = TableError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let invalid = || TableError::InvalidLatticeEntry {
            row: String::new(),
            entry: s.to_string(),
        };
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [site, species, dentate] = tokens.as_slice() else {
            return Err(invalid());
        };
        Ok(LatticeStateEntry {
            site: Slot::try_from(*site).map_err(|_| invalid())?,
            species: species.to_string(),
            dentate: Slot::try_from(*dentate).map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for LatticeStateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.site, self.species, self.dentate)
    }
}

/// An ordered lattice state. Order is significant and preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatticeState(pub Vec<LatticeStateEntry>);

impl Deref for LatticeState {
    type Target = [LatticeStateEntry];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl LatticeState {
    /// Parse all entries of a row, naming the row on failure.
    pub fn parse<S: AsRef<str>>(row: &str, entries: &[S]) -> Result<Self, TableError> {
        entries.iter()
            .map(|e| LatticeStateEntry::try_from(e.as_ref()).map_err(|err| err.in_row(row)))
            .collect::<Result<Vec<_>, _>>()
            .map(LatticeState)
    }
}
