use std::ops::Deref;
use ahash::AHashMap;

use crate::TableError;

/// Rows are looked up by their unique name.
pub trait Named {
    fn name(&self) -> &str;
}

/// An ordered collection of uniquely named rows. Iteration order is
/// insertion order, which is also the output order of the deck.
#[derive(Debug, Clone)]
pub struct Table<T: Named> {
    rows: Vec<T>,
    index: AHashMap<String, usize>,
}

impl<T: Named> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new(), index: AHashMap::new() }
    }
}

impl<T: Named> Deref for Table<T> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        &self.rows
    }
}

impl<T: Named> TryFrom<Vec<T>> for Table<T> {
    type Error = TableError;

    fn try_from(rows: Vec<T>) -> Result<Self, Self::Error> {
        let mut table = Table::default();
        for row in rows {
            table.push(row)?;
        }
        Ok(table)
    }
}

impl<T: Named> Table<T> {
    /// Append a row, rejecting names that are already present.
    pub fn push(&mut self, row: T) -> Result<(), TableError> {
        let name = row.name().to_string();
        if self.index.contains_key(&name) {
            return Err(TableError::DuplicateName(name));
        }
        self.index.insert(name, self.rows.len());
        self.rows.push(row);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&i| &self.rows[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.name())
    }
}
