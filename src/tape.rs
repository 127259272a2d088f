//! A sparse, two-way-infinite tape.
//!
//! Only cells that were part of the input or have been written are stored. Every
//! other position reads as [`BLANK_SYMBOL`].

use crate::types::BLANK_SYMBOL;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tape {
    cells: BTreeMap<i64, char>,
}

impl Tape {
    /// Creates a tape holding `input` at positions `0..input.len()`.
    pub fn new(input: &str) -> Self {
        Self {
            cells: (0..).zip(input.chars()).collect(),
        }
    }

    /// Reads the symbol at `position`, or the blank symbol if the cell was never written.
    pub fn read(&self, position: i64) -> char {
        self.cells.get(&position).copied().unwrap_or(BLANK_SYMBOL)
    }

    /// Writes `symbol` at `position`, materializing the cell.
    ///
    /// Blank writes are kept so the cell stays within the tape contents.
    pub fn write(&mut self, position: i64, symbol: char) {
        self.cells.insert(position, symbol);
    }

    /// Lowest and highest materialized positions, or `None` for an empty tape.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        let (&min, _) = self.cells.first_key_value()?;
        let (&max, _) = self.cells.last_key_value()?;
        Some((min, max))
    }

    /// Number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Joins the materialized range into a string in position order.
    ///
    /// Positions inside the range that were never written appear as blanks.
    pub fn contents(&self) -> String {
        match self.bounds() {
            Some((min, max)) => (min..=max).map(|position| self.read(position)).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.contents())
    }
}
