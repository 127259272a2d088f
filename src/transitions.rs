//! This module provides the `TransitionTable`, the deterministic mapping from a
//! (state, symbol) pair to the transition the machine applies.

use crate::types::{Direction, Transition, TuringMachineError};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// A deterministic transition function.
///
/// Rules are grouped by state, then keyed by the symbol read. At most one transition
/// exists for any (state, symbol) pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionTable {
    rules: HashMap<String, HashMap<char, Transition>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from compact `(state, read, next_state, write, direction)` rows,
    /// where the direction is `L` or `R`.
    ///
    /// # Returns
    ///
    /// * `Err(TuringMachineError::InvalidDirection)` for an unknown direction letter.
    /// * `Err(TuringMachineError::DuplicateTransition)` if a (state, symbol) pair repeats.
    pub fn from_rules(rows: &[(&str, char, &str, char, char)]) -> Result<Self, TuringMachineError> {
        let mut table = Self::new();

        for &(state, read, next_state, write, direction) in rows {
            let direction = Direction::from_symbol(direction)?;
            table.insert(state, read, Transition::new(next_state, write, direction))?;
        }

        Ok(table)
    }

    /// Adds a transition for `state` reading `read`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the pair was not yet defined.
    /// * `Err(TuringMachineError::DuplicateTransition)` otherwise; the table is unchanged.
    pub fn insert(
        &mut self,
        state: impl Into<String>,
        read: char,
        transition: Transition,
    ) -> Result<(), TuringMachineError> {
        let state = state.into();
        match self.rules.entry(state.clone()).or_default().entry(read) {
            Entry::Occupied(_) => Err(TuringMachineError::DuplicateTransition(state, read)),
            Entry::Vacant(slot) => {
                slot.insert(transition);
                Ok(())
            }
        }
    }

    /// Chaining form of [`TransitionTable::insert`].
    pub fn rule(
        mut self,
        state: &str,
        read: char,
        next_state: &str,
        write: char,
        direction: Direction,
    ) -> Result<Self, TuringMachineError> {
        self.insert(state, read, Transition::new(next_state, write, direction))?;
        Ok(self)
    }

    /// Looks up the transition for `state` reading `symbol`.
    pub fn get(&self, state: &str, symbol: char) -> Option<&Transition> {
        self.rules.get(state)?.get(&symbol)
    }

    /// States that have at least one outgoing transition.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|(_, symbols)| !symbols.is_empty())
            .map(|(state, _)| state.as_str())
    }

    /// Total number of transitions.
    pub fn len(&self) -> usize {
        self.rules.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
