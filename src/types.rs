//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including states, transitions, execution outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The blank symbol read from any tape cell that has never been written.
pub const BLANK_SYMBOL: char = ' ';

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// Parses a direction letter (`L` or `R`).
    pub fn from_symbol(symbol: char) -> Result<Self, TuringMachineError> {
        match symbol {
            'L' => Ok(Direction::Left),
            'R' => Ok(Direction::Right),
            other => Err(TuringMachineError::InvalidDirection(other)),
        }
    }

    /// The change applied to the head position when moving in this direction.
    pub fn offset(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// The control state of a machine.
///
/// `Halted` is the terminal sentinel entered when no transition is defined for the
/// current state and symbol. It never belongs to any set of accepting states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    /// A named state from the program's finite state set.
    Active(String),
    /// No further transitions are possible.
    Halted,
}

impl State {
    /// Returns the state label, or `None` for the halted sentinel.
    pub fn label(&self) -> Option<&str> {
        match self {
            State::Active(label) => Some(label),
            State::Halted => None,
        }
    }

    pub fn is_halted(&self) -> bool {
        matches!(self, State::Halted)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Active(label) => f.write_str(label),
            State::Halted => f.write_str("halted"),
        }
    }
}

impl From<&str> for State {
    fn from(label: &str) -> Self {
        State::Active(label.to_string())
    }
}

/// Represents a single transition rule for a Turing Machine.
///
/// The rule applies when the machine is in the state it is keyed under and reads the
/// symbol it is keyed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The next state the machine transitions to.
    pub next_state: String,
    /// The symbol written at the head position.
    pub write: char,
    /// The direction the head moves after writing.
    pub direction: Direction,
}

impl Transition {
    pub fn new(next_state: impl Into<String>, write: char, direction: Direction) -> Self {
        Self {
            next_state: next_state.into(),
            write,
            direction,
        }
    }
}

/// Represents the outcome of a Turing Machine execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine applied a transition and may continue.
    Continue,
    /// The machine is halted (no transition was defined for the current state and symbol).
    Halt,
}

/// Classification of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The final state is one of the accepting states.
    Accepted,
    /// The machine halted without reaching an accepting state.
    Rejected,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accepted => f.write_str("accepted"),
            Verdict::Rejected => f.write_str("rejected"),
        }
    }
}

/// A snapshot of a machine's observable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub tape: String,
    pub head: i64,
    pub state: State,
    pub steps: usize,
    pub verdict: Verdict,
}

/// Represents the errors that can occur while building machines and validating their input.
///
/// Execution itself never fails: a missing transition is a normal halt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// A second transition was supplied for an already defined state and symbol pair.
    #[error("Duplicate transition for state {0} and symbol {1:?}")]
    DuplicateTransition(String, char),
    /// A direction letter other than `L` or `R`.
    #[error("Invalid direction: {0:?}")]
    InvalidDirection(char),
    /// The input does not match the program's alphabet.
    #[error("Input {input:?} does not match alphabet {pattern}")]
    InvalidInput { input: String, pattern: String },
    /// The alphabet pattern could not be compiled.
    #[error("Invalid alphabet pattern: {0}")]
    InvalidAlphabet(#[from] regex::Error),
    /// No built-in program has the requested name.
    #[error("Program '{0}' not found")]
    ProgramNotFound(String),
}
