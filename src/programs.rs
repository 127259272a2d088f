use crate::alphabet::Alphabet;
use crate::machine::TuringMachine;
use crate::transitions::TransitionTable;
use crate::types::{State, TuringMachineError, BLANK_SYMBOL};
use std::collections::HashSet;
use tracing::warn;

const B: char = BLANK_SYMBOL;

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = builtin_programs();
}

/// A complete machine definition: transition table, start state, accepting states,
/// and the alphabet its inputs must match.
#[derive(Debug, Clone)]
pub struct Program {
    pub name: String,
    pub description: String,
    pub initial_state: String,
    pub accepting_states: HashSet<String>,
    pub transitions: TransitionTable,
    pub alphabet: Alphabet,
}

impl Program {
    pub fn new(
        name: &str,
        description: &str,
        initial_state: &str,
        accepting_states: &[&str],
        rules: &[(&str, char, &str, char, char)],
        alphabet: &str,
    ) -> Result<Self, TuringMachineError> {
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            initial_state: initial_state.to_string(),
            accepting_states: accepting_states.iter().map(|s| s.to_string()).collect(),
            transitions: TransitionTable::from_rules(rules)?,
            alphabet: Alphabet::new(alphabet)?,
        })
    }

    /// Validates `input` against the alphabet and builds a fresh machine for it.
    pub fn machine(&self, input: &str) -> Result<TuringMachine, TuringMachineError> {
        self.alphabet.validate(input)?;

        Ok(TuringMachine::new(
            input,
            self.initial_state.as_str(),
            self.accepting_states.clone(),
            self.transitions.clone(),
        ))
    }

    pub fn is_accepting(&self, state: &State) -> bool {
        state
            .label()
            .is_some_and(|label| self.accepting_states.contains(label))
    }
}

/// Marks the first unmatched `0` or `1` and scans for its counterpart.
fn unary_equality() -> Result<Program, TuringMachineError> {
    Program::new(
        "unary-equality",
        "Pairs each 0 with a 1, marking them X and Y",
        "q0",
        &["q0", "q1", "q2"],
        &[
            ("q0", '0', "q1", 'X', 'R'),
            ("q0", '1', "q2", 'Y', 'R'),
            ("q1", '0', "q1", '0', 'R'),
            ("q1", '1', "q3", 'Y', 'L'),
            ("q1", 'Y', "q1", 'Y', 'R'),
            ("q2", '1', "q2", '1', 'R'),
            ("q2", '0', "q3", 'X', 'L'),
            ("q2", 'Y', "q2", 'Y', 'R'),
            ("q3", '0', "q3", '0', 'L'),
            ("q3", '1', "q3", '1', 'L'),
            ("q3", 'X', "q0", 'X', 'R'),
            ("q3", 'Y', "q0", 'Y', 'R'),
        ],
        "^[01]+$",
    )
}

fn even_ones() -> Result<Program, TuringMachineError> {
    Program::new(
        "even-ones",
        "Accepts binary strings with an even number of 1s",
        "even",
        &["accept"],
        &[
            ("even", '0', "even", '0', 'R'),
            ("even", '1', "odd", '1', 'R'),
            ("even", B, "accept", B, 'R'),
            ("odd", '0', "odd", '0', 'R'),
            ("odd", '1', "even", '1', 'R'),
        ],
        "^[01]*$",
    )
}

/// Adds one to a binary number, growing the tape to the left on overflow.
fn binary_increment() -> Result<Program, TuringMachineError> {
    Program::new(
        "binary-increment",
        "Adds one to a binary number",
        "right",
        &["done"],
        &[
            ("right", '0', "right", '0', 'R'),
            ("right", '1', "right", '1', 'R'),
            ("right", B, "carry", B, 'L'),
            ("carry", '1', "carry", '0', 'L'),
            ("carry", '0', "done", '1', 'L'),
            ("carry", B, "done", '1', 'L'),
        ],
        "^[01]+$",
    )
}

type Builder = fn() -> Result<Program, TuringMachineError>;

fn builtin_programs() -> Vec<Program> {
    let builders: [Builder; 3] = [unary_equality, even_ones, binary_increment];

    builders
        .iter()
        .filter_map(|build| match build() {
            Ok(program) => Some(program),
            Err(e) => {
                warn!(error = %e, "failed to build program");
                None
            }
        })
        .collect()
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, TuringMachineError> {
        PROGRAMS
            .get(index)
            .cloned()
            .ok_or_else(|| TuringMachineError::ProgramNotFound(format!("#{index}")))
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Program, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name == name)
            .cloned()
            .ok_or_else(|| TuringMachineError::ProgramNotFound(name.to_string()))
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        PROGRAMS.iter().map(|program| program.name.clone()).collect()
    }
}
