//! This crate provides the execution engine for a deterministic single-tape Turing Machine.
//! It includes modules for the sparse tape, the transition table, the machine itself,
//! input alphabet validation, and a collection of predefined programs.

pub mod alphabet;
pub mod machine;
pub mod programs;
pub mod tape;
pub mod transitions;
pub mod types;

/// Re-exports the `Alphabet` validator from the alphabet module.
pub use alphabet::Alphabet;
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports `Program`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{Program, ProgramManager, PROGRAMS};
/// Re-exports the sparse `Tape` from the tape module.
pub use tape::Tape;
/// Re-exports the `TransitionTable` from the transitions module.
pub use transitions::TransitionTable;
/// Re-exports the core value types and the error type from the types module.
pub use types::{
    Direction, Report, State, Step, Transition, TuringMachineError, Verdict, BLANK_SYMBOL,
};
