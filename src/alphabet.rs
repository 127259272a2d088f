//! Input validation for callers that construct machines from user input.
//!
//! The machine accepts any input; programs use an `Alphabet` to reject inputs that
//! contain symbols their transition table was not written for.

use crate::types::TuringMachineError;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct Alphabet {
    pattern: Regex,
}

impl Alphabet {
    /// Compiles `pattern` as the set of acceptable inputs, e.g. `^[01]+$`.
    pub fn new(pattern: &str) -> Result<Self, TuringMachineError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Accepts non-empty inputs made only of `symbols`.
    pub fn from_symbols(symbols: &[char]) -> Result<Self, TuringMachineError> {
        let class: String = symbols
            .iter()
            .map(|symbol| regex::escape(&symbol.to_string()))
            .collect::<Vec<_>>()
            .join("|");

        Self::new(&format!("^(?:{class})+$"))
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn is_valid(&self, input: &str) -> bool {
        self.pattern.is_match(input)
    }

    /// # Returns
    ///
    /// * `Ok(())` if `input` matches the alphabet.
    /// * `Err(TuringMachineError::InvalidInput)` otherwise.
    pub fn validate(&self, input: &str) -> Result<(), TuringMachineError> {
        if self.is_valid(input) {
            Ok(())
        } else {
            Err(TuringMachineError::InvalidInput {
                input: input.to_string(),
                pattern: self.pattern().to_string(),
            })
        }
    }
}
