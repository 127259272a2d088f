//! This module defines the `TuringMachine` struct, which simulates a deterministic
//! single-tape Turing Machine. It handles the machine's state, tape operations, head
//! movement, and the halting decision.

use crate::tape::Tape;
use crate::transitions::TransitionTable;
use crate::types::{Report, State, Step, Transition, Verdict};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Represents a single-tape Turing Machine.
///
/// This struct encapsulates the tape, the head position, the current state, the
/// transition table, and the set of accepting states. The table and the accepting
/// states never change after construction.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    state: State,
    tape: Tape,
    head: i64,
    initial_state: String,
    initial_tape: String,
    accepting_states: HashSet<String>,
    transitions: TransitionTable,
    step_count: usize,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` with `tape` split into cells starting at position 0,
    /// the head at 0, and the machine in `start_state`.
    ///
    /// The input is not checked against any alphabet; see [`crate::Alphabet`].
    pub fn new(
        tape: &str,
        start_state: impl Into<String>,
        accepting_states: HashSet<String>,
        transitions: TransitionTable,
    ) -> Self {
        let initial_state = start_state.into();

        Self {
            state: State::Active(initial_state.clone()),
            tape: Tape::new(tape),
            head: 0,
            initial_state,
            initial_tape: tape.to_string(),
            accepting_states,
            transitions,
            step_count: 0,
        }
    }

    /// Executes a single step of the Turing Machine's computation.
    ///
    /// Reads the symbol under the head and applies the matching transition: the new
    /// symbol is written, the head moves one cell, and the machine enters the next
    /// state. Accepting states are not consulted here.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a transition was applied.
    /// * `Step::Halt` if no transition exists for the current state and symbol. The state
    ///   becomes `State::Halted` and the tape and head are left untouched.
    pub fn step(&mut self) -> Step {
        let Some(label) = self.state.label() else {
            return Step::Halt;
        };

        let symbol = self.tape.read(self.head);
        let Some(transition) = self.transitions.get(label, symbol).cloned() else {
            debug!(state = label, symbol = ?symbol, head = self.head, "no transition, halting");
            self.state = State::Halted;
            return Step::Halt;
        };

        trace!(
            state = label,
            symbol = ?symbol,
            head = self.head,
            next_state = transition.next_state.as_str(),
            write = ?transition.write,
            direction = ?transition.direction,
            "applying transition"
        );

        self.tape.write(self.head, transition.write);
        self.head += transition.direction.offset();
        self.state = State::Active(transition.next_state);
        self.step_count += 1;

        Step::Continue
    }

    /// Runs the machine until it halts or enters an accepting state.
    ///
    /// An accepting state stops the run even if it has outgoing transitions. There is
    /// no step limit: a table that cycles through non-accepting states runs forever.
    pub fn run(&mut self) -> Verdict {
        while self.is_running() {
            self.step();
        }

        let verdict = self.verdict();
        debug!(
            state = %self.state,
            head = self.head,
            steps = self.step_count,
            %verdict,
            "run finished"
        );
        verdict
    }

    /// Returns the tape contents in position order.
    pub fn tape(&self) -> String {
        self.tape.contents()
    }

    /// Returns the underlying sparse tape.
    pub fn cells(&self) -> &Tape {
        &self.tape
    }

    /// Returns the head position. It may be negative or beyond the input length.
    pub fn head(&self) -> i64 {
        self.head
    }

    /// Returns the current state of the Turing Machine.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Returns the start state of the Turing Machine.
    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    /// Returns the symbol currently under the head.
    pub fn symbol(&self) -> char {
        self.tape.read(self.head)
    }

    /// Returns the transition that the next step would apply, if any.
    pub fn transition(&self) -> Option<&Transition> {
        let label = self.state.label()?;
        self.transitions.get(label, self.symbol())
    }

    /// Checks if the machine has entered the halted sentinel state.
    pub fn is_halted(&self) -> bool {
        self.state.is_halted()
    }

    /// Checks if the current state is one of the accepting states.
    pub fn is_accepting(&self) -> bool {
        self.state
            .label()
            .is_some_and(|label| self.accepting_states.contains(label))
    }

    /// The loop condition of [`TuringMachine::run`]: neither halted nor accepting.
    pub fn is_running(&self) -> bool {
        !self.is_halted() && !self.is_accepting()
    }

    /// Classifies the current state.
    pub fn verdict(&self) -> Verdict {
        if self.is_accepting() {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        }
    }

    /// Returns the total number of transitions applied.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn accepting_states(&self) -> &HashSet<String> {
        &self.accepting_states
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    /// Captures the observable configuration.
    pub fn report(&self) -> Report {
        Report {
            tape: self.tape(),
            head: self.head,
            state: self.state.clone(),
            steps: self.step_count,
            verdict: self.verdict(),
        }
    }

    /// Resets the Turing Machine to its initial configuration.
    /// This includes resetting the state, tape, head position, and step count.
    pub fn reset(&mut self) {
        self.state = State::Active(self.initial_state.clone());
        self.tape = Tape::new(&self.initial_tape);
        self.head = 0;
        self.step_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, BLANK_SYMBOL};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    fn accepting(states: &[&str]) -> HashSet<String> {
        states.iter().map(|s| s.to_string()).collect()
    }

    fn unary_equality_table() -> TransitionTable {
        TransitionTable::from_rules(&[
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
        ])
        .unwrap()
    }

    fn unary_equality(input: &str) -> TuringMachine {
        TuringMachine::new(
            input,
            "q0",
            accepting(&["q0", "q1", "q2"]),
            unary_equality_table(),
        )
    }

    /// Bounces between cells 0 and 1 forever without writing new cells.
    fn cyclic(input: &str) -> TuringMachine {
        let table = TransitionTable::from_rules(&[
            ("a", '0', "b", '0', 'R'),
            ("b", '0', "a", '0', 'L'),
        ])
        .unwrap();
        TuringMachine::new(input, "a", accepting(&["accept"]), table)
    }

    #[test]
    fn test_machine_creation() {
        let machine = unary_equality("01");

        assert_eq!(machine.state(), &State::from("q0"));
        assert_eq!(machine.initial_state(), "q0");
        assert_eq!(machine.tape(), "01");
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.symbol(), '0');
    }

    #[test]
    fn test_single_step_writes_and_moves() {
        let mut machine = unary_equality("0");

        assert_eq!(machine.step(), Step::Continue);
        assert_eq!(machine.tape(), "X");
        assert_eq!(machine.head(), 1);
        assert_eq!(machine.state(), &State::from("q1"));
        assert_eq!(machine.symbol(), BLANK_SYMBOL);
        assert_eq!(machine.step_count(), 1);
    }

    #[test]
    fn test_single_symbol_scenario() {
        let mut machine = unary_equality("0");
        machine.step();

        // q1 is accepting, so running from here applies nothing further
        assert_eq!(machine.run(), Verdict::Accepted);
        assert_eq!(machine.state(), &State::from("q1"));
        assert_eq!(machine.head(), 1);
        assert_eq!(machine.tape(), "X");

        // Stepping on past the accepting state finds no rule for the blank
        assert!(machine.transition().is_none());
        assert_eq!(machine.step(), Step::Halt);
        assert!(machine.is_halted());
        assert_eq!(machine.verdict(), Verdict::Rejected);
    }

    #[test]
    fn test_two_symbol_scenario() {
        let mut machine = unary_equality("01");

        assert_eq!(machine.step(), Step::Continue);
        assert_eq!((machine.head(), machine.state()), (1, &State::from("q1")));

        assert_eq!(machine.step(), Step::Continue);
        assert_eq!((machine.head(), machine.state()), (0, &State::from("q3")));

        assert_eq!(machine.step(), Step::Continue);
        assert_eq!((machine.head(), machine.state()), (1, &State::from("q0")));
        assert_eq!(machine.tape(), "XY");
        assert!(machine.is_accepting());
        assert_eq!(machine.verdict(), Verdict::Accepted);

        // No rule for (q0, Y)
        assert_eq!(machine.symbol(), 'Y');
        assert_eq!(machine.step(), Step::Halt);
        assert_eq!(machine.state(), &State::Halted);
        assert_eq!(machine.tape(), "XY");
        assert_eq!(machine.head(), 1);
    }

    #[test]
    fn test_run_stops_immediately_in_accepting_start_state() {
        let mut machine = unary_equality("01");

        assert_eq!(machine.run(), Verdict::Accepted);
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.tape(), "01");
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.state(), &State::from("q0"));
    }

    #[test]
    fn test_run_halts_without_transition() {
        let table = TransitionTable::from_rules(&[("scan", '1', "scan", '1', 'R')]).unwrap();
        let mut machine = TuringMachine::new("111", "scan", accepting(&["done"]), table);

        assert_eq!(machine.run(), Verdict::Rejected);
        assert_eq!(machine.state(), &State::Halted);
        assert_eq!(machine.head(), 3);
        assert_eq!(machine.tape(), "111");
        assert_eq!(machine.step_count(), 3);
    }

    #[test]
    fn test_halting_leaves_tape_and_head_unchanged() {
        let mut machine = unary_equality("1");
        machine.step();
        let tape = machine.tape();
        let head = machine.head();

        // (q2, blank) is undefined
        assert_eq!(machine.step(), Step::Halt);
        assert_eq!(machine.tape(), tape);
        assert_eq!(machine.head(), head);
        assert_eq!(machine.step_count(), 1);

        // Further steps stay halted
        assert_eq!(machine.step(), Step::Halt);
        assert!(machine.is_halted());
        assert!(!machine.is_running());
    }

    #[test]
    fn test_head_moves_left_of_origin() {
        let table = TransitionTable::new()
            .rule("start", '1', "left", 'A', Direction::Left)
            .and_then(|t| t.rule("left", BLANK_SYMBOL, "done", 'B', Direction::Left))
            .unwrap();
        let mut machine = TuringMachine::new("1", "start", accepting(&["done"]), table);

        assert_eq!(machine.run(), Verdict::Accepted);
        assert_eq!(machine.head(), -2);
        assert_eq!(machine.tape(), "BA");
        assert_eq!(machine.cells().bounds(), Some((-1, 0)));
    }

    #[test]
    fn test_empty_input_reads_blank() {
        let table =
            TransitionTable::from_rules(&[("start", BLANK_SYMBOL, "done", '1', 'R')]).unwrap();
        let mut machine = TuringMachine::new("", "start", accepting(&["done"]), table);

        assert_eq!(machine.tape(), "");
        assert_eq!(machine.symbol(), BLANK_SYMBOL);
        assert_eq!(machine.run(), Verdict::Accepted);
        assert_eq!(machine.tape(), "1");
        assert_eq!(machine.head(), 1);
    }

    #[test]
    fn test_accepting_state_with_outgoing_transitions_is_terminal() {
        let table = TransitionTable::from_rules(&[
            ("start", 'a', "mid", 'a', 'R'),
            ("mid", 'a', "end", 'b', 'R'),
        ])
        .unwrap();
        let mut machine = TuringMachine::new("aa", "start", accepting(&["mid", "end"]), table);

        assert_eq!(machine.run(), Verdict::Accepted);
        assert_eq!(machine.state(), &State::from("mid"));
        assert!(machine.transition().is_some());
        assert_eq!(machine.tape(), "aa");
    }

    #[test]
    fn test_accessors_are_idempotent() {
        let mut machine = unary_equality("01");
        machine.step();

        let first = machine.report();
        assert_eq!(machine.report(), first);
        assert_eq!(machine.tape(), machine.tape());
        assert_eq!(machine.head(), machine.head());
        assert_eq!(machine.state(), machine.state());
    }

    #[test]
    fn test_reset() {
        let mut machine = unary_equality("01");
        machine.step();
        machine.step();
        assert_eq!(machine.step_count(), 2);

        machine.reset();
        assert_eq!(machine.state(), &State::from("q0"));
        assert_eq!(machine.tape(), "01");
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_report() {
        let mut machine = unary_equality("01");
        for _ in 0..3 {
            machine.step();
        }

        let report = machine.report();
        assert_eq!(report.tape, "XY");
        assert_eq!(report.head, 1);
        assert_eq!(report.state, State::from("q0"));
        assert_eq!(report.steps, 3);
        assert_eq!(report.verdict, Verdict::Accepted);
    }

    #[test]
    fn test_cyclic_machine_has_no_step_cap() {
        let mut machine = cyclic("00");

        for _ in 0..1_000_000 {
            assert_eq!(machine.step(), Step::Continue);
        }

        assert!(machine.is_running());
        assert_eq!(machine.tape(), "00");
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.step_count(), 1_000_000);
    }

    #[test]
    fn test_cyclic_machine_run_does_not_return() {
        let mut machine = cyclic("00");
        let (sender, receiver) = mpsc::channel();

        // The worker is never joined; it spins until the test process exits.
        thread::spawn(move || {
            let verdict = machine.run();
            let _ = sender.send(verdict);
        });

        assert_eq!(
            receiver.recv_timeout(Duration::from_millis(500)),
            Err(mpsc::RecvTimeoutError::Timeout)
        );
    }
}
