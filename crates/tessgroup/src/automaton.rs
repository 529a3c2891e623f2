//! Finite-state word acceptor.
//!
//! The automaton recognizes which words over the generator alphabet are in
//! canonical (shortlex-reduced) form; the enumeration engine uses it to reject
//! candidate words some shorter word already represents. States are 1-indexed
//! with state 1 the unique start state; state 0 is an absorbing fail state. A
//! word is accepted iff no transition along its letters lands in state 0.

use std::collections::HashMap;

use itertools::Itertools;
use thiserror::Error;

use crate::word::invert_letter;

/// Error that can occur while constructing a [`FiniteStateAutomaton`].
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("missing `size := N` declaration in {0:?} block")]
    MissingSize(&'static str),
    #[error("alphabet has size {expected} but `names` lists {got} letters")]
    NamesLengthMismatch { expected: usize, got: usize },
    #[error("duplicate letter {0:?} in alphabet names")]
    DuplicateLetter(char),
    #[error("transition table needs {expected} entries but has {got}")]
    TransitionCount { expected: usize, got: usize },
    #[error("transition target {target} exceeds state count {num_states}")]
    TransitionTarget { target: u32, num_states: usize },
    #[error("unrecognized declaration {0:?}")]
    UnknownDeclaration(String),
    #[error("invalid integer {0:?} in transition table")]
    BadInteger(String),
}

/// Table-driven word acceptor over the generator alphabet.
#[derive(Debug, Clone, PartialEq)]
pub struct FiniteStateAutomaton {
    num_states: usize,
    num_letters: usize,
    /// Flattened row-major table: `transitions[(state - 1) * num_letters +
    /// column]` is the state reached from `state` on that letter. State 0 is
    /// the fail state and has no row.
    transitions: Vec<u32>,
    /// Maps one-letter generator names to column indices.
    columns: HashMap<char, usize>,
}

impl FiniteStateAutomaton {
    /// Constructs an automaton from its transition table.
    pub fn new(
        num_states: usize,
        names: &str,
        transitions: Vec<u32>,
    ) -> Result<Self, AutomatonError> {
        let num_letters = names.chars().count();
        let expected = num_states * num_letters;
        if transitions.len() != expected {
            return Err(AutomatonError::TransitionCount {
                expected,
                got: transitions.len(),
            });
        }
        for &target in &transitions {
            if target as usize > num_states {
                return Err(AutomatonError::TransitionTarget {
                    target,
                    num_states,
                });
            }
        }
        let mut columns = HashMap::new();
        for (i, c) in names.chars().enumerate() {
            if columns.insert(c, i).is_some() {
                return Err(AutomatonError::DuplicateLetter(c));
            }
        }
        Ok(Self {
            num_states,
            num_letters,
            transitions,
            columns,
        })
    }

    /// Constructs the acceptor for a free group: it rejects exactly the words
    /// containing an adjacent inverse pair (`aA` or `Aa`).
    ///
    /// `names` lists the generator alphabet including inverse letters.
    pub fn no_cancellation(names: &str) -> Result<Self, AutomatonError> {
        let letters: Vec<char> = names.chars().collect();
        let n = letters.len();
        // State 1 is the start state; state 2 + j means "last letter was
        // letter j".
        let num_states = n + 1;
        let mut transitions = Vec::with_capacity(num_states * n);
        for state in 0..num_states {
            for (k, &letter) in letters.iter().enumerate() {
                let cancels = state > 0 && letters[state - 1] == invert_letter(letter);
                transitions.push(if cancels { 0 } else { k as u32 + 2 });
            }
        }
        Self::new(num_states, names, transitions)
    }

    /// Parses the line-oriented textual description of an automaton.
    ///
    /// The format has keyword blocks `alphabet`, `states`, and `transitions`,
    /// each beginning with a `size := N` declaration. The `alphabet` block
    /// additionally carries `names := <letters>` mapping one-letter generator
    /// names to table columns. The `transitions` keyword is followed by a
    /// flattened row-major table of non-negative integers, one row per state
    /// starting from state 1 (state 0 is the reserved fail state):
    ///
    /// ```text
    /// alphabet
    ///   size := 2
    ///   names := aA
    /// states
    ///   size := 3
    /// transitions
    ///   size := 6
    ///   2 3
    ///   2 0
    ///   0 3
    /// ```
    ///
    /// Lines starting with `#` and unknown tokens outside the recognized
    /// keyword blocks are ignored; wrong element counts and unrecognized
    /// declarations inside a block are errors.
    pub fn from_description(text: &str) -> Result<Self, AutomatonError> {
        #[derive(Copy, Clone, PartialEq)]
        enum Block {
            None,
            Alphabet,
            States,
            Transitions,
        }

        let mut block = Block::None;
        let mut alphabet_size: Option<usize> = None;
        let mut num_states: Option<usize> = None;
        let mut names: Option<String> = None;
        let mut table_size: Option<usize> = None;
        let mut table: Vec<u32> = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line {
                "alphabet" => {
                    block = Block::Alphabet;
                    continue;
                }
                "states" => {
                    block = Block::States;
                    continue;
                }
                "transitions" => {
                    block = Block::Transitions;
                    continue;
                }
                _ => (),
            }

            if let Some((key, value)) = line.split_once(":=") {
                let key = key.trim();
                let value = value.trim();
                match (block, key) {
                    (Block::Alphabet, "size") => alphabet_size = Some(parse_usize(value)?),
                    (Block::Alphabet, "names") => names = Some(value.to_string()),
                    (Block::States, "size") => num_states = Some(parse_usize(value)?),
                    (Block::Transitions, "size") => table_size = Some(parse_usize(value)?),
                    (Block::None, _) => (), // stray declaration; ignore
                    _ => return Err(AutomatonError::UnknownDeclaration(key.to_string())),
                }
                continue;
            }

            if block == Block::Transitions {
                let row: Vec<u32> = line
                    .split_whitespace()
                    .map(|token| {
                        token
                            .parse()
                            .map_err(|_| AutomatonError::BadInteger(token.to_string()))
                    })
                    .try_collect()?;
                table.extend(row);
            }
            // Anything else is an unknown token outside a recognized
            // declaration; ignore it.
        }

        let alphabet_size = alphabet_size.ok_or(AutomatonError::MissingSize("alphabet"))?;
        let num_states = num_states.ok_or(AutomatonError::MissingSize("states"))?;
        let table_size = table_size.ok_or(AutomatonError::MissingSize("transitions"))?;
        let names = names.unwrap_or_default();

        if names.chars().count() != alphabet_size {
            return Err(AutomatonError::NamesLengthMismatch {
                expected: alphabet_size,
                got: names.chars().count(),
            });
        }
        if table.len() != table_size {
            return Err(AutomatonError::TransitionCount {
                expected: table_size,
                got: table.len(),
            });
        }

        Self::new(num_states, &names, table)
    }

    /// Returns the number of states, not counting the fail state.
    pub fn num_states(&self) -> usize {
        self.num_states
    }
    /// Returns the number of letters in the alphabet.
    pub fn num_letters(&self) -> usize {
        self.num_letters
    }
    /// Returns the table column for a generator letter, if the automaton
    /// knows it.
    pub fn letter_column(&self, letter: char) -> Option<usize> {
        self.columns.get(&letter).copied()
    }

    /// Runs the automaton on `word` starting from state 1.
    ///
    /// Returns `false` as soon as a transition lands in the absorbing fail
    /// state, or on a letter the automaton does not know; returns `true` once
    /// the whole word is consumed.
    pub fn accepts(&self, word: &str) -> bool {
        let mut state = 1_u32;
        for letter in word.chars() {
            let Some(column) = self.letter_column(letter) else {
                return false;
            };
            state = self.transitions[(state as usize - 1) * self.num_letters + column];
            if state == 0 {
                return false;
            }
        }
        true
    }
}

fn parse_usize(s: &str) -> Result<usize, AutomatonError> {
    s.parse()
        .map_err(|_| AutomatonError::BadInteger(s.to_string()))
}
