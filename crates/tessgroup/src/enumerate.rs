//! Breadth-first enumeration of group elements.
//!
//! Starting from the identity, the engine repeatedly right-multiplies frontier
//! elements by every generator, growing words one letter at a time. A
//! candidate survives only if (a) the word acceptor, when present, considers
//! its word canonical, (b) no previously discovered element has the same
//! matrix within tolerance, and (c) the constraint accepts it. Output order is
//! BFS order with ties broken by generator index, so results are reproducible
//! for a fixed generator order.

use tessmath::collections::approx_hashmap::{ApproxHashMap, Entry};
use tessmath::{Matrix, Metric};

use crate::automaton::FiniteStateAutomaton;
use crate::common::{GroupError, GroupResult};
use crate::constraint::Constraint;
use crate::element::GroupElement;
use crate::word;

/// Number of frontier nodes processed per [`Enumerator::step()`] call made by
/// [`Enumerator::run()`].
const STEP_CHUNK: usize = 256;

/// Builds the inverse table for a generator set: `table[i]` is the index of
/// the generator that is the group inverse of generator `i`.
///
/// An explicit inverse (a generator whose word is the inverted-case word)
/// wins; a generator that squares to the identity within tolerance is its own
/// inverse; anything else is a fatal configuration error.
pub(crate) fn generator_inverses(generators: &[GroupElement]) -> GroupResult<Vec<usize>> {
    generators
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let inverse_name = word::inverse_word(&g.word);
            if let Some(j) = generators.iter().position(|h| h.word == inverse_name) {
                return Ok(j);
            }
            if g.apply(g).is_identity() {
                return Ok(i);
            }
            Err(GroupError::MissingInverse(g.word.clone()))
        })
        .collect()
}

/// Resumable breadth-first enumeration pass.
///
/// [`Enumerator::run()`] drives the pass to completion; interactive callers
/// on a single-threaded event loop can instead call [`Enumerator::step()`]
/// with a node budget and yield between calls. All enumeration state is local
/// to one pass.
pub struct Enumerator<'a> {
    generators: &'a [GroupElement],
    inverse_of: Vec<usize>,
    automaton: Option<&'a FiniteStateAutomaton>,
    constraint: &'a mut dyn Constraint,

    /// Output list, doubling as the BFS queue: elements before
    /// `next_unprocessed` have been expanded.
    elements: Vec<GroupElement>,
    /// Index of the generator whose application produced each element;
    /// `None` for the identity.
    produced_by: Vec<Option<usize>>,
    /// Geometric discovery hash; the first word to reach a matrix wins.
    discovered: ApproxHashMap<Matrix, usize>,
    next_unprocessed: usize,
}

impl<'a> Enumerator<'a> {
    /// Prepares an enumeration pass. Resets the constraint's counters and
    /// seeds the frontier with the identity element of `ndim`-space, unless
    /// the constraint rejects the identity outright.
    pub fn new(
        generators: &'a [GroupElement],
        automaton: Option<&'a FiniteStateAutomaton>,
        constraint: &'a mut dyn Constraint,
        metric: Metric,
        ndim: u8,
    ) -> GroupResult<Self> {
        let inverse_of = generator_inverses(generators)?;
        Ok(Self::with_inverse_table(
            generators, inverse_of, automaton, constraint, metric, ndim,
        ))
    }

    /// Like [`Enumerator::new()`], but reuses an already-built inverse table.
    pub(crate) fn with_inverse_table(
        generators: &'a [GroupElement],
        inverse_of: Vec<usize>,
        automaton: Option<&'a FiniteStateAutomaton>,
        constraint: &'a mut dyn Constraint,
        metric: Metric,
        ndim: u8,
    ) -> Self {
        constraint.update();

        let mut elements = Vec::new();
        let mut produced_by = Vec::new();
        let mut discovered = ApproxHashMap::new();
        let identity = GroupElement::identity(metric, ndim);
        if constraint.accept_element(&identity) {
            discovered.insert(&identity.matrix, 0);
            elements.push(identity);
            produced_by.push(None);
        }

        Self {
            generators,
            inverse_of,
            automaton,
            constraint,
            elements,
            produced_by,
            discovered,
            next_unprocessed: 0,
        }
    }

    /// Returns whether the frontier is exhausted.
    pub fn is_finished(&self) -> bool {
        self.next_unprocessed >= self.elements.len()
    }

    /// Returns the elements generated so far, in BFS order.
    pub fn elements(&self) -> &[GroupElement] {
        &self.elements
    }

    /// Processes up to `budget` frontier nodes and returns whether the pass
    /// is finished.
    pub fn step(&mut self, budget: usize) -> bool {
        for _ in 0..budget {
            if self.is_finished() {
                break;
            }
            self.expand_next();
        }
        self.is_finished()
    }

    /// Drives the pass to completion and returns the element list.
    pub fn run(mut self) -> Vec<GroupElement> {
        while !self.step(STEP_CHUNK) {}
        log::debug!(
            "enumerated {} elements from {} generators",
            self.elements.len(),
            self.generators.len(),
        );
        self.elements
    }

    /// Expands the next frontier element: applies every generator and keeps
    /// the surviving candidates.
    fn expand_next(&mut self) {
        let i = self.next_unprocessed;
        self.next_unprocessed += 1;
        let parent = self.elements[i].clone();
        let parent_generator = self.produced_by[i];

        for (k, generator) in self.generators.iter().enumerate() {
            // Applying the inverse of the generator that produced the parent
            // would regress to the grandparent.
            if parent_generator.is_some_and(|p| self.inverse_of[p] == k) {
                continue;
            }

            let candidate_word = format!("{}{}", parent.word, generator.word);
            if let Some(fsa) = self.automaton {
                if !fsa.accepts(&candidate_word) {
                    continue;
                }
            }

            let candidate = GroupElement {
                matrix: &parent.matrix * &generator.matrix,
                word: candidate_word,
                metric: parent.metric,
                color_index: Some(k as u16),
            };

            match self.discovered.entry(&candidate.matrix) {
                // Some other (earlier, hence canonical) word already reached
                // this matrix.
                Entry::Occupied(_) => continue,
                Entry::Vacant(e) => {
                    if self.constraint.accept_element(&candidate) {
                        e.insert(self.elements.len());
                        self.elements.push(candidate);
                        self.produced_by.push(Some(k));
                    }
                }
            }
        }
    }
}

/// Generates the element list for a generator set in one call.
///
/// The metric and dimension are taken from the generators; an empty generator
/// set yields just the identity of 3-space (if the constraint accepts it).
pub fn generate_elements(
    generators: &[GroupElement],
    automaton: Option<&FiniteStateAutomaton>,
    constraint: &mut dyn Constraint,
) -> GroupResult<Vec<GroupElement>> {
    let metric = generators.first().map(|g| g.metric).unwrap_or_default();
    let ndim = generators
        .iter()
        .map(|g| g.matrix.ndim().saturating_sub(1))
        .max()
        .unwrap_or(3);
    Ok(Enumerator::new(generators, automaton, constraint, metric, ndim)?.run())
}
