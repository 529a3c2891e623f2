//! Discrete-group enumeration for tessellation.
//!
//! Given a set of generators (rigid motions of Euclidean, hyperbolic, or
//! elliptic space), this crate enumerates group elements breadth-first up to a
//! caller-supplied [`Constraint`], deduplicating geometrically coincident
//! words with a tolerance-based matrix hash and optionally rejecting
//! non-canonical words with a [`FiniteStateAutomaton`] word acceptor. The
//! resulting ordered element list drives fundamental-domain tessellation.
//!
//! The usual entry point is [`DiscreteGroup`]:
//!
//! 1. configure generators (each paired with its inverse), a constraint, and
//!    optionally a word acceptor;
//! 2. read [`DiscreteGroup::element_list()`], which lazily regenerates the
//!    cached list whenever the configuration changed;
//! 3. hand the elements to a consumer such as [`scenegraph::placements()`].

pub mod automaton;
pub mod common;
pub mod constraint;
pub mod dirichlet;
pub mod element;
pub mod enumerate;
pub mod group;
pub mod scenegraph;
pub mod word;

pub use automaton::{AutomatonError, FiniteStateAutomaton};
pub use common::{GroupError, GroupResult};
pub use constraint::{
    Constraint, DirectIsometryConstraint, SimpleConstraint, TranslationConstraint,
    WordLengthConstraint,
};
pub use element::GroupElement;
pub use enumerate::{generate_elements, Enumerator};
pub use group::DiscreteGroup;
