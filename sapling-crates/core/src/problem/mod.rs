//! The encoding of a planning problem as consumed by the heuristic.
//!
//! Variables, actions and the [`AtomIndex`] are produced once, when a problem is loaded through
//! the [`ProblemBuilder`]; the resulting [`Problem`] is read-only from then on. [`State`]s are the
//! concrete search nodes which are evaluated against it.
mod action;
mod atom;
mod atom_index;
mod formula;
mod ids;
mod planning_problem;
mod problem_builder;
mod problem_error;
mod state;
mod term;

pub use action::*;
pub use atom::*;
pub use atom_index::*;
pub use formula::*;
pub use ids::*;
pub use planning_problem::*;
pub use problem_builder::*;
pub use problem_error::*;
pub use state::*;
pub use term::*;
