//! The relaxed reachability structure built during one heuristic evaluation.
//!
//! Starting from a concrete state, layers of possibly-true values are grown by applying actions
//! under the delete relaxation. Every atom is recorded in the [`SupportTable`] the first time it
//! is reached, together with the action that produced it and the atoms that justified doing so.
mod applicability;
mod changeset;
mod justification;
mod procedures;
mod relaxed_state;
mod support_table;

pub use applicability::*;
pub use changeset::*;
pub use justification::*;
pub(crate) use procedures::*;
pub use relaxed_state::*;
pub use support_table::*;
