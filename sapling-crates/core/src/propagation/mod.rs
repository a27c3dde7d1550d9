//! Domains, constraints and the arc-consistency engine filtering them.
//!
//! The same machinery serves two purposes: locally filtering the relevant domains of an action's
//! precondition, and deciding whether a relaxed layer is consistent with the goal and the state
//! constraints of the problem.
mod constraint;
mod constraint_manager;
mod domain;
mod domain_map;
mod filtering_status;

pub use constraint::*;
pub use constraint_manager::*;
pub use domain::*;
pub use domain_map::*;
pub use filtering_status::*;
