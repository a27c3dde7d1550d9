//! # Sapling core
//! The delete-relaxation heuristic of the Sapling planner.
//!
//! A [`Problem`] is built once through the [`ProblemBuilder`](problem::ProblemBuilder); a
//! [`RelaxedPlanHeuristic`] then estimates, for any [`State`], how many actions separate it from
//! the goal. The estimate is the length of a relaxed plan: actions are applied while ignoring
//! the values they overwrite, so reachable values only accumulate, until the reached values are
//! consistent with the goal. States from which the goal is unreachable even then are reported as
//! dead ends ([`HeuristicValue::Infinite`]).
//!
//! Consistency with the goal and with the state constraints of the problem, as well as the
//! applicability of actions, is decided with an arc-consistency engine
//! ([`propagation::ConstraintManager`]).
pub mod asserts;
pub mod containers;
pub mod heuristic;
pub mod problem;
pub mod propagation;
pub mod relaxation;
pub mod statistics;

pub use convert_case;

pub use crate::heuristic::Evaluation;
pub use crate::heuristic::ExtractionPolicy;
pub use crate::heuristic::HeuristicOptions;
pub use crate::heuristic::HeuristicValue;
pub use crate::heuristic::RelaxedPlanHeuristic;
pub use crate::problem::Problem;
pub use crate::problem::ProblemError;
pub use crate::problem::State;
