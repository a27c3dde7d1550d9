//! The relaxed-plan heuristic.
//!
//! [`RelaxedPlanHeuristic::evaluate`] grows relaxed layers from a state with a
//! [`LayeredExpansion`], asks the [`GoalChecker`] after every layer whether the goal is
//! satisfied, and turns the supports of the goal-causing atoms into a cost with the
//! [`RelaxedPlanExtractor`].
mod goal_checker;
mod heuristic_value;
mod layered_expansion;
mod options;
mod plan_accounting;
mod relaxed_plan_extractor;
mod relaxed_plan_heuristic;

pub use goal_checker::*;
pub use heuristic_value::*;
pub use layered_expansion::*;
pub use options::*;
pub use plan_accounting::*;
pub use relaxed_plan_extractor::*;
pub use relaxed_plan_heuristic::*;
