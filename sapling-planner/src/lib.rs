//! # Sapling
//! Sapling estimates how far a state of a planning problem is from its goal, by computing the
//! length of a relaxed plan in which actions never overwrite values.
//!
//! The heuristic itself lives in [`core`]; this crate ships the `sapling` binary, which reads
//! problems from JSON files and evaluates their states.
//!
//! # Using Sapling
//! ```rust
//! # use sapling_planner::core::heuristic::*;
//! # use sapling_planner::core::problem::*;
//! let mut builder = ProblemBuilder::default();
//! let key = builder.new_variable("key", [0, 1]);
//! let door = builder.new_variable("door", [0, 1]);
//!
//! let _ = builder.new_action(Action::new(
//!     "pick-up-key",
//!     Formula::Tautology,
//!     vec![Effect::new(key, 1)],
//! ));
//! let _ = builder.new_action(Action::new(
//!     "unlock",
//!     AtomicFormula::equals(key, 1),
//!     vec![Effect::new(door, 1)],
//! ));
//! builder.set_goal(AtomicFormula::equals(door, 1));
//! let problem = builder.build().expect("well-formed problem");
//!
//! let heuristic = RelaxedPlanHeuristic::new(&problem, HeuristicOptions::default());
//! assert_eq!(heuristic.evaluate(&State::new([0, 0])), HeuristicValue::Finite(2));
//! ```
pub use sapling_core as core;
pub use sapling_core::*;
