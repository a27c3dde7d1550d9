use log::debug;

use super::ExtractionPolicy;
use super::GoalChecker;
use super::HeuristicOptions;
use super::HeuristicValue;
use super::LayeredExpansion;
use super::PropositionalAccounting;
use super::RelaxedPlan;
use super::RelaxedPlanExtractor;
use super::SupportedAccounting;
use crate::problem::Problem;
use crate::problem::State;

/// The outcome of one evaluation, together with what was computed on the way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub value: HeuristicValue,
    /// The relaxed plan the value was computed from; [`None`] for dead ends.
    pub plan: Option<RelaxedPlan>,
    /// The number of layers expanded beyond the seed layer.
    pub layers: usize,
    /// The number of atoms reached in the last layer, including those of the evaluated state.
    pub reached_atoms: usize,
}

/// Estimates the distance from a state to the goal by the length of a relaxed plan.
///
/// Relaxed layers are grown from the evaluated state until they satisfy the goal, after which the
/// supports of the goal-causing atoms are traced back to the state. If the layers stop growing
/// before the goal is satisfied, the state is a dead end.
///
/// Evaluation only reads from the [`Problem`]; all intermediate structures belong to a single
/// call, so one heuristic can be used to evaluate any number of states.
///
/// # Example
/// ```
/// # use sapling_core::heuristic::*;
/// # use sapling_core::problem::*;
/// let mut builder = ProblemBuilder::default();
/// let light = builder.new_variable("light", [0, 1]);
/// let _ = builder.new_action(Action::new(
///     "switch",
///     Formula::Tautology,
///     vec![Effect::new(light, 1)],
/// ));
/// builder.set_goal(AtomicFormula::equals(light, 1));
/// let problem = builder.build().expect("well-formed problem");
///
/// let heuristic = RelaxedPlanHeuristic::new(&problem, HeuristicOptions::default());
///
/// assert_eq!(heuristic.evaluate(&State::new([0])), HeuristicValue::Finite(1));
/// assert_eq!(heuristic.evaluate(&State::new([1])), HeuristicValue::Finite(0));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RelaxedPlanHeuristic<'problem> {
    problem: &'problem Problem,
    options: HeuristicOptions,
}

impl<'problem> RelaxedPlanHeuristic<'problem> {
    pub fn new(problem: &'problem Problem, options: HeuristicOptions) -> Self {
        RelaxedPlanHeuristic { problem, options }
    }

    /// Evaluates `state`, which has to assign a registered value to every variable of the problem
    /// (see [`Problem::validate_state`]).
    pub fn evaluate(&self, state: &State) -> HeuristicValue {
        self.evaluate_with_details(state).value
    }

    pub fn evaluate_with_details(&self, state: &State) -> Evaluation {
        let goal_checker = GoalChecker::new(self.problem);
        let mut expansion = LayeredExpansion::new(self.problem, state);

        loop {
            if let Some(goal_atoms) = goal_checker.check(expansion.layer(), state) {
                let extractor =
                    RelaxedPlanExtractor::new(expansion.support_table(), expansion.arena());
                let plan = match self.options.extraction_policy {
                    ExtractionPolicy::Propositional => {
                        extractor.extract(&goal_atoms, PropositionalAccounting::default())
                    }
                    ExtractionPolicy::Supported => {
                        extractor.extract(&goal_atoms, SupportedAccounting::default())
                    }
                };

                debug!(
                    "Goal reached after {} layers with {} goal-causing atoms, relaxed plan cost {}",
                    expansion.num_layers(),
                    goal_atoms.len(),
                    plan.cost
                );

                return Evaluation {
                    value: HeuristicValue::from_cost(plan.cost),
                    plan: Some(plan),
                    layers: expansion.num_layers(),
                    reached_atoms: expansion.support_table().num_reached(),
                };
            }

            if expansion.step() == 0 {
                debug!(
                    "Relaxed dead end: fixpoint after {} layers with {} atoms reached",
                    expansion.num_layers(),
                    expansion.support_table().num_reached()
                );

                return Evaluation {
                    value: HeuristicValue::Infinite,
                    plan: None,
                    layers: expansion.num_layers(),
                    reached_atoms: expansion.support_table().num_reached(),
                };
            }
        }
    }
}
