#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use sapling_core::heuristic::ExtractionPolicy;
use sapling_core::heuristic::HeuristicOptions;
use sapling_core::heuristic::HeuristicValue;
use sapling_core::heuristic::LayeredExpansion;
use sapling_core::heuristic::RelaxedPlanHeuristic;
use sapling_core::problem::Action;
use sapling_core::problem::ActionId;
use sapling_core::problem::AtomicFormula;
use sapling_core::problem::Effect;
use sapling_core::problem::Formula;
use sapling_core::problem::Problem;
use sapling_core::problem::ProblemBuilder;
use sapling_core::problem::RelationalOperator;
use sapling_core::problem::State;
use sapling_core::problem::StateConstraint;
use sapling_core::problem::Term;
use sapling_core::problem::VariableId;

fn options(extraction_policy: ExtractionPolicy) -> HeuristicOptions {
    HeuristicOptions { extraction_policy }
}

/// Two boolean variables x and y. A1 achieves x unconditionally, A2 requires x to achieve y and
/// A3 requires y to reset x. The goal is y.
struct Chain {
    problem: Problem,
    a1: ActionId,
    a2: ActionId,
}

fn chain() -> Chain {
    let mut builder = ProblemBuilder::default();
    let x = builder.new_variable("x", [0, 1]);
    let y = builder.new_variable("y", [0, 1]);

    let a1 = builder.new_action(Action::new(
        "A1",
        Formula::Tautology,
        vec![Effect::new(x, 1)],
    ));
    let a2 = builder.new_action(Action::new(
        "A2",
        AtomicFormula::equals(x, 1),
        vec![Effect::new(y, 1)],
    ));
    let _ = builder.new_action(Action::new(
        "A3",
        AtomicFormula::equals(y, 1),
        vec![Effect::new(x, 0)],
    ));
    builder.set_goal(AtomicFormula::equals(y, 1));

    Chain {
        problem: builder.build().expect("well-formed"),
        a1,
        a2,
    }
}

#[test]
fn chained_actions_are_both_counted() {
    let chain = chain();
    let heuristic = RelaxedPlanHeuristic::new(&chain.problem, HeuristicOptions::default());

    let evaluation = heuristic.evaluate_with_details(&State::new([0, 0]));

    assert_eq!(evaluation.value, HeuristicValue::Finite(2));
    assert_eq!(
        evaluation.plan.expect("goal is reachable").actions,
        vec![chain.a1, chain.a2]
    );
    assert_eq!(evaluation.layers, 2);
}

#[test]
fn goal_states_cost_nothing() {
    let chain = chain();
    let heuristic = RelaxedPlanHeuristic::new(&chain.problem, HeuristicOptions::default());

    let evaluation = heuristic.evaluate_with_details(&State::new([0, 1]));

    assert_eq!(evaluation.value, HeuristicValue::Finite(0));
    assert_eq!(evaluation.layers, 0);
}

#[test]
fn atoms_of_the_evaluated_state_are_free() {
    let chain = chain();
    let heuristic = RelaxedPlanHeuristic::new(&chain.problem, HeuristicOptions::default());

    assert_eq!(
        heuristic.evaluate(&State::new([1, 0])),
        HeuristicValue::Finite(1)
    );
}

#[test]
fn unreachable_goals_are_dead_ends() {
    let mut builder = ProblemBuilder::default();
    let x = builder.new_variable("x", [0, 1]);
    let y = builder.new_variable("y", [0, 1]);
    let _ = builder.new_action(Action::new(
        "set-x",
        Formula::Tautology,
        vec![Effect::new(x, 1)],
    ));
    builder.set_goal(AtomicFormula::equals(y, 1));
    let problem = builder.build().expect("well-formed");

    let heuristic = RelaxedPlanHeuristic::new(&problem, HeuristicOptions::default());
    let evaluation = heuristic.evaluate_with_details(&State::new([0, 0]));

    assert_eq!(evaluation.value, HeuristicValue::Infinite);
    assert!(evaluation.value.is_dead_end());
    assert_eq!(evaluation.value.as_f64(), f64::INFINITY);
    assert!(evaluation.plan.is_none());
    assert_eq!(evaluation.reached_atoms, 3);
}

#[test]
fn state_constraints_can_make_goals_unreachable() {
    let mut builder = ProblemBuilder::default();
    let x = builder.new_variable("x", [0, 1]);
    let y = builder.new_variable("y", [0, 1]);
    let _ = builder.new_action(Action::new(
        "set-x",
        Formula::Tautology,
        vec![Effect::new(x, 1)],
    ));
    builder.set_goal(AtomicFormula::equals(x, 1));
    builder.add_state_constraint(StateConstraint::Formula(
        AtomicFormula::new(x, RelationalOperator::Equal, y).into(),
    ));
    let problem = builder.build().expect("well-formed");

    let heuristic = RelaxedPlanHeuristic::new(&problem, HeuristicOptions::default());

    assert_eq!(
        heuristic.evaluate(&State::new([0, 0])),
        HeuristicValue::Infinite
    );
}

#[test]
fn the_seed_value_is_kept_when_it_satisfies_the_goal() {
    // x >= 1 holds for the seed value 2, which survives filtering next to the reached value 1.
    // Committing to 1 instead would add `lower` to the relaxed plan.
    let mut builder = ProblemBuilder::default();
    let x = builder.new_variable("x", [0, 1, 2]);
    let y = builder.new_variable("y", [0, 1]);
    let _ = builder.new_action(Action::new(
        "lower",
        Formula::Tautology,
        vec![Effect::new(x, 1)],
    ));
    let _ = builder.new_action(Action::new(
        "set-y",
        Formula::Tautology,
        vec![Effect::new(y, 1)],
    ));
    builder.set_goal(Formula::And(vec![
        AtomicFormula::new(x, RelationalOperator::GreaterOrEqual, 1).into(),
        AtomicFormula::equals(y, 1).into(),
    ]));
    let problem = builder.build().expect("well-formed");

    let heuristic = RelaxedPlanHeuristic::new(&problem, HeuristicOptions::default());
    let evaluation = heuristic.evaluate_with_details(&State::new([2, 0]));

    assert_eq!(evaluation.value, HeuristicValue::Finite(1));
    assert_eq!(evaluation.plan.expect("goal is reachable").actions.len(), 1);
}

#[test]
fn the_supported_policy_counts_actions_per_justification() {
    // `copy` produces y = 1 and z = 1 in the same layer, but the effect on z is conditioned on w
    // and therefore justified by a different set of atoms.
    let mut builder = ProblemBuilder::default();
    let x = builder.new_variable("x", [0, 1]);
    let y = builder.new_variable("y", [0, 1]);
    let z = builder.new_variable("z", [0, 1]);
    let w = builder.new_variable("w", [0, 1]);
    let _ = builder.new_action(Action::new(
        "raise-x",
        Formula::Tautology,
        vec![Effect::new(x, 1)],
    ));
    let _ = builder.new_action(Action::new(
        "copy",
        Formula::Tautology,
        vec![
            Effect::new(y, x),
            Effect::when(AtomicFormula::equals(w, 0), z, Term::from(x)),
        ],
    ));
    builder.set_goal(Formula::And(vec![
        AtomicFormula::equals(y, 1).into(),
        AtomicFormula::equals(z, 1).into(),
    ]));
    let problem = builder.build().expect("well-formed");
    let state = State::new([0, 0, 0, 0]);

    let propositional =
        RelaxedPlanHeuristic::new(&problem, options(ExtractionPolicy::Propositional));
    let supported = RelaxedPlanHeuristic::new(&problem, options(ExtractionPolicy::Supported));

    assert_eq!(propositional.evaluate(&state), HeuristicValue::Finite(2));
    assert_eq!(supported.evaluate(&state), HeuristicValue::Finite(3));
}

#[test]
fn layers_grow_monotonically_and_the_loop_is_bounded() {
    let chain = chain();
    let state = State::new([0, 0]);
    let mut expansion = LayeredExpansion::new(&chain.problem, &state);
    let bound = chain.problem.atom_index().len() + 1;

    let mut iterations = 0;
    loop {
        let previous = expansion.layer().clone();
        let novel = expansion.step();
        iterations += 1;

        assert!(expansion.layer().includes(&previous));
        assert_eq!(
            expansion.layer().num_atoms(),
            previous.num_atoms() + novel
        );
        assert!(iterations <= bound);

        if novel == 0 {
            break;
        }
    }

    for variable in (0..2).map(VariableId::new) {
        assert_eq!(expansion.layer().domain(variable).len(), 2);
    }
}

#[test]
fn evaluations_do_not_influence_each_other() {
    let chain = chain();
    let heuristic = RelaxedPlanHeuristic::new(&chain.problem, HeuristicOptions::default());

    let first = heuristic.evaluate_with_details(&State::new([0, 0]));
    let _ = heuristic.evaluate(&State::new([1, 1]));
    let second = heuristic.evaluate_with_details(&State::new([0, 0]));

    assert_eq!(first, second);
}
