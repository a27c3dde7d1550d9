#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;
use sapling_core::heuristic::HeuristicOptions;
use sapling_core::heuristic::LayeredExpansion;
use sapling_core::heuristic::RelaxedPlanHeuristic;
use sapling_core::problem::Action;
use sapling_core::problem::AtomicFormula;
use sapling_core::problem::Effect;
use sapling_core::problem::Formula;
use sapling_core::problem::Problem;
use sapling_core::problem::ProblemBuilder;
use sapling_core::problem::RelationalOperator;
use sapling_core::problem::State;
use sapling_core::problem::Term;
use sapling_core::problem::TupleId;
use sapling_core::problem::Value;
use sapling_core::problem::VariableId;

const NUM_PROBLEMS: u64 = 200;
const DOMAIN_SIZE: Value = 4;

fn random_variable(rng: &mut SmallRng, num_variables: u32) -> VariableId {
    VariableId::new(rng.gen_range(0..num_variables))
}

fn random_condition(rng: &mut SmallRng, num_variables: u32) -> Formula {
    match rng.gen_range(0..4) {
        0 => Formula::Tautology,
        1 => AtomicFormula::equals(
            random_variable(rng, num_variables),
            rng.gen_range(0..DOMAIN_SIZE),
        )
        .into(),
        2 => AtomicFormula::new(
            random_variable(rng, num_variables),
            RelationalOperator::Less,
            random_variable(rng, num_variables),
        )
        .into(),
        _ => Formula::And(vec![
            random_condition(rng, num_variables),
            random_condition(rng, num_variables),
        ]),
    }
}

fn random_term(rng: &mut SmallRng, num_variables: u32) -> Term {
    match rng.gen_range(0..3) {
        0 => Term::Constant(rng.gen_range(0..DOMAIN_SIZE)),
        1 => random_variable(rng, num_variables).into(),
        _ => Term::add(
            random_variable(rng, num_variables).into(),
            Term::Constant(1),
        ),
    }
}

fn random_problem(rng: &mut SmallRng) -> Problem {
    let num_variables = rng.gen_range(2..5);
    let mut builder = ProblemBuilder::default();

    for index in 0..num_variables {
        let _ = builder.new_variable(format!("v{index}"), 0..DOMAIN_SIZE);
    }

    for index in 0..rng.gen_range(1..6) {
        let effects = (0..rng.gen_range(1..3))
            .map(|_| {
                let target = random_variable(rng, num_variables);
                let value = random_term(rng, num_variables);
                if rng.gen_bool(0.3) {
                    Effect::when(random_condition(rng, num_variables), target, value)
                } else {
                    Effect::new(target, value)
                }
            })
            .collect();

        let _ = builder.new_action(Action::new(
            format!("a{index}"),
            random_condition(rng, num_variables),
            effects,
        ));
    }

    builder.set_goal(random_condition(rng, num_variables));
    builder.build().expect("randomly generated problems are well-formed")
}

fn random_state(rng: &mut SmallRng, problem: &Problem) -> State {
    State::new((0..problem.num_variables()).map(|_| rng.gen_range(0..DOMAIN_SIZE)))
}

/// Follows the supports from `tuple_id` depth-first and fails if an atom is revisited on the
/// current path.
fn assert_acyclic_from(
    expansion: &LayeredExpansion<'_>,
    tuple_id: TupleId,
    path: &mut Vec<TupleId>,
) {
    assert!(
        !path.contains(&tuple_id),
        "atom {tuple_id} is part of its own justification"
    );
    let support = expansion
        .support_table()
        .support(tuple_id)
        .copied()
        .expect("justifying atoms are reached");

    path.push(tuple_id);
    for &justifying in expansion.arena().get(support.justification) {
        let justifying_layer = expansion
            .support_table()
            .support(justifying)
            .expect("justifying atoms are reached")
            .layer;
        assert!(justifying_layer < support.layer);

        assert_acyclic_from(expansion, justifying, path);
    }
    let _ = path.pop();
}

#[test]
fn supports_only_refer_to_earlier_layers() {
    for seed in 0..NUM_PROBLEMS {
        let mut rng = SmallRng::seed_from_u64(seed);
        let problem = random_problem(&mut rng);
        let state = random_state(&mut rng, &problem);

        let mut expansion = LayeredExpansion::new(&problem, &state);
        let bound = problem.atom_index().len() + 1;
        let mut iterations = 1;
        while expansion.step() > 0 {
            iterations += 1;
            assert!(
                iterations <= bound,
                "expansion of problem {seed} does not terminate"
            );
        }

        for (tuple_id, _) in problem.atom_index().iter() {
            if expansion.support_table().is_reached(tuple_id) {
                assert_acyclic_from(&expansion, tuple_id, &mut Vec::new());
            }
        }
    }
}

#[test]
fn relaxed_plans_never_exceed_the_number_of_reached_atoms() {
    for seed in 0..NUM_PROBLEMS {
        let mut rng = SmallRng::seed_from_u64(seed);
        let problem = random_problem(&mut rng);
        let state = random_state(&mut rng, &problem);

        let heuristic = RelaxedPlanHeuristic::new(&problem, HeuristicOptions::default());
        let evaluation = heuristic.evaluate_with_details(&state);

        if let Some(plan) = evaluation.plan {
            assert!(plan.cost <= evaluation.reached_atoms);
            assert_eq!(plan.cost, plan.actions.len());
        } else {
            assert!(evaluation.value.is_dead_end());
        }
    }
}
