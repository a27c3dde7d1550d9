#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use helpers::instance;
use helpers::run_planner;

#[test]
fn the_initial_state_is_evaluated_by_default() {
    let output = run_planner(instance("chain"), []);

    assert!(output.success);
    assert_eq!(output.result_lines(), vec!["h(initial) = 2"]);
}

#[test]
fn named_states_are_evaluated_in_order() {
    let output = run_planner(
        instance("chain"),
        ["--state", "solved", "--state", "x-set", "--state", "initial"],
    );

    assert!(output.success);
    assert_eq!(
        output.result_lines(),
        vec!["h(solved) = 0", "h(x-set) = 1", "h(initial) = 2"]
    );
}

#[test]
fn relaxed_plans_are_printed_in_layer_order() {
    let output = run_planner(instance("chain"), ["--print-plan"]);

    assert!(output.success);
    assert_eq!(
        output.result_lines(),
        vec!["h(initial) = 2", "  set-x", "  set-y"]
    );
}

#[test]
fn arithmetic_effects_are_counted_once_per_layer() {
    let output = run_planner(instance("counter"), ["--print-plan"]);

    assert!(output.success);
    assert_eq!(
        output.result_lines(),
        vec!["h(initial) = 3", "  increment", "  increment", "  increment"]
    );
}

#[test]
fn dead_ends_are_reported_as_infinity() {
    let output = run_planner(instance("dead_end"), ["--print-plan"]);

    assert!(output.success);
    assert_eq!(output.result_lines(), vec!["h(initial) = infinity"]);
}

#[test]
fn statistics_are_logged_on_request() {
    let output = run_planner(
        instance("chain"),
        ["--log-statistics", "--state", "initial", "--state", "solved"],
    );

    assert!(output.success);
    let lines = output.stdout.lines().collect::<Vec<_>>();
    assert!(lines.contains(&"%%%sapling-stat: heuristic_num_evaluations=2"));
    assert!(lines.contains(&"%%%sapling-stat: heuristic_num_dead_ends=0"));
    assert!(lines.contains(&"%%%sapling-stat: heuristic_total_relaxed_plan_cost=2"));
    assert_eq!(lines.last(), Some(&"%%%sapling-stat-end"));
}

#[test]
fn the_supported_policy_can_be_selected() {
    let output = run_planner(instance("chain"), ["--extraction-policy", "supported"]);

    assert!(output.success);
    assert_eq!(output.result_lines(), vec!["h(initial) = 2"]);
}

#[test]
fn unknown_states_fail() {
    let output = run_planner(instance("chain"), ["--state", "missing"]);

    assert!(!output.success);
    assert!(output.result_lines().is_empty());
}

#[test]
fn misconfigured_problems_fail() {
    let output = run_planner(instance("disjunctive_goal"), []);

    assert!(!output.success);
    assert!(output
        .stdout
        .lines()
        .any(|line| line.starts_with("% Execution failed")));
}

#[test]
fn missing_files_fail() {
    let output = run_planner(instance("does_not_exist"), []);

    assert!(!output.success);
}
