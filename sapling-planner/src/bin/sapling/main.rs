mod instance;
mod result;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use instance::INITIAL_STATE_NAME;
use log::debug;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use result::PlannerError;
use result::PlannerResult;
use sapling_planner::core::convert_case::Case;
use sapling_planner::core::heuristic::ExtractionPolicy;
use sapling_planner::core::heuristic::HeuristicOptions;
use sapling_planner::core::heuristic::RelaxedPlanHeuristic;
use sapling_planner::core::statistics::configure_statistic_logging;
use sapling_planner::core::statistics::log_statistic_postfix;
use sapling_planner::core::statistics::should_log_statistics;
use sapling_planner::core::statistics::HeuristicStatistics;
use sapling_planner::core::statistics::Statistic;
use sapling_planner::core::statistics::StatisticLogger;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The problem file, a JSON document declaring the variables, actions, goal and states of a
    /// planning problem.
    instance_path: PathBuf,

    /// How the actions of a relaxed plan are counted.
    ///
    /// - 'propositional' counts an action once for every layer it is used in.
    /// - 'supported' counts an action once for every distinct set of atoms it is used under.
    #[arg(long, value_enum, default_value_t)]
    extraction_policy: ExtractionPolicy,

    /// The name of a state from the problem file to evaluate.
    ///
    /// Can be given several times; states are evaluated in the given order. When omitted, the
    /// initial state is evaluated, which can also be referred to as 'initial'.
    #[arg(long = "state", value_name = "NAME", verbatim_doc_comment)]
    states: Vec<String>,

    /// Print the actions of the relaxed plan below the heuristic value of every state.
    #[arg(long)]
    print_plan: bool,

    /// Enables log message output from the heuristic.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Print the statistics of the evaluations after all states have been evaluated.
    #[arg(short = 's', long = "log-statistics")]
    log_statistics: bool,
}

fn configure_logging(verbose: bool, log_statistics: bool) -> std::io::Result<()> {
    if log_statistics {
        configure_statistic_logging(
            "%%%sapling-stat:",
            Some("%%%sapling-stat-end"),
            Some(Case::Snake),
            None,
        );
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> PlannerResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose, args.log_statistics)?;

    if sapling_planner::core::asserts::SAPLING_ASSERT_LEVEL_DEFINITION
        >= sapling_planner::core::asserts::SAPLING_ASSERT_MODERATE
    {
        warn!(
            "Potential performance degradation: the Sapling assert level is set to {}, meaning many debug asserts are active which may result in performance degradation.",
            sapling_planner::core::asserts::SAPLING_ASSERT_LEVEL_DEFINITION
        );
    };

    let instance = instance::load(&args.instance_path)?;

    let state_names = if args.states.is_empty() {
        vec![INITIAL_STATE_NAME.to_owned()]
    } else {
        args.states
    };
    let states = state_names
        .iter()
        .map(|name| {
            instance
                .state(name)
                .map(|state| (name, state))
                .ok_or_else(|| PlannerError::UnknownState(name.clone()))
        })
        .collect::<PlannerResult<Vec<_>>>()?;

    let heuristic = RelaxedPlanHeuristic::new(
        &instance.problem,
        HeuristicOptions {
            extraction_policy: args.extraction_policy,
        },
    );

    let mut statistics = HeuristicStatistics::default();
    for (name, state) in states {
        debug!("Evaluating state '{name}': {state}");

        let evaluation = heuristic.evaluate_with_details(state);
        statistics.record(&evaluation);

        println!("h({name}) = {}", evaluation.value);
        if args.print_plan {
            if let Some(plan) = &evaluation.plan {
                for &action in &plan.actions {
                    println!("  {}", instance.problem.action(action).name);
                }
            }
        }
    }

    if should_log_statistics() {
        statistics.log(StatisticLogger::new("heuristic"));
        log_statistic_postfix();
    }

    Ok(())
}
