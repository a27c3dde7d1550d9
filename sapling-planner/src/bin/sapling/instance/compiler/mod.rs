mod collect_states;
mod context;
mod define_variables;
mod post_actions;
mod post_constraints;

use context::CompilationContext;
use log::debug;

use super::ast::InstanceAst;
use super::Instance;
use super::InstanceError;

pub(crate) fn compile(ast: InstanceAst) -> Result<Instance, InstanceError> {
    let mut context = CompilationContext::default();

    define_variables::run(&ast, &mut context)?;
    post_actions::run(&ast, &mut context)?;
    post_constraints::run(&ast, &mut context)?;
    let (initial_state, states) = collect_states::run(&ast, &context)?;

    let problem = context.builder.build()?;
    problem.validate_state(&initial_state)?;
    for state in states.values() {
        problem.validate_state(state)?;
    }

    debug!(
        "Compiled problem with {} variables, {} actions and {} named states",
        problem.num_variables(),
        problem.num_actions(),
        states.len()
    );

    Ok(Instance {
        problem,
        initial_state,
        states,
    })
}
