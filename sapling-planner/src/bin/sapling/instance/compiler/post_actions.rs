use sapling_planner::core::problem::Action;
use sapling_planner::core::problem::Effect;

use crate::instance::ast::ActionAst;
use crate::instance::ast::InstanceAst;
use crate::instance::compiler::context::CompilationContext;
use crate::instance::InstanceError;

pub(crate) fn run(ast: &InstanceAst, context: &mut CompilationContext) -> Result<(), InstanceError> {
    for action in &ast.actions {
        let action = compile_action(action, context)?;
        let _ = context.builder.new_action(action);
    }

    Ok(())
}

fn compile_action(action: &ActionAst, context: &CompilationContext) -> Result<Action, InstanceError> {
    let precondition = context.resolve_optional_formula(action.precondition.as_ref())?;

    let effects = action
        .effects
        .iter()
        .map(|effect| {
            let target = context.resolve_variable(&effect.target)?;
            let value = context.resolve_term(&effect.value)?;

            Ok(match &effect.condition {
                Some(condition) => Effect::when(context.resolve_formula(condition)?, target, value),
                None => Effect::new(target, value),
            })
        })
        .collect::<Result<Vec<_>, InstanceError>>()?;

    Ok(Action::new(action.name.clone(), precondition, effects))
}
