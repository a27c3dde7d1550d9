use sapling_planner::core::problem::StateConstraint;

use crate::instance::ast::InstanceAst;
use crate::instance::ast::StateConstraintAst;
use crate::instance::compiler::context::CompilationContext;
use crate::instance::InstanceError;

/// Posts the goal and the state constraints.
pub(crate) fn run(ast: &InstanceAst, context: &mut CompilationContext) -> Result<(), InstanceError> {
    if let Some(goal) = &ast.goal {
        let goal = context.resolve_formula(goal)?;
        context.builder.set_goal(goal);
    }

    for constraint in &ast.state_constraints {
        let constraint = match constraint {
            StateConstraintAst::Formula { formula } => {
                StateConstraint::Formula(context.resolve_formula(formula)?)
            }
            StateConstraintAst::Table { scope, tuples } => StateConstraint::Extensional {
                scope: scope
                    .iter()
                    .map(|name| context.resolve_variable(name))
                    .collect::<Result<_, _>>()?,
                tuples: tuples.clone(),
            },
        };
        context.builder.add_state_constraint(constraint);
    }

    Ok(())
}
