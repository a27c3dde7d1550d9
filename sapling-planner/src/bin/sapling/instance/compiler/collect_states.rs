use std::collections::BTreeMap;

use sapling_planner::core::problem::State;

use crate::instance::ast::InstanceAst;
use crate::instance::ast::StateAst;
use crate::instance::compiler::context::CompilationContext;
use crate::instance::InstanceError;
use crate::instance::INITIAL_STATE_NAME;

/// The initial state followed by the named states.
pub(crate) type CollectedStates = (State, BTreeMap<String, State>);

pub(crate) fn run(
    ast: &InstanceAst,
    context: &CompilationContext,
) -> Result<CollectedStates, InstanceError> {
    let initial_state = collect_state(INITIAL_STATE_NAME, &ast.initial_state, context)?;

    let states = ast
        .states
        .iter()
        .map(|(name, state)| {
            if name == INITIAL_STATE_NAME {
                return Err(InstanceError::ReservedStateName(name.clone()));
            }
            Ok((name.clone(), collect_state(name, state, context)?))
        })
        .collect::<Result<_, _>>()?;

    Ok((initial_state, states))
}

fn collect_state(
    name: &str,
    state: &StateAst,
    context: &CompilationContext,
) -> Result<State, InstanceError> {
    if let Some(unknown) = state
        .keys()
        .find(|variable| !context.variable_map.contains_key(*variable))
    {
        return Err(InstanceError::UndefinedVariable(unknown.clone()));
    }

    let values = context
        .variable_names
        .iter()
        .map(|variable| {
            state
                .get(variable)
                .copied()
                .ok_or_else(|| InstanceError::MissingValue {
                    state: name.to_owned(),
                    variable: variable.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(State::new(values))
}
