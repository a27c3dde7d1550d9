use crate::instance::ast::InstanceAst;
use crate::instance::compiler::context::CompilationContext;
use crate::instance::InstanceError;

pub(crate) fn run(ast: &InstanceAst, context: &mut CompilationContext) -> Result<(), InstanceError> {
    for variable in &ast.variables {
        if context.variable_map.contains_key(&variable.name) {
            return Err(InstanceError::DuplicateVariable(variable.name.clone()));
        }

        let id = context
            .builder
            .new_variable(variable.name.clone(), variable.domain.iter().copied());
        let _ = context.variable_map.insert(variable.name.clone(), id);
        context.variable_names.push(variable.name.clone());
    }

    Ok(())
}
