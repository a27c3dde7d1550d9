use sapling_planner::core::containers::HashMap;
use sapling_planner::core::problem::AtomicFormula;
use sapling_planner::core::problem::Formula;
use sapling_planner::core::problem::ProblemBuilder;
use sapling_planner::core::problem::Term;
use sapling_planner::core::problem::VariableId;

use crate::instance::ast::FormulaAst;
use crate::instance::ast::TermAst;
use crate::instance::InstanceError;

#[derive(Debug, Default)]
pub(crate) struct CompilationContext {
    /// The problem under construction.
    pub(crate) builder: ProblemBuilder,
    /// Maps variable names to the identifiers they were declared with.
    pub(crate) variable_map: HashMap<String, VariableId>,
    /// The variable names in declaration order.
    pub(crate) variable_names: Vec<String>,
}

impl CompilationContext {
    pub(crate) fn resolve_variable(&self, name: &str) -> Result<VariableId, InstanceError> {
        self.variable_map
            .get(name)
            .copied()
            .ok_or_else(|| InstanceError::UndefinedVariable(name.to_owned()))
    }

    pub(crate) fn resolve_term(&self, term: &TermAst) -> Result<Term, InstanceError> {
        match term {
            TermAst::Constant { value } => Ok(Term::Constant(*value)),
            TermAst::Variable { name } => Ok(self.resolve_variable(name)?.into()),
            TermAst::Add { lhs, rhs } => Ok(Term::add(
                self.resolve_term(lhs)?,
                self.resolve_term(rhs)?,
            )),
            TermAst::Sub { lhs, rhs } => Ok(Term::sub(
                self.resolve_term(lhs)?,
                self.resolve_term(rhs)?,
            )),
        }
    }

    pub(crate) fn resolve_formula(&self, formula: &FormulaAst) -> Result<Formula, InstanceError> {
        let resolve_all = |operands: &[FormulaAst]| {
            operands
                .iter()
                .map(|operand| self.resolve_formula(operand))
                .collect::<Result<Vec<_>, _>>()
        };

        match formula {
            FormulaAst::True => Ok(Formula::Tautology),
            FormulaAst::False => Ok(Formula::Contradiction),
            FormulaAst::Atom { lhs, op, rhs } => Ok(AtomicFormula::new(
                self.resolve_term(lhs)?,
                (*op).into(),
                self.resolve_term(rhs)?,
            )
            .into()),
            FormulaAst::And { operands } => Ok(Formula::And(resolve_all(operands)?)),
            FormulaAst::Or { operands } => Ok(Formula::Or(resolve_all(operands)?)),
            FormulaAst::Not { operand } => {
                Ok(Formula::Not(Box::new(self.resolve_formula(operand)?)))
            }
        }
    }

    /// Resolves an optional formula, where an absent formula always holds.
    pub(crate) fn resolve_optional_formula(
        &self,
        formula: Option<&FormulaAst>,
    ) -> Result<Formula, InstanceError> {
        formula.map_or(Ok(Formula::Tautology), |formula| {
            self.resolve_formula(formula)
        })
    }
}
