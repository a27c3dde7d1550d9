use itertools::Itertools;

use crate::problem::Action;
use crate::problem::ActionId;
use crate::problem::AtomicFormula;
use crate::problem::Point;
use crate::problem::ProblemError;
use crate::problem::Term;
use crate::problem::Value;
use crate::problem::VariableId;
use crate::propagation::Constraint;
use crate::propagation::ConstraintManager;

/// One clause of a precondition, evaluated on its own over the relaxed domains of its scope.
#[derive(Clone, Debug)]
pub(crate) struct PreconditionProcedure {
    pub(crate) formula: AtomicFormula,
}

impl PreconditionProcedure {
    pub(crate) fn scope(&self) -> &[VariableId] {
        self.formula.scope()
    }

    pub(crate) fn is_monadic(&self) -> bool {
        self.scope().len() == 1
    }
}

/// One effect, together with the variables whose values it depends on.
#[derive(Clone, Debug)]
pub(crate) struct EffectProcedure {
    /// The variables mentioned by the condition or the assigned term, sorted.
    pub(crate) scope: Vec<VariableId>,
    pub(crate) condition: Vec<AtomicFormula>,
    pub(crate) target: VariableId,
    pub(crate) value: Term,
}

impl EffectProcedure {
    pub(crate) fn is_monadic(&self) -> bool {
        self.scope.len() == 1
    }

    /// The value assigned to the target at `values` (bound to [`EffectProcedure::scope`]), or
    /// [`None`] if the condition does not hold or the assigned term is undefined.
    pub(crate) fn apply(&self, values: &[Value]) -> Option<Value> {
        let point = Point::new(&self.scope, values);

        if !self
            .condition
            .iter()
            .all(|formula| formula.is_satisfied(&point))
        {
            return None;
        }

        self.value.evaluate(&point)
    }
}

/// The compiled form of an [`Action`] used by the relaxed applicability engine.
///
/// The precondition is split into its distinct clauses, each effect is turned into a procedure
/// over its own scope, and the clauses over more than one variable are also compiled into a
/// [`ConstraintManager`] which filters the relevant domains before any witness is searched.
/// Monadic clauses are left out of that filter; the applicability engine filters them itself so
/// it can remember the values they reject.
#[derive(Clone, Debug)]
pub(crate) struct ActionProcedures {
    pub(crate) action: ActionId,
    pub(crate) preconditions: Vec<PreconditionProcedure>,
    pub(crate) effects: Vec<EffectProcedure>,
    pub(crate) precondition_filter: ConstraintManager,
    /// All variables mentioned by the precondition or any effect, sorted.
    pub(crate) relevant: Vec<VariableId>,
}

impl ActionProcedures {
    pub(crate) fn compile(
        action_id: ActionId,
        action: &Action,
    ) -> Result<ActionProcedures, ProblemError> {
        let clauses = action
            .precondition
            .conjuncts(&format!("precondition of action '{}'", action.name))?;

        let mut effects = Vec::with_capacity(action.effects.len());
        for effect in &action.effects {
            let condition = effect.condition.conjuncts(&format!(
                "effect condition of action '{}'",
                action.name
            ))?;

            let mut scope = Vec::new();
            effect.value.collect_variables(&mut scope);
            scope.extend(condition.iter().flat_map(|formula| formula.scope()));
            let scope = scope.into_iter().sorted().dedup().collect();

            effects.push(EffectProcedure {
                scope,
                condition,
                target: effect.target,
                value: effect.value.clone(),
            });
        }

        let relevant = clauses
            .iter()
            .flat_map(|formula| formula.scope())
            .chain(effects.iter().flat_map(|effect| effect.scope.iter()))
            .copied()
            .sorted()
            .dedup()
            .collect();

        let precondition_filter = ConstraintManager::new(
            clauses
                .iter()
                .filter(|formula| formula.scope().len() != 1)
                .cloned()
                .map(Constraint::from_formula),
        );

        Ok(ActionProcedures {
            action: action_id,
            preconditions: clauses
                .into_iter()
                .map(|formula| PreconditionProcedure { formula })
                .collect(),
            effects,
            precondition_filter,
            relevant,
        })
    }
}

/// Iterates over every combination of values of `domains`, the `i`-th component of each point
/// being taken from `domains[i]`. A product of zero domains has exactly one (empty) point.
pub(crate) fn cartesian_product(domains: Vec<Vec<Value>>) -> Box<dyn Iterator<Item = Vec<Value>>> {
    if domains.is_empty() {
        Box::new(std::iter::once(Vec::new()))
    } else {
        Box::new(domains.into_iter().multi_cartesian_product())
    }
}

/// Whether `formula` holds at some point of the product of the domains of its scope; returns
/// that point.
pub(crate) fn first_witness(
    formula: &AtomicFormula,
    domains: Vec<Vec<Value>>,
) -> Option<Vec<Value>> {
    cartesian_product(domains)
        .find(|point| formula.is_satisfied(&Point::new(formula.scope(), point)))
}
