use itertools::Itertools;
use log::debug;

use super::Action;
use super::ActionId;
use super::Atom;
use super::AtomIndex;
use super::Formula;
use super::Problem;
use super::ProblemError;
use super::StateConstraint;
use super::Value;
use super::VariableId;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::propagation::Constraint;
use crate::propagation::ConstraintManager;
use crate::relaxation::ActionProcedures;

/// Collects the variables, actions, goal and state constraints of a problem and turns them into a
/// [`Problem`].
///
/// Nothing is checked while the problem is being declared; [`ProblemBuilder::build`] reports the
/// first misconfiguration it finds.
///
/// # Example
/// ```
/// # use sapling_core::problem::*;
/// let mut builder = ProblemBuilder::default();
/// let door = builder.new_variable("door", [0, 1]);
/// let _ = builder.new_action(Action::new(
///     "open",
///     AtomicFormula::equals(door, 0),
///     vec![Effect::new(door, 1)],
/// ));
/// builder.set_goal(AtomicFormula::equals(door, 1));
///
/// let problem = builder.build().expect("well-formed problem");
/// assert_eq!(problem.num_actions(), 1);
/// assert_eq!(problem.atom_index().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct ProblemBuilder {
    variable_names: KeyedVec<VariableId, String>,
    domains: KeyedVec<VariableId, Vec<Value>>,
    actions: KeyedVec<ActionId, Action>,
    goal: Option<Formula>,
    state_constraints: Vec<StateConstraint>,
}

impl ProblemBuilder {
    /// Declares a variable which can take the values in `domain`.
    pub fn new_variable(
        &mut self,
        name: impl Into<String>,
        domain: impl IntoIterator<Item = Value>,
    ) -> VariableId {
        let _ = self
            .domains
            .push(domain.into_iter().sorted().dedup().collect());
        self.variable_names.push(name.into())
    }

    pub fn new_action(&mut self, action: Action) -> ActionId {
        self.actions.push(action)
    }

    /// Sets the goal; a problem without a goal is trivially solved.
    pub fn set_goal(&mut self, goal: impl Into<Formula>) {
        self.goal = Some(goal.into());
    }

    pub fn add_state_constraint(&mut self, constraint: StateConstraint) {
        self.state_constraints.push(constraint);
    }

    pub fn build(self) -> Result<Problem, ProblemError> {
        if let Some(variable) = self.domains.keys().find(|&v| self.domains[v].is_empty()) {
            return Err(ProblemError::EmptyDomain(
                self.variable_names[variable].clone(),
            ));
        }

        let atom_index = AtomIndex::new(self.domains.iter_with_keys().flat_map(
            |(variable, values)| values.iter().map(move |&value| Atom::new(variable, value)),
        ))?;

        let procedures = self
            .actions
            .iter_with_keys()
            .map(|(action_id, action)| -> Result<ActionProcedures, ProblemError> {
                let procedures = ActionProcedures::compile(action_id, action)?;
                let targets = action.effects.iter().map(|effect| effect.target);
                self.check_declared(procedures.relevant.iter().copied().chain(targets))?;
                Ok(procedures)
            })
            .collect::<Result<KeyedVec<ActionId, ActionProcedures>, ProblemError>>()?;

        let mut constraints = Vec::new();
        if let Some(goal) = &self.goal {
            constraints.extend(
                goal.conjuncts("goal")?
                    .into_iter()
                    .map(Constraint::from_formula),
            );
        }
        for state_constraint in &self.state_constraints {
            match state_constraint {
                StateConstraint::Formula(formula) => constraints.extend(
                    formula
                        .conjuncts("state constraint")?
                        .into_iter()
                        .map(Constraint::from_formula),
                ),
                StateConstraint::Extensional { scope, tuples } => {
                    self.check_declared(scope.iter().copied())?;
                    for tuple in tuples {
                        self.check_registered(scope, tuple, &atom_index)?;
                    }
                    constraints.push(Constraint::extensional(scope.clone(), tuples.clone())?);
                }
            }
        }
        self.check_declared(
            constraints
                .iter()
                .flat_map(|constraint| constraint.scope().iter().copied()),
        )?;

        let goal_constraints = ConstraintManager::new(constraints);

        debug!(
            "Built problem with {} variables, {} atoms, {} actions and {} goal constraints",
            self.variable_names.len(),
            atom_index.len(),
            self.actions.len(),
            goal_constraints.num_constraints()
        );

        Ok(Problem {
            variable_names: self.variable_names,
            domains: self.domains,
            actions: self.actions,
            procedures,
            goal_constraints,
            atom_index,
        })
    }

    fn check_declared(
        &self,
        mut variables: impl Iterator<Item = VariableId>,
    ) -> Result<(), ProblemError> {
        match variables.find(|variable| variable.index() >= self.variable_names.len()) {
            Some(variable) => Err(ProblemError::UndeclaredVariable(variable)),
            None => Ok(()),
        }
    }

    fn check_registered(
        &self,
        scope: &[VariableId],
        tuple: &[Value],
        atom_index: &AtomIndex,
    ) -> Result<(), ProblemError> {
        match scope
            .iter()
            .zip(tuple)
            .map(|(&variable, &value)| Atom::new(variable, value))
            .find(|&atom| atom_index.try_to_index(atom).is_none())
        {
            Some(atom) => Err(ProblemError::UnregisteredValue {
                variable: atom.variable,
                value: atom.value,
            }),
            None => Ok(()),
        }
    }
}
