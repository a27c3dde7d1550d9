use super::Action;
use super::ActionId;
use super::AtomIndex;
use super::ProblemError;
use super::State;
use super::Value;
use super::VariableId;
use crate::containers::KeyedVec;
use crate::propagation::ConstraintManager;
use crate::relaxation::ActionProcedures;

/// A loaded planning problem, as handed to the heuristic.
///
/// A [`Problem`] is created through the [`ProblemBuilder`](super::ProblemBuilder), which checks
/// it for misconfigurations and compiles its actions, goal and state constraints. Afterwards it
/// is never modified; heuristic evaluations only read from it, so it can be shared between
/// threads.
#[derive(Debug)]
pub struct Problem {
    pub(crate) variable_names: KeyedVec<VariableId, String>,
    /// The sorted, deduplicated domain of every variable.
    pub(crate) domains: KeyedVec<VariableId, Vec<Value>>,
    pub(crate) actions: KeyedVec<ActionId, Action>,
    pub(crate) procedures: KeyedVec<ActionId, ActionProcedures>,
    /// The goal together with the state constraints, in the form checked on relaxed layers.
    pub(crate) goal_constraints: ConstraintManager,
    pub(crate) atom_index: AtomIndex,
}

impl Problem {
    pub fn num_variables(&self) -> usize {
        self.variable_names.len()
    }

    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.variable_names.keys()
    }

    pub fn variable_name(&self, variable: VariableId) -> &str {
        &self.variable_names[variable]
    }

    pub fn domain(&self, variable: VariableId) -> &[Value] {
        &self.domains[variable]
    }

    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }

    pub fn action(&self, action: ActionId) -> &Action {
        &self.actions[action]
    }

    pub fn actions(&self) -> impl Iterator<Item = (ActionId, &Action)> {
        self.actions.iter_with_keys()
    }

    pub fn atom_index(&self) -> &AtomIndex {
        &self.atom_index
    }

    /// The constraints a relaxed layer has to be consistent with for the goal to be considered
    /// reached: the goal clauses and the state constraints.
    pub fn goal_constraints(&self) -> &ConstraintManager {
        &self.goal_constraints
    }

    pub(crate) fn procedures(&self, action: ActionId) -> &ActionProcedures {
        &self.procedures[action]
    }

    /// Checks that `state` assigns every variable of the problem a value from its domain.
    ///
    /// States which pass this check can be evaluated; the heuristic assumes (and only asserts)
    /// that every value of the state has been registered in the [`AtomIndex`].
    pub fn validate_state(&self, state: &State) -> Result<(), ProblemError> {
        if state.num_variables() != self.num_variables() {
            return Err(ProblemError::StateArity {
                expected: self.num_variables(),
                actual: state.num_variables(),
            });
        }

        match state
            .atoms()
            .find(|&atom| self.atom_index.try_to_index(atom).is_none())
        {
            Some(atom) => Err(ProblemError::UnregisteredValue {
                variable: atom.variable,
                value: atom.value,
            }),
            None => Ok(()),
        }
    }
}
