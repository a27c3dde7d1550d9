use crate::problem::Atom;
use crate::problem::Problem;
use crate::problem::State;
use crate::problem::TupleId;
use crate::problem::Value;
use crate::propagation::Domain;
use crate::relaxation::RelaxedState;

/// Decides whether a relaxed layer satisfies the goal and the state constraints.
///
/// The check runs the arc-consistency engine over the domains the layer assigns to the
/// variables of the goal and state constraints. Local consistency is all that is established:
/// the layer is considered to satisfy the goal when filtering does not wipe out any domain.
#[derive(Clone, Copy, Debug)]
pub struct GoalChecker<'problem> {
    problem: &'problem Problem,
}

impl<'problem> GoalChecker<'problem> {
    pub fn new(problem: &'problem Problem) -> GoalChecker<'problem> {
        GoalChecker { problem }
    }

    /// Returns the goal-causing atoms if `layer` satisfies the goal, [`None`] otherwise.
    ///
    /// One value is committed for every constrained variable, preferring the value it has in
    /// `seed`. Each commitment is propagated; once a commitment leads to a failure, the
    /// remaining variables are committed without propagation. The atoms whose value differs
    /// from `seed` are the goal-causing atoms. An empty result means that `seed` itself is
    /// compatible with the goal as far as the committed values are concerned.
    pub fn check(&self, layer: &RelaxedState, seed: &State) -> Option<Vec<TupleId>> {
        let constraints = self.problem.goal_constraints();
        let mut domains = layer.project(constraints.scope());

        if constraints.filter(&mut domains).is_failure() || domains.has_empty_domain() {
            return None;
        }

        let mut propagating = true;
        let mut goal_atoms = Vec::new();

        for &variable in constraints.scope() {
            let value = preferred_value(domains.domain(variable), seed.value(variable))?;

            if propagating {
                let snapshot = domains.clone();
                domains.insert(variable, Domain::singleton(value));

                if constraints.filter(&mut domains).is_failure() {
                    propagating = false;
                    domains = snapshot;
                }
            }

            if value != seed.value(variable) {
                goal_atoms.push(
                    self.problem
                        .atom_index()
                        .to_index(Atom::new(variable, value)),
                );
            }
        }

        Some(goal_atoms)
    }
}

/// The seed value if it is still in `domain`, otherwise the smallest value of `domain`.
fn preferred_value(domain: &Domain, seed_value: Value) -> Option<Value> {
    if domain.contains(seed_value) {
        Some(seed_value)
    } else {
        domain.first()
    }
}
