use std::collections::VecDeque;

use super::PlanAccounting;
use super::PlanStep;
use crate::containers::HashSet;
use crate::problem::ActionId;
use crate::problem::TupleId;
use crate::relaxation::JustificationArena;
use crate::relaxation::SupportTable;
use crate::sapling_assert_simple;

/// The actions traced back from the goal, in the order of the layers they were used in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelaxedPlan {
    pub actions: Vec<ActionId>,
    pub cost: usize,
}

/// Traces supports backwards from goal-causing atoms to the seed state.
#[derive(Clone, Copy, Debug)]
pub struct RelaxedPlanExtractor<'a> {
    support_table: &'a SupportTable,
    arena: &'a JustificationArena,
}

impl<'a> RelaxedPlanExtractor<'a> {
    pub fn new(
        support_table: &'a SupportTable,
        arena: &'a JustificationArena,
    ) -> RelaxedPlanExtractor<'a> {
        RelaxedPlanExtractor {
            support_table,
            arena,
        }
    }

    /// Collects the actions supporting `goal_atoms`, counted according to `accounting`.
    ///
    /// Atoms of the seed state are free. Every other atom contributes the action of its support,
    /// and the atoms justifying that support are traced in turn. Supports only refer to atoms
    /// reached in earlier layers, so the traversal terminates.
    pub fn extract(
        &self,
        goal_atoms: &[TupleId],
        mut accounting: impl PlanAccounting,
    ) -> RelaxedPlan {
        let mut queue = goal_atoms.iter().copied().collect::<VecDeque<_>>();
        let mut processed: HashSet<TupleId> = HashSet::default();

        while let Some(tuple_id) = queue.pop_front() {
            if !processed.insert(tuple_id) {
                continue;
            }

            let support = self.support_table.support(tuple_id);
            sapling_assert_simple!(
                support.is_some(),
                "traced atom {tuple_id} was never reached"
            );
            let Some(support) = support else {
                continue;
            };

            let Some(action) = support.action else {
                continue;
            };

            let _ = accounting.register(PlanStep {
                layer: support.layer,
                action,
                justification: support.justification,
            });
            queue.extend(self.arena.get(support.justification));
        }

        let mut steps = accounting.steps().to_vec();
        steps.sort_by_key(|step| step.layer);

        RelaxedPlan {
            cost: steps.len(),
            actions: steps.into_iter().map(|step| step.action).collect(),
        }
    }
}
