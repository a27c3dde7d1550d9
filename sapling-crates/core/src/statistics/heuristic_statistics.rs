use crate::create_statistics_struct;
use crate::heuristic::Evaluation;

create_statistics_struct!(
    /// Counters over a sequence of heuristic evaluations.
    HeuristicStatistics {
        num_evaluations: usize,
        /// The number of evaluated states from which the goal is unreachable under the delete
        /// relaxation.
        num_dead_ends: usize,
        num_layers_expanded: usize,
        /// The summed cost of the relaxed plans of all states which are not dead ends.
        total_relaxed_plan_cost: usize,
    }
);

impl HeuristicStatistics {
    pub fn record(&mut self, evaluation: &Evaluation) {
        self.num_evaluations += 1;
        self.num_layers_expanded += evaluation.layers;

        match &evaluation.plan {
            Some(plan) => self.total_relaxed_plan_cost += plan.cost,
            None => self.num_dead_ends += 1,
        }
    }
}
