use crate::containers::HashSet;
use crate::problem::ActionId;
use crate::relaxation::JustificationId;

/// An action use encountered while tracing supports backwards from the goal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PlanStep {
    /// The layer in which the action produced the supported atom.
    pub layer: usize,
    pub action: ActionId,
    pub justification: JustificationId,
}

/// Decides which [`PlanStep`]s count as distinct steps of the relaxed plan.
pub trait PlanAccounting {
    /// Records `step`; returns whether it counts as a new step of the plan.
    fn register(&mut self, step: PlanStep) -> bool;

    /// The counted steps, in the order they were registered.
    fn steps(&self) -> &[PlanStep];
}

/// Counts every action once per layer it is used in.
#[derive(Debug, Default)]
pub struct PropositionalAccounting {
    seen: HashSet<(usize, ActionId)>,
    steps: Vec<PlanStep>,
}

impl PlanAccounting for PropositionalAccounting {
    fn register(&mut self, step: PlanStep) -> bool {
        if !self.seen.insert((step.layer, step.action)) {
            return false;
        }
        self.steps.push(step);
        true
    }

    fn steps(&self) -> &[PlanStep] {
        &self.steps
    }
}

/// Counts every action once per set of atoms it is used under.
///
/// Justifications are interned, so equal handles mean equal sets.
#[derive(Debug, Default)]
pub struct SupportedAccounting {
    seen: HashSet<(ActionId, JustificationId)>,
    steps: Vec<PlanStep>,
}

impl PlanAccounting for SupportedAccounting {
    fn register(&mut self, step: PlanStep) -> bool {
        if !self.seen.insert((step.action, step.justification)) {
            return false;
        }
        self.steps.push(step);
        true
    }

    fn steps(&self) -> &[PlanStep] {
        &self.steps
    }
}
