use std::fmt::Display;
use std::fmt::Formatter;

/// The outcome of evaluating a state.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum HeuristicValue {
    /// The estimated number of actions needed to reach the goal.
    Finite(u32),
    /// The goal is not reachable even under the delete relaxation; the state is a dead end.
    Infinite,
}

impl HeuristicValue {
    pub(crate) fn from_cost(cost: usize) -> HeuristicValue {
        HeuristicValue::Finite(u32::try_from(cost).unwrap_or(u32::MAX))
    }

    /// The value as a number, with [`f64::INFINITY`] for dead ends.
    pub fn as_f64(self) -> f64 {
        match self {
            HeuristicValue::Finite(cost) => f64::from(cost),
            HeuristicValue::Infinite => f64::INFINITY,
        }
    }

    pub fn is_dead_end(self) -> bool {
        self == HeuristicValue::Infinite
    }
}

impl Display for HeuristicValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HeuristicValue::Finite(cost) => write!(f, "{cost}"),
            HeuristicValue::Infinite => write!(f, "infinity"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_ends_compare_above_every_cost() {
        assert!(HeuristicValue::Finite(u32::MAX) < HeuristicValue::Infinite);
        assert!(HeuristicValue::Infinite.is_dead_end());
        assert_eq!(HeuristicValue::Infinite.as_f64(), f64::INFINITY);
        assert_eq!(HeuristicValue::Finite(3).as_f64(), 3.0);
    }

    #[test]
    fn display_matches_the_planner_output() {
        assert_eq!(HeuristicValue::Finite(2).to_string(), "2");
        assert_eq!(HeuristicValue::Infinite.to_string(), "infinity");
    }
}
