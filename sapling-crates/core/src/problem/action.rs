use super::Formula;
use super::Term;
use super::VariableId;

/// An effect `target := value`, which only fires when `condition` holds.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Effect {
    pub condition: Formula,
    pub target: VariableId,
    pub value: Term,
}

impl Effect {
    /// An unconditional effect.
    pub fn new(target: VariableId, value: impl Into<Term>) -> Self {
        Effect {
            condition: Formula::Tautology,
            target,
            value: value.into(),
        }
    }

    /// An effect which only fires when `condition` holds.
    pub fn when(condition: impl Into<Formula>, target: VariableId, value: impl Into<Term>) -> Self {
        Effect {
            condition: condition.into(),
            target,
            value: value.into(),
        }
    }
}

/// A ground action: a conjunctive precondition and a list of effects.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Action {
    pub name: String,
    pub precondition: Formula,
    pub effects: Vec<Effect>,
}

impl Action {
    pub fn new(name: impl Into<String>, precondition: impl Into<Formula>, effects: Vec<Effect>) -> Self {
        Action {
            name: name.into(),
            precondition: precondition.into(),
            effects,
        }
    }
}

/// A constraint every state of the problem has to satisfy.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum StateConstraint {
    /// A conjunctive formula over the state variables.
    Formula(Formula),
    /// The tuple of values of `scope` must be one of `tuples`.
    Extensional {
        scope: Vec<VariableId>,
        tuples: Vec<Vec<super::Value>>,
    },
}
