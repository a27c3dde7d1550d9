use std::fmt::Display;
use std::fmt::Formatter;

use super::State;
use super::Value;
use super::VariableId;

/// Anything which can answer "which value does this variable take?".
///
/// During relaxed evaluation only a handful of variables are bound at a time (the variables
/// relevant to one procedure), so lookups may fail; a failed lookup makes the enclosing term
/// undefined.
pub trait Valuation {
    fn value_of(&self, variable: VariableId) -> Option<Value>;
}

impl Valuation for State {
    fn value_of(&self, variable: VariableId) -> Option<Value> {
        (variable.0 < self.num_variables() as u32).then(|| self.value(variable))
    }
}

/// A partial assignment which binds `variables[i]` to `values[i]`.
#[derive(Clone, Copy, Debug)]
pub struct Point<'a> {
    variables: &'a [VariableId],
    values: &'a [Value],
}

impl<'a> Point<'a> {
    pub fn new(variables: &'a [VariableId], values: &'a [Value]) -> Self {
        Point { variables, values }
    }
}

impl Valuation for Point<'_> {
    fn value_of(&self, variable: VariableId) -> Option<Value> {
        self.variables
            .iter()
            .position(|&bound| bound == variable)
            .map(|index| self.values[index])
    }
}

/// A (ground) numeric term over the state variables.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Term {
    Constant(Value),
    Variable(VariableId),
    Add(Box<Term>, Box<Term>),
    Sub(Box<Term>, Box<Term>),
}

impl Term {
    pub fn add(lhs: Term, rhs: Term) -> Term {
        Term::Add(Box::new(lhs), Box::new(rhs))
    }

    pub fn sub(lhs: Term, rhs: Term) -> Term {
        Term::Sub(Box::new(lhs), Box::new(rhs))
    }

    /// Evaluates the term; returns [`None`] if a variable is unbound or the arithmetic overflows.
    pub fn evaluate(&self, valuation: &impl Valuation) -> Option<Value> {
        match self {
            Term::Constant(value) => Some(*value),
            Term::Variable(variable) => valuation.value_of(*variable),
            Term::Add(lhs, rhs) => lhs
                .evaluate(valuation)?
                .checked_add(rhs.evaluate(valuation)?),
            Term::Sub(lhs, rhs) => lhs
                .evaluate(valuation)?
                .checked_sub(rhs.evaluate(valuation)?),
        }
    }

    pub(crate) fn collect_variables(&self, variables: &mut Vec<VariableId>) {
        match self {
            Term::Constant(_) => {}
            Term::Variable(variable) => variables.push(*variable),
            Term::Add(lhs, rhs) | Term::Sub(lhs, rhs) => {
                lhs.collect_variables(variables);
                rhs.collect_variables(variables);
            }
        }
    }
}

impl From<VariableId> for Term {
    fn from(variable: VariableId) -> Self {
        Term::Variable(variable)
    }
}

impl From<Value> for Term {
    fn from(value: Value) -> Self {
        Term::Constant(value)
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Constant(value) => write!(f, "{value}"),
            Term::Variable(variable) => write!(f, "{variable}"),
            Term::Add(lhs, rhs) => write!(f, "({lhs} + {rhs})"),
            Term::Sub(lhs, rhs) => write!(f, "({lhs} - {rhs})"),
        }
    }
}
