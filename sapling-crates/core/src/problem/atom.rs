use std::fmt::Display;
use std::fmt::Formatter;

use super::Value;
use super::VariableId;

/// A candidate fact: the variable `variable` takes the value `value`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Atom {
    pub variable: VariableId,
    pub value: Value,
}

impl Atom {
    pub fn new(variable: VariableId, value: Value) -> Self {
        Atom { variable, value }
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} = {}]", self.variable, self.value)
    }
}
