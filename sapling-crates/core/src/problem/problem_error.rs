use thiserror::Error;

use super::Atom;
use super::TupleId;
use super::Value;
use super::VariableId;

/// Errors which can occur while loading a problem.
///
/// These are misconfigurations of the problem description; once a [`Problem`](super::Problem)
/// has been built, evaluating states never produces them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    #[error("the atom {atom} was registered twice, with ids {first} and {second}")]
    DuplicateAtom {
        atom: Atom,
        first: TupleId,
        second: TupleId,
    },
    #[error("the variable '{0}' has an empty domain")]
    EmptyDomain(String),
    #[error("the variable {0} is used but never declared")]
    UndeclaredVariable(VariableId),
    #[error("the value {value} is not in the domain of variable {variable}")]
    UnregisteredValue { variable: VariableId, value: Value },
    #[error("a {kind} constraint expects {expected} variables, but its scope has {actual}")]
    ConstraintArity {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("the extensional tuple {tuple:?} has {actual} values, but its scope has {expected} variables")]
    TupleArity {
        tuple: Vec<Value>,
        expected: usize,
        actual: usize,
    },
    #[error("the variable {0} occurs more than once in the scope of an extensional constraint")]
    RepeatedScopeVariable(VariableId),
    #[error("the {context} must be a conjunction of atomic formulas, found '{formula}'")]
    NonConjunctiveFormula { context: String, formula: String },
    #[error("the state assigns {actual} variables, but the problem declares {expected}")]
    StateArity { expected: usize, actual: usize },
}
