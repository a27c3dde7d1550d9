//! The JSON representation of a problem file, as it is decoded before compilation.
//!
//! Variables are referred to by name everywhere; names are resolved when the problem is compiled.
//! A small problem looks as follows:
//!
//! ```json
//! {
//!   "variables": [{ "name": "door", "domain": [0, 1] }],
//!   "initial_state": { "door": 0 },
//!   "actions": [{
//!     "name": "open",
//!     "precondition": { "type": "atom", "lhs": { "type": "variable", "name": "door" },
//!                       "op": "=", "rhs": { "type": "constant", "value": 0 } },
//!     "effects": [{ "target": "door", "value": { "type": "constant", "value": 1 } }]
//!   }],
//!   "goal": { "type": "atom", "lhs": { "type": "variable", "name": "door" },
//!             "op": "=", "rhs": { "type": "constant", "value": 1 } }
//! }
//! ```
use std::collections::BTreeMap;

use sapling_planner::core::problem::RelationalOperator;
use sapling_planner::core::problem::Value;
use serde::Deserialize;

/// A complete assignment, from variable names to values.
pub(crate) type StateAst = BTreeMap<String, Value>;

#[derive(Debug, Deserialize)]
pub(crate) struct InstanceAst {
    pub(crate) variables: Vec<VariableAst>,
    pub(crate) initial_state: StateAst,
    /// Further states which can be evaluated by name.
    #[serde(default)]
    pub(crate) states: BTreeMap<String, StateAst>,
    #[serde(default)]
    pub(crate) actions: Vec<ActionAst>,
    #[serde(default)]
    pub(crate) goal: Option<FormulaAst>,
    #[serde(default)]
    pub(crate) state_constraints: Vec<StateConstraintAst>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VariableAst {
    pub(crate) name: String,
    pub(crate) domain: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActionAst {
    pub(crate) name: String,
    /// An action without precondition is always applicable.
    #[serde(default)]
    pub(crate) precondition: Option<FormulaAst>,
    pub(crate) effects: Vec<EffectAst>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EffectAst {
    #[serde(default)]
    pub(crate) condition: Option<FormulaAst>,
    pub(crate) target: String,
    pub(crate) value: TermAst,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum TermAst {
    Constant { value: Value },
    Variable { name: String },
    Add { lhs: Box<TermAst>, rhs: Box<TermAst> },
    Sub { lhs: Box<TermAst>, rhs: Box<TermAst> },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum FormulaAst {
    True,
    False,
    Atom {
        lhs: TermAst,
        op: OperatorAst,
        rhs: TermAst,
    },
    And {
        operands: Vec<FormulaAst>,
    },
    Or {
        operands: Vec<FormulaAst>,
    },
    Not {
        operand: Box<FormulaAst>,
    },
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub(crate) enum OperatorAst {
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterOrEqual,
}

impl From<OperatorAst> for RelationalOperator {
    fn from(operator: OperatorAst) -> Self {
        match operator {
            OperatorAst::Equal => RelationalOperator::Equal,
            OperatorAst::NotEqual => RelationalOperator::NotEqual,
            OperatorAst::Less => RelationalOperator::Less,
            OperatorAst::LessOrEqual => RelationalOperator::LessOrEqual,
            OperatorAst::Greater => RelationalOperator::Greater,
            OperatorAst::GreaterOrEqual => RelationalOperator::GreaterOrEqual,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum StateConstraintAst {
    Formula {
        formula: FormulaAst,
    },
    /// The values of `scope` must form one of the `tuples`.
    Table {
        scope: Vec<String>,
        tuples: Vec<Vec<Value>>,
    },
}
