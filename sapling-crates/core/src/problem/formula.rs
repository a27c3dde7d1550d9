use std::fmt::Display;
use std::fmt::Formatter;

use itertools::Itertools;

use super::ProblemError;
use super::Term;
use super::Valuation;
use super::Value;
use super::VariableId;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RelationalOperator {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl RelationalOperator {
    pub fn holds(self, lhs: Value, rhs: Value) -> bool {
        match self {
            RelationalOperator::Equal => lhs == rhs,
            RelationalOperator::NotEqual => lhs != rhs,
            RelationalOperator::Less => lhs < rhs,
            RelationalOperator::LessOrEqual => lhs <= rhs,
            RelationalOperator::Greater => lhs > rhs,
            RelationalOperator::GreaterOrEqual => lhs >= rhs,
        }
    }
}

impl Display for RelationalOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            RelationalOperator::Equal => "=",
            RelationalOperator::NotEqual => "!=",
            RelationalOperator::Less => "<",
            RelationalOperator::LessOrEqual => "<=",
            RelationalOperator::Greater => ">",
            RelationalOperator::GreaterOrEqual => ">=",
        };
        write!(f, "{symbol}")
    }
}

/// A relation `lhs op rhs` between two terms; the building block of preconditions, goals and
/// state constraints.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct AtomicFormula {
    lhs: Term,
    operator: RelationalOperator,
    rhs: Term,
    scope: Vec<VariableId>,
}

impl AtomicFormula {
    pub fn new(lhs: impl Into<Term>, operator: RelationalOperator, rhs: impl Into<Term>) -> Self {
        let lhs = lhs.into();
        let rhs = rhs.into();

        let mut scope = Vec::new();
        lhs.collect_variables(&mut scope);
        rhs.collect_variables(&mut scope);
        let scope = scope.into_iter().sorted().dedup().collect();

        AtomicFormula {
            lhs,
            operator,
            rhs,
            scope,
        }
    }

    /// The formula `variable = value`.
    pub fn equals(variable: VariableId, value: Value) -> Self {
        AtomicFormula::new(variable, RelationalOperator::Equal, value)
    }

    /// A formula without variables which never holds.
    pub fn falsity() -> Self {
        AtomicFormula::new(
            Term::Constant(0),
            RelationalOperator::NotEqual,
            Term::Constant(0),
        )
    }

    /// The variables the formula mentions, sorted and without duplicates.
    pub fn scope(&self) -> &[VariableId] {
        &self.scope
    }

    /// Whether the formula holds; an undefined side makes the formula false.
    pub fn is_satisfied(&self, valuation: &impl Valuation) -> bool {
        match (self.lhs.evaluate(valuation), self.rhs.evaluate(valuation)) {
            (Some(lhs), Some(rhs)) => self.operator.holds(lhs, rhs),
            _ => false,
        }
    }
}

impl Display for AtomicFormula {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.operator, self.rhs)
    }
}

/// A (ground) logical formula as produced by the grounder.
///
/// The heuristic core only handles conjunctions; see [`Formula::conjuncts`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Formula {
    Tautology,
    Contradiction,
    Atom(AtomicFormula),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Not(Box<Formula>),
}

impl Formula {
    /// Flattens the formula into its atomic conjuncts, dropping tautologies and duplicates.
    ///
    /// A contradiction anywhere in the conjunction becomes the single conjunct
    /// [`AtomicFormula::falsity`]. Disjunctions and negations cannot be expressed by the relaxed
    /// machinery and are reported as [`ProblemError::NonConjunctiveFormula`].
    pub fn conjuncts(&self, context: &str) -> Result<Vec<AtomicFormula>, ProblemError> {
        let mut conjuncts = Vec::new();
        self.collect_conjuncts(context, &mut conjuncts)?;

        if conjuncts.contains(&AtomicFormula::falsity()) {
            return Ok(vec![AtomicFormula::falsity()]);
        }

        Ok(conjuncts.into_iter().unique().collect())
    }

    fn collect_conjuncts(
        &self,
        context: &str,
        conjuncts: &mut Vec<AtomicFormula>,
    ) -> Result<(), ProblemError> {
        match self {
            Formula::Tautology => {}
            Formula::Contradiction => conjuncts.push(AtomicFormula::falsity()),
            Formula::Atom(atomic_formula) => conjuncts.push(atomic_formula.clone()),
            Formula::And(subformulas) => {
                for subformula in subformulas {
                    subformula.collect_conjuncts(context, conjuncts)?;
                }
            }
            Formula::Or(_) | Formula::Not(_) => {
                return Err(ProblemError::NonConjunctiveFormula {
                    context: context.to_owned(),
                    formula: self.to_string(),
                })
            }
        }

        Ok(())
    }
}

impl From<AtomicFormula> for Formula {
    fn from(atomic_formula: AtomicFormula) -> Self {
        Formula::Atom(atomic_formula)
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::Tautology => write!(f, "true"),
            Formula::Contradiction => write!(f, "false"),
            Formula::Atom(atomic_formula) => write!(f, "{atomic_formula}"),
            Formula::And(subformulas) => {
                write!(f, "({})", subformulas.iter().join(" and "))
            }
            Formula::Or(subformulas) => write!(f, "({})", subformulas.iter().join(" or ")),
            Formula::Not(subformula) => write!(f, "not {subformula}"),
        }
    }
}
