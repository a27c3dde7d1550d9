use std::collections::BTreeSet;
use std::fmt::Display;
use std::fmt::Formatter;

use itertools::Itertools;

use super::DomainMap;
use super::FilteringStatus;
use crate::problem::AtomicFormula;
use crate::problem::Point;
use crate::problem::ProblemError;
use crate::problem::Value;
use crate::problem::VariableId;

/// A filtering operator over a [`DomainMap`].
///
/// The set of constraint kinds is closed; the [`ConstraintManager`](super::ConstraintManager)
/// sorts them by kind when it is created and never changes them afterwards.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Constraint {
    Unary(UnaryConstraint),
    Binary(BinaryConstraint),
    Nary(NaryConstraint),
    Extensional(ExtensionalConstraint),
}

impl Constraint {
    /// Creates the constraint enforcing `formula`, with the kind determined by the size of its
    /// scope.
    pub fn from_formula(formula: AtomicFormula) -> Constraint {
        let scope = formula.scope().to_vec();
        match scope.len() {
            1 => Constraint::Unary(UnaryConstraint {
                variable: scope[0],
                formula,
            }),
            2 => Constraint::Binary(BinaryConstraint {
                scope: [scope[0], scope[1]],
                formula,
            }),
            _ => Constraint::Nary(NaryConstraint { scope, formula }),
        }
    }

    pub fn unary(formula: AtomicFormula) -> Result<Constraint, ProblemError> {
        check_arity("unary", 1, formula.scope().len())?;
        Ok(Constraint::from_formula(formula))
    }

    pub fn binary(formula: AtomicFormula) -> Result<Constraint, ProblemError> {
        check_arity("binary", 2, formula.scope().len())?;
        Ok(Constraint::from_formula(formula))
    }

    /// A constraint over any number of variables, which is always filtered as a whole.
    pub fn nary(formula: AtomicFormula) -> Constraint {
        let scope = formula.scope().to_vec();
        Constraint::Nary(NaryConstraint { scope, formula })
    }

    /// The constraint which only allows the value combinations in `tuples` for `scope`.
    pub fn extensional(
        scope: Vec<VariableId>,
        tuples: Vec<Vec<Value>>,
    ) -> Result<Constraint, ProblemError> {
        if let Some(variable) = scope.iter().duplicates().next() {
            return Err(ProblemError::RepeatedScopeVariable(*variable));
        }
        if let Some(tuple) = tuples.iter().find(|tuple| tuple.len() != scope.len()) {
            return Err(ProblemError::TupleArity {
                tuple: tuple.clone(),
                expected: scope.len(),
                actual: tuple.len(),
            });
        }

        Ok(Constraint::Extensional(ExtensionalConstraint { scope, tuples }))
    }

    pub fn scope(&self) -> &[VariableId] {
        match self {
            Constraint::Unary(constraint) => std::slice::from_ref(&constraint.variable),
            Constraint::Binary(constraint) => &constraint.scope,
            Constraint::Nary(constraint) => &constraint.scope,
            Constraint::Extensional(constraint) => &constraint.scope,
        }
    }

    /// Applies the constraint once to `domains`.
    pub fn filter(&self, domains: &mut DomainMap) -> FilteringStatus {
        match self {
            Constraint::Unary(constraint) => constraint.filter(domains),
            Constraint::Binary(constraint) => constraint
                .revise(0, domains)
                .combine(constraint.revise(1, domains)),
            Constraint::Nary(constraint) => constraint.filter(domains),
            Constraint::Extensional(constraint) => constraint.filter(domains),
        }
    }
}

fn check_arity(kind: &'static str, expected: usize, actual: usize) -> Result<(), ProblemError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ProblemError::ConstraintArity {
            kind,
            expected,
            actual,
        })
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Unary(UnaryConstraint { formula, .. })
            | Constraint::Binary(BinaryConstraint { formula, .. })
            | Constraint::Nary(NaryConstraint { formula, .. }) => write!(f, "{formula}"),
            Constraint::Extensional(constraint) => write!(
                f,
                "({}) in {} tuples",
                constraint.scope.iter().join(", "),
                constraint.tuples.len()
            ),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UnaryConstraint {
    variable: VariableId,
    formula: AtomicFormula,
}

impl UnaryConstraint {
    pub(crate) fn filter(&self, domains: &mut DomainMap) -> FilteringStatus {
        let variables = [self.variable];
        let domain = domains.domain_mut(self.variable);

        let changed = domain.retain(|value| {
            self.formula
                .is_satisfied(&Point::new(&variables, &[value]))
        });

        FilteringStatus::after_removal(changed, domain.is_empty())
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BinaryConstraint {
    scope: [VariableId; 2],
    formula: AtomicFormula,
}

impl BinaryConstraint {
    pub(crate) fn scope(&self) -> [VariableId; 2] {
        self.scope
    }

    /// Arc reduction: removes from the domain of `scope[slot]` every value without a compatible
    /// value in the current domain of the other variable.
    pub(crate) fn revise(&self, slot: usize, domains: &mut DomainMap) -> FilteringStatus {
        let other_slot = 1 - slot;
        let other_values = domains
            .domain(self.scope[other_slot])
            .iter()
            .collect::<Vec<_>>();

        let domain = domains.domain_mut(self.scope[slot]);
        let mut values = [0; 2];
        let changed = domain.retain(|value| {
            values[slot] = value;
            other_values.iter().any(|&other_value| {
                values[other_slot] = other_value;
                self.formula
                    .is_satisfied(&Point::new(&self.scope, &values))
            })
        });

        FilteringStatus::after_removal(changed, domain.is_empty())
    }
}

/// A constraint over an arbitrary scope, filtered to generalised arc consistency by enumerating
/// the Cartesian product of the domains in its scope.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NaryConstraint {
    scope: Vec<VariableId>,
    formula: AtomicFormula,
}

impl NaryConstraint {
    pub(crate) fn filter(&self, domains: &mut DomainMap) -> FilteringStatus {
        if self.scope.is_empty() {
            return if self.formula.is_satisfied(&Point::new(&[], &[])) {
                FilteringStatus::Unpruned
            } else {
                FilteringStatus::Failure
            };
        }

        let mut supported = vec![BTreeSet::new(); self.scope.len()];
        for point in self
            .scope
            .iter()
            .map(|&variable| domains.domain(variable).iter().collect::<Vec<_>>())
            .multi_cartesian_product()
        {
            if self.formula.is_satisfied(&Point::new(&self.scope, &point)) {
                for (slot, value) in point.into_iter().enumerate() {
                    let _ = supported[slot].insert(value);
                }
            }
        }

        retain_supported(&self.scope, &supported, domains)
    }
}

/// A constraint given as the list of allowed value combinations of its scope.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ExtensionalConstraint {
    scope: Vec<VariableId>,
    tuples: Vec<Vec<Value>>,
}

impl ExtensionalConstraint {
    pub(crate) fn filter(&self, domains: &mut DomainMap) -> FilteringStatus {
        let mut supported = vec![BTreeSet::new(); self.scope.len()];
        let mut has_live_tuple = false;

        let live_tuples = self.tuples.iter().filter(|tuple| {
            self.scope
                .iter()
                .zip(tuple.iter())
                .all(|(&variable, &value)| domains.domain(variable).contains(value))
        });
        for tuple in live_tuples {
            has_live_tuple = true;
            for (slot, &value) in tuple.iter().enumerate() {
                let _ = supported[slot].insert(value);
            }
        }

        // Covers the empty scope, where no per-variable domain can become empty.
        if !has_live_tuple {
            return FilteringStatus::Failure;
        }

        retain_supported(&self.scope, &supported, domains)
    }
}

/// Restricts the domain of every `scope[slot]` to `supported[slot]`.
fn retain_supported(
    scope: &[VariableId],
    supported: &[BTreeSet<Value>],
    domains: &mut DomainMap,
) -> FilteringStatus {
    let mut status = FilteringStatus::Unpruned;

    for (&variable, supported_values) in scope.iter().zip(supported) {
        let domain = domains.domain_mut(variable);
        let changed = domain.retain(|value| supported_values.contains(&value));

        status = status.combine(FilteringStatus::after_removal(changed, domain.is_empty()));
        if status.is_failure() {
            return FilteringStatus::Failure;
        }
    }

    status
}
