use std::collections::BTreeSet;
use std::fmt::Display;
use std::fmt::Formatter;

use itertools::Itertools;

use crate::problem::Value;

/// The ordered set of candidate values of one variable.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Domain {
    values: BTreeSet<Value>,
}

impl Domain {
    pub fn singleton(value: Value) -> Self {
        Domain {
            values: BTreeSet::from([value]),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: Value) -> bool {
        self.values.contains(&value)
    }

    /// The smallest value in the domain.
    pub fn first(&self) -> Option<Value> {
        self.values.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        self.values.iter().copied()
    }

    /// Adds `value`; returns whether it was not yet present.
    pub fn insert(&mut self, value: Value) -> bool {
        self.values.insert(value)
    }

    /// Removes `value`; returns whether it was present.
    pub fn remove(&mut self, value: Value) -> bool {
        self.values.remove(&value)
    }

    /// Keeps only the values for which `predicate` holds; returns whether any value was removed.
    pub fn retain(&mut self, mut predicate: impl FnMut(Value) -> bool) -> bool {
        let size_before = self.values.len();
        self.values.retain(|&value| predicate(value));
        self.values.len() != size_before
    }

    pub fn is_subset(&self, other: &Domain) -> bool {
        self.values.is_subset(&other.values)
    }
}

impl FromIterator<Value> for Domain {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Domain {
            values: iter.into_iter().collect(),
        }
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.values.iter().join(", "))
    }
}
