use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::Arc;

use super::Atom;
use super::Value;
use super::VariableId;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;

/// A total assignment of one value to every variable; the search node the heuristic evaluates.
///
/// A [`State`] is never mutated in place. New states are derived with [`State::with_updates`],
/// which copies the assignment and overwrites the updated variables; the values themselves are
/// shared behind an [`Arc`] so that cloning a state is cheap.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct State {
    values: Arc<KeyedVec<VariableId, Value>>,
}

impl State {
    /// Creates a state where variable `i` takes `values[i]`.
    pub fn new(values: impl IntoIterator<Item = Value>) -> Self {
        State {
            values: Arc::new(values.into_iter().collect()),
        }
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    pub fn value(&self, variable: VariableId) -> Value {
        self.values[variable]
    }

    /// Whether `atom` holds in this state.
    pub fn satisfies(&self, atom: Atom) -> bool {
        self.values
            .get(atom.variable)
            .is_some_and(|&value| value == atom.value)
    }

    /// The atoms which are true in this state, ordered by variable.
    pub fn atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.values
            .iter_with_keys()
            .map(|(variable, &value)| Atom::new(variable, value))
    }

    /// Returns a copy of this state in which every atom in `updates` holds. Later updates of the
    /// same variable overwrite earlier ones.
    pub fn with_updates(&self, updates: impl IntoIterator<Item = Atom>) -> State {
        let mut values = (*self.values).clone();
        for atom in updates {
            values[atom.variable] = atom.value;
        }

        State {
            values: Arc::new(values),
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, value) in self.values.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={value}", VariableId::create_from_index(index))?;
        }
        write!(f, "}}")
    }
}
