use super::JustificationId;
use crate::containers::HashSet;
use crate::problem::ActionId;
use crate::problem::TupleId;

/// A candidate new atom together with the action and justification producing it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ChangesetEntry {
    pub tuple_id: TupleId,
    pub action: ActionId,
    pub justification: JustificationId,
}

/// The atoms derived while expanding one layer, in derivation order.
///
/// Only the first derivation of an atom is kept, matching the first-achiever semantics of the
/// [`SupportTable`](super::SupportTable).
#[derive(Clone, Debug, Default)]
pub struct Changeset {
    entries: Vec<ChangesetEntry>,
    present: HashSet<TupleId>,
}

impl Changeset {
    /// Adds `entry` unless its atom is already part of the changeset; returns whether it was
    /// added.
    pub fn push(&mut self, entry: ChangesetEntry) -> bool {
        if !self.present.insert(entry.tuple_id) {
            return false;
        }

        self.entries.push(entry);
        true
    }

    pub fn contains(&self, tuple_id: TupleId) -> bool {
        self.present.contains(&tuple_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangesetEntry> {
        self.entries.iter()
    }
}
