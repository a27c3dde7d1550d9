use std::rc::Rc;

use itertools::Itertools;

use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::problem::TupleId;

/// Handle to an interned justification set in a [`JustificationArena`].
///
/// Two handles from the same arena are equal exactly when the sets they refer to are equal.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct JustificationId(u32);

impl StorageKey for JustificationId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        JustificationId(index as u32)
    }
}

/// Interns the sets of atoms which justify the derivation of other atoms.
///
/// Many supports are justified by the same set of atoms (all effects of one action application
/// share the atoms witnessing the action's precondition, for example); each distinct set is
/// stored once and shared between all supports referring to it. The arena belongs to a single
/// heuristic evaluation and is dropped with it.
#[derive(Debug, Default)]
pub struct JustificationArena {
    sets: KeyedVec<JustificationId, Rc<[TupleId]>>,
    interned: HashMap<Rc<[TupleId]>, JustificationId>,
}

impl JustificationArena {
    /// Returns the handle of the set containing `atoms`, interning it if it is new.
    pub fn intern(&mut self, atoms: impl IntoIterator<Item = TupleId>) -> JustificationId {
        let set: Rc<[TupleId]> = atoms.into_iter().sorted().dedup().collect();

        if let Some(&id) = self.interned.get(&set) {
            return id;
        }

        let id = self.sets.push(Rc::clone(&set));
        let _ = self.interned.insert(set, id);
        id
    }

    /// The handle of the empty set.
    pub fn empty(&mut self) -> JustificationId {
        self.intern(std::iter::empty())
    }

    pub fn get(&self, id: JustificationId) -> &[TupleId] {
        &self.sets[id]
    }

    /// The number of distinct sets interned so far.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
