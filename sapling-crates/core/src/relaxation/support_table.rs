use super::JustificationId;
use crate::containers::KeyedVec;
use crate::problem::ActionId;
use crate::problem::TupleId;

/// How an atom first became reachable.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Support {
    /// The layer in which the atom was first reached; atoms of the seed state are in layer 0.
    pub layer: usize,
    /// The action which produced the atom, [`None`] for atoms of the seed state.
    pub action: Option<ActionId>,
    /// The atoms which had to hold for `action` to produce the atom.
    pub justification: JustificationId,
}

/// The result of offering a support to the [`SupportTable`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Insertion {
    /// The atom was not reached before; the offered support is now its support.
    Novel,
    /// The atom already had a support, which is kept.
    AlreadyPresent,
}

/// Records, for every atom, the first support through which it was reached.
///
/// Supports follow first-achiever semantics: the first layer and action deriving an atom own its
/// support for the rest of the evaluation, even if a cheaper derivation shows up later.
#[derive(Clone, Debug)]
pub struct SupportTable {
    supports: KeyedVec<TupleId, Option<Support>>,
    /// The number of novel atoms per layer; index 0 is the seed layer.
    novel_per_layer: Vec<usize>,
}

impl SupportTable {
    pub fn new(num_atoms: usize) -> SupportTable {
        SupportTable {
            supports: KeyedVec::filled(num_atoms, None),
            novel_per_layer: vec![0],
        }
    }

    /// The layer supports are currently inserted into.
    pub fn current_layer(&self) -> usize {
        self.novel_per_layer.len() - 1
    }

    /// Starts a new layer and returns its index.
    pub fn open_layer(&mut self) -> usize {
        self.novel_per_layer.push(0);
        self.current_layer()
    }

    /// Marks an atom of the seed state as reached without an achieving action.
    pub fn mark_seed(&mut self, tuple_id: TupleId, justification: JustificationId) -> Insertion {
        self.record(tuple_id, 0, None, justification)
    }

    /// Offers `action` with `justification` as support of `tuple_id` in the current layer.
    pub fn insert(
        &mut self,
        tuple_id: TupleId,
        action: ActionId,
        justification: JustificationId,
    ) -> Insertion {
        self.record(tuple_id, self.current_layer(), Some(action), justification)
    }

    fn record(
        &mut self,
        tuple_id: TupleId,
        layer: usize,
        action: Option<ActionId>,
        justification: JustificationId,
    ) -> Insertion {
        let entry = &mut self.supports[tuple_id];
        if entry.is_some() {
            return Insertion::AlreadyPresent;
        }

        *entry = Some(Support {
            layer,
            action,
            justification,
        });
        self.novel_per_layer[layer] += 1;
        Insertion::Novel
    }

    pub fn support(&self, tuple_id: TupleId) -> Option<&Support> {
        self.supports[tuple_id].as_ref()
    }

    pub fn is_reached(&self, tuple_id: TupleId) -> bool {
        self.supports[tuple_id].is_some()
    }

    /// The number of atoms which were reached for the first time in `layer`.
    pub fn novel_in_layer(&self, layer: usize) -> usize {
        self.novel_per_layer.get(layer).copied().unwrap_or(0)
    }

    /// The number of atoms reached so far, seed atoms included.
    pub fn num_reached(&self) -> usize {
        self.novel_per_layer.iter().sum()
    }
}
