use super::Atom;
use super::ProblemError;
use super::TupleId;
use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::sapling_assert_simple;

/// Bijection between the atoms of a problem and dense [`TupleId`]s.
///
/// The index is built once when the problem is loaded and is immutable afterwards. Lookups of
/// atoms which were never registered are contract violations and panic.
#[derive(Clone, Debug, Default)]
pub struct AtomIndex {
    atoms: KeyedVec<TupleId, Atom>,
    tuple_ids: HashMap<Atom, TupleId>,
}

impl AtomIndex {
    /// Registers the atoms in iteration order; the `i`-th atom receives tuple id `i`.
    pub fn new(atoms: impl IntoIterator<Item = Atom>) -> Result<AtomIndex, ProblemError> {
        let mut index = AtomIndex::default();

        for atom in atoms {
            let tuple_id = index.atoms.push(atom);
            if let Some(first) = index.tuple_ids.insert(atom, tuple_id) {
                return Err(ProblemError::DuplicateAtom {
                    atom,
                    first,
                    second: tuple_id,
                });
            }
        }

        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// The tuple id of `atom`, or [`None`] if the atom was never registered.
    pub fn try_to_index(&self, atom: Atom) -> Option<TupleId> {
        self.tuple_ids.get(&atom).copied()
    }

    /// The tuple id of `atom`, which must have been registered when the index was built.
    pub fn to_index(&self, atom: Atom) -> TupleId {
        match self.try_to_index(atom) {
            Some(tuple_id) => tuple_id,
            None => panic!("the atom {atom} is not registered in the atom index"),
        }
    }

    pub fn to_atom(&self, tuple_id: TupleId) -> Atom {
        sapling_assert_simple!(
            tuple_id.0 < self.atoms.len() as u32,
            "foreign tuple id {tuple_id}"
        );
        self.atoms[tuple_id]
    }

    pub fn iter(&self) -> impl Iterator<Item = (TupleId, Atom)> + '_ {
        self.atoms
            .iter_with_keys()
            .map(|(tuple_id, &atom)| (tuple_id, atom))
    }
}
