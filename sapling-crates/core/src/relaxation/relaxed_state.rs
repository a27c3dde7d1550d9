use crate::containers::KeyedVec;
use crate::problem::Atom;
use crate::problem::State;
use crate::problem::VariableId;
use crate::propagation::Domain;
use crate::propagation::DomainMap;

/// A relaxed layer: every variable is assigned a non-empty set of values which are possibly true.
///
/// Layers only ever grow; [`RelaxedState::merge`] is a monotone union. Filtering happens on
/// projected copies ([`RelaxedState::project`]), never on the layer itself.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RelaxedState {
    domains: KeyedVec<VariableId, Domain>,
}

impl RelaxedState {
    /// The layer in which every variable can only take its value in `state`.
    pub fn from_state(state: &State) -> RelaxedState {
        RelaxedState {
            domains: state
                .atoms()
                .map(|atom| Domain::singleton(atom.value))
                .collect(),
        }
    }

    pub fn num_variables(&self) -> usize {
        self.domains.len()
    }

    /// The total number of (variable, value) pairs in the layer.
    pub fn num_atoms(&self) -> usize {
        self.domains.iter().map(Domain::len).sum()
    }

    pub fn domain(&self, variable: VariableId) -> &Domain {
        &self.domains[variable]
    }

    pub fn contains(&self, atom: Atom) -> bool {
        self.domains
            .get(atom.variable)
            .is_some_and(|domain| domain.contains(atom.value))
    }

    /// Adds all `atoms` to the layer; returns how many of them were new.
    pub fn merge(&mut self, atoms: impl IntoIterator<Item = Atom>) -> usize {
        atoms
            .into_iter()
            .filter(|atom| self.domains[atom.variable].insert(atom.value))
            .count()
    }

    /// Copies the domains of `variables` out of the layer.
    pub fn project(&self, variables: &[VariableId]) -> DomainMap {
        variables
            .iter()
            .map(|&variable| (variable, self.domains[variable].clone()))
            .collect()
    }

    /// Whether every domain of `other` is contained in the corresponding domain of `self`.
    pub fn includes(&self, other: &RelaxedState) -> bool {
        self.domains.len() == other.domains.len()
            && other
                .domains
                .iter()
                .zip(self.domains.iter())
                .all(|(smaller, larger)| smaller.is_subset(larger))
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableId, &Domain)> {
        self.domains.iter_with_keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_layer_has_singleton_domains() {
        let state = State::new([4, 2]);

        let layer = RelaxedState::from_state(&state);

        assert_eq!(layer.num_atoms(), 2);
        assert!(layer.contains(Atom::new(VariableId::new(0), 4)));
        assert!(!layer.contains(Atom::new(VariableId::new(0), 2)));
    }

    #[test]
    fn merging_is_monotone_and_counts_new_atoms() {
        let x = VariableId::new(0);
        let state = State::new([0]);
        let mut layer = RelaxedState::from_state(&state);
        let before = layer.clone();

        let added = layer.merge([Atom::new(x, 1), Atom::new(x, 0), Atom::new(x, 1)]);

        assert_eq!(added, 1);
        assert!(layer.includes(&before));
        assert!(!before.includes(&layer));
    }
}
