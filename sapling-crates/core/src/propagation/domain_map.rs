use std::collections::BTreeMap;

use super::Domain;
use crate::problem::VariableId;
use crate::sapling_assert_simple;

/// A mapping from variables to their current [`Domain`].
///
/// This is the structure the [`ConstraintManager`](super::ConstraintManager) filters. It usually
/// holds only the variables relevant to the constraints at hand, projected out of a relaxed layer.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct DomainMap {
    domains: BTreeMap<VariableId, Domain>,
}

impl DomainMap {
    pub fn insert(&mut self, variable: VariableId, domain: Domain) {
        let _ = self.domains.insert(variable, domain);
    }

    pub fn get(&self, variable: VariableId) -> Option<&Domain> {
        self.domains.get(&variable)
    }

    /// The domain of `variable`, which has to be part of the map.
    pub fn domain(&self, variable: VariableId) -> &Domain {
        sapling_assert_simple!(
            self.domains.contains_key(&variable),
            "variable {variable} was not projected into the domain map"
        );
        &self.domains[&variable]
    }

    pub(crate) fn domain_mut(&mut self, variable: VariableId) -> &mut Domain {
        match self.domains.get_mut(&variable) {
            Some(domain) => domain,
            None => panic!("variable {variable} was not projected into the domain map"),
        }
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Iterates over the variables and their domains in increasing variable order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, &Domain)> {
        self.domains
            .iter()
            .map(|(&variable, domain)| (variable, domain))
    }

    pub fn has_empty_domain(&self) -> bool {
        self.domains.values().any(Domain::is_empty)
    }
}

impl FromIterator<(VariableId, Domain)> for DomainMap {
    fn from_iter<T: IntoIterator<Item = (VariableId, Domain)>>(iter: T) -> Self {
        DomainMap {
            domains: iter.into_iter().collect(),
        }
    }
}
