/// The outcome of one filtering pass over a [`DomainMap`](super::DomainMap).
///
/// [`FilteringStatus::Failure`] is not an error: it is how a filtering pass answers "no
/// assignment survives", and callers treat it as a plain result.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FilteringStatus {
    /// No domain changed.
    Unpruned,
    /// Some domain shrank, but none became empty.
    Pruned,
    /// Some domain became empty.
    Failure,
}

impl FilteringStatus {
    /// The status of a pass consisting of `self` followed by `other`.
    pub fn combine(self, other: FilteringStatus) -> FilteringStatus {
        match (self, other) {
            (FilteringStatus::Failure, _) | (_, FilteringStatus::Failure) => {
                FilteringStatus::Failure
            }
            (FilteringStatus::Pruned, _) | (_, FilteringStatus::Pruned) => FilteringStatus::Pruned,
            _ => FilteringStatus::Unpruned,
        }
    }

    pub fn is_failure(self) -> bool {
        self == FilteringStatus::Failure
    }

    /// The status after removing values from a single domain.
    pub(crate) fn after_removal(changed: bool, now_empty: bool) -> FilteringStatus {
        if now_empty {
            FilteringStatus::Failure
        } else if changed {
            FilteringStatus::Pruned
        } else {
            FilteringStatus::Unpruned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_dominates_pruning() {
        assert_eq!(
            FilteringStatus::Pruned.combine(FilteringStatus::Failure),
            FilteringStatus::Failure
        );
        assert_eq!(
            FilteringStatus::Unpruned.combine(FilteringStatus::Pruned),
            FilteringStatus::Pruned
        );
        assert_eq!(
            FilteringStatus::Unpruned.combine(FilteringStatus::Unpruned),
            FilteringStatus::Unpruned
        );
    }
}
