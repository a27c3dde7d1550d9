//! Arc consistency over a fixed set of [`Constraint`]s.
//!
//! The [`ConstraintManager`] implements AC-3: unary constraints are applied once up front, binary
//! constraints are revised arc by arc from a worklist until it runs dry, and the remaining
//! (global) constraints are applied as a whole. Binary and global phases alternate until the
//! global phase no longer prunes anything.
//!
//! Only local consistency is established. The questions asked downstream ("is this precondition
//! possibly satisfied?", "does this layer possibly satisfy the goal?") only need to know whether
//! some domain was wiped out, so no solutions are ever enumerated.
use itertools::Itertools;

use super::BinaryConstraint;
use super::Constraint;
use super::DomainMap;
use super::FilteringStatus;
use super::UnaryConstraint;
use crate::containers::HashMap;
use crate::containers::HashSet;
use crate::problem::VariableId;
use crate::sapling_assert_moderate;

/// A pending arc reduction: revise the variable in slot `slot` of binary constraint
/// `constraint`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct PendingArc {
    constraint: usize,
    slot: usize,
}

/// The arcs which still have to be revised.
///
/// Arcs are taken in last-in first-out order, so the outcome of filtering is reproducible. The
/// worklist is created by each call to [`ConstraintManager::filter`] and dropped when the call
/// returns, failure included; nothing carries over between calls.
#[derive(Debug, Default)]
struct ArcWorklist {
    pending: Vec<PendingArc>,
    enqueued: HashSet<PendingArc>,
}

impl ArcWorklist {
    fn insert(&mut self, arc: PendingArc) {
        if self.enqueued.insert(arc) {
            self.pending.push(arc);
        }
    }

    fn pop(&mut self) -> Option<PendingArc> {
        let arc = self.pending.pop()?;
        let _ = self.enqueued.remove(&arc);
        Some(arc)
    }

    fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConstraintManager {
    unary: Vec<UnaryConstraint>,
    binary: Vec<BinaryConstraint>,
    global: Vec<Constraint>,
    /// For every variable, the binary constraints it occurs in together with its slot.
    binary_occurrences: HashMap<VariableId, Vec<(usize, usize)>>,
    /// All variables in the scope of any constraint, sorted.
    scope: Vec<VariableId>,
}

impl ConstraintManager {
    pub fn new(constraints: impl IntoIterator<Item = Constraint>) -> ConstraintManager {
        let mut manager = ConstraintManager::default();

        for constraint in constraints {
            manager.scope.extend_from_slice(constraint.scope());

            match constraint {
                Constraint::Unary(unary) => manager.unary.push(unary),
                Constraint::Binary(binary) => {
                    let index = manager.binary.len();
                    for (slot, variable) in binary.scope().into_iter().enumerate() {
                        manager
                            .binary_occurrences
                            .entry(variable)
                            .or_default()
                            .push((index, slot));
                    }
                    manager.binary.push(binary);
                }
                global @ (Constraint::Nary(_) | Constraint::Extensional(_)) => {
                    manager.global.push(global)
                }
            }
        }

        manager.scope = manager.scope.into_iter().sorted().dedup().collect();
        manager
    }

    /// The variables the domain map passed to [`ConstraintManager::filter`] has to contain.
    pub fn scope(&self) -> &[VariableId] {
        &self.scope
    }

    pub fn num_constraints(&self) -> usize {
        self.unary.len() + self.binary.len() + self.global.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_constraints() == 0
    }

    /// Filters `domains` to arc consistency.
    ///
    /// On [`FilteringStatus::Failure`] the domains are left in whatever state the failing
    /// constraint produced; callers which need the original domains work on a copy.
    pub fn filter(&self, domains: &mut DomainMap) -> FilteringStatus {
        let mut status = FilteringStatus::Unpruned;

        for unary in &self.unary {
            status = status.combine(unary.filter(domains));
            if status.is_failure() {
                return FilteringStatus::Failure;
            }
        }

        let mut worklist = ArcWorklist::default();
        self.enqueue_all_arcs(&mut worklist);

        loop {
            status = status.combine(self.drain_binary(domains, &mut worklist));
            if status.is_failure() {
                return FilteringStatus::Failure;
            }

            match self.filter_global(domains) {
                FilteringStatus::Unpruned => break,
                FilteringStatus::Pruned => {
                    status = FilteringStatus::Pruned;
                    self.enqueue_all_arcs(&mut worklist);
                }
                FilteringStatus::Failure => return FilteringStatus::Failure,
            }
        }

        status
    }

    /// Whether filtering a copy of `domains` does not fail.
    pub fn is_consistent(&self, domains: &DomainMap) -> bool {
        let mut domains = domains.clone();
        !self.filter(&mut domains).is_failure()
    }

    fn enqueue_all_arcs(&self, worklist: &mut ArcWorklist) {
        for constraint in 0..self.binary.len() {
            worklist.insert(PendingArc {
                constraint,
                slot: 0,
            });
            worklist.insert(PendingArc {
                constraint,
                slot: 1,
            });
        }
    }

    fn drain_binary(&self, domains: &mut DomainMap, worklist: &mut ArcWorklist) -> FilteringStatus {
        let mut status = FilteringStatus::Unpruned;

        while let Some(arc) = worklist.pop() {
            let binary = &self.binary[arc.constraint];

            match binary.revise(arc.slot, domains) {
                FilteringStatus::Unpruned => {}
                FilteringStatus::Failure => return FilteringStatus::Failure,
                FilteringStatus::Pruned => {
                    status = FilteringStatus::Pruned;

                    let pruned_variable = binary.scope()[arc.slot];
                    for &(constraint, slot) in &self.binary_occurrences[&pruned_variable] {
                        if constraint != arc.constraint {
                            worklist.insert(PendingArc {
                                constraint,
                                slot: 1 - slot,
                            });
                        }
                    }
                }
            }
        }

        sapling_assert_moderate!(worklist.is_empty());
        status
    }

    fn filter_global(&self, domains: &mut DomainMap) -> FilteringStatus {
        let mut status = FilteringStatus::Unpruned;

        for constraint in &self.global {
            status = status.combine(constraint.filter(domains));
            if status.is_failure() {
                return FilteringStatus::Failure;
            }
        }

        status
    }
}
