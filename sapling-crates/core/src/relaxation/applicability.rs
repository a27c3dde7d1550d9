//! Applicability of actions in relaxed layers, and the atoms they produce there.
//!
//! A relaxed layer assigns sets of values to variables, so an action is applicable as soon as
//! each clause of its precondition holds for *some* combination of values from the layer. Clauses
//! are checked independently; the first satisfying combination found for each clause is kept as
//! the witness of the action's applicability, and every atom the action produces is justified by
//! that witness together with the atoms of the point the effect was evaluated at.
use super::cartesian_product;
use super::first_witness;
use super::ActionProcedures;
use super::Changeset;
use super::ChangesetEntry;
use super::JustificationArena;
use super::RelaxedState;
use super::SupportTable;
use crate::containers::HashSet;
use crate::containers::KeyedVec;
use crate::problem::ActionId;
use crate::problem::Atom;
use crate::problem::Point;
use crate::problem::Problem;
use crate::problem::TupleId;
use crate::problem::Value;
use crate::problem::VariableId;
use crate::propagation::DomainMap;
use crate::propagation::FilteringStatus;

#[derive(Clone, Debug, Default)]
struct ActionCache {
    /// Once set, the action is applicable in every later layer with this witness.
    witness: Option<Vec<TupleId>>,
    /// Per precondition clause, the values shown not to satisfy it; only filled for monadic
    /// clauses.
    rejected: Vec<HashSet<Value>>,
    /// Per effect, the values it has already been evaluated at; only used for monadic effects.
    processed: Vec<HashSet<Value>>,
}

/// What the applicability engine remembers about every action between the layers of one
/// evaluation.
///
/// Layers only grow, so an action which was applicable stays applicable under the same witness,
/// a value rejected by a monadic clause stays rejected, and a monadic effect never has to be
/// evaluated at the same value twice.
#[derive(Debug)]
pub struct ApplicabilityCache {
    actions: KeyedVec<ActionId, ActionCache>,
}

impl ApplicabilityCache {
    pub fn new(problem: &Problem) -> ApplicabilityCache {
        ApplicabilityCache {
            actions: problem
                .procedures
                .iter()
                .map(|procedures| ActionCache {
                    witness: None,
                    rejected: vec![HashSet::default(); procedures.preconditions.len()],
                    processed: vec![HashSet::default(); procedures.effects.len()],
                })
                .collect(),
        }
    }

    /// The witness under which `action` was found applicable, if it was.
    pub fn witness(&self, action: ActionId) -> Option<&[TupleId]> {
        self.actions[action].witness.as_deref()
    }

    /// The number of actions found applicable so far.
    pub fn num_applicable(&self) -> usize {
        self.actions
            .iter()
            .filter(|cache| cache.witness.is_some())
            .count()
    }
}

/// Decides applicability of the actions of a [`Problem`] in relaxed layers and computes the atoms
/// they produce.
#[derive(Clone, Copy, Debug)]
pub struct RelaxedApplicability<'problem> {
    problem: &'problem Problem,
}

impl<'problem> RelaxedApplicability<'problem> {
    pub fn new(problem: &'problem Problem) -> RelaxedApplicability<'problem> {
        RelaxedApplicability { problem }
    }

    /// Whether `action` is applicable in `layer`.
    ///
    /// If it is, the atoms witnessing each precondition clause are appended to `witness`;
    /// otherwise `witness` is left untouched.
    pub fn is_applicable(
        &self,
        layer: &RelaxedState,
        action: ActionId,
        cache: &mut ApplicabilityCache,
        witness: &mut Vec<TupleId>,
    ) -> bool {
        let procedures = self.problem.procedures(action);
        let action_cache = &mut cache.actions[action];

        match self.filtered_domains(procedures, layer, &mut action_cache.rejected) {
            Some(domains) => self.find_witness(procedures, &domains, action_cache, witness),
            None => false,
        }
    }

    /// Adds to `changeset` every atom which `action` produces in `layer` and which is neither
    /// reached already nor part of the changeset.
    ///
    /// `witness` has to be a witness of the action's applicability in `layer`; it becomes part of
    /// the justification of every produced atom. Points at which an effect is undefined, or
    /// assigns a value outside of the target's domain, are skipped.
    #[allow(
        clippy::too_many_arguments,
        reason = "the per-evaluation structures are owned by the caller"
    )]
    pub fn compute_changeset(
        &self,
        action: ActionId,
        layer: &RelaxedState,
        witness: &[TupleId],
        cache: &mut ApplicabilityCache,
        support_table: &SupportTable,
        arena: &mut JustificationArena,
        changeset: &mut Changeset,
    ) {
        let procedures = self.problem.procedures(action);
        let action_cache = &mut cache.actions[action];

        if let Some(domains) =
            self.filtered_domains(procedures, layer, &mut action_cache.rejected)
        {
            self.collect_effects(
                procedures,
                &domains,
                witness,
                &mut action_cache.processed,
                support_table,
                arena,
                changeset,
            );
        }
    }

    /// Checks the applicability of `action` in `layer` and, if it is applicable, adds the atoms
    /// it produces to `changeset`. Returns whether the action was applicable.
    ///
    /// Equivalent to [`RelaxedApplicability::is_applicable`] followed by
    /// [`RelaxedApplicability::compute_changeset`], but filters the relevant domains only once.
    pub fn expand(
        &self,
        action: ActionId,
        layer: &RelaxedState,
        cache: &mut ApplicabilityCache,
        support_table: &SupportTable,
        arena: &mut JustificationArena,
        changeset: &mut Changeset,
    ) -> bool {
        let procedures = self.problem.procedures(action);
        let action_cache = &mut cache.actions[action];
        let Some(domains) = self.filtered_domains(procedures, layer, &mut action_cache.rejected)
        else {
            return false;
        };

        let mut witness = Vec::new();
        if !self.find_witness(procedures, &domains, action_cache, &mut witness) {
            return false;
        }

        self.collect_effects(
            procedures,
            &domains,
            &witness,
            &mut action_cache.processed,
            support_table,
            arena,
            changeset,
        );
        true
    }

    /// The relevant domains of the action, filtered by its precondition; [`None`] if filtering
    /// shows the precondition cannot hold.
    ///
    /// Monadic clauses are applied first, directly to the projected layer. A value one of them
    /// rejects is added to `rejected` and removed without being tested again in later layers.
    fn filtered_domains(
        &self,
        procedures: &ActionProcedures,
        layer: &RelaxedState,
        rejected: &mut [HashSet<Value>],
    ) -> Option<DomainMap> {
        let mut domains = layer.project(&procedures.relevant);

        for (clause, rejected) in procedures.preconditions.iter().zip(rejected.iter_mut()) {
            if !clause.is_monadic() {
                continue;
            }

            let domain = domains.domain_mut(clause.scope()[0]);
            let _ = domain.retain(|value| {
                if rejected.contains(&value) {
                    return false;
                }

                let satisfied = clause
                    .formula
                    .is_satisfied(&Point::new(clause.scope(), &[value]));
                if !satisfied {
                    let _ = rejected.insert(value);
                }
                satisfied
            });
            if domain.is_empty() {
                return None;
            }
        }

        match procedures.precondition_filter.filter(&mut domains) {
            FilteringStatus::Failure => None,
            FilteringStatus::Unpruned | FilteringStatus::Pruned => Some(domains),
        }
    }

    fn find_witness(
        &self,
        procedures: &ActionProcedures,
        domains: &DomainMap,
        cache: &mut ActionCache,
        witness: &mut Vec<TupleId>,
    ) -> bool {
        if let Some(known) = &cache.witness {
            witness.extend_from_slice(known);
            return true;
        }

        let start = witness.len();

        for clause in &procedures.preconditions {
            // The remaining values of a monadic clause all satisfy it.
            let point = if clause.is_monadic() {
                domains.domain(clause.scope()[0]).first().map(|value| vec![value])
            } else {
                first_witness(&clause.formula, candidates(domains, clause.scope(), None))
            };

            let Some(point) = point else {
                witness.truncate(start);
                return false;
            };

            witness.extend(self.atoms_of(clause.scope(), &point));
        }

        cache.witness = Some(witness[start..].to_vec());
        true
    }

    #[allow(
        clippy::too_many_arguments,
        reason = "the per-evaluation structures are owned by the caller"
    )]
    fn collect_effects(
        &self,
        procedures: &ActionProcedures,
        domains: &DomainMap,
        witness: &[TupleId],
        processed: &mut [HashSet<Value>],
        support_table: &SupportTable,
        arena: &mut JustificationArena,
        changeset: &mut Changeset,
    ) {
        let atom_index = self.problem.atom_index();

        for (effect, processed) in procedures.effects.iter().zip(processed.iter_mut()) {
            let skip = if effect.is_monadic() {
                Some(&*processed)
            } else {
                None
            };
            let points = cartesian_product(candidates(domains, &effect.scope, skip));

            for point in points {
                if effect.is_monadic() {
                    let _ = processed.insert(point[0]);
                }

                let Some(value) = effect.apply(&point) else {
                    continue;
                };
                let Some(tuple_id) = atom_index.try_to_index(Atom::new(effect.target, value))
                else {
                    continue;
                };
                if support_table.is_reached(tuple_id) || changeset.contains(tuple_id) {
                    continue;
                }

                let justification = arena.intern(
                    witness
                        .iter()
                        .copied()
                        .chain(self.atoms_of(&effect.scope, &point)),
                );
                let _ = changeset.push(ChangesetEntry {
                    tuple_id,
                    action: procedures.action,
                    justification,
                });
            }
        }
    }

    fn atoms_of<'a>(
        &'a self,
        scope: &'a [VariableId],
        point: &'a [Value],
    ) -> impl Iterator<Item = TupleId> + 'a {
        scope.iter().zip(point).map(|(&variable, &value)| {
            self.problem
                .atom_index()
                .to_index(Atom::new(variable, value))
        })
    }
}

/// The values of each variable of `scope` in `domains`, leaving out those in `skip`.
fn candidates(
    domains: &DomainMap,
    scope: &[VariableId],
    skip: Option<&HashSet<Value>>,
) -> Vec<Vec<Value>> {
    scope
        .iter()
        .map(|&variable| {
            domains
                .domain(variable)
                .iter()
                .filter(|value| !skip.is_some_and(|skip| skip.contains(value)))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Action;
    use crate::problem::AtomicFormula;
    use crate::problem::Effect;
    use crate::problem::Formula;
    use crate::problem::ProblemBuilder;
    use crate::problem::RelationalOperator;
    use crate::problem::State;
    use crate::problem::Term;

    struct Fixture {
        problem: Problem,
        x: VariableId,
        y: VariableId,
        increment: ActionId,
        copy: ActionId,
    }

    /// `increment` raises x by one while x < 2; `copy` sets y to x when x > y.
    fn fixture() -> Fixture {
        let mut builder = ProblemBuilder::default();
        let x = builder.new_variable("x", [0, 1, 2]);
        let y = builder.new_variable("y", [0, 1, 2]);
        let increment = builder.new_action(Action::new(
            "increment",
            AtomicFormula::new(x, RelationalOperator::Less, 2),
            vec![Effect::new(x, Term::add(x.into(), Term::Constant(1)))],
        ));
        let copy = builder.new_action(Action::new(
            "copy",
            AtomicFormula::new(x, RelationalOperator::Greater, y),
            vec![Effect::new(y, x)],
        ));

        Fixture {
            problem: builder.build().expect("well-formed"),
            x,
            y,
            increment,
            copy,
        }
    }

    fn tuple(problem: &Problem, variable: VariableId, value: Value) -> TupleId {
        problem.atom_index().to_index(Atom::new(variable, value))
    }

    #[test]
    fn inapplicable_actions_leave_the_witness_untouched() {
        let fixture = fixture();
        let layer = RelaxedState::from_state(&State::new([0, 0]));
        let engine = RelaxedApplicability::new(&fixture.problem);
        let mut cache = ApplicabilityCache::new(&fixture.problem);
        let mut witness = Vec::new();

        assert!(!engine.is_applicable(&layer, fixture.copy, &mut cache, &mut witness));
        assert!(witness.is_empty());
        assert!(cache.witness(fixture.copy).is_none());
    }

    #[test]
    fn the_first_witness_is_recorded() {
        let fixture = fixture();
        let mut layer = RelaxedState::from_state(&State::new([0, 0]));
        let _ = layer.merge([Atom::new(fixture.x, 1), Atom::new(fixture.x, 2)]);
        let engine = RelaxedApplicability::new(&fixture.problem);
        let mut cache = ApplicabilityCache::new(&fixture.problem);
        let mut witness = Vec::new();

        assert!(engine.is_applicable(&layer, fixture.copy, &mut cache, &mut witness));
        assert_eq!(
            witness,
            vec![
                tuple(&fixture.problem, fixture.x, 1),
                tuple(&fixture.problem, fixture.y, 0)
            ]
        );
        assert_eq!(cache.witness(fixture.copy), Some(witness.as_slice()));
        assert_eq!(cache.num_applicable(), 1);
    }

    #[test]
    fn changesets_skip_reached_atoms_and_carry_the_witness() {
        let fixture = fixture();
        let problem = &fixture.problem;
        let layer = RelaxedState::from_state(&State::new([0, 0]));
        let engine = RelaxedApplicability::new(problem);
        let mut cache = ApplicabilityCache::new(problem);
        let mut arena = JustificationArena::default();
        let mut support_table = SupportTable::new(problem.atom_index().len());
        let seed = arena.empty();
        let _ = support_table.mark_seed(tuple(problem, fixture.x, 0), seed);
        let _ = support_table.mark_seed(tuple(problem, fixture.y, 0), seed);
        let _ = support_table.open_layer();

        let mut witness = Vec::new();
        assert!(engine.is_applicable(&layer, fixture.increment, &mut cache, &mut witness));

        let mut changeset = Changeset::default();
        engine.compute_changeset(
            fixture.increment,
            &layer,
            &witness,
            &mut cache,
            &support_table,
            &mut arena,
            &mut changeset,
        );

        let entries = changeset.iter().copied().collect::<Vec<_>>();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tuple_id, tuple(problem, fixture.x, 1));
        assert_eq!(entries[0].action, fixture.increment);
        assert_eq!(
            arena.get(entries[0].justification),
            &[tuple(problem, fixture.x, 0)]
        );
    }

    #[test]
    fn monadic_effects_are_evaluated_once_per_value() {
        let fixture = fixture();
        let problem = &fixture.problem;
        let mut layer = RelaxedState::from_state(&State::new([0, 0]));
        let engine = RelaxedApplicability::new(problem);
        let mut cache = ApplicabilityCache::new(problem);
        let mut arena = JustificationArena::default();
        let support_table = SupportTable::new(problem.atom_index().len());

        let mut first = Changeset::default();
        assert!(engine.expand(
            fixture.increment,
            &layer,
            &mut cache,
            &support_table,
            &mut arena,
            &mut first
        ));
        assert_eq!(first.len(), 1);

        let _ = layer.merge([Atom::new(fixture.x, 1)]);
        let mut second = Changeset::default();
        assert!(engine.expand(
            fixture.increment,
            &layer,
            &mut cache,
            &support_table,
            &mut arena,
            &mut second
        ));

        // x = 0 was processed in the first layer; only x = 1 is new.
        let produced = second
            .iter()
            .map(|entry| problem.atom_index().to_atom(entry.tuple_id))
            .collect::<Vec<_>>();
        assert_eq!(produced, vec![Atom::new(fixture.x, 2)]);
    }

    #[test]
    fn values_rejected_by_a_monadic_clause_are_remembered() {
        let mut builder = ProblemBuilder::default();
        let x = builder.new_variable("x", [0, 1, 2, 3]);
        let at_least_two = builder.new_action(Action::new(
            "at-least-two",
            AtomicFormula::new(x, RelationalOperator::GreaterOrEqual, 2),
            Vec::new(),
        ));
        let problem = builder.build().expect("well-formed");

        let mut layer = RelaxedState::from_state(&State::new([0]));
        let _ = layer.merge([Atom::new(x, 1)]);
        let engine = RelaxedApplicability::new(&problem);
        let mut cache = ApplicabilityCache::new(&problem);
        let mut witness = Vec::new();

        assert!(!engine.is_applicable(&layer, at_least_two, &mut cache, &mut witness));
        assert_eq!(
            cache.actions[at_least_two].rejected[0],
            [0, 1].into_iter().collect::<HashSet<_>>()
        );

        let _ = layer.merge([Atom::new(x, 3)]);
        assert!(engine.is_applicable(&layer, at_least_two, &mut cache, &mut witness));
        assert_eq!(witness, vec![tuple(&problem, x, 3)]);
        assert_eq!(cache.actions[at_least_two].rejected[0].len(), 2);
    }

    #[test]
    fn values_outside_the_target_domain_are_skipped() {
        let mut builder = ProblemBuilder::default();
        let x = builder.new_variable("x", [0, 1]);
        let overflow = builder.new_action(Action::new(
            "overflow",
            Formula::Tautology,
            vec![Effect::new(x, Term::add(x.into(), Term::Constant(5)))],
        ));
        let problem = builder.build().expect("well-formed");

        let layer = RelaxedState::from_state(&State::new([0]));
        let engine = RelaxedApplicability::new(&problem);
        let mut cache = ApplicabilityCache::new(&problem);
        let mut arena = JustificationArena::default();
        let support_table = SupportTable::new(problem.atom_index().len());
        let mut changeset = Changeset::default();

        assert!(engine.expand(
            overflow,
            &layer,
            &mut cache,
            &support_table,
            &mut arena,
            &mut changeset
        ));
        assert!(changeset.is_empty());
    }
}
