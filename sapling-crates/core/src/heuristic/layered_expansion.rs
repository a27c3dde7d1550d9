use log::trace;

use crate::asserts::SAPLING_ASSERT_ADVANCED;
use crate::asserts::SAPLING_ASSERT_LEVEL_DEFINITION;
use crate::problem::Problem;
use crate::problem::State;
use crate::relaxation::ApplicabilityCache;
use crate::relaxation::Changeset;
use crate::relaxation::Insertion;
use crate::relaxation::JustificationArena;
use crate::relaxation::RelaxedApplicability;
use crate::relaxation::RelaxedState;
use crate::relaxation::SupportTable;
use crate::sapling_assert_advanced;
use crate::sapling_assert_eq_simple;
use crate::sapling_assert_moderate;

/// The forward part of one heuristic evaluation: relaxed layers grown from a seed state, one
/// [`LayeredExpansion::step`] at a time.
///
/// Everything in here is created for a single evaluation and dropped with it.
#[derive(Debug)]
pub struct LayeredExpansion<'problem> {
    problem: &'problem Problem,
    layer: RelaxedState,
    support_table: SupportTable,
    arena: JustificationArena,
    cache: ApplicabilityCache,
}

impl<'problem> LayeredExpansion<'problem> {
    /// Starts from the layer containing exactly the atoms of `seed`, each reached without an
    /// achieving action.
    pub fn new(problem: &'problem Problem, seed: &State) -> LayeredExpansion<'problem> {
        let mut support_table = SupportTable::new(problem.atom_index().len());
        let mut arena = JustificationArena::default();

        let empty = arena.empty();
        for atom in seed.atoms() {
            let _ = support_table.mark_seed(problem.atom_index().to_index(atom), empty);
        }

        LayeredExpansion {
            problem,
            layer: RelaxedState::from_state(seed),
            support_table,
            arena,
            cache: ApplicabilityCache::new(problem),
        }
    }

    pub fn layer(&self) -> &RelaxedState {
        &self.layer
    }

    pub fn support_table(&self) -> &SupportTable {
        &self.support_table
    }

    pub fn arena(&self) -> &JustificationArena {
        &self.arena
    }

    /// The number of layers expanded so far; the seed layer is not counted.
    pub fn num_layers(&self) -> usize {
        self.support_table.current_layer()
    }

    /// Applies every applicable action to the current layer and merges the atoms they produce
    /// into it. Returns the number of atoms reached for the first time; when it is zero, the
    /// layer is a fixpoint and further steps change nothing.
    pub fn step(&mut self) -> usize {
        let problem = self.problem;
        let layer_index = self.support_table.open_layer();
        let applicability = RelaxedApplicability::new(problem);
        let previous = (SAPLING_ASSERT_LEVEL_DEFINITION >= SAPLING_ASSERT_ADVANCED)
            .then(|| self.layer.clone());

        let mut changeset = Changeset::default();
        let mut num_applicable = 0;
        for (action, _) in problem.actions() {
            if applicability.expand(
                action,
                &self.layer,
                &mut self.cache,
                &self.support_table,
                &mut self.arena,
                &mut changeset,
            ) {
                num_applicable += 1;
            }
        }

        // Justifications only mention atoms of earlier layers, so supports are acyclic.
        sapling_assert_advanced!(changeset.iter().all(|entry| {
            self.arena
                .get(entry.justification)
                .iter()
                .all(|&tuple_id| self.support_table.is_reached(tuple_id))
        }));
        for entry in changeset.iter() {
            let insertion =
                self.support_table
                    .insert(entry.tuple_id, entry.action, entry.justification);
            sapling_assert_moderate!(insertion == Insertion::Novel);
        }

        let atom_index = problem.atom_index();
        let novel = self
            .layer
            .merge(changeset.iter().map(|entry| atom_index.to_atom(entry.tuple_id)));
        sapling_assert_eq_simple!(novel, self.support_table.novel_in_layer(layer_index));
        if let Some(previous) = &previous {
            sapling_assert_advanced!(self.layer.includes(previous));
        }

        trace!(
            "Layer {layer_index}: {num_applicable} applicable actions, {novel} novel atoms, {} atoms reached",
            self.support_table.num_reached()
        );

        novel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Action;
    use crate::problem::Atom;
    use crate::problem::AtomicFormula;
    use crate::problem::Effect;
    use crate::problem::Formula;
    use crate::problem::ProblemBuilder;
    use crate::problem::Term;

    /// A counter which can be incremented up to 3.
    fn counter() -> Problem {
        let mut builder = ProblemBuilder::default();
        let x = builder.new_variable("x", [0, 1, 2, 3]);
        let _ = builder.new_action(Action::new(
            "increment",
            Formula::Tautology,
            vec![Effect::new(x, Term::add(x.into(), Term::Constant(1)))],
        ));
        builder.set_goal(AtomicFormula::equals(x, 3));
        builder.build().expect("well-formed")
    }

    #[test]
    fn every_step_reaches_one_more_value() {
        let problem = counter();
        let mut expansion = LayeredExpansion::new(&problem, &State::new([0]));

        assert_eq!(expansion.step(), 1);
        assert_eq!(expansion.step(), 1);
        assert_eq!(expansion.step(), 1);
        assert_eq!(expansion.step(), 0);
        assert_eq!(expansion.num_layers(), 4);
        assert_eq!(expansion.support_table().num_reached(), 4);
    }

    #[test]
    fn supports_record_the_layer_and_action() {
        let problem = counter();
        let mut expansion = LayeredExpansion::new(&problem, &State::new([1]));
        let _ = expansion.step();

        let x = problem.variables().next().expect("one variable");
        let seed = problem.atom_index().to_index(Atom::new(x, 1));
        let produced = problem.atom_index().to_index(Atom::new(x, 2));

        let support = expansion
            .support_table()
            .support(produced)
            .copied()
            .expect("reached in the first layer");
        assert_eq!(support.layer, 1);
        assert_eq!(support.action, problem.actions().next().map(|(id, _)| id));
        assert_eq!(expansion.arena().get(support.justification), &[seed]);
        assert!(!expansion
            .support_table()
            .is_reached(problem.atom_index().to_index(Atom::new(x, 0))));
    }

    #[test]
    fn justifications_only_use_atoms_of_earlier_layers() {
        let problem = counter();
        let mut expansion = LayeredExpansion::new(&problem, &State::new([0]));
        while expansion.step() > 0 {}

        let support_table = expansion.support_table();
        for value in 1..=3 {
            let tuple_id = problem
                .atom_index()
                .to_index(Atom::new(problem.variables().next().expect("one variable"), value));
            let support = support_table.support(tuple_id).expect("reached");

            for &justifying in expansion.arena().get(support.justification) {
                let justifying_support = support_table.support(justifying).expect("reached");
                assert!(justifying_support.layer < support.layer);
            }
        }
    }
}
