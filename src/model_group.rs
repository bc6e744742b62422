use super::{
    components::{Component, ConstructionComponentTable},
    cycle_stack::CycleCheckStack,
    error::{ConstructionError, CycleError, CycleKind},
    model_group_def::ModelGroupDefinition,
    particle::Particle,
    shared::Term,
    xstypes::Sequence,
    Ref,
};

/// Schema Component: Model Group, a kind of [Term](super::shared::Term) (§3.8)
///
/// The particle list is fixed at construction; a model group exclusively
/// owns its particle wrappers, while the terms behind them may be shared
/// (several particles may reference the same group definition).
#[derive(Clone, Debug)]
pub struct ModelGroup {
    pub compositor: Compositor,
    pub particles: Sequence<Ref<Particle>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Compositor {
    All,
    Choice,
    Sequence,
}

impl ModelGroup {
    /// Builds a model group over the given child particles.
    ///
    /// Every child `Ref` must point at a slot that is already filled in the
    /// construction table; a reserved-but-absent child is rejected. (The
    /// compositor cannot be absent by construction.)
    pub fn new(
        compositor: Compositor,
        particles: Sequence<Ref<Particle>>,
        table: &ConstructionComponentTable,
    ) -> Result<Self, ConstructionError> {
        for (index, &particle) in particles.iter().enumerate() {
            if !table.is_present(particle) {
                return Err(ConstructionError::AbsentChildParticle { index });
            }
        }
        Ok(Self {
            compositor,
            particles,
        })
    }

    pub fn child(&self, index: usize) -> Ref<Particle> {
        self.particles[index]
    }

    pub fn children(&self) -> &[Ref<Particle>] {
        &self.particles
    }

    pub fn size(&self) -> usize {
        self.particles.len()
    }

    pub fn compositor(&self) -> Compositor {
        self.compositor
    }

    /// Replaces every reference to the superseded group definition `old`
    /// with `new`, throughout the subtree reachable from `group`: nested
    /// model groups are descended into, and so are the model groups of
    /// referenced definitions other than `old`.
    ///
    /// The walk is guarded by a per-call duplicate-detecting stack; reaching
    /// a model group twice on one path means the redefinition chain loops
    /// back on itself, which aborts the call with a [`CycleError`] before
    /// anything has been patched. On success, returns the number of
    /// references that were updated; redefining a definition that is not
    /// referenced anywhere is a no-op returning 0.
    pub fn redefine(
        group: Ref<ModelGroup>,
        old: Ref<ModelGroupDefinition>,
        new: Ref<ModelGroupDefinition>,
        table: &mut ConstructionComponentTable,
    ) -> Result<usize, CycleError> {
        let mut visiting = CycleCheckStack::new();
        let mut patches = Vec::new();
        Self::collect_references(group, old, table, &mut visiting, &mut patches)?;

        let patched = patches.len();
        for particle in patches {
            table.get_mut(particle).term = Term::ModelGroupDefinition(new);
        }
        Ok(patched)
    }

    /// Read-only phase of [`redefine`](Self::redefine): records the
    /// particles whose term is `old`, so that patching happens only after
    /// the whole walk has succeeded.
    fn collect_references(
        group: Ref<ModelGroup>,
        old: Ref<ModelGroupDefinition>,
        table: &ConstructionComponentTable,
        visiting: &mut CycleCheckStack<Ref<ModelGroup>>,
        patches: &mut Vec<Ref<Particle>>,
    ) -> Result<(), CycleError> {
        if visiting.push(group) {
            let trail = visiting.cycle_string_with(|group| format!("{group:?}"));
            return Err(CycleError::new(CycleKind::Redefinition, trail));
        }

        for &particle in &group.get(table).particles {
            match particle.get(table).term {
                Term::ModelGroupDefinition(definition) if definition == old => {
                    patches.push(particle);
                }
                Term::ModelGroupDefinition(definition) => {
                    let nested = definition.get(table).model_group;
                    Self::collect_references(nested, old, table, visiting, patches)?;
                }
                Term::ModelGroup(nested) => {
                    Self::collect_references(nested, old, table, visiting, patches)?;
                }
                Term::ElementDeclaration(_) | Term::Wildcard(_) => {}
            }
        }

        visiting.pop();
        Ok(())
    }
}

impl Component for ModelGroup {
    const DISPLAY_NAME: &'static str = "ModelGroup";
}
