use super::{
    components::{Component, ComponentTable},
    cycle_stack::CycleCheckStack,
    error::{CycleError, CycleKind},
    model_group::{Compositor, ModelGroup},
    shared::Term,
    Ref,
};

/// Schema Component: Particle (§3.9)
///
/// An occurrence of a [`Term`] with min/max bounds. A particle is owned by
/// its containing model group: the group holds the only `Ref` to it, and the
/// wrapper is never shared between groups (the term behind it may be).
#[derive(Clone, Debug)]
pub struct Particle {
    pub min_occurs: u64,
    pub max_occurs: MaxOccurs,
    pub term: Term,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaxOccurs {
    Unbounded,
    Count(u64),
}

impl MaxOccurs {
    pub(crate) fn add(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Unbounded, _) | (_, Self::Unbounded) => Self::Unbounded,
            (Self::Count(a), Self::Count(b)) => Self::Count(a + b),
        }
    }

    pub(crate) fn mul(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Unbounded, _) | (_, Self::Unbounded) => Self::Unbounded,
            (Self::Count(a), Self::Count(b)) => Self::Count(a * b),
        }
    }

    pub(crate) fn max(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Unbounded, _) | (_, Self::Unbounded) => Self::Unbounded,
            (Self::Count(a), Self::Count(b)) => Self::Count((*a).max(*b)),
        }
    }
}

impl Particle {
    /// The model group this particle's term stands for, resolving a group
    /// reference through its definition. `None` for element and wildcard
    /// terms.
    pub fn term_model_group(&self, components: &impl ComponentTable) -> Option<Ref<ModelGroup>> {
        match self.term {
            Term::ModelGroup(group) => Some(group),
            Term::ModelGroupDefinition(definition) => Some(definition.get(components).model_group),
            Term::ElementDeclaration(_) | Term::Wildcard(_) => None,
        }
    }

    /// Schema Component Constraint: Particle Emptiable
    ///
    /// <https://www.w3.org/TR/xmlschema11-1/#cos-group-emptiable>
    ///
    /// Fails if the content model reaches itself through a group reference
    /// chain.
    pub fn is_emptiable(&self, components: &impl ComponentTable) -> Result<bool, CycleError> {
        // [Definition:]  For a particle to be emptiable one or more of the following is true:
        // 1 Its {min occurs} is 0.
        // 2 Its {term} is a group and the minimum part of the effective total range of that group
        //   [...] is 0.
        if self.min_occurs == 0 {
            return Ok(true);
        }
        if self.term_model_group(components).is_none() {
            return Ok(false);
        }
        Ok(self.effective_total_range(components)?.0 == 0)
    }

    /// Schema Component Constraint: Effective Total Range
    ///
    /// Descends through nested model groups and through group references.
    ///
    /// # Panics
    /// Panics if the particle's term is not a model group or a group
    /// reference.
    pub fn effective_total_range(
        &self,
        components: &impl ComponentTable,
    ) -> Result<(u64, MaxOccurs), CycleError> {
        let mut visiting = CycleCheckStack::new();
        self.range_of_group_term(components, &mut visiting)
    }

    fn range_of_group_term(
        &self,
        components: &impl ComponentTable,
        visiting: &mut CycleCheckStack<Ref<ModelGroup>>,
    ) -> Result<(u64, MaxOccurs), CycleError> {
        let group_ref = self
            .term_model_group(components)
            .expect("effective_total_range needs term to be a model group");
        if visiting.push(group_ref) {
            let trail = visiting.cycle_string_with(|group| format!("{group:?}"));
            return Err(CycleError::new(CycleKind::ContentModel, trail));
        }
        let group = group_ref.get(components);

        let (min_acc, max_acc) = match group.compositor {
            Compositor::All | Compositor::Sequence => {
                // Pt. 1, 3.8.6.5 Effective Total Range (all and sequence)
                let mut min_acc = 0;
                let mut max_acc = MaxOccurs::Count(0);
                for &particle in group.particles.iter() {
                    let particle = particle.get(components);
                    let (min, max) = particle.child_range(components, visiting)?;
                    min_acc += min;
                    max_acc = max_acc.add(&max);
                }
                (min_acc, max_acc)
            }
            Compositor::Choice => {
                // Pt. 2, 3.8.6.6 Effective Total Range (choice)
                let mut min_acc = None;
                let mut max_acc = MaxOccurs::Count(0);
                for &particle in group.particles.iter() {
                    let particle = particle.get(components);
                    let (min, max) = particle.child_range(components, visiting)?;
                    min_acc = Some(min_acc.map_or(min, |acc: u64| acc.min(min)));
                    max_acc = max_acc.max(&max);
                }
                (min_acc.unwrap_or(0), max_acc)
            }
        };

        visiting.pop();
        Ok((self.min_occurs * min_acc, self.max_occurs.mul(&max_acc)))
    }

    fn child_range(
        &self,
        components: &impl ComponentTable,
        visiting: &mut CycleCheckStack<Ref<ModelGroup>>,
    ) -> Result<(u64, MaxOccurs), CycleError> {
        if self.term_model_group(components).is_some() {
            self.range_of_group_term(components, visiting)
        } else {
            Ok((self.min_occurs, self.max_occurs.clone()))
        }
    }
}

impl Component for Particle {
    const DISPLAY_NAME: &'static str = "Particle";
}
