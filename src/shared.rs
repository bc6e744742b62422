use super::{
    element_decl::ElementDeclaration, model_group::ModelGroup,
    model_group_def::ModelGroupDefinition, wildcard::Wildcard, Ref,
};

/// Supertype of the four kinds of component that can appear as a
/// [Particle](super::Particle)'s term (§2.2.3.2).
///
/// This is a closed set: group references are kept as a distinct
/// [`ModelGroupDefinition`] variant (rather than being resolved away to the
/// definition's model group) because redefinition has to be able to find and
/// patch the reference itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Term {
    ElementDeclaration(Ref<ElementDeclaration>),
    ModelGroup(Ref<ModelGroup>),
    ModelGroupDefinition(Ref<ModelGroupDefinition>),
    Wildcard(Ref<Wildcard>),
}

impl Term {
    pub fn is_element_decl(&self) -> bool {
        matches!(self, Self::ElementDeclaration(_))
    }

    pub fn is_model_group(&self) -> bool {
        matches!(self, Self::ModelGroup(_))
    }

    pub fn is_model_group_definition(&self) -> bool {
        matches!(self, Self::ModelGroupDefinition(_))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard(_))
    }

    pub fn element_declaration(self) -> Option<Ref<ElementDeclaration>> {
        match self {
            Self::ElementDeclaration(e) => Some(e),
            _ => None,
        }
    }

    pub fn model_group(self) -> Option<Ref<ModelGroup>> {
        match self {
            Self::ModelGroup(g) => Some(g),
            _ => None,
        }
    }

    pub fn model_group_definition(self) -> Option<Ref<ModelGroupDefinition>> {
        match self {
            Self::ModelGroupDefinition(d) => Some(d),
            _ => None,
        }
    }

    pub fn wildcard(self) -> Option<Ref<Wildcard>> {
        match self {
            Self::Wildcard(w) => Some(w),
            _ => None,
        }
    }

    /// True for terms with no particle children of their own.
    pub fn is_basic(&self) -> bool {
        matches!(self, Self::ElementDeclaration(_) | Self::Wildcard(_))
    }
}
