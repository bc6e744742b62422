use super::{
    components::{Component, Named},
    model_group::ModelGroup,
    xstypes::{AnyURI, NCName, QName},
    Ref,
};

/// Schema Component: Model Group Definition (§3.7)
///
/// A named, independently referenceable model group. Particles reference it
/// through [`Term::ModelGroupDefinition`](super::shared::Term); a later
/// definition with the same name supersedes it via
/// [`ModelGroup::redefine`](super::ModelGroup::redefine).
#[derive(Clone, Debug)]
pub struct ModelGroupDefinition {
    pub name: NCName,
    pub target_namespace: Option<AnyURI>,
    pub model_group: Ref<ModelGroup>,
}

impl Component for ModelGroupDefinition {
    const DISPLAY_NAME: &'static str = "ModelGroupDefinition";
}

impl Named for ModelGroupDefinition {
    fn name(&self) -> Option<QName> {
        Some(QName::with_optional_namespace(
            self.target_namespace.as_ref(),
            &self.name,
        ))
    }
}
