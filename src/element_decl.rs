use super::{
    components::{Component, Named},
    xstypes::{AnyURI, NCName, QName},
};

/// Schema Component: Element Declaration, a kind of [Term](super::shared::Term) (§3.3)
///
/// Only the properties the component graph itself needs are modelled here;
/// type definitions, scopes and substitution groups belong to the parsing
/// and validation layers.
#[derive(Clone, Debug)]
pub struct ElementDeclaration {
    pub name: NCName,
    pub target_namespace: Option<AnyURI>,
    pub nillable: bool,
    pub abstract_: bool,
}

impl Component for ElementDeclaration {
    const DISPLAY_NAME: &'static str = "ElementDeclaration";
}

impl Named for ElementDeclaration {
    fn name(&self) -> Option<QName> {
        Some(QName::with_optional_namespace(
            self.target_namespace.as_ref(),
            &self.name,
        ))
    }
}
