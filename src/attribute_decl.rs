use super::{
    components::{Component, Named},
    xstypes::{AnyURI, NCName, QName},
};

/// Schema Component: Attribute Declaration (§3.2)
///
/// Supplies the qualified name through which [attribute
/// uses](super::AttributeUse) are shadowed and prohibited. The declaration's
/// simple type is the validation layer's concern and is not modelled.
#[derive(Clone, Debug)]
pub struct AttributeDeclaration {
    pub name: NCName,
    pub target_namespace: Option<AnyURI>,
}

impl Component for AttributeDeclaration {
    const DISPLAY_NAME: &'static str = "AttributeDeclaration";
}

impl Named for AttributeDeclaration {
    fn name(&self) -> Option<QName> {
        Some(QName::with_optional_namespace(
            self.target_namespace.as_ref(),
            &self.name,
        ))
    }
}
