use super::{
    attribute_use::AttributeUse,
    attributes_holder::AttributesHolder,
    components::{Component, ComponentTable, Named},
    error::CycleError,
    particle::Particle,
    xstypes::{AnyURI, NCName, QName},
    Ref,
};

/// Schema Component: Complex Type Definition (§3.4)
///
/// Modelled here only as far as the component graph is concerned: a complex
/// type carries attributes exactly like an attribute group does (the
/// [`AttributesHolder`] is embedded), and optionally a content-model
/// particle. Derivation, facets and the rest of the type machinery are the
/// validation layer's concern.
#[derive(Clone, Debug)]
pub struct ComplexTypeDefinition {
    /// `None` for anonymous types.
    pub name: Option<NCName>,
    pub target_namespace: Option<AnyURI>,
    pub holder: AttributesHolder,
    pub content: Option<Ref<Particle>>,
}

impl ComplexTypeDefinition {
    /// Effective attribute uses of this type, including those inherited from
    /// referenced attribute groups. See [`AttributesHolder::attribute_uses`].
    pub fn attribute_uses(
        &self,
        table: &impl ComponentTable,
    ) -> Result<Vec<Ref<AttributeUse>>, CycleError> {
        self.holder.attribute_uses(table)
    }

    pub fn declared_attribute_use(
        &self,
        namespace: Option<&str>,
        local_name: &str,
    ) -> Option<Ref<AttributeUse>> {
        self.holder.declared_attribute_use(namespace, local_name)
    }

    pub fn iterate_declared_attribute_uses(
        &self,
    ) -> impl Iterator<Item = Ref<AttributeUse>> + '_ {
        self.holder.iterate_declared_attribute_uses()
    }
}

impl Component for ComplexTypeDefinition {
    const DISPLAY_NAME: &'static str = "ComplexTypeDefinition";
}

impl Named for ComplexTypeDefinition {
    fn name(&self) -> Option<QName> {
        self.name.as_ref().map(|name| {
            QName::with_optional_namespace(self.target_namespace.as_ref(), name)
        })
    }
}
