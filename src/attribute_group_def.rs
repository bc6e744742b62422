use super::{
    attribute_use::AttributeUse,
    attributes_holder::AttributesHolder,
    components::{Component, ComponentTable, Named},
    error::CycleError,
    xstypes::{AnyURI, NCName, QName},
    Ref,
};

/// Schema Component: Attribute Group Definition (§3.6)
///
/// A named, reusable bundle of attribute uses. Other attribute-carrying
/// components inherit from it by registering a reference in their
/// [`AttributesHolder`]; the definition itself may extend further groups the
/// same way.
#[derive(Clone, Debug)]
pub struct AttributeGroupDefinition {
    pub name: NCName,
    pub target_namespace: Option<AnyURI>,
    pub holder: AttributesHolder,
}

impl AttributeGroupDefinition {
    /// Effective attribute uses of this group, including inherited ones.
    /// See [`AttributesHolder::attribute_uses`].
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

    pub fn iterate_att_groups(&self) -> impl Iterator<Item = Ref<Self>> + '_ {
        self.holder.iterate_att_groups()
    }
}

impl Component for AttributeGroupDefinition {
    const DISPLAY_NAME: &'static str = "AttributeGroupDefinition";
}

impl Named for AttributeGroupDefinition {
    fn name(&self) -> Option<QName> {
        Some(QName::with_optional_namespace(
            self.target_namespace.as_ref(),
            &self.name,
        ))
    }
}
