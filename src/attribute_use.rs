use super::{
    attribute_decl::AttributeDeclaration,
    components::{Component, ComponentTable, Named},
    xstypes::QName,
    Ref,
};

/// Schema Component: Attribute Use (§3.5)
#[derive(Clone, Debug)]
pub struct AttributeUse {
    pub required: bool,
    pub attribute_declaration: Ref<AttributeDeclaration>,
    pub inheritable: bool,
}

impl AttributeUse {
    /// Qualified name of the attribute this use declares, resolved through
    /// the referenced declaration.
    pub fn name(&self, table: &impl ComponentTable) -> QName {
        self.attribute_declaration
            .get(table)
            .name()
            .expect("attribute declarations are always named")
    }
}

impl Component for AttributeUse {
    const DISPLAY_NAME: &'static str = "AttributeUse";
}
