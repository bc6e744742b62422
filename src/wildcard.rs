use super::{
    components::Component,
    xstypes::{AnyURI, QName, Set},
};

/// Schema Component: Wildcard, a kind of [Term](super::shared::Term) (§3.10)
#[derive(Clone, Debug)]
pub struct Wildcard {
    pub namespace_constraint: NamespaceConstraint,
    pub process_contents: ProcessContents,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProcessContents {
    Skip,
    Strict,
    Lax,
}

/// Property Record: Namespace Constraint (§3.10)
#[derive(Clone, Debug)]
pub struct NamespaceConstraint {
    pub variety: NamespaceConstraintVariety,
    pub namespaces: Set<Option<AnyURI>>,
    pub disallowed_names: Set<DisallowedName>,
}

#[derive(Clone, Debug)]
pub enum NamespaceConstraintVariety {
    Any,
    Enumeration,
    Not,
}

#[derive(Clone, Debug)]
pub enum DisallowedName {
    QName(QName),
    Defined,
    Sibling,
}

impl Wildcard {
    /// The `<any processContents="lax"/>` wildcard.
    pub fn any_lax() -> Self {
        Self {
            namespace_constraint: NamespaceConstraint {
                variety: NamespaceConstraintVariety::Any,
                namespaces: Set::new(),
                disallowed_names: Set::new(),
            },
            process_contents: ProcessContents::Lax,
        }
    }
}

impl Component for Wildcard {
    const DISPLAY_NAME: &'static str = "Wildcard";
}
