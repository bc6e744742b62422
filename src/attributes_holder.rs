use std::collections::{BTreeMap, HashSet};

use super::{
    attribute_group_def::AttributeGroupDefinition,
    attribute_use::AttributeUse,
    components::{ComponentTable, Named},
    cycle_stack::CycleCheckStack,
    error::{CycleError, CycleKind},
    xstypes::QName,
    Ref,
};

/// Common attribute-carrying part of [attribute group
/// definitions](AttributeGroupDefinition) and [complex type
/// definitions](super::ComplexTypeDefinition), embedded by composition.
///
/// Holds the locally declared attribute uses, the names explicitly
/// prohibited at this level, and the attribute groups this holder extends.
/// Group references are relations, not ownership: they are arena handles and
/// the referenced group lives only as long as the component table does.
#[derive(Clone, Debug, Default)]
pub struct AttributesHolder {
    /// Local attribute uses, keyed by expanded name. A `BTreeMap` (ordered
    /// by namespace name, then local name) so that iteration order is
    /// reproducible across runs; generated output depends on this.
    attributes: BTreeMap<QName, Ref<AttributeUse>>,
    prohibited_attributes: HashSet<QName>,
    att_group_refs: Vec<Ref<AttributeGroupDefinition>>,
}

impl AttributesHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_attribute_use(&mut self, name: QName, attribute_use: Ref<AttributeUse>) {
        self.attributes.insert(name, attribute_use);
    }

    pub fn add_prohibited_attribute(&mut self, name: QName) {
        self.prohibited_attributes.insert(name);
    }

    /// Registers a directly referenced attribute group. Adding a group that
    /// is already referenced is a no-op, so the insertion-ordered list
    /// behaves as a set.
    pub fn add_att_group(&mut self, group: Ref<AttributeGroupDefinition>) {
        if !self.att_group_refs.contains(&group) {
            self.att_group_refs.push(group);
        }
    }

    /// Looks up a locally declared attribute use. Never traverses referenced
    /// groups.
    pub fn declared_attribute_use(
        &self,
        namespace: Option<&str>,
        local_name: &str,
    ) -> Option<Ref<AttributeUse>> {
        let name = QName::with_optional_namespace(namespace, local_name);
        self.attributes.get(&name).copied()
    }

    pub fn is_prohibited(&self, name: &QName) -> bool {
        self.prohibited_attributes.contains(name)
    }

    /// Locally declared attribute uses, in qualified-name order.
    pub fn iterate_declared_attribute_uses(
        &self,
    ) -> impl Iterator<Item = Ref<AttributeUse>> + '_ {
        self.attributes.values().copied()
    }

    /// Attribute groups directly referenced from this holder, in insertion
    /// order. Groups referenced by those groups are not included.
    pub fn iterate_att_groups(&self) -> impl Iterator<Item = Ref<AttributeGroupDefinition>> + '_ {
        self.att_group_refs.iter().copied()
    }

    /// Computes the effective attribute uses visible on this holder: the
    /// local uses plus everything inherited through the attribute-group
    /// reference chain, minus prohibited names.
    ///
    /// Local declarations shadow inherited uses of the same qualified name,
    /// and among inherited duplicates the first one encountered wins. A name
    /// prohibited at some level suppresses matching uses at that level and
    /// below it on the same traversal path. Local uses come first, in
    /// qualified-name order, followed by inherited uses in traversal order,
    /// so the result is deterministic for a fixed graph.
    ///
    /// A group that (directly or transitively) references itself is a
    /// structural error and is reported as a [`CycleError`] carrying the
    /// trail of group names.
    pub fn attribute_uses(
        &self,
        table: &impl ComponentTable,
    ) -> Result<Vec<Ref<AttributeUse>>, CycleError> {
        let mut result = Vec::new();
        let mut seen = HashSet::new();
        for (name, &attribute_use) in &self.attributes {
            seen.insert(name.clone());
            if !self.prohibited_attributes.contains(name) {
                result.push(attribute_use);
            }
        }

        let mut visiting = CycleCheckStack::new();
        self.collect_inherited(
            table,
            &mut visiting,
            &mut seen,
            &self.prohibited_attributes,
            &mut result,
        )?;
        Ok(result)
    }

    /// Recursive part of [`attribute_uses`](Self::attribute_uses).
    /// `suppressed` is the union of the prohibited names on the path from
    /// the root holder down to (and including) this one.
    fn collect_inherited(
        &self,
        table: &impl ComponentTable,
        visiting: &mut CycleCheckStack<Ref<AttributeGroupDefinition>>,
        seen: &mut HashSet<QName>,
        suppressed: &HashSet<QName>,
        result: &mut Vec<Ref<AttributeUse>>,
    ) -> Result<(), CycleError> {
        for group_ref in self.iterate_att_groups() {
            if visiting.push(group_ref) {
                let trail = visiting.cycle_string_with(|group| match group.get(table).name() {
                    Some(name) => name.to_string(),
                    None => format!("{group:?}"),
                });
                return Err(CycleError::new(CycleKind::AttributeGroup, trail));
            }

            let holder = &group_ref.get(table).holder;
            let mut below = suppressed.clone();
            below.extend(holder.prohibited_attributes.iter().cloned());
            for (name, &attribute_use) in &holder.attributes {
                if below.contains(name) {
                    continue;
                }
                if seen.insert(name.clone()) {
                    result.push(attribute_use);
                }
            }
            holder.collect_inherited(table, visiting, seen, &below, result)?;

            visiting.pop();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttributeDeclaration, ComponentTable, ConstructionComponentTable};

    fn attribute(
        table: &mut ConstructionComponentTable,
        local_name: &str,
    ) -> (QName, Ref<AttributeUse>) {
        let declaration = table.create(AttributeDeclaration {
            name: local_name.into(),
            target_namespace: None,
        });
        let attribute_use = table.create(AttributeUse {
            required: false,
            attribute_declaration: declaration,
            inheritable: false,
        });
        (
            QName::with_optional_namespace(None::<String>, local_name),
            attribute_use,
        )
    }

    fn group(table: &mut ConstructionComponentTable, name: &str) -> Ref<AttributeGroupDefinition> {
        table.create(AttributeGroupDefinition {
            name: name.into(),
            target_namespace: None,
            holder: AttributesHolder::new(),
        })
    }

    fn names(
        uses: &[Ref<AttributeUse>],
        table: &impl ComponentTable,
    ) -> Vec<String> {
        uses.iter()
            .map(|attribute_use| attribute_use.get(table).name(table).local_name.clone())
            .collect()
    }

    #[test]
    fn effective_set_unions_inherited_groups() {
        let mut table = ConstructionComponentTable::new();
        let (a_name, a) = attribute(&mut table, "a");
        let (b_name, b) = attribute(&mut table, "b");
        let (c_name, c) = attribute(&mut table, "c");

        let inner = group(&mut table, "inner");
        table.get_mut(inner).holder.add_attribute_use(c_name, c);
        let outer = group(&mut table, "outer");
        table.get_mut(outer).holder.add_attribute_use(b_name, b);
        table.get_mut(outer).holder.add_att_group(inner);

        let mut holder = AttributesHolder::new();
        holder.add_attribute_use(a_name, a);
        holder.add_att_group(outer);

        let uses = holder.attribute_uses(&table).unwrap();
        assert_eq!(uses, vec![a, b, c]);
    }

    #[test]
    fn local_uses_shadow_inherited_ones() {
        let mut table = ConstructionComponentTable::new();
        let (name, local) = attribute(&mut table, "x");
        let (_, inherited) = attribute(&mut table, "x");

        let referenced = group(&mut table, "referenced");
        table
            .get_mut(referenced)
            .holder
            .add_attribute_use(name.clone(), inherited);

        let mut holder = AttributesHolder::new();
        holder.add_attribute_use(name, local);
        holder.add_att_group(referenced);

        let uses = holder.attribute_uses(&table).unwrap();
        assert_eq!(uses, vec![local]);
    }

    #[test]
    fn first_encountered_inherited_use_wins() {
        let mut table = ConstructionComponentTable::new();
        let (name, first) = attribute(&mut table, "x");
        let (_, second) = attribute(&mut table, "x");

        let one = group(&mut table, "one");
        table.get_mut(one).holder.add_attribute_use(name.clone(), first);
        let two = group(&mut table, "two");
        table.get_mut(two).holder.add_attribute_use(name, second);

        let mut holder = AttributesHolder::new();
        holder.add_att_group(one);
        holder.add_att_group(two);

        let uses = holder.attribute_uses(&table).unwrap();
        assert_eq!(uses, vec![first]);
    }

    #[test]
    fn prohibited_names_suppress_inherited_uses() {
        let mut table = ConstructionComponentTable::new();
        let (b_name, b) = attribute(&mut table, "b");
        let (c_name, c) = attribute(&mut table, "c");
        let (d_name, d) = attribute(&mut table, "d");

        let inner = group(&mut table, "inner");
        table.get_mut(inner).holder.add_attribute_use(c_name.clone(), c);
        table.get_mut(inner).holder.add_attribute_use(d_name, d);
        let outer = group(&mut table, "outer");
        table.get_mut(outer).holder.add_attribute_use(b_name, b);
        table.get_mut(outer).holder.add_att_group(inner);
        // A prohibition in the middle of the chain hides names below it.
        table
            .get_mut(outer)
            .holder
            .add_prohibited_attribute(c_name.clone());

        let mut holder = AttributesHolder::new();
        holder.add_att_group(outer);
        // A prohibition at the root hides names anywhere down the chain.
        holder.add_prohibited_attribute(QName::with_optional_namespace(None::<String>, "d"));

        let uses = holder.attribute_uses(&table).unwrap();
        assert_eq!(names(&uses, &table), vec!["b"]);
    }

    #[test]
    fn prohibited_local_use_is_excluded() {
        let mut table = ConstructionComponentTable::new();
        let (a_name, a) = attribute(&mut table, "a");
        let (b_name, b) = attribute(&mut table, "b");

        let mut holder = AttributesHolder::new();
        holder.add_attribute_use(a_name.clone(), a);
        holder.add_attribute_use(b_name, b);
        holder.add_prohibited_attribute(a_name);

        let uses = holder.attribute_uses(&table).unwrap();
        assert_eq!(uses, vec![b]);
    }

    #[test]
    fn declared_uses_iterate_in_qualified_name_order() {
        let mut table = ConstructionComponentTable::new();
        let (_, use_b) = attribute(&mut table, "b");
        let (_, use_a) = attribute(&mut table, "a");

        let mut holder = AttributesHolder::new();
        // Inserted out of order on purpose.
        holder.add_attribute_use(QName::with_namespace("urn:two", "b"), use_b);
        holder.add_attribute_use(QName::with_namespace("urn:one", "a"), use_a);

        let declared: Vec<_> = holder.iterate_declared_attribute_uses().collect();
        assert_eq!(declared, vec![use_a, use_b]);
    }

    #[test]
    fn declared_lookup_does_not_traverse_groups() {
        let mut table = ConstructionComponentTable::new();
        let (name, local) = attribute(&mut table, "local");
        let (inherited_name, inherited) = attribute(&mut table, "inherited");

        let referenced = group(&mut table, "referenced");
        table
            .get_mut(referenced)
            .holder
            .add_attribute_use(inherited_name, inherited);

        let mut holder = AttributesHolder::new();
        holder.add_attribute_use(name, local);
        holder.add_att_group(referenced);

        assert_eq!(holder.declared_attribute_use(None, "local"), Some(local));
        assert_eq!(holder.declared_attribute_use(None, "inherited"), None);
    }

    #[test]
    fn self_referential_group_chain_is_reported_as_cycle() {
        let mut table = ConstructionComponentTable::new();
        let group_a = group(&mut table, "groupA");
        let group_b = group(&mut table, "groupB");
        table.get_mut(group_a).holder.add_att_group(group_b);
        table.get_mut(group_b).holder.add_att_group(group_a);

        let error = group_a
            .get(&table)
            .holder
            .attribute_uses(&table)
            .unwrap_err();
        assert_eq!(error.kind(), crate::error::CycleKind::AttributeGroup);
        assert_eq!(error.trail(), "groupB -> groupA -> groupB");
    }

    #[test]
    fn directly_self_referential_group_is_reported_as_cycle() {
        let mut table = ConstructionComponentTable::new();
        let group_a = group(&mut table, "groupA");
        table.get_mut(group_a).holder.add_att_group(group_a);

        let error = group_a
            .get(&table)
            .holder
            .attribute_uses(&table)
            .unwrap_err();
        assert_eq!(error.trail(), "groupA -> groupA");
    }
}
