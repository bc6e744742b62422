use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::num::{NonZeroU32, NonZeroUsize};

use super::xstypes::QName;
use super::{
    AttributeDeclaration, AttributeGroupDefinition, AttributeUse, ComplexTypeDefinition,
    ElementDeclaration, ModelGroup, ModelGroupDefinition, Particle, Wildcard,
};

/// Trait implemented by all concrete schema components.
pub trait Component {
    const DISPLAY_NAME: &'static str;
}

/// Type on which internal component traits are implemented.
///
/// This type is used to prevent leaking internal functions into the
/// [`Component`] trait itself.
pub struct ComponentTraits;

/// A component referencable via [`Ref`]. Intended for internal use.
pub trait HasArenaContainer<R: Component>: Sized {
    fn get_container_from_construction_component_table(
        table: &ConstructionComponentTable,
    ) -> &[Option<R>];
    fn get_container_from_construction_component_table_mut(
        table: &mut ConstructionComponentTable,
    ) -> &mut Vec<Option<R>>;
    fn get_container_from_schema_component_table(table: &SchemaComponentTable) -> &[R];
}

/// A reference to a [`Component`] stored in a [`ComponentTable`].
///
/// A `Ref` is a plain index: it does not own the component and it does not
/// keep it alive. Relations between components (attribute group references,
/// group reference terms) are stored as `Ref`s so that replacing a slot in
/// the table is visible to every holder, and so that reference cycles cannot
/// create ownership cycles. Because the index is stable for the lifetime of
/// the table, it also serves as the component's identity for cycle
/// detection.
pub struct Ref<R>(NonZeroU32, PhantomData<R>)
where
    R: Component,
    ComponentTraits: HasArenaContainer<R>;

impl<R> Ref<R>
where
    R: Component,
    ComponentTraits: HasArenaContainer<R>,
{
    const fn from_inner(inner: NonZeroU32) -> Self {
        Self(inner, PhantomData)
    }

    pub(crate) fn index(self) -> usize {
        let size: NonZeroUsize = self
            .0
            .try_into()
            .expect("Could not convert component reference to usize index");
        usize::from(size) - 1
    }

    pub fn get(self, table: &impl ComponentTable) -> &R {
        table.get(self)
    }
}

// derive(...) does not work if R itself does not derive the trait, even though
// it is only "used" in the PhantomData; hence the manual implementations.

impl<R> Copy for Ref<R>
where
    R: Component,
    ComponentTraits: HasArenaContainer<R>,
{
}

impl<R> Clone for Ref<R>
where
    R: Component,
    ComponentTraits: HasArenaContainer<R>,
{
    fn clone(&self) -> Self {
        Self(self.0, PhantomData)
    }
}

impl<R> fmt::Debug for Ref<R>
where
    R: Component,
    ComponentTraits: HasArenaContainer<R>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<{} #{}>", R::DISPLAY_NAME, self.0)
    }
}

impl<R> PartialEq for Ref<R>
where
    R: Component,
    ComponentTraits: HasArenaContainer<R>,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R> Eq for Ref<R>
where
    R: Component,
    ComponentTraits: HasArenaContainer<R>,
{
}

impl<R> Hash for Ref<R>
where
    R: Component,
    ComponentTraits: HasArenaContainer<R>,
{
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// An arena-like container for various [`Component`]s
pub trait ComponentTable {
    /// Retrieves a component's value by reference from this component table.
    /// This function panics if the component value is not present in the table.
    fn get<R>(&self, ref_: Ref<R>) -> &R
    where
        R: Component,
        ComponentTraits: HasArenaContainer<R>;
}

/// The [component table](ComponentTable) used while the schema is being
/// assembled.
///
/// The individual container `Vec`s contain the components wrapped in
/// `Option`s, since components often need to reference themselves, and thus
/// are constructed after the `Ref` itself. This is also the only table that
/// permits mutation: additive attribute registration and group redefinition
/// happen here, before [`convert_to_schema_table`](Self::convert_to_schema_table)
/// freezes the graph for the query phase.
#[derive(Default)]
pub struct ConstructionComponentTable {
    attribute_declarations: Vec<Option<AttributeDeclaration>>,
    attribute_group_definitions: Vec<Option<AttributeGroupDefinition>>,
    attribute_uses: Vec<Option<AttributeUse>>,
    complex_type_definitions: Vec<Option<ComplexTypeDefinition>>,
    element_declarations: Vec<Option<ElementDeclaration>>,
    model_group_definitions: Vec<Option<ModelGroupDefinition>>,
    model_groups: Vec<Option<ModelGroup>>,
    particles: Vec<Option<Particle>>,
    wildcards: Vec<Option<Wildcard>>,
}

impl ComponentTable for ConstructionComponentTable {
    fn get<R>(&self, ref_: Ref<R>) -> &R
    where
        R: Component,
        ComponentTraits: HasArenaContainer<R>,
    {
        let container = ComponentTraits::get_container_from_construction_component_table(self);
        container
            .get(ref_.index())
            .expect("Invalid component reference (out-of-bounds)")
            .as_ref()
            .expect("Component is not present")
    }
}

impl ConstructionComponentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`Ref`] which points to an absent, reserved slot in the table.
    pub fn reserve<R>(&mut self) -> Ref<R>
    where
        R: Component,
        ComponentTraits: HasArenaContainer<R>,
    {
        let container = ComponentTraits::get_container_from_construction_component_table_mut(self);

        // Reserve a slot by inserting None
        container.push(None);

        // We use the size for the ref's ID, which is non-zero after the push
        let size = NonZeroUsize::new(container.len()).unwrap();
        let id: NonZeroU32 = size.try_into().expect("ID did not fit into 32-bit integer");

        Ref::from_inner(id)
    }

    /// Inserts the `value` into the slot pointed to by `ref_`. Returns `ref_` for convenience.
    pub fn insert<R>(&mut self, ref_: Ref<R>, value: R) -> Ref<R>
    where
        R: Component,
        ComponentTraits: HasArenaContainer<R>,
    {
        let container = ComponentTraits::get_container_from_construction_component_table_mut(self);

        let slot = container
            .get_mut(ref_.index())
            .expect("Invalid component reference (out-of-bounds)");

        *slot = Some(value);

        ref_
    }

    /// Shorthand for `insert(reserve(), value)`
    pub fn create<R>(&mut self, value: R) -> Ref<R>
    where
        R: Component,
        ComponentTraits: HasArenaContainer<R>,
    {
        let ref_ = self.reserve();
        self.insert(ref_, value)
    }

    /// Mutable access to a present component, for assembly-phase updates
    /// (attribute registration, redefinition patching).
    /// Panics if the component value is not present in the table.
    pub fn get_mut<R>(&mut self, ref_: Ref<R>) -> &mut R
    where
        R: Component,
        ComponentTraits: HasArenaContainer<R>,
    {
        let container = ComponentTraits::get_container_from_construction_component_table_mut(self);
        container
            .get_mut(ref_.index())
            .expect("Invalid component reference (out-of-bounds)")
            .as_mut()
            .expect("Component is not present")
    }

    pub fn is_present<R>(&self, ref_: Ref<R>) -> bool
    where
        R: Component,
        ComponentTraits: HasArenaContainer<R>,
    {
        let container = ComponentTraits::get_container_from_construction_component_table(self);

        let slot = container
            .get(ref_.index())
            .expect("Invalid component reference (out-of-bounds)");

        slot.is_some()
    }

    /// Tries to convert this construction table to a [schema table](`SchemaComponentTable`).
    /// If a component value is absent, `None` is returned instead.
    pub fn convert_to_schema_table(self) -> Option<SchemaComponentTable> {
        Some(SchemaComponentTable {
            attribute_declarations: Self::convert_container(self.attribute_declarations)?,
            attribute_group_definitions: Self::convert_container(self.attribute_group_definitions)?,
            attribute_uses: Self::convert_container(self.attribute_uses)?,
            complex_type_definitions: Self::convert_container(self.complex_type_definitions)?,
            element_declarations: Self::convert_container(self.element_declarations)?,
            model_group_definitions: Self::convert_container(self.model_group_definitions)?,
            model_groups: Self::convert_container(self.model_groups)?,
            particles: Self::convert_container(self.particles)?,
            wildcards: Self::convert_container(self.wildcards)?,
        })
    }

    /// Helper for [`Self::convert_to_schema_table()`]
    fn convert_container<R>(container: Vec<Option<R>>) -> Option<Box<[R]>> {
        let mut result = Vec::<R>::with_capacity(container.len());
        for component in container {
            result.push(component?);
        }
        Some(result.into_boxed_slice())
    }
}

/// The [component table](ComponentTable) implementation that is used alongside
/// the finished schema.
///
/// Components for which a [`Ref`] exists will always be present in this table.
///
/// Since this table is read-only, the components are stored in boxed slices,
/// which reduces the struct's size by one pointer per component type compared
/// to the `Vec`-storage used in the [`ConstructionComponentTable`]. The
/// read-only storage is also what makes it safe for several traversals to
/// query the same graph in sequence.
pub struct SchemaComponentTable {
    attribute_declarations: Box<[AttributeDeclaration]>,
    attribute_group_definitions: Box<[AttributeGroupDefinition]>,
    attribute_uses: Box<[AttributeUse]>,
    complex_type_definitions: Box<[ComplexTypeDefinition]>,
    element_declarations: Box<[ElementDeclaration]>,
    model_group_definitions: Box<[ModelGroupDefinition]>,
    model_groups: Box<[ModelGroup]>,
    particles: Box<[Particle]>,
    wildcards: Box<[Wildcard]>,
}

impl ComponentTable for SchemaComponentTable {
    fn get<R>(&self, ref_: Ref<R>) -> &R
    where
        R: Component,
        ComponentTraits: HasArenaContainer<R>,
    {
        let container = ComponentTraits::get_container_from_schema_component_table(self);
        container
            .get(ref_.index())
            .expect("Invalid component reference (out-of-bounds)")
    }
}

macro_rules! has_arena_container_impl {
    ($type_name:ty, $field_name:ident) => {
        impl HasArenaContainer<$type_name> for ComponentTraits {
            fn get_container_from_construction_component_table(
                table: &ConstructionComponentTable,
            ) -> &[Option<$type_name>] {
                &table.$field_name
            }

            fn get_container_from_construction_component_table_mut(
                table: &mut ConstructionComponentTable,
            ) -> &mut Vec<Option<$type_name>> {
                &mut table.$field_name
            }

            fn get_container_from_schema_component_table(
                table: &SchemaComponentTable,
            ) -> &[$type_name] {
                &table.$field_name
            }
        }
    };
}

has_arena_container_impl!(AttributeDeclaration, attribute_declarations);
has_arena_container_impl!(AttributeGroupDefinition, attribute_group_definitions);
has_arena_container_impl!(AttributeUse, attribute_uses);
has_arena_container_impl!(ComplexTypeDefinition, complex_type_definitions);
has_arena_container_impl!(ElementDeclaration, element_declarations);
has_arena_container_impl!(ModelGroupDefinition, model_group_definitions);
has_arena_container_impl!(ModelGroup, model_groups);
has_arena_container_impl!(Particle, particles);
has_arena_container_impl!(Wildcard, wildcards);

/// A component that may have a [qualified name](QName)
pub trait Named: Component {
    /// The optional name.
    /// Some components (like [`ElementDeclaration`]) always have a name, and always return `Some`.
    fn name(&self) -> Option<QName>;
}

/// Any type that indirectly implements [`Named`], i.e. where first a [`Ref`]
/// has to be dereferenced to get to the name.
pub trait RefNamed {
    fn name(&self, table: &impl ComponentTable) -> Option<QName>;
}

impl<R> RefNamed for Ref<R>
where
    R: Named,
    ComponentTraits: HasArenaContainer<R>,
{
    fn name(&self, table: &impl ComponentTable) -> Option<QName> {
        self.get(table).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element_decl::ElementDeclaration;

    fn element(name: &str) -> ElementDeclaration {
        ElementDeclaration {
            name: name.into(),
            target_namespace: None,
            nillable: false,
            abstract_: false,
        }
    }

    #[test]
    fn reserve_insert_roundtrip() {
        let mut table = ConstructionComponentTable::new();
        let ref_ = table.reserve::<ElementDeclaration>();
        assert!(!table.is_present(ref_));
        table.insert(ref_, element("e"));
        assert!(table.is_present(ref_));
        assert_eq!(ref_.get(&table).name, "e");
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut table = ConstructionComponentTable::new();
        let ref_ = table.create(element("before"));
        table.get_mut(ref_).name = "after".into();
        assert_eq!(ref_.get(&table).name, "after");
    }

    #[test]
    fn conversion_fails_on_absent_slot() {
        let mut table = ConstructionComponentTable::new();
        table.create(element("present"));
        table.reserve::<ElementDeclaration>();
        assert!(table.convert_to_schema_table().is_none());
    }

    #[test]
    fn conversion_preserves_refs() {
        let mut table = ConstructionComponentTable::new();
        let first = table.create(element("first"));
        let second = table.create(element("second"));
        let frozen = table.convert_to_schema_table().unwrap();
        assert_eq!(first.get(&frozen).name, "first");
        assert_eq!(second.get(&frozen).name, "second");
    }
}
