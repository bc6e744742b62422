pub mod attribute_decl;
pub mod attribute_group_def;
pub mod attribute_use;
pub mod attributes_holder;
pub mod complex_type_def;
pub mod components;
pub mod cycle_stack;
pub mod element_decl;
pub mod error;
pub mod model_group;
pub mod model_group_def;
pub mod particle;
pub mod shared;
pub mod visitor;
pub mod wildcard;
pub mod xstypes;

pub use attribute_decl::AttributeDeclaration;
pub use attribute_group_def::AttributeGroupDefinition;
pub use attribute_use::AttributeUse;
pub use attributes_holder::AttributesHolder;
pub use complex_type_def::ComplexTypeDefinition;
pub use element_decl::ElementDeclaration;
pub use model_group::{Compositor, ModelGroup};
pub use model_group_def::ModelGroupDefinition;
pub use particle::{MaxOccurs, Particle};
pub use shared::Term;
pub use wildcard::Wildcard;

pub use components::{
    ComponentTable, ConstructionComponentTable, Named, Ref, RefNamed, SchemaComponentTable,
};
pub use cycle_stack::{CollisionKey, CycleCheckStack, EqualityMode};
pub use error::{ConstructionError, CycleError, CycleKind};
pub use visitor::{TermFunction, TermFunctionWithParam, TermVisitor};
