//! Double dispatch over the closed set of [`Term`] variants.
//!
//! Each trait is one visitor capability set; the dispatch methods on `Term`
//! are exhaustive matches, so adding a variant is a compile error in every
//! visitor rather than a runtime surprise. New operations over terms should
//! be written as implementations of these traits (or as plain matches), not
//! by extending the variant set.

use super::{
    element_decl::ElementDeclaration, model_group::ModelGroup,
    model_group_def::ModelGroupDefinition, shared::Term, wildcard::Wildcard, Ref,
};

/// Side-effecting visitor over terms.
pub trait TermVisitor {
    fn element_decl(&mut self, element: Ref<ElementDeclaration>);
    fn model_group(&mut self, group: Ref<ModelGroup>);
    fn model_group_definition(&mut self, definition: Ref<ModelGroupDefinition>);
    fn wildcard(&mut self, wildcard: Ref<Wildcard>);
}

/// Value-returning function object over terms.
pub trait TermFunction {
    type Output;

    fn element_decl(&mut self, element: Ref<ElementDeclaration>) -> Self::Output;
    fn model_group(&mut self, group: Ref<ModelGroup>) -> Self::Output;
    fn model_group_definition(&mut self, definition: Ref<ModelGroupDefinition>) -> Self::Output;
    fn wildcard(&mut self, wildcard: Ref<Wildcard>) -> Self::Output;
}

/// Value-returning function object over terms that threads one extra
/// argument through the dispatch.
pub trait TermFunctionWithParam {
    type Param;
    type Output;

    fn element_decl(&mut self, element: Ref<ElementDeclaration>, param: Self::Param)
        -> Self::Output;
    fn model_group(&mut self, group: Ref<ModelGroup>, param: Self::Param) -> Self::Output;
    fn model_group_definition(
        &mut self,
        definition: Ref<ModelGroupDefinition>,
        param: Self::Param,
    ) -> Self::Output;
    fn wildcard(&mut self, wildcard: Ref<Wildcard>, param: Self::Param) -> Self::Output;
}

impl Term {
    pub fn visit(self, visitor: &mut impl TermVisitor) {
        match self {
            Self::ElementDeclaration(e) => visitor.element_decl(e),
            Self::ModelGroup(g) => visitor.model_group(g),
            Self::ModelGroupDefinition(d) => visitor.model_group_definition(d),
            Self::Wildcard(w) => visitor.wildcard(w),
        }
    }

    pub fn apply<F: TermFunction>(self, function: &mut F) -> F::Output {
        match self {
            Self::ElementDeclaration(e) => function.element_decl(e),
            Self::ModelGroup(g) => function.model_group(g),
            Self::ModelGroupDefinition(d) => function.model_group_definition(d),
            Self::Wildcard(w) => function.wildcard(w),
        }
    }

    pub fn apply_with<F: TermFunctionWithParam>(
        self,
        function: &mut F,
        param: F::Param,
    ) -> F::Output {
        match self {
            Self::ElementDeclaration(e) => function.element_decl(e, param),
            Self::ModelGroup(g) => function.model_group(g, param),
            Self::ModelGroupDefinition(d) => function.model_group_definition(d, param),
            Self::Wildcard(w) => function.wildcard(w, param),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConstructionComponentTable, ElementDeclaration, Wildcard};

    struct KindName;

    impl TermFunction for KindName {
        type Output = &'static str;

        fn element_decl(&mut self, _: Ref<ElementDeclaration>) -> &'static str {
            "element"
        }

        fn model_group(&mut self, _: Ref<ModelGroup>) -> &'static str {
            "group"
        }

        fn model_group_definition(&mut self, _: Ref<ModelGroupDefinition>) -> &'static str {
            "group definition"
        }

        fn wildcard(&mut self, _: Ref<Wildcard>) -> &'static str {
            "wildcard"
        }
    }

    #[derive(Default)]
    struct Counter {
        elements: usize,
        wildcards: usize,
    }

    impl TermVisitor for Counter {
        fn element_decl(&mut self, _: Ref<ElementDeclaration>) {
            self.elements += 1;
        }

        fn model_group(&mut self, _: Ref<ModelGroup>) {}

        fn model_group_definition(&mut self, _: Ref<ModelGroupDefinition>) {}

        fn wildcard(&mut self, _: Ref<Wildcard>) {
            self.wildcards += 1;
        }
    }

    struct Repeat;

    impl TermFunctionWithParam for Repeat {
        type Param = usize;
        type Output = String;

        fn element_decl(&mut self, _: Ref<ElementDeclaration>, n: usize) -> String {
            "e".repeat(n)
        }

        fn model_group(&mut self, _: Ref<ModelGroup>, n: usize) -> String {
            "g".repeat(n)
        }

        fn model_group_definition(&mut self, _: Ref<ModelGroupDefinition>, n: usize) -> String {
            "d".repeat(n)
        }

        fn wildcard(&mut self, _: Ref<Wildcard>, n: usize) -> String {
            "w".repeat(n)
        }
    }

    #[test]
    fn dispatches_to_matching_case() {
        let mut table = ConstructionComponentTable::new();
        let element = table.create(ElementDeclaration {
            name: "e".into(),
            target_namespace: None,
            nillable: false,
            abstract_: false,
        });
        let wildcard = table.create(Wildcard::any_lax());

        let mut function = KindName;
        assert_eq!(Term::ElementDeclaration(element).apply(&mut function), "element");
        assert_eq!(Term::Wildcard(wildcard).apply(&mut function), "wildcard");

        let mut counter = Counter::default();
        Term::ElementDeclaration(element).visit(&mut counter);
        Term::ElementDeclaration(element).visit(&mut counter);
        Term::Wildcard(wildcard).visit(&mut counter);
        assert_eq!(counter.elements, 2);
        assert_eq!(counter.wildcards, 1);

        let mut repeat = Repeat;
        assert_eq!(Term::Wildcard(wildcard).apply_with(&mut repeat, 3), "www");
    }
}
