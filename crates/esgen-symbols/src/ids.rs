//! Stable integer handles into a bundle's arenas.
//!
//! The source models scopes, namespaces, symbols and fragments as objects
//! with back-pointers into each other (a class's base, a member's host
//! class, a namespace's enclosing namespace, ...). Rather than reference
//! counting every one of those edges, each bundle owns one arena per kind
//! and every cross-reference is a plain `Copy` index into it - the same
//! `NodeIndex`-into-`NodeArena` shape a TypeScript-compiler-style binder
//! uses for its own cyclic AST/symbol graph, adapted from `Arc`-shared
//! arenas to `Rc<RefCell<...>>` ones since this generator is
//! single-threaded.

macro_rules! arena_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) u32);

        impl $name {
            pub(crate) fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id!(ScopeId);
arena_id!(NamespaceId);
arena_id!(SymbolId);
arena_id!(FragmentId);
