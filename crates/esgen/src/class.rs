//! Classes, members, fields, methods and constructors.
//!
//! `EsClass` models a class as an arena of members with a back-pointer to
//! its host, using `Rc<RefCell<...>>`-held `IndexMap`s rather than object
//! references, matching the rest of this workspace's arena-with-stable-handles
//! style (see `esgen_symbols::ids`). Public member names are allocated from one
//! `NameRegistry` shared across the whole inheritance chain (cloned from
//! the base's, if any); private member names get an independent per-class
//! registry, since private names never collide across classes.

use std::cell::RefCell;
use std::rc::Rc;

use esgen_core::{EsgenError, EsgenResult, NameRegistry, Printer};
use esgen_symbols::{Bundle, CodeFragment, Scope, Symbol, SymbolKind};
use indexmap::IndexMap;

use crate::callable::write_method;
use crate::signature::{CallValue, Signature};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Method,
    Constructor,
}

/// One class member. `declared` distinguishes a member genuinely declared
/// on this class from one lazily materialized here with `declared: false`
/// because the derived class inherited it from a base.
#[derive(Clone)]
pub struct Member {
    pub kind: MemberKind,
    /// The rendered accessor name: `#name` for private members, a bare
    /// identifier or `["literal"]` for public ones.
    pub key: String,
    pub private: bool,
    pub declared: bool,
    pub initializer: Option<String>,
    pub signature: Option<Signature>,
}

impl Member {
    /// `target.key` (or `target.#key`) - the full accessor expression.
    #[must_use]
    pub fn accessor(&self, target: &str) -> String {
        format!("{target}.{}", self.key)
    }

    #[must_use]
    pub fn get(&self, target: &str) -> String {
        self.accessor(target)
    }

    pub fn set(&self, target: &str, value: &str) -> String {
        format!("{} = {value}", self.accessor(target))
    }

    pub fn call(&self, target: &str, values: IndexMap<String, CallValue>) -> EsgenResult<String> {
        let signature = self.signature.as_ref().ok_or_else(|| {
            EsgenError::Evaluation(format!("{} is not callable", self.key))
        })?;
        Ok(format!("{}{}", self.accessor(target), signature.call(values)?))
    }

    /// Render this member's declaration text inside a class body.
    pub fn render(&self) -> String {
        match self.kind {
            MemberKind::Field => match &self.initializer {
                Some(init) => format!("{} = {init};", self.key),
                None => format!("{};", self.key),
            },
            MemberKind::Method | MemberKind::Constructor => {
                let params = self.signature.as_ref().map_or_else(|| "()".to_string(), Signature::declare);
                let mut printer = esgen_core::Printer::new();
                let name = if matches!(self.kind, MemberKind::Constructor) {
                    "constructor".to_string()
                } else {
                    self.key.clone()
                };
                write_method(&mut printer, &name, false, false, &params, |_| {});
                printer.as_text().trim_end_matches('\n').to_string()
            }
        }
    }
}

struct ClassData {
    base: Option<Rc<EsClass>>,
    public_registry: Rc<RefCell<NameRegistry>>,
    private_registry: Rc<RefCell<NameRegistry>>,
    private_members: RefCell<IndexMap<String, Member>>,
    public_members: RefCell<IndexMap<String, Member>>,
    constructor: RefCell<Option<Member>>,
}

/// A class: its own symbol, an optional base, a constructor, and its
/// public/private member maps.
pub struct EsClass {
    bundle: Bundle,
    symbol: Symbol,
    data: ClassData,
}

impl EsClass {
    pub fn new(bundle: &Bundle, requested_name: impl Into<String>, base: Option<Rc<EsClass>>) -> EsgenResult<Rc<Self>> {
        let symbol = bundle.new_symbol(requested_name, SymbolKind::Class, false);
        bundle.root_namespace().add_symbol(&symbol)?;

        let public_registry = base
            .as_ref()
            .map(|b| Rc::clone(&b.data.public_registry))
            .unwrap_or_else(NameRegistry::new_root);

        Ok(Rc::new(Self {
            bundle: bundle.clone(),
            symbol,
            data: ClassData {
                base,
                public_registry,
                private_registry: NameRegistry::new_root(),
                private_members: RefCell::new(IndexMap::new()),
                public_members: RefCell::new(IndexMap::new()),
                constructor: RefCell::new(None),
            },
        }))
    }

    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    #[must_use]
    pub fn base(&self) -> Option<&Rc<EsClass>> {
        self.data.base.as_ref()
    }

    fn class_label(&self) -> String {
        self.symbol.requested_name()
    }

    /// Declare a field or method under `requested_name`. Public names are
    /// allocated from the table shared with the whole inheritance chain;
    /// private names get `#`-prefixed, per-class-unique names.
    pub fn declare_member(
        &self,
        requested_name: &str,
        kind: MemberKind,
        private: bool,
        initializer: Option<String>,
        signature: Option<Signature>,
    ) -> EsgenResult<Member> {
        if !private {
            if let Some(existing) = self.data.public_members.borrow().get(requested_name) {
                if existing.declared {
                    return Err(EsgenError::AlreadyDeclared(requested_name.to_string(), self.class_label()));
                }
            }
        }
        // Private members are keyed by their *allocated* name below, not
        // the request, so two distinct private members both requesting
        // "test" each get their own entry (`#test`, `#test$0`) rather than
        // colliding.

        let allocated = if private {
            let name = self.data.private_registry.borrow_mut().reserve_name(requested_name);
            format!("#{name}")
        } else {
            self.data.public_registry.borrow_mut().reserve_name(requested_name)
        };

        let member = Member {
            kind,
            key: allocated.clone(),
            private,
            declared: true,
            initializer,
            signature,
        };

        if private {
            self.data.private_members.borrow_mut().insert(allocated, member.clone());
        } else {
            self.data.public_members.borrow_mut().insert(requested_name.to_string(), member.clone());
        }
        Ok(member)
    }

    /// Walk the inheritance chain for `requested_name`. A base member found
    /// this way is lazily materialized into this class's own map with
    /// `declared: false`, so redeclaring it here later is recognized as an
    /// override rather than a duplicate.
    pub fn find_member(self: &Rc<Self>, requested_name: &str) -> Option<Member> {
        if let Some(m) = self.data.public_members.borrow().get(requested_name) {
            return Some(m.clone());
        }
        if let Some(base) = &self.data.base {
            if let Some(found) = base.find_member(requested_name) {
                let lazy = Member {
                    declared: false,
                    ..found
                };
                self.data.public_members.borrow_mut().insert(requested_name.to_string(), lazy.clone());
                return Some(lazy);
            }
        }
        None
    }

    /// Override a base member in this (derived) class: flips `declared` to
    /// `true` and replaces the handle. Fails if a member already declared
    /// *here* (not merely inherited) is re-declared under the same name.
    pub fn override_member(
        &self,
        requested_name: &str,
        initializer: Option<String>,
        signature: Option<Signature>,
    ) -> EsgenResult<Member> {
        let existing = self.data.public_members.borrow().get(requested_name).cloned();
        if let Some(existing) = &existing {
            if existing.declared {
                return Err(EsgenError::AlreadyDeclared(requested_name.to_string(), self.class_label()));
            }
            let member = Member {
                declared: true,
                initializer,
                signature,
                ..existing.clone()
            };
            self.data.public_members.borrow_mut().insert(requested_name.to_string(), member.clone());
            return Ok(member);
        }
        self.declare_member(requested_name, MemberKind::Field, false, initializer, signature)
    }

    #[must_use]
    pub fn constructor_signature(&self) -> Option<Signature> {
        self.data.constructor.borrow().as_ref().and_then(|c| c.signature.clone())
    }

    /// Declare an explicit constructor. If a base class exists, its
    /// signature must accept the base's arguments
    /// (`Signature::accepts_args_for`); otherwise an empty signature
    /// constructor is synthesized automatically when none is declared and
    /// no base exists.
    pub fn declare_constructor(&self, signature: Signature) -> EsgenResult<Member> {
        if let Some(base) = &self.data.base {
            if let Some(base_sig) = base.constructor_signature() {
                if !signature.accepts_args_for(&base_sig) {
                    return Err(EsgenError::IncompatibleConstructor(
                        self.class_label(),
                        base.class_label(),
                    ));
                }
            }
        }
        let member = Member {
            kind: MemberKind::Constructor,
            key: "constructor".to_string(),
            private: false,
            declared: true,
            initializer: None,
            signature: Some(signature),
        };
        *self.data.constructor.borrow_mut() = Some(member.clone());
        Ok(member)
    }

    fn synthesized_empty_constructor() -> Member {
        Member {
            kind: MemberKind::Constructor,
            key: "constructor".to_string(),
            private: false,
            declared: true,
            initializer: None,
            signature: Some(Signature::empty()),
        }
    }

    /// Resolve (or synthesize) this class's constructor for rendering a
    /// `declare()` class body: explicit if declared, inherited from the
    /// base if not, or an empty constructor synthesized unconditionally when
    /// there is no base either - declared class text always shows *some*
    /// constructor, whether or not it ends up being called with arguments.
    pub fn resolve_constructor(&self) -> EsgenResult<Member> {
        if let Some(ctor) = self.data.constructor.borrow().clone() {
            return Ok(ctor);
        }
        if let Some(base) = &self.data.base {
            return base.resolve_constructor();
        }
        Ok(Self::synthesized_empty_constructor())
    }

    /// Resolve the constructor `instantiate` calls against: explicit if
    /// declared, inherited from the base if not. With no base and no
    /// explicit constructor, an empty one is assumed only when `argc` (the
    /// number of values the caller is passing to `instantiate`) is zero;
    /// otherwise there is no signature to validate those arguments against
    /// and this throws `ConstructorNotDeclared`.
    fn resolve_constructor_for_call(&self, argc: usize) -> EsgenResult<Member> {
        if let Some(ctor) = self.data.constructor.borrow().clone() {
            return Ok(ctor);
        }
        if let Some(base) = &self.data.base {
            return base.resolve_constructor_for_call(argc);
        }
        if argc == 0 {
            return Ok(Self::synthesized_empty_constructor());
        }
        Err(EsgenError::ConstructorNotDeclared(self.class_label()))
    }

    /// Render this class's own declaration text - `class Name [extends
    /// Base] { ... }` - into a fresh fragment owned by `scope`. Only
    /// members actually declared *here* are printed; a member merely
    /// inherited and visible via `find_member` (`declared: false`) is left
    /// out, since it already exists on the base class's own text and JS
    /// prototype inheritance makes it visible without redeclaration. The
    /// constructor follows the same auto-declaration rule `instantiate`
    /// relies on: an explicit constructor is always printed; with no base
    /// and no explicit constructor an empty one is synthesized and printed
    /// (so a reader sees the class is instantiable with no arguments);
    /// with a base and no explicit constructor, nothing is printed and the
    /// base's constructor is inherited as-is.
    pub fn declare(&self, scope: &Scope) -> EsgenResult<CodeFragment> {
        let frag = scope.span()?;
        let name = self.bundle.root_namespace().refer(&self.symbol).get_naming()?;
        let header = match &self.data.base {
            Some(base) => {
                let base_name = self.bundle.root_namespace().refer(&base.symbol).get_naming()?;
                format!("class {name} extends {base_name} {{")
            }
            None => format!("class {name} {{"),
        };

        let mut body: Vec<Member> = Vec::new();
        if let Some(ctor) = self.data.constructor.borrow().clone() {
            body.push(ctor);
        } else if self.data.base.is_none() {
            body.push(self.resolve_constructor()?);
        }
        body.extend(self.data.private_members.borrow().values().cloned());
        body.extend(
            self.data
                .public_members
                .borrow()
                .values()
                .filter(|m| m.declared)
                .cloned(),
        );

        let mut printer = Printer::new();
        printer.print(header);
        printer.indent(|p| {
            for member in &body {
                for line in member.render().split('\n') {
                    p.print(line.to_string());
                }
            }
        });
        printer.print("}");
        frag.write(printer.as_text().trim_end_matches('\n'))?;
        Ok(frag)
    }

    /// `new ClassName(args)`.
    pub fn instantiate(&self, values: IndexMap<String, CallValue>) -> EsgenResult<String> {
        let name = self.bundle.root_namespace().refer(&self.symbol).get_naming()?;
        let ctor = self.resolve_constructor_for_call(values.len())?;
        let signature = ctor.signature.unwrap_or_else(Signature::empty);
        Ok(format!("new {name}{}", signature.call(values)?))
    }

    /// Every member: private members first (insertion order), then the
    /// constructor, then public members - declared-here and
    /// inherited-visible - in shared-table order.
    #[must_use]
    pub fn members(&self) -> Vec<Member> {
        let mut out: Vec<Member> = self.data.private_members.borrow().values().cloned().collect();
        out.push(self.resolve_constructor().unwrap_or_else(|_| Member {
            kind: MemberKind::Constructor,
            key: "constructor".to_string(),
            private: false,
            declared: true,
            initializer: None,
            signature: Some(Signature::empty()),
        }));
        out.extend(self.data.public_members.borrow().values().cloned());
        out
    }
}
