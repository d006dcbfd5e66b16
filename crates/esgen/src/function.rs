//! Functions: a symbol plus a signature, with automatic or explicit
//! declaration and a `call` renderer.

use std::cell::RefCell;

use esgen_core::{EsgenResult, Printer};
use esgen_symbols::{Bundle, CodeFragment, DeclarationRecord, Placement, Scope, SymbolKind};
use indexmap::IndexMap;

use crate::callable::{write_function, write_lambda};
use crate::signature::{CallValue, Signature};

/// How a function's automatic or explicit declaration renders its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionAs {
    Function,
    GeneratorFunction,
    Const,
    Let,
    Var,
}

/// A declaration policy attached at construction time: where the
/// declaration hoists to, whether it is exported, and its rendered form.
pub struct DeclarationPolicy {
    pub placement: Placement,
    pub as_kind: FunctionAs,
}

type BodyBuilder = Box<dyn FnOnce(&CodeFragment, &Scope)>;

struct AutoDeclaration {
    policy: DeclarationPolicy,
    body: BodyBuilder,
}

/// A callable program-level function: a `Symbol` plus a `Signature`,
/// optionally wired to auto-declare itself on first reference.
pub struct EsFunction {
    bundle: Bundle,
    symbol: esgen_symbols::Symbol,
    signature: Signature,
    is_async: bool,
    is_generator: bool,
    auto: RefCell<Option<AutoDeclaration>>,
    declared: RefCell<bool>,
}

impl EsFunction {
    /// Create a function symbol, naming it in the bundle root namespace
    /// immediately so other fragments can refer to it before it is
    /// declared, so forward references to it resolve correctly.
    pub fn new(
        bundle: &Bundle,
        requested_name: impl Into<String>,
        signature: Signature,
        is_async: bool,
        is_generator: bool,
    ) -> EsgenResult<Self> {
        let symbol = bundle.new_symbol(requested_name, SymbolKind::Function, false);
        bundle.root_namespace().add_symbol(&symbol)?;
        Ok(Self {
            bundle: bundle.clone(),
            symbol,
            signature,
            is_async,
            is_generator,
            auto: RefCell::new(None),
            declared: RefCell::new(false),
        })
    }

    /// Attach an automatic-declaration policy: the first time `call` is
    /// invoked without an explicit prior `declare`, this body is rendered
    /// and registered with the declarations subsystem.
    pub fn with_auto_declaration(
        self,
        policy: DeclarationPolicy,
        body: impl FnOnce(&CodeFragment, &Scope) + 'static,
    ) -> Self {
        *self.auto.borrow_mut() = Some(AutoDeclaration {
            policy,
            body: Box::new(body),
        });
        self
    }

    #[must_use]
    pub fn symbol(&self) -> &esgen_symbols::Symbol {
        &self.symbol
    }

    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    fn param_list(&self) -> String {
        self.signature.declare()
    }

    /// Render this function's own declaration text (`function name(...) {
    /// ... }` or an arrow-assignment form) into a fresh fragment owned by
    /// `scope`, without registering it anywhere. Used both by explicit
    /// `declare` and by the auto-declaration trigger.
    fn render_declaration(&self, scope: &Scope, as_kind: FunctionAs, body: impl FnOnce(&CodeFragment, &Scope)) -> EsgenResult<CodeFragment> {
        let frag = scope.span()?;
        let name = self.bundle.root_namespace().refer(&self.symbol).get_naming()?;
        let params = self.param_list();
        let fn_scope = scope.nest(esgen_symbols::ScopeKind::Function {
            is_async: self.is_async,
            is_generator: self.is_generator,
        });
        let body_fragment = fn_scope.span()?;
        body(&body_fragment, &fn_scope);
        let body_text = body_fragment.emit(&fn_scope);
        let mut printer = Printer::new();
        match as_kind {
            FunctionAs::Function | FunctionAs::GeneratorFunction => {
                write_function(
                    &mut printer,
                    &name,
                    self.is_async,
                    matches!(as_kind, FunctionAs::GeneratorFunction) || self.is_generator,
                    &params,
                    |p| {
                        for line in body_text.trim_end_matches('\n').split('\n') {
                            p.print(line);
                        }
                    },
                );
            }
            FunctionAs::Const | FunctionAs::Let | FunctionAs::Var => {
                let keyword = match as_kind {
                    FunctionAs::Const => "const",
                    FunctionAs::Let => "let",
                    _ => "var",
                };
                printer.print(format!("{keyword} {name} ="));
                write_lambda(&mut printer, self.is_async, &params, |p| {
                    for line in body_text.trim_end_matches('\n').split('\n') {
                        p.print(line);
                    }
                });
            }
        }
        frag.write(printer.as_text().trim_end_matches('\n'))?;
        Ok(frag)
    }

    /// Explicitly declare this function at the current position in
    /// `scope`, returning the fragment to embed into the caller's output.
    pub fn declare(
        &self,
        scope: &Scope,
        as_kind: FunctionAs,
        body: impl FnOnce(&CodeFragment, &Scope),
    ) -> EsgenResult<CodeFragment> {
        *self.declared.borrow_mut() = true;
        self.render_declaration(scope, as_kind, body)
    }

    fn ensure_auto_declared(&self) -> EsgenResult<()> {
        if *self.declared.borrow() {
            return Ok(());
        }
        let Some(auto) = self.auto.borrow_mut().take() else {
            return Ok(());
        };
        tracing::debug!(requested = %self.symbol.requested_name(), "auto-declaring function on first call");
        *self.declared.borrow_mut() = true;
        let target_scope = self.bundle.root_scope().function_or_bundle();
        let snippet = self.render_declaration(&target_scope, auto.policy.as_kind, auto.body)?;
        self.bundle.declare(DeclarationRecord {
            symbol: self.symbol.id(),
            refs: Vec::new(),
            exported: matches!(auto.policy.placement, Placement::Exports),
            placement: auto.policy.placement,
            scope: target_scope.id(),
            snippet,
        })
    }

    /// Render a call expression `name(...)`, triggering the auto-declared
    /// body's registration on first call if one was attached.
    pub fn call(&self, values: IndexMap<String, CallValue>) -> EsgenResult<String> {
        self.ensure_auto_declared()?;
        let name = self.bundle.root_namespace().refer(&self.symbol).get_naming()?;
        Ok(format!("{name}{}", self.signature.call(values)?))
    }
}
