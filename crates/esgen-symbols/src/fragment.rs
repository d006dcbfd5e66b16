//! Composable writable code fragments.
//!
//! A `CodeFragment` is an ordered list of emitters: literal lines, blank
//! requests, inline/indented child fragments, other fragments embedded
//! wholesale, and nested-scope spans. `emit` walks the tree once and caches
//! the rendered text per scope so repeated emission is idempotent; after
//! the first `emit` call, further
//! writes fail with `AlreadyPrinted`. `write_fragment` is the one operation
//! that can introduce a cycle (the other compositions always build a fresh
//! child), so it is the one cycle-checked via `contains`.

use std::cell::RefCell;
use std::rc::Rc;

use esgen_core::{EsgenError, EsgenResult, Printer};
use rustc_hash::FxHashMap;

use crate::ids::{FragmentId, ScopeId};
use crate::scope::{BundleData, Scope};

#[derive(Clone)]
enum Emitter {
    Text(String),
    Blank,
    /// `line`: a child fragment whose rendering is spliced in as one
    /// composition unit glued to the current position.
    Inline(FragmentId),
    /// `indent`: a child fragment rendered one indent level deeper.
    Indented(FragmentId),
    /// `write_fragment`: an independently-built fragment embedded wholesale
    /// at the current level. The only emitter kind subject to cycle checks.
    Embedded(FragmentId),
    /// `scope(init, builder)`: a nested scope's own span, embedded at the
    /// current level once rendered.
    NestedScope(ScopeId, FragmentId),
}

pub(crate) struct FragmentData {
    emitters: Vec<Emitter>,
    drained: bool,
    printer_cache: FxHashMap<ScopeId, Rc<String>>,
}

/// A writable, composable code fragment owned by some scope.
#[derive(Clone)]
pub struct CodeFragment {
    bundle: Rc<RefCell<BundleData>>,
    id: FragmentId,
}

impl CodeFragment {
    pub(crate) fn new(bundle: Rc<RefCell<BundleData>>) -> Self {
        let mut data = bundle.borrow_mut();
        let id = FragmentId(data.fragments.len() as u32);
        data.fragments.push(FragmentData {
            emitters: Vec::new(),
            drained: false,
            printer_cache: FxHashMap::default(),
        });
        drop(data);
        Self { bundle, id }
    }

    #[must_use]
    pub fn id(&self) -> FragmentId {
        self.id
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bundle.borrow().fragments[self.id.index()].emitters.is_empty()
    }

    fn ensure_writable(&self) -> EsgenResult<()> {
        if self.bundle.borrow().fragments[self.id.index()].drained {
            Err(EsgenError::AlreadyPrinted)
        } else {
            Ok(())
        }
    }

    fn push(&self, emitter: Emitter) -> EsgenResult<()> {
        self.ensure_writable()?;
        self.bundle.borrow_mut().fragments[self.id.index()].emitters.push(emitter);
        Ok(())
    }

    /// Append-line composition: `text` becomes one line (or, if empty, an
    /// explicit blank-line request).
    pub fn write(&self, text: impl Into<String>) -> EsgenResult<()> {
        let text = text.into();
        self.push(if text.is_empty() {
            Emitter::Blank
        } else {
            Emitter::Text(text)
        })
    }

    /// Inline composition: `builder` writes into a fresh child fragment
    /// whose rendering is glued to the current position (not indented).
    pub fn line(&self, builder: impl FnOnce(&CodeFragment)) -> EsgenResult<()> {
        self.ensure_writable()?;
        let child = CodeFragment::new(Rc::clone(&self.bundle));
        builder(&child);
        self.push(Emitter::Inline(child.id))
    }

    /// Indent composition: `builder` writes into a fresh child fragment
    /// rendered one level deeper than this fragment.
    pub fn indent(&self, builder: impl FnOnce(&CodeFragment)) -> EsgenResult<()> {
        self.ensure_writable()?;
        let child = CodeFragment::new(Rc::clone(&self.bundle));
        builder(&child);
        self.push(Emitter::Indented(child.id))
    }

    /// Multi-line composition: `builder` writes a sequence of `write` calls
    /// (including blank-line requests) directly into this fragment.
    pub fn multi_line(&self, builder: impl FnOnce(&CodeFragment)) -> EsgenResult<()> {
        self.ensure_writable()?;
        builder(self);
        Ok(())
    }

    /// Embed `other`, an independently-built fragment, wholesale at the
    /// current position. Fails with `FragmentCycle` if `other` already
    /// (directly or transitively) contains `self`.
    pub fn write_fragment(&self, other: &CodeFragment) -> EsgenResult<()> {
        self.ensure_writable()?;
        if self.id == other.id || other.contains(self.id) {
            return Err(EsgenError::FragmentCycle);
        }
        self.push(Emitter::Embedded(other.id))
    }

    /// Nested-scope composition: opens a span in `scope`, lets `builder`
    /// write into it, and embeds its rendering at the current position.
    pub fn nest_scope(
        &self,
        scope: &Scope,
        builder: impl FnOnce(&CodeFragment),
    ) -> EsgenResult<()> {
        self.ensure_writable()?;
        let inner = scope.span()?;
        builder(&inner);
        self.push(Emitter::NestedScope(scope.id, inner.id))
    }

    fn contains(&self, target: FragmentId) -> bool {
        if self.id == target {
            return true;
        }
        let data = self.bundle.borrow();
        let children: Vec<FragmentId> = data.fragments[self.id.index()]
            .emitters
            .iter()
            .filter_map(|e| match e {
                Emitter::Inline(id)
                | Emitter::Indented(id)
                | Emitter::Embedded(id)
                | Emitter::NestedScope(_, id) => Some(*id),
                Emitter::Text(_) | Emitter::Blank => None,
            })
            .collect();
        drop(data);
        children.into_iter().any(|id| {
            let child = CodeFragment {
                bundle: Rc::clone(&self.bundle),
                id,
            };
            child.contains(target)
        })
    }

    /// Push this fragment's own emitters into `printer`, recursively, using
    /// `Printer`'s own composition primitives rather than pre-rendering to
    /// text and re-splitting on `'\n'` - `line`/`Emitter::Inline` in
    /// particular relies on `Printer::line`'s horizontal joining, which a
    /// pre-rendered-then-reprinted child would have already flattened into
    /// separate lines.
    fn render_into(&self, printer: &mut Printer) {
        let emitters = self.bundle.borrow().fragments[self.id.index()].emitters.clone();
        for emitter in &emitters {
            match emitter {
                Emitter::Text(s) => printer.print(s.clone()),
                Emitter::Blank => printer.print(""),
                Emitter::Inline(child_id) => {
                    let child = CodeFragment {
                        bundle: Rc::clone(&self.bundle),
                        id: *child_id,
                    };
                    printer.line(|inline| child.render_into(inline));
                }
                Emitter::Indented(child_id) => {
                    let child = CodeFragment {
                        bundle: Rc::clone(&self.bundle),
                        id: *child_id,
                    };
                    printer.indent_with("  ", |inner| child.render_into(inner));
                }
                Emitter::Embedded(other_id) | Emitter::NestedScope(_, other_id) => {
                    let other = CodeFragment {
                        bundle: Rc::clone(&self.bundle),
                        id: *other_id,
                    };
                    other.render_into(printer);
                }
            }
        }
    }

    /// Render this fragment's tree to text, top-level lines terminated by
    /// one trailing newline. Does not drain or cache - see `emit`.
    fn render(&self) -> String {
        let mut printer = Printer::new();
        self.render_into(&mut printer);
        printer.as_text()
    }

    /// Render and drain this fragment into `scope`. Further `write`/`line`/
    /// `indent`/`multi_line`/`write_fragment`/`nest_scope` calls on this
    /// fragment fail afterwards; repeated `emit` calls (into the same or a
    /// different scope) return cached, byte-identical text.
    #[tracing::instrument(level = "trace", skip(self, scope), fields(fragment = self.id.0))]
    pub fn emit(&self, scope: &Scope) -> Rc<String> {
        self.bundle.borrow_mut().fragments[self.id.index()].drained = true;
        let cached = self.bundle.borrow().fragments[self.id.index()]
            .printer_cache
            .get(&scope.id)
            .cloned();
        if let Some(text) = cached {
            return text;
        }
        let rendered = Rc::new(self.render());
        self.bundle.borrow_mut().fragments[self.id.index()]
            .printer_cache
            .insert(scope.id, Rc::clone(&rendered));
        rendered
    }
}

impl std::fmt::Debug for CodeFragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeFragment").field("id", &self.id).finish()
    }
}
