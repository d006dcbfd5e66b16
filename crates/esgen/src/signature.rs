//! Callable signatures and argument symbols.
//!
//! A `Signature` is built from a key-map where a bare key (`"name"`) is a
//! required argument, a `?`-suffixed key (`"name?"`) is optional, and a
//! `...`-prefixed key (`"...name"`) is the (at most one, always-last)
//! variadic argument. `declare()`/`call()` both apply the same
//! inline-vs-multiline threshold: three or fewer plain arguments render on
//! one line; anything larger, or any argument carrying its own comment,
//! renders one argument per line, comma-terminated except the variadic.

use esgen_core::{Comment, EsgenError, EsgenResult};
use indexmap::IndexMap;

/// Which of the three argument groups a parameter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Required,
    Optional,
    Variadic,
}

#[derive(Debug, Clone)]
struct Arg {
    name: String,
    kind: ArgKind,
    comment: Option<Comment>,
}

/// An ordered parameter list split into required, optional, and at most one
/// variadic argument.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    args: Vec<Arg>,
}

/// A value bound to one parameter for `Signature::call`. Variadic
/// parameters accept either a single expression or a sequence that is
/// expanded in place.
#[derive(Debug, Clone)]
pub enum CallValue {
    Expr(String),
    Sequence(Vec<String>),
}

impl From<&str> for CallValue {
    fn from(value: &str) -> Self {
        CallValue::Expr(value.to_string())
    }
}

impl From<String> for CallValue {
    fn from(value: String) -> Self {
        CallValue::Expr(value)
    }
}

impl<const N: usize> From<[&str; N]> for CallValue {
    fn from(values: [&str; N]) -> Self {
        CallValue::Sequence(values.iter().map(|s| (*s).to_string()).collect())
    }
}

impl Signature {
    /// Parse a signature from key-map syntax: `"name"` (required),
    /// `"name?"` (optional), `"...name"` (variadic). Fails on a repeated
    /// argument name or more than one variadic key.
    pub fn new<I, S>(keys: I) -> EsgenResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut required = Vec::new();
        let mut optional = Vec::new();
        let mut variadic: Option<Arg> = None;
        let mut seen = rustc_hash::FxHashSet::default();

        for raw in keys {
            let raw = raw.into();
            let (name, kind) = if let Some(rest) = raw.strip_prefix("...") {
                (rest.to_string(), ArgKind::Variadic)
            } else if let Some(rest) = raw.strip_suffix('?') {
                (rest.to_string(), ArgKind::Optional)
            } else {
                (raw.clone(), ArgKind::Required)
            };

            if !seen.insert(name.clone()) {
                return Err(EsgenError::DuplicateArg(name));
            }

            let arg = Arg {
                name: name.clone(),
                kind,
                comment: None,
            };
            match kind {
                ArgKind::Variadic => {
                    if variadic.is_some() {
                        return Err(EsgenError::DuplicateVararg(name));
                    }
                    variadic = Some(arg);
                }
                ArgKind::Required => required.push(arg),
                ArgKind::Optional => optional.push(arg),
            }
        }

        required.extend(optional);
        if let Some(v) = variadic {
            required.push(v);
        }
        Ok(Self { args: required })
    }

    /// An empty, zero-argument signature.
    #[must_use]
    pub fn empty() -> Self {
        Self { args: Vec::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    #[must_use]
    pub fn arg_names(&self) -> Vec<&str> {
        self.args.iter().map(|a| a.name.as_str()).collect()
    }

    /// Attach a per-argument comment, rendered ahead of that argument when
    /// the declaration is forced multi-line.
    pub fn set_arg_comment(&mut self, name: &str, comment: Comment) {
        if let Some(arg) = self.args.iter_mut().find(|a| a.name == name) {
            arg.comment = Some(comment);
        }
    }

    fn has_comments(&self) -> bool {
        self.args.iter().any(|a| a.comment.is_some())
    }

    fn param_text(arg: &Arg) -> String {
        match arg.kind {
            ArgKind::Variadic => format!("...{}", arg.name),
            _ => arg.name.clone(),
        }
    }

    /// Render `(a, b, c)`, inline when there are at most three arguments
    /// and none carries a comment; otherwise one argument per line.
    #[must_use]
    pub fn declare(&self) -> String {
        if self.args.is_empty() {
            return "()".to_string();
        }
        if self.args.len() <= 3 && !self.has_comments() {
            let parts: Vec<String> = self.args.iter().map(Self::param_text).collect();
            return format!("({})", parts.join(", "));
        }
        let mut out = String::from("(\n");
        let last = self.args.len() - 1;
        for (i, arg) in self.args.iter().enumerate() {
            if let Some(comment) = &arg.comment {
                out.push_str("  ");
                out.push_str(&comment.render());
                out.push('\n');
            }
            let trailing_comma = !(i == last && matches!(arg.kind, ArgKind::Variadic));
            out.push_str("  ");
            out.push_str(&Self::param_text(arg));
            if trailing_comma {
                out.push(',');
            }
            out.push('\n');
        }
        out.push(')');
        out
    }

    /// Render a call expression `(v1, v2, ...)` against the given values.
    /// Missing optional values render as `undefined`; a run of trailing
    /// `undefined`s is trimmed. A variadic's `Sequence` value expands in
    /// place; a missing variadic contributes nothing.
    pub fn call(&self, mut values: IndexMap<String, CallValue>) -> EsgenResult<String> {
        let mut rendered: Vec<String> = Vec::new();
        for arg in &self.args {
            match (arg.kind, values.shift_remove(&arg.name)) {
                (ArgKind::Variadic, Some(CallValue::Sequence(seq))) => rendered.extend(seq),
                (ArgKind::Variadic, Some(CallValue::Expr(e))) => rendered.push(e),
                (ArgKind::Variadic, None) => {}
                (_, Some(CallValue::Expr(e))) => rendered.push(e),
                (_, Some(CallValue::Sequence(seq))) => rendered.extend(seq),
                (_, None) => rendered.push("undefined".to_string()),
            }
        }
        while rendered.last().is_some_and(|v| v == "undefined") {
            rendered.pop();
        }
        if rendered.is_empty() {
            return Ok("()".to_string());
        }
        if rendered.len() <= 3 {
            return Ok(format!("({})", rendered.join(", ")));
        }
        let mut out = String::from("(\n");
        let last = rendered.len() - 1;
        for (i, value) in rendered.iter().enumerate() {
            out.push_str("  ");
            out.push_str(value);
            if i != last {
                out.push(',');
            }
            out.push('\n');
        }
        out.push(')');
        Ok(out)
    }

    /// True iff, for every argument of `self`, the positionally
    /// corresponding argument of `other` exists with the identical
    /// requested name, and either the kinds match or `self`'s argument is
    /// optional. Used to check derived-class constructor compatibility
    /// with its base.
    #[must_use]
    pub fn accepts_args_for(&self, other: &Signature) -> bool {
        self.args.iter().enumerate().all(|(i, arg)| match other.args.get(i) {
            Some(other_arg) => {
                other_arg.name == arg.name
                    && (arg.kind == other_arg.kind || matches!(arg.kind, ArgKind::Optional))
            }
            None => matches!(arg.kind, ArgKind::Optional),
        })
    }
}

#[cfg(test)]
#[path = "../tests/signature_unit_tests.rs"]
mod tests;
