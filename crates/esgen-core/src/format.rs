//! Small configuration enums shared by every layer of the generator.
//!
//! Plain, `Copy` enums with a `Default` impl, consumed by options structs
//! rather than threaded through generic parameters.

/// Which ECMAScript module format a bundle renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BundleFormat {
    /// Plain ECMAScript module: `import { x } from "m";` / `export ...`.
    #[default]
    Es2015,
    /// Immediately-invoked function expression wrapping `await import(...)`
    /// and a trailing `return { ... };` exports block, suitable for
    /// in-process evaluation.
    Iife,
}

impl BundleFormat {
    #[must_use]
    pub const fn is_iife(self) -> bool {
        matches!(self, Self::Iife)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Es2015 => "ES2015",
            Self::Iife => "IIFE",
        }
    }
}

/// Line terminator used by the output formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewLineKind {
    #[default]
    LineFeed,
    CarriageReturnLineFeed,
}

impl NewLineKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LineFeed => "\n",
            Self::CarriageReturnLineFeed => "\r\n",
        }
    }
}
