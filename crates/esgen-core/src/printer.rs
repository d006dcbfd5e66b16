//! Buffered, indentation-aware output assembly.
//!
//! Output assembly here is synchronous throughout, so `Printer` is a plain
//! buffer: a tree of line records that flattens to text on demand.
//!
//! - `print` appends a line (or, for `""`, an explicit blank-line request).
//! - `line` runs a builder against an inline child and splices its output
//!   back in as one unit.
//! - `indent` runs a builder against a child whose indent prefix extends
//!   this printer's own, then splices the whole block in.
//! - `as_lines`/`as_text` flatten everything, collapsing runs of blank
//!   lines down to at most one.

#[derive(Debug)]
enum Record {
    /// A single already-composed line, indented by the owning printer.
    Line(String),
    /// An explicit blank-line request (a bare `""` passed to `print`).
    Blank,
    /// A nested printer whose records splice in at this position.
    Child(Printer),
}

/// A buffered fragment of output text. See module docs.
#[derive(Debug)]
pub struct Printer {
    records: Vec<Record>,
    indent: String,
    inline: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            indent: String::new(),
            inline: false,
        }
    }

    fn child_block(&self, extra_indent: &str) -> Self {
        Self {
            records: Vec::new(),
            indent: format!("{}{extra_indent}", self.indent),
            inline: false,
        }
    }

    fn child_inline() -> Self {
        Self {
            records: Vec::new(),
            indent: String::new(),
            inline: true,
        }
    }

    /// Append a record. An empty string is an explicit blank-line request.
    pub fn print(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            self.records.push(Record::Blank);
        } else {
            self.records.push(Record::Line(text));
        }
    }

    /// Append several records in order.
    pub fn print_all<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for item in items {
            self.print(item);
        }
    }

    /// Render `builder`'s output as a standalone string, indented as if it
    /// were a child of this printer, without appending it here. Callers
    /// fold the result into their own `format!`-composed line - e.g. a
    /// multi-line parameter list embedded inline after `function name`.
    /// If the rendered text spans multiple lines, the caller should make
    /// sure the splice point is followed by a newline (see
    /// `Signature::declare`).
    #[must_use]
    pub fn render_inline(&self, builder: impl FnOnce(&mut Printer)) -> String {
        let mut child = Self::child_inline();
        child.indent = self.indent.clone();
        builder(&mut child);
        child.as_lines().join("\n")
    }

    /// Run `builder` in a child whose indent prefix is this printer's own
    /// plus `indent_str`, then splice the whole block in.
    pub fn indent(&mut self, builder: impl FnOnce(&mut Printer)) {
        self.indent_with("  ", builder);
    }

    pub fn indent_with(&mut self, indent_str: &str, builder: impl FnOnce(&mut Printer)) {
        let mut child = self.child_block(indent_str);
        builder(&mut child);
        self.records.push(Record::Child(child));
    }

    /// Inline composition: run `builder` against a fresh inline child and
    /// splice its records back in as one horizontally-joined unit - no
    /// newline terminator between the child's own records. If the child
    /// itself contains indented (non-inline) content, a newline is
    /// inserted right before that content at the splice point.
    pub fn line(&mut self, builder: impl FnOnce(&mut Printer)) {
        let mut child = Self::child_inline();
        builder(&mut child);
        self.records.push(Record::Child(child));
    }

    /// Splice another printer's records in directly (same indent level).
    pub fn splice(&mut self, other: Printer) {
        self.records.push(Record::Child(other));
    }

    /// Flatten to a list of lines, with the indent prefix of each printer
    /// in the tree baked into its own lines, and blank-line runs collapsed
    /// to at most one line.
    #[must_use]
    pub fn as_lines(&self) -> Vec<String> {
        collapse_blank_runs(self.collect_lines())
    }

    fn collect_lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for record in &self.records {
            match record {
                Record::Blank => out.push(String::new()),
                Record::Line(text) => {
                    for (i, part) in text.split('\n').enumerate() {
                        if i == 0 && !part.is_empty() {
                            out.push(format!("{}{part}", self.indent));
                        } else if i == 0 {
                            out.push(String::new());
                        } else {
                            out.push(part.to_string());
                        }
                    }
                }
                Record::Child(child) if child.inline => {
                    let joined = child.as_joined_text();
                    for (i, part) in joined.split('\n').enumerate() {
                        if i == 0 && !part.is_empty() {
                            out.push(format!("{}{part}", self.indent));
                        } else if i == 0 {
                            out.push(String::new());
                        } else {
                            out.push(part.to_string());
                        }
                    }
                }
                Record::Child(child) => out.extend(child.collect_lines()),
            }
        }
        out
    }

    /// Flatten an inline printer's own records into one string: `Line`/
    /// `Blank` records concatenate directly with no newline between them,
    /// a nested inline child joins the same way, and a nested non-inline
    /// child (produced by `indent`) is indented content - a newline is
    /// inserted at the splice point before it, then its own
    /// indentation-aware text is spliced in untouched.
    fn as_joined_text(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            match record {
                Record::Blank => out.push('\n'),
                Record::Line(text) => out.push_str(text),
                Record::Child(child) if child.inline => out.push_str(&child.as_joined_text()),
                Record::Child(child) => {
                    if !out.is_empty() && !out.ends_with('\n') {
                        out.push('\n');
                    }
                    out.push_str(child.as_text().trim_end_matches('\n'));
                }
            }
        }
        out
    }

    /// Flatten to a single string, one trailing newline per logical line.
    #[must_use]
    pub fn as_text(&self) -> String {
        let lines = self.as_lines();
        if lines.is_empty() {
            return String::new();
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn collapse_blank_runs(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut prev_blank = false;
    for line in lines {
        let blank = line.trim().is_empty();
        if blank && prev_blank {
            continue;
        }
        prev_blank = blank;
        out.push(line);
    }
    // Drop a leading or trailing blank line produced by collapsing.
    while out.first().is_some_and(|l| l.trim().is_empty()) {
        out.remove(0);
    }
    while out.last().is_some_and(|l| l.trim().is_empty()) {
        out.pop();
    }
    out
}

#[cfg(test)]
#[path = "../tests/printer_tests.rs"]
mod tests;
