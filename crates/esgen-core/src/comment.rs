//! `Comment` formatting.
//!
//! A `Comment` holds zero or more lines. Single-line comments render as
//! `/* text */`; multi-line comments open with `/*`, prefix each line with
//! three spaces, and close with `*/` on its own line. An empty comment
//! renders as `/**/`.

/// A formatted block comment attached to a declaration or name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    lines: Vec<String>,
}

impl Comment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a comment from a single line of text.
    #[must_use]
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
        }
    }

    /// Build a comment from several lines of text.
    #[must_use]
    pub fn multi(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Render the comment body (`/* ... */`, `/**/`, or the multi-line form).
    #[must_use]
    pub fn render(&self) -> String {
        match self.lines.as_slice() {
            [] => "/**/".to_string(),
            [single] => format!("/* {single} */"),
            many => {
                let mut out = String::from("/*\n");
                for line in many {
                    out.push_str("   ");
                    out.push_str(line);
                    out.push('\n');
                }
                out.push_str("*/");
                out
            }
        }
    }

    /// Append this comment to a name, producing `name /* [tag] comment */`
    /// when a tag is given, or `name /* comment */` otherwise. Returns the
    /// bare name unchanged when the comment is empty.
    #[must_use]
    pub fn attach_to(&self, name: &str, tag: Option<&str>) -> String {
        if self.is_empty() {
            return name.to_string();
        }
        match (tag, self.lines.as_slice()) {
            (Some(tag), [single]) => format!("{name} /* [{tag}] {single} */"),
            (Some(tag), _) => {
                let mut tagged = self.clone();
                tagged.lines.insert(0, format!("[{tag}]"));
                format!("{name} {}", tagged.render())
            }
            (None, _) => format!("{name} {}", self.render()),
        }
    }
}
