pub mod ast;
pub mod matcher;
pub mod parser;

pub use matcher::{Captures, Span};
pub use parser::{Parser, PatternError};

use ast::Node;

/// A compiled pattern: the parsed AST plus the number of capture groups,
/// which sizes the capture environment for each attempt.
#[derive(Debug, Clone)]
pub struct Regex {
    root: Node,
    group_count: usize,
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let mut parser = Parser::new(pattern);
        let root = parser.parse()?;
        Ok(Self {
            root,
            group_count: parser.group_count(),
        })
    }

    /// True if the pattern occurs anywhere in `subject`.
    pub fn is_match(&self, subject: &str) -> bool {
        matcher::search(&self.root, self.group_count, subject).is_some()
    }

    /// Capture environment of the first successful attempt, if any.
    pub fn captures(&self, subject: &str) -> Option<Captures> {
        matcher::search(&self.root, self.group_count, subject)
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }
}

/// Compile `pattern` into a reusable [`Regex`].
pub fn compile(pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(pattern)
}

/// One-shot convenience: compile `pattern` and search `input` once.
pub fn is_match(input: &str, pattern: &str) -> Result<bool, PatternError> {
    Ok(Regex::new(pattern)?.is_match(input))
}
