use thiserror::Error;

use crate::ast::{Node, Quantifier};

/// The only errors this crate raises. The matcher never fails; a pattern
/// that compiles cleanly can at worst not match.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("unbalanced group at byte {0}")]
    UnbalancedGroup(usize),
    #[error("unterminated character class starting at byte {0}")]
    UnterminatedClass(usize),
    #[error("quantifier `{0}` at byte {1} has nothing to repeat")]
    DanglingQuantifier(char, usize),
}

/// Recursive-descent parser for the supported pattern dialect.
///
/// The `Parser` holds the pattern, the current byte position, and the
/// group-id counter. Group ids start at 1 and are allocated the moment an
/// opening parenthesis is seen, so nested groups number in left-paren
/// order, not closing order.
pub struct Parser<'a> {
    pattern: &'a str,
    pos: usize,
    next_group_id: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given pattern.
    pub fn new(pattern: &'a str) -> Self {
        Self {
            pattern,
            pos: 0,
            next_group_id: 1,
        }
    }

    /// Number of capture groups allocated so far. Meaningful after
    /// `parse` returns; it sizes the capture environment.
    pub fn group_count(&self) -> usize {
        self.next_group_id - 1
    }

    /// Allocate a new group ID for capturing groups.
    fn alloc_group_id(&mut self) -> usize {
        let id = self.next_group_id;
        self.next_group_id += 1;
        id
    }

    /// Peek at the next character in the pattern without advancing.
    fn peek(&self) -> Option<char> {
        self.pattern[self.pos..].chars().next()
    }

    /// Advance the parser by one character and return it.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Expect a specific character and advance if it matches.
    fn expect(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Entry point for parsing a regex pattern.
    ///
    /// Example:
    /// - Pattern: `a|b` → Alt([Seq([Literal('a')]), Seq([Literal('b')])])
    pub fn parse(&mut self) -> Result<Node, PatternError> {
        let node = self.parse_alt()?;
        // parse_seq stops at `)`; anything left over here is a close
        // paren that was never opened.
        if self.pos < self.pattern.len() {
            return Err(PatternError::UnbalancedGroup(self.pos));
        }
        Ok(node)
    }

    /// Parse alternation (`|`) at the current nesting depth.
    ///
    /// Example:
    /// - Pattern: `a|b|c` → Alt([Seq([Literal('a')]), Seq([Literal('b')]), Seq([Literal('c')])])
    /// - Pattern: `abc`   → Seq([Literal('a'), Literal('b'), Literal('c')])
    fn parse_alt(&mut self) -> Result<Node, PatternError> {
        let mut branches = vec![self.parse_seq()?];
        while self.peek() == Some('|') {
            self.advance();
            branches.push(self.parse_seq()?);
        }
        if branches.len() == 1 {
            Ok(branches.pop().unwrap())
        } else {
            Ok(Node::Alt(branches))
        }
    }

    /// Parse a sequence of regex atoms (concatenation).
    ///
    /// An empty sequence is legal and matches the empty string, so an
    /// empty alternative branch like `a(|b)c` parses fine.
    ///
    /// Example:
    /// - Pattern: `a(b|c)d` → Seq([Literal('a'), Group, Literal('d')])
    fn parse_seq(&mut self) -> Result<Node, PatternError> {
        let mut nodes = Vec::new();
        while let Some(ch) = self.peek() {
            match ch {
                ')' | '|' => break,
                // A quantifier here has no atom to its left: either the
                // sequence is empty or the previous atom already took its
                // quantifier (`a++`).
                '+' | '?' => return Err(PatternError::DanglingQuantifier(ch, self.pos)),
                _ => nodes.push(self.parse_repeat()?),
            }
        }
        Ok(Node::Seq(nodes))
    }

    /// Parse repetition operators (`?`, `+`) after an atom. The quantifier
    /// wraps exactly the preceding atom, which may be a whole group.
    ///
    /// Example:
    /// - Pattern: `a?`     → Repeat { inner: Literal('a'), kind: ZeroOrOne }
    /// - Pattern: `(ab)+`  → Repeat { inner: Group, kind: OneOrMore }
    fn parse_repeat(&mut self) -> Result<Node, PatternError> {
        let atom = self.parse_atom()?;
        match self.peek() {
            Some('?') => {
                self.advance();
                Ok(Node::Repeat {
                    inner: Box::new(atom),
                    kind: Quantifier::ZeroOrOne,
                })
            }
            Some('+') => {
                self.advance();
                Ok(Node::Repeat {
                    inner: Box::new(atom),
                    kind: Quantifier::OneOrMore,
                })
            }
            _ => Ok(atom),
        }
    }

    /// Parse a single regex atom: group, char class, escape, anchor, or
    /// literal.
    ///
    /// Examples:
    /// - Pattern: `(abc)` → Group { id, body: Seq([Literal('a'), Literal('b'), Literal('c')]) }
    /// - Pattern: `\d`    → Digit
    /// - Pattern: `\12`   → BackRef { id: 12 }
    /// - Pattern: `^`     → StartAnchor
    fn parse_atom(&mut self) -> Result<Node, PatternError> {
        match self.peek() {
            Some('(') => {
                let open_pos = self.pos;
                self.advance();
                let id = self.alloc_group_id();
                let body = self.parse_alt()?;
                if !self.expect(')') {
                    return Err(PatternError::UnbalancedGroup(open_pos));
                }
                Ok(Node::Group {
                    id,
                    body: Box::new(body),
                })
            }
            Some('[') => self.parse_class(),
            Some('\\') => {
                self.advance();
                match self.advance() {
                    Some('d') => Ok(Node::Digit),
                    Some('w') => Ok(Node::Word),
                    Some(c) if c.is_ascii_digit() && c != '0' => {
                        // \1, \12, ... are backreferences; take the whole
                        // decimal run.
                        let mut id = c.to_digit(10).unwrap() as usize;
                        while let Some(d) = self.peek().and_then(|ch| ch.to_digit(10)) {
                            self.advance();
                            id = id * 10 + d as usize;
                        }
                        Ok(Node::BackRef { id })
                    }
                    Some(c) => Ok(Node::Literal(c)), // Any other escaped char is literal
                    None => Ok(Node::Literal('\\')), // Lone backslash at end
                }
            }
            Some('.') => {
                self.advance();
                Ok(Node::Dot)
            }
            Some('^') => {
                self.advance();
                Ok(Node::StartAnchor)
            }
            Some('$') => {
                self.advance();
                Ok(Node::EndAnchor)
            }
            Some(c) => {
                self.advance();
                Ok(Node::Literal(c))
            }
            None => Ok(Node::Seq(vec![])), // End of pattern
        }
    }

    /// Parse a character class, e.g. `[abc]` or `[^abc]`.
    ///
    /// Members may be escaped (`[\]]` is a class holding `]`). The empty
    /// negated class `[^]` falls out of the representation for free: no
    /// member matches, so the negation matches every character.
    fn parse_class(&mut self) -> Result<Node, PatternError> {
        let open_pos = self.pos;
        self.advance(); // consume '['
        let negated = self.expect('^');
        let mut chars = Vec::new();
        loop {
            match self.peek() {
                None => return Err(PatternError::UnterminatedClass(open_pos)),
                Some(']') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.advance() {
                        Some(c) => chars.push(c),
                        None => return Err(PatternError::UnterminatedClass(open_pos)),
                    }
                }
                Some(c) => {
                    self.advance();
                    chars.push(c);
                }
            }
        }
        Ok(Node::Class { chars, negated })
    }
}
