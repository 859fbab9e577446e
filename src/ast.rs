/// A node of the compiled pattern.
///
/// `Seq` and `Alt` are the only composite shapes: an alternation is an
/// ordered list of branches, each branch a sequence. A group body is a
/// single `Alt` or `Seq`, so `(a|b)+` repeats the whole alternation as one
/// unit. The variant set is closed; the matcher dispatches by `match`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Seq(Vec<Node>),
    Alt(Vec<Node>),
    Repeat {
        inner: Box<Node>,
        kind: Quantifier,
    },
    Group {
        id: usize,
        body: Box<Node>,
    },
    BackRef {
        id: usize,
    },
    StartAnchor,
    EndAnchor,
    Dot,
    Digit,
    Word,
    Class {
        chars: Vec<char>,
        negated: bool,
    },
    Literal(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    ZeroOrOne,
    OneOrMore,
}
