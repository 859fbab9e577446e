use std::slice;

use crate::ast::{Node, Quantifier};

/// Half-open span of char offsets into the subject.
pub type Span = (usize, usize);

/// Capture environment for a single match attempt.
///
/// Slot `id - 1` holds group `id`. Binding clones the environment, so a
/// backtracking branch never observes a sibling branch's bindings. When a
/// group is exercised more than once (inside `+`), the newer span replaces
/// the older one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures {
    slots: Vec<Option<Span>>,
}

impl Captures {
    fn new(group_count: usize) -> Self {
        Self {
            slots: vec![None; group_count],
        }
    }

    fn bind(&self, id: usize, span: Span) -> Self {
        let mut next = self.clone();
        next.slots[id - 1] = Some(span);
        next
    }

    /// Span of group `id`, if it was exercised in the winning attempt.
    /// Offsets count chars, not bytes.
    pub fn span(&self, id: usize) -> Option<Span> {
        self.slots.get(id.checked_sub(1)?).copied().flatten()
    }

    /// Text captured by group `id` within `subject`.
    pub fn group_text(&self, id: usize, subject: &str) -> Option<String> {
        let (start, end) = self.span(id)?;
        Some(subject.chars().skip(start).take(end - start).collect())
    }
}

/// First successful attempt over `subject`, trying successive start
/// offsets until one completes. A pattern whose outer sequence opens with
/// `^` is only tried at offset 0; the anchor node itself re-checks the
/// position, so this is purely a shortcut.
pub fn search(root: &Node, group_count: usize, subject: &str) -> Option<Captures> {
    let input: Vec<char> = subject.chars().collect();
    let seed = Captures::new(group_count);
    let pattern = slice::from_ref(root);
    let anchored = starts_anchored(root);
    let mut winner = None;
    for start in 0..=input.len() {
        let hit = match_seq(
            pattern,
            &input,
            start,
            &seed,
            &mut |_end: usize, caps: &Captures| {
                winner = Some(caps.clone());
                true
            },
        );
        if hit {
            return winner;
        }
        if anchored {
            break;
        }
    }
    None
}

fn starts_anchored(node: &Node) -> bool {
    match node {
        Node::Seq(nodes) => nodes.first().is_some_and(starts_anchored),
        Node::StartAnchor => true,
        _ => false,
    }
}

/// Matches `nodes` as a sequence starting at `pos`, feeding every
/// reachable end state to `cont` until it reports success.
///
/// `cont` is the rest of the overall attempt: a branch only wins if its
/// entire downstream continuation succeeds, which is what makes
/// alternation left-biased and quantifiers greedy-then-backtrack. The
/// whole walk short-circuits the moment `cont` first returns true.
fn match_seq(
    nodes: &[Node],
    input: &[char],
    pos: usize,
    caps: &Captures,
    cont: &mut dyn FnMut(usize, &Captures) -> bool,
) -> bool {
    let Some((node, rest)) = nodes.split_first() else {
        return cont(pos, caps);
    };
    match node {
        Node::Literal(c) => {
            if pos < input.len() && input[pos] == *c {
                match_seq(rest, input, pos + 1, caps, cont)
            } else {
                false
            }
        }
        Node::Dot => {
            if pos < input.len() && input[pos] != '\n' {
                match_seq(rest, input, pos + 1, caps, cont)
            } else {
                false
            }
        }
        Node::Digit => {
            if pos < input.len() && input[pos].is_ascii_digit() {
                match_seq(rest, input, pos + 1, caps, cont)
            } else {
                false
            }
        }
        Node::Word => {
            if pos < input.len() && (input[pos].is_alphanumeric() || input[pos] == '_') {
                match_seq(rest, input, pos + 1, caps, cont)
            } else {
                false
            }
        }
        Node::Class { chars, negated } => {
            if pos < input.len() && chars.contains(&input[pos]) != *negated {
                match_seq(rest, input, pos + 1, caps, cont)
            } else {
                false
            }
        }
        Node::StartAnchor => {
            if pos == 0 {
                match_seq(rest, input, pos, caps, cont)
            } else {
                false
            }
        }
        Node::EndAnchor => {
            if pos == input.len() {
                match_seq(rest, input, pos, caps, cont)
            } else {
                false
            }
        }
        Node::BackRef { id } => {
            // Unbound id (group never exercised, or still open in this
            // attempt): the attempt fails rather than matching emptily.
            let Some((start, end)) = caps.span(*id) else {
                return false;
            };
            let len = end - start;
            if pos + len <= input.len() && input[pos..pos + len] == input[start..end] {
                match_seq(rest, input, pos + len, caps, cont)
            } else {
                false
            }
        }
        Node::Seq(inner) => match_seq(
            inner,
            input,
            pos,
            caps,
            &mut |end: usize, caps2: &Captures| match_seq(rest, input, end, caps2, &mut *cont),
        ),
        Node::Alt(branches) => {
            for branch in branches {
                let hit = match_seq(
                    slice::from_ref(branch),
                    input,
                    pos,
                    caps,
                    &mut |end: usize, caps2: &Captures| {
                        match_seq(rest, input, end, caps2, &mut *cont)
                    },
                );
                if hit {
                    return true;
                }
            }
            false
        }
        Node::Group { id, body } => {
            let start = pos;
            match_seq(
                slice::from_ref(body.as_ref()),
                input,
                pos,
                caps,
                &mut |end: usize, caps2: &Captures| {
                    let bound = caps2.bind(*id, (start, end));
                    match_seq(rest, input, end, &bound, &mut *cont)
                },
            )
        }
        Node::Repeat { inner, kind } => match kind {
            Quantifier::ZeroOrOne => {
                let one = match_seq(
                    slice::from_ref(inner.as_ref()),
                    input,
                    pos,
                    caps,
                    &mut |end: usize, caps2: &Captures| {
                        match_seq(rest, input, end, caps2, &mut *cont)
                    },
                );
                if one {
                    true
                } else {
                    match_seq(rest, input, pos, caps, cont)
                }
            }
            Quantifier::OneOrMore => match_plus(inner, rest, input, pos, caps, cont),
        },
    }
}

/// One-or-more repetition of `inner`, re-attempting the whole node from
/// the end of the previous repetition so variable-length bodies and
/// rebound captures are explored per repetition, never by a plain
/// character scan.
fn match_plus(
    inner: &Node,
    rest: &[Node],
    input: &[char],
    pos: usize,
    caps: &Captures,
    cont: &mut dyn FnMut(usize, &Captures) -> bool,
) -> bool {
    match_seq(
        slice::from_ref(inner),
        input,
        pos,
        caps,
        &mut |end: usize, caps2: &Captures| {
            // Greedy: prefer another repetition, falling back to the
            // continuation from the longest end reached. A zero-width
            // repetition is never repeated, or the search would not
            // terminate.
            if end > pos && match_plus(inner, rest, input, end, caps2, &mut *cont) {
                return true;
            }
            match_seq(rest, input, end, caps2, &mut *cont)
        },
    )
}
