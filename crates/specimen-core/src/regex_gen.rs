//! Self-contained mini-regex expansion: parses a pattern and produces one
//! random string matching it.
//!
//! Supported syntax: literals, `.`, character classes (ranges, negation),
//! escapes (`\d \D \w \W \s \S` and escaped metacharacters), grouping,
//! alternation, and quantifiers `*`, `+`, `?`, `{m}`, `{m,}`, `{m,n}`.
//! Anchors `^`/`$` are accepted and ignored. Unbounded quantifiers cap at
//! `min + 8` repetitions.

use rand::Rng;
use specimen_error::{Result, SpecimenError};

/// Repetition cap added to `min` for `*`, `+` and `{m,}`.
const UNBOUNDED_EXTRA: u32 = 8;

/// Expand `pattern` into one random matching string.
pub fn expand_pattern(pattern: &str, rng: &mut impl Rng) -> Result<String> {
    let node = Parser::new(pattern).parse()?;
    let mut out = String::new();
    node.expand(rng, &mut out)?;
    Ok(out)
}

// ── AST ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Empty,
    Literal(char),
    /// `.`: any printable ASCII character.
    AnyChar,
    Class {
        negated: bool,
        items: Vec<ClassItem>,
    },
    Concat(Vec<Node>),
    Alternate(Vec<Node>),
    Repeat {
        node: Box<Node>,
        min: u32,
        max: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ClassItem {
    Single(char),
    Range(char, char),
}

impl ClassItem {
    fn contains(self, c: char) -> bool {
        match self {
            Self::Single(s) => s == c,
            Self::Range(lo, hi) => (lo..=hi).contains(&c),
        }
    }
}

const PRINTABLE_LO: u8 = 0x20;
const PRINTABLE_HI: u8 = 0x7e;

impl Node {
    fn expand(&self, rng: &mut impl Rng, out: &mut String) -> Result<()> {
        match self {
            Self::Empty => Ok(()),
            Self::Literal(c) => {
                out.push(*c);
                Ok(())
            }
            Self::AnyChar => {
                out.push(rng.gen_range(PRINTABLE_LO..=PRINTABLE_HI) as char);
                Ok(())
            }
            Self::Class { negated, items } => {
                let candidates: Vec<char> = (PRINTABLE_LO..=PRINTABLE_HI)
                    .map(|b| b as char)
                    .filter(|c| items.iter().any(|item| item.contains(*c)) != *negated)
                    .collect();
                if candidates.is_empty() {
                    return Err(SpecimenError::pattern(
                        "[..]",
                        "character class matches nothing",
                    ));
                }
                out.push(candidates[rng.gen_range(0..candidates.len())]);
                Ok(())
            }
            Self::Concat(parts) => {
                for part in parts {
                    part.expand(rng, out)?;
                }
                Ok(())
            }
            Self::Alternate(branches) => {
                branches[rng.gen_range(0..branches.len())].expand(rng, out)
            }
            Self::Repeat { node, min, max } => {
                let count = if min == max {
                    *min
                } else {
                    rng.gen_range(*min..=*max)
                };
                for _ in 0..count {
                    node.expand(rng, out)?;
                }
                Ok(())
            }
        }
    }
}

// ── Parser ─────────────────────────────────────────────────────────────────

struct Parser<'a> {
    pattern: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(pattern: &'a str) -> Self {
        Self {
            pattern,
            chars: pattern.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, detail: impl Into<String>) -> SpecimenError {
        SpecimenError::pattern(self.pattern, detail)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn parse(mut self) -> Result<Node> {
        let node = self.parse_alternation()?;
        if self.pos != self.chars.len() {
            return Err(self.error(format!("unexpected `)` at position {}", self.pos)));
        }
        Ok(node)
    }

    fn parse_alternation(&mut self) -> Result<Node> {
        let mut branches = vec![self.parse_concat()?];
        while self.peek() == Some('|') {
            self.bump();
            branches.push(self.parse_concat()?);
        }
        if branches.len() == 1 {
            Ok(branches.pop().unwrap_or(Node::Empty))
        } else {
            Ok(Node::Alternate(branches))
        }
    }

    fn parse_concat(&mut self) -> Result<Node> {
        let mut parts = Vec::new();
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            parts.push(self.parse_repeat()?);
        }
        match parts.len() {
            0 => Ok(Node::Empty),
            1 => Ok(parts.pop().unwrap_or(Node::Empty)),
            _ => Ok(Node::Concat(parts)),
        }
    }

    fn parse_repeat(&mut self) -> Result<Node> {
        let atom = self.parse_atom()?;
        let (min, max) = match self.peek() {
            Some('*') => {
                self.bump();
                (0, UNBOUNDED_EXTRA)
            }
            Some('+') => {
                self.bump();
                (1, 1 + UNBOUNDED_EXTRA)
            }
            Some('?') => {
                self.bump();
                (0, 1)
            }
            Some('{') => {
                self.bump();
                self.parse_braced_quantifier()?
            }
            _ => return Ok(atom),
        };
        if min > max {
            return Err(self.error(format!("quantifier minimum {min} exceeds maximum {max}")));
        }
        Ok(Node::Repeat {
            node: Box::new(atom),
            min,
            max,
        })
    }

    fn parse_braced_quantifier(&mut self) -> Result<(u32, u32)> {
        let min = self.parse_number()?;
        match self.bump() {
            Some('}') => Ok((min, min)),
            Some(',') => {
                if self.peek() == Some('}') {
                    self.bump();
                    Ok((min, min + UNBOUNDED_EXTRA))
                } else {
                    let max = self.parse_number()?;
                    match self.bump() {
                        Some('}') => Ok((min, max)),
                        _ => Err(self.error("unterminated `{m,n}` quantifier")),
                    }
                }
            }
            _ => Err(self.error("unterminated `{m}` quantifier")),
        }
    }

    fn parse_number(&mut self) -> Result<u32> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        if start == self.pos {
            return Err(self.error("expected a number in quantifier"));
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse()
            .map_err(|_| self.error(format!("quantifier bound `{text}` out of range")))
    }

    fn parse_atom(&mut self) -> Result<Node> {
        match self.bump() {
            None => Err(self.error("unexpected end of pattern")),
            Some('(') => {
                let inner = self.parse_alternation()?;
                match self.bump() {
                    Some(')') => Ok(inner),
                    _ => Err(self.error("unterminated group")),
                }
            }
            Some('[') => self.parse_class(),
            Some('.') => Ok(Node::AnyChar),
            Some('\\') => self.parse_escape(),
            // Anchors carry no width; expansion ignores them.
            Some('^' | '$') => Ok(Node::Empty),
            Some(c @ ('*' | '+' | '?' | '{')) => {
                Err(self.error(format!("dangling quantifier `{c}`")))
            }
            Some(c) => Ok(Node::Literal(c)),
        }
    }

    fn parse_escape(&mut self) -> Result<Node> {
        match self.bump() {
            None => Err(self.error("trailing backslash")),
            Some('d') => Ok(class(false, vec![ClassItem::Range('0', '9')])),
            Some('D') => Ok(class(true, vec![ClassItem::Range('0', '9')])),
            Some('w') => Ok(class(false, word_items())),
            Some('W') => Ok(class(true, word_items())),
            Some('s') => Ok(class(false, space_items())),
            Some('S') => Ok(class(true, space_items())),
            Some('n') => Ok(Node::Literal('\n')),
            Some('t') => Ok(Node::Literal('\t')),
            Some('r') => Ok(Node::Literal('\r')),
            // Escaped metacharacter (or any other char, taken literally).
            Some(c) => Ok(Node::Literal(c)),
        }
    }

    fn parse_class(&mut self) -> Result<Node> {
        let negated = if self.peek() == Some('^') {
            self.bump();
            true
        } else {
            false
        };
        let mut items = Vec::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated character class")),
                Some(']') => break,
                Some('\\') => match self.bump() {
                    None => return Err(self.error("trailing backslash in class")),
                    Some('d') => items.push(ClassItem::Range('0', '9')),
                    Some('w') => items.extend(word_items()),
                    Some('s') => items.extend(space_items()),
                    Some('n') => items.push(ClassItem::Single('\n')),
                    Some('t') => items.push(ClassItem::Single('\t')),
                    Some('r') => items.push(ClassItem::Single('\r')),
                    Some(c) => items.push(ClassItem::Single(c)),
                },
                Some(c) => {
                    if self.peek() == Some('-')
                        && self.chars.get(self.pos + 1).is_some_and(|&n| n != ']')
                    {
                        self.bump(); // '-'
                        let hi = match self.bump() {
                            Some('\\') => self
                                .bump()
                                .ok_or_else(|| self.error("trailing backslash in class"))?,
                            Some(hi) => hi,
                            None => return Err(self.error("unterminated character class")),
                        };
                        if hi < c {
                            return Err(
                                self.error(format!("inverted class range `{c}-{hi}`"))
                            );
                        }
                        items.push(ClassItem::Range(c, hi));
                    } else {
                        items.push(ClassItem::Single(c));
                    }
                }
            }
        }
        if items.is_empty() && !negated {
            return Err(self.error("empty character class"));
        }
        Ok(Node::Class { negated, items })
    }
}

fn class(negated: bool, items: Vec<ClassItem>) -> Node {
    Node::Class { negated, items }
}

fn word_items() -> Vec<ClassItem> {
    vec![
        ClassItem::Range('a', 'z'),
        ClassItem::Range('A', 'Z'),
        ClassItem::Range('0', '9'),
        ClassItem::Single('_'),
    ]
}

fn space_items() -> Vec<ClassItem> {
    vec![
        ClassItem::Single(' '),
        ClassItem::Single('\t'),
        ClassItem::Single('\n'),
        ClassItem::Single('\r'),
    ]
}
