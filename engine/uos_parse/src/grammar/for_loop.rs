//! The four `for` forms.
//!
//! | Source                   | Node                                 |
//! |--------------------------|--------------------------------------|
//! | `for n`                  | `FOR [n]`                            |
//! | `for a to b` (integers)  | `FOR [b - a]`                        |
//! | `for a to list`          | `FOREACH [a, LIST]`                  |
//! | `for a to b in list`     | `FOREACH [a, INTEGER(b + 1), LIST]`  |
//!
//! Parentheses and quotes around each part are ignored, so `for (0) to ('l')`
//! is the same loop as `for 0 to l`.

use uos_ir::{NodeId, NodeKind};
use uos_lexer::{Lexeme, LexemeKind};

use super::{classify_value, Parser};
use crate::{ParseError, ParseErrorKind};

/// A `for` lexeme after stripping its wrapping.
struct Part<'l> {
    text: &'l str,
    kind: LexemeKind,
}

impl Part<'_> {
    fn is_word(&self, word: &str) -> bool {
        self.kind == LexemeKind::Word && self.text == word
    }

    fn as_int(&self) -> Option<i64> {
        self.text.parse::<i32>().ok().map(i64::from)
    }
}

impl Parser<'_> {
    pub(super) fn for_loop(
        &mut self,
        statement: NodeId,
        line: u32,
        lexemes: &[Lexeme],
    ) -> Result<NodeKind, ParseError> {
        let parts: Vec<Part<'_>> = lexemes
            .iter()
            .filter_map(|lexeme| self.strip(lexeme))
            .collect();
        let invalid = || {
            let near = lexemes.first().map_or("for", |l| l.text.as_str());
            ParseError::new(ParseErrorKind::InvalidForLoop, line).with_lexeme(near)
        };

        match parts.as_slice() {
            [count] => {
                let node = self.tree.push(statement, NodeKind::For, Some("for"), line);
                self.push_part(node, line, count);
                Ok(NodeKind::For)
            }
            [start, to, end] if to.is_word("to") => match (start.as_int(), end.as_int()) {
                (Some(a), Some(b)) => {
                    if b < a {
                        return Err(ParseError::new(
                            ParseErrorKind::NegativeTripCount { start: a, end: b },
                            line,
                        )
                        .with_lexeme(end.text));
                    }
                    let node = self.tree.push(statement, NodeKind::For, Some("for"), line);
                    let trips = (b - a).to_string();
                    self.tree
                        .push(node, NodeKind::Integer, Some(trips.as_str()), line);
                    Ok(NodeKind::For)
                }
                _ => {
                    let node = self
                        .tree
                        .push(statement, NodeKind::ForEach, Some("for"), line);
                    self.push_part(node, line, start);
                    self.tree.push(node, NodeKind::List, Some(end.text), line);
                    Ok(NodeKind::ForEach)
                }
            },
            [start, to, end, in_, list] if to.is_word("to") && in_.is_word("in") => {
                let Some(b) = end.as_int() else {
                    return Err(ParseError::new(ParseErrorKind::RangeEndNotInteger, line)
                        .with_lexeme(end.text));
                };
                let bound = b + 1;
                if let Some(a) = start.as_int() {
                    if a > bound {
                        return Err(ParseError::new(
                            ParseErrorKind::InvertedRange { start: a, end: b },
                            line,
                        )
                        .with_lexeme(start.text));
                    }
                }
                let node = self
                    .tree
                    .push(statement, NodeKind::ForEach, Some("for"), line);
                self.push_part(node, line, start);
                let bound = bound.to_string();
                self.tree
                    .push(node, NodeKind::Integer, Some(bound.as_str()), line);
                self.tree.push(node, NodeKind::List, Some(list.text), line);
                Ok(NodeKind::ForEach)
            }
            _ => Err(invalid()),
        }
    }

    /// Drop surrounding parentheses and quote characters from a bare word.
    /// Words that were nothing but wrapping disappear.
    fn strip<'l>(&self, lexeme: &'l Lexeme) -> Option<Part<'l>> {
        if lexeme.kind == LexemeKind::Quoted {
            return Some(Part {
                text: &lexeme.text,
                kind: LexemeKind::Quoted,
            });
        }
        let quotes = &self.config.quotes;
        let text = lexeme.text.trim_matches(|c: char| {
            c == '(' || c == ')' || quotes.iter().any(|&(open, close)| c == open || c == close)
        });
        let wrapped = text.len() != lexeme.text.len();
        if text.is_empty() {
            return None;
        }
        // A word that had quotes around it names something, it is not `to`/`in`.
        let had_quotes = wrapped
            && lexeme
                .text
                .chars()
                .any(|c| quotes.iter().any(|&(open, close)| c == open || c == close));
        let kind = if had_quotes {
            LexemeKind::Quoted
        } else {
            LexemeKind::Word
        };
        Some(Part { text, kind })
    }

    fn push_part(&mut self, parent: NodeId, line: u32, part: &Part<'_>) -> NodeId {
        let kind = classify_value(part.text, LexemeKind::Word, NodeKind::Operand);
        self.tree.push(parent, kind, Some(part.text), line)
    }
}
