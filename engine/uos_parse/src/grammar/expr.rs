//! Conditional expressions.
//!
//! ```text
//! logical    := comparison (("and" | "or") comparison)*
//! comparison := ["not"] side [op side]
//! side       := [QUIET] [FORCE] (OPERAND values... | literal)
//! ```
//!
//! Without an operator the comparison is a unary expression, whose single
//! side is parsed like a command: it names a registered expression.

use uos_ir::{NodeId, NodeKind};
use uos_lexer::{Lexeme, LexemeKind};

use super::{classify_value, Parser};
use crate::{ParseError, ParseErrorKind};

impl Parser<'_> {
    /// Push a `LOGICAL_EXPRESSION` under `parent` whose children alternate
    /// comparison, `AND`/`OR`, comparison.
    pub(super) fn logical_expression(
        &mut self,
        parent: NodeId,
        line: u32,
        lexemes: &[Lexeme],
    ) -> Result<NodeId, ParseError> {
        let node = self
            .tree
            .push(parent, NodeKind::LogicalExpression, None, line);
        let mut start = 0;
        for (i, lexeme) in lexemes.iter().enumerate() {
            let op = if lexeme.is_word("and") {
                NodeKind::And
            } else if lexeme.is_word("or") {
                NodeKind::Or
            } else {
                continue;
            };
            self.comparison(node, line, &lexemes[start..i], lexeme)?;
            self.tree.push(node, op, Some(lexeme.text.as_str()), line);
            start = i + 1;
        }
        let last = &lexemes[lexemes.len() - 1];
        self.comparison(node, line, &lexemes[start..], last)?;
        Ok(node)
    }

    fn comparison(
        &mut self,
        parent: NodeId,
        line: u32,
        segment: &[Lexeme],
        near: &Lexeme,
    ) -> Result<NodeId, ParseError> {
        let missing =
            || ParseError::new(ParseErrorKind::MissingOperand, line).with_lexeme(near.text.as_str());

        let negated = segment.first().is_some_and(|l| l.is_word("not"));
        let body = if negated { &segment[1..] } else { segment };
        if body.is_empty() {
            return Err(missing());
        }

        let mut operator: Option<(usize, NodeKind)> = None;
        for (i, lexeme) in body.iter().enumerate() {
            if lexeme.kind != LexemeKind::Word {
                continue;
            }
            if let Some(kind) = NodeKind::from_operator(&lexeme.text) {
                if operator.is_some() {
                    return Err(ParseError::new(ParseErrorKind::MultipleOperators, line)
                        .with_lexeme(lexeme.text.as_str()));
                }
                operator = Some((i, kind));
            } else if is_operator_like(&lexeme.text) {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidOperator {
                        operator: lexeme.text.clone(),
                    },
                    line,
                )
                .with_lexeme(lexeme.text.as_str()));
            }
        }

        let Some((at, op)) = operator else {
            let node = self.tree.push(parent, NodeKind::UnaryExpression, None, line);
            if negated {
                self.tree.push(node, NodeKind::Not, Some("not"), line);
            }
            self.command(node, line, body)?;
            return Ok(node);
        };

        let (lhs, rhs) = (&body[..at], &body[at + 1..]);
        let symbol = body[at].text.as_str();
        if lhs.is_empty() || rhs.is_empty() {
            return Err(ParseError::new(ParseErrorKind::MissingOperand, line).with_lexeme(symbol));
        }
        let node = self
            .tree
            .push(parent, NodeKind::BinaryExpression, None, line);
        if negated {
            self.tree.push(node, NodeKind::Not, Some("not"), line);
        }
        self.operand(node, line, lhs)?;
        self.tree.push(node, op, Some(symbol), line);
        self.operand(node, line, rhs)?;
        Ok(node)
    }

    /// One side of a comparison.
    ///
    /// A lone literal becomes a value node. Anything else is an `OPERAND`
    /// named by its first lexeme, with the rest as its arguments; at run time
    /// it either names an expression or resolves as a variable.
    fn operand(&mut self, parent: NodeId, line: u32, side: &[Lexeme]) -> Result<NodeId, ParseError> {
        let first = &side[0];
        let name = self.modifiers(parent, line, first)?;
        if side.len() == 1 {
            let kind = classify_value(name, first.kind, NodeKind::Operand);
            return Ok(self.tree.push(parent, kind, Some(name), line));
        }
        let operand = self.tree.push(parent, NodeKind::Operand, Some(name), line);
        for lexeme in &side[1..] {
            self.value(operand, line, lexeme, NodeKind::String);
        }
        Ok(operand)
    }
}

/// Whether a bare word is made only of comparison characters.
fn is_operator_like(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| matches!(c, '=' | '<' | '>' | '!'))
}
