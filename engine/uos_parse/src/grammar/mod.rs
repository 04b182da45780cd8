//! Statement grammar.
//!
//! One logical line becomes one `Statement` node under the script root. The
//! statement's first child is its payload:
//!
//! ```text
//! STATEMENT
//!   IF | ELSEIF | WHILE ── LOGICAL_EXPRESSION
//!   FOR ── count
//!   FOREACH ── start [end] LIST
//!   ELSE | ENDIF | ENDWHILE | ENDFOR | BREAK | CONTINUE | STOP | REPLAY
//!   [QUIET] [FORCE] COMMAND ── values...
//! ```

mod expr;
mod for_loop;

use tracing::debug;
use uos_ir::{NodeId, NodeKind, SyntaxTree};
use uos_lexer::{Lexeme, LexemeKind, Lexer, LexerConfig, LogicalLine};

use crate::structure::BlockStack;
use crate::{ParseError, ParseErrorKind, ParseErrors};

/// Marker prefix that silences a command's informational output.
pub const QUIET_MARKER: char = '@';
/// Marker suffix that forces a command's alternate behavior.
pub const FORCE_MARKER: char = '!';

/// Script parser.
///
/// Parses line by line. A statement that fails is detached from the tree and
/// its error recorded, and parsing moves on to the next statement, so one
/// load reports every syntax error at once.
pub struct Parser<'c> {
    config: &'c LexerConfig,
    lexer: Lexer<'c>,
    tree: SyntaxTree,
    blocks: BlockStack,
    errors: Vec<ParseError>,
    last_statement: Option<String>,
}

impl<'c> Parser<'c> {
    pub fn new(config: &'c LexerConfig) -> Self {
        Parser {
            config,
            lexer: Lexer::new(config),
            tree: SyntaxTree::new(),
            blocks: BlockStack::new(),
            errors: Vec::new(),
            last_statement: None,
        }
    }

    /// Parse a whole script.
    pub fn parse(mut self, source: &str) -> Result<SyntaxTree, ParseErrors> {
        for (index, physical) in source.lines().enumerate() {
            let line = u32::try_from(index + 1).unwrap_or(u32::MAX);
            match self.lexer.lex_line(line, physical) {
                Ok(statements) => {
                    for statement in &statements {
                        self.statement(statement);
                    }
                }
                Err(err) => {
                    let err = ParseError::from(err).with_context(self.last_statement.as_deref());
                    self.errors.push(err);
                }
            }
        }

        let blocks = std::mem::take(&mut self.blocks);
        for (keyword, line) in blocks.finish() {
            self.errors.push(
                ParseError::new(ParseErrorKind::UnclosedBlock { keyword }, line)
                    .with_lexeme(keyword)
                    .with_context(self.last_statement.as_deref()),
            );
        }

        if self.errors.is_empty() {
            debug!(
                statements = self.tree.statements().len(),
                nodes = self.tree.len(),
                "parsed script"
            );
            Ok(self.tree)
        } else {
            self.errors.sort_by_key(|e| e.line);
            debug!(errors = self.errors.len(), "script failed to parse");
            Err(ParseErrors::new(self.errors))
        }
    }

    /// Parse one logical line into a statement under the root.
    pub fn statement(&mut self, logical: &LogicalLine) {
        let Some(first) = logical.lexemes.first() else {
            return;
        };
        let root = self.tree.root();
        let line = logical.line;
        let statement = self.tree.push(root, NodeKind::Statement, None, line);

        let result = self
            .statement_payload(statement, line, &logical.lexemes)
            .and_then(|kind| {
                self.blocks
                    .observe(kind, line)
                    .map_err(|kind| ParseError::new(kind, line).with_lexeme(first.text.as_str()))
            });

        match result {
            Ok(()) => self.last_statement = Some(render(&logical.lexemes)),
            Err(err) => {
                self.tree.detach_last_child(root);
                // Keep a broken opener on the block stack so its closer
                // does not report a second, unrelated error.
                if first.kind == LexemeKind::Word {
                    if let Some(kind) = NodeKind::from_keyword(&first.text) {
                        if matches!(kind, NodeKind::If | NodeKind::While | NodeKind::For) {
                            let _ = self.blocks.observe(kind, line);
                        }
                    }
                }
                self.errors
                    .push(err.with_context(self.last_statement.as_deref()));
            }
        }
    }

    fn statement_payload(
        &mut self,
        statement: NodeId,
        line: u32,
        lexemes: &[Lexeme],
    ) -> Result<NodeKind, ParseError> {
        let first = &lexemes[0];
        let rest = &lexemes[1..];
        let keyword = match first.kind {
            LexemeKind::Word => NodeKind::from_keyword(&first.text),
            LexemeKind::Quoted => None,
        };
        let Some(kind) = keyword else {
            self.command(statement, line, lexemes)?;
            return Ok(NodeKind::Command);
        };
        let word = kind.keyword().unwrap_or_default();

        match kind {
            NodeKind::If | NodeKind::ElseIf | NodeKind::While => {
                if rest.is_empty() {
                    return Err(ParseError::new(
                        ParseErrorKind::EmptyExpression { keyword: word },
                        line,
                    )
                    .with_lexeme(word));
                }
                let node = self.tree.push(statement, kind, Some(word), line);
                self.logical_expression(node, line, rest)?;
                Ok(kind)
            }
            NodeKind::For => self.for_loop(statement, line, rest),
            _ => {
                if let Some(extra) = rest.first() {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedArguments { keyword: word },
                        line,
                    )
                    .with_lexeme(extra.text.as_str()));
                }
                self.tree.push(statement, kind, Some(word), line);
                Ok(kind)
            }
        }
    }

    /// Push `[QUIET] [FORCE] COMMAND` under `parent`, with the remaining
    /// lexemes as value children of the command.
    fn command(
        &mut self,
        parent: NodeId,
        line: u32,
        lexemes: &[Lexeme],
    ) -> Result<NodeId, ParseError> {
        let name = self.modifiers(parent, line, &lexemes[0])?;
        let command = self.tree.push(parent, NodeKind::Command, Some(name), line);
        for lexeme in &lexemes[1..] {
            self.value(command, line, lexeme, NodeKind::String);
        }
        Ok(command)
    }

    /// Strip quiet/force markers off `lexeme`, pushing a modifier node for
    /// each one found. Returns the bare name.
    fn modifiers<'l>(
        &mut self,
        parent: NodeId,
        line: u32,
        lexeme: &'l Lexeme,
    ) -> Result<&'l str, ParseError> {
        let (name, quiet, force) = split_modifiers(lexeme);
        if name.is_empty() {
            return Err(
                ParseError::new(ParseErrorKind::MissingCommand, line).with_lexeme(lexeme.text.as_str())
            );
        }
        if quiet {
            self.tree.push(parent, NodeKind::Quiet, Some("@"), line);
        }
        if force {
            self.tree.push(parent, NodeKind::Force, Some("!"), line);
        }
        Ok(name)
    }

    fn value(&mut self, parent: NodeId, line: u32, lexeme: &Lexeme, default: NodeKind) -> NodeId {
        let kind = classify_value(&lexeme.text, lexeme.kind, default);
        self.tree.push(parent, kind, Some(lexeme.text.as_str()), line)
    }
}

/// Split the quiet prefix and force suffix off a command or operand lexeme.
///
/// Only bare words carry modifiers. Returns `(name, quiet, force)`.
pub fn split_modifiers(lexeme: &Lexeme) -> (&str, bool, bool) {
    let mut name = lexeme.text.as_str();
    if lexeme.kind == LexemeKind::Quoted {
        return (name, false, false);
    }
    let quiet = name.starts_with(QUIET_MARKER);
    if quiet {
        name = &name[QUIET_MARKER.len_utf8()..];
    }
    let force = name.ends_with(FORCE_MARKER);
    if force {
        name = &name[..name.len() - FORCE_MARKER.len_utf8()];
    }
    (name, quiet, force)
}

/// Pick the node kind of a value lexeme.
///
/// Quoted text is always a string. Bare words are tried as a `0x` serial,
/// then a 32-bit integer, then a float, and fall back to `default`.
pub fn classify_value(text: &str, kind: LexemeKind, default: NodeKind) -> NodeKind {
    if kind == LexemeKind::Quoted {
        return NodeKind::String;
    }
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        if u32::from_str_radix(hex, 16).is_ok() {
            return NodeKind::Serial;
        }
    }
    if text.parse::<i32>().is_ok() {
        return NodeKind::Integer;
    }
    if looks_numeric(text) && text.parse::<f64>().is_ok() {
        return NodeKind::Double;
    }
    default
}

fn looks_numeric(text: &str) -> bool {
    let starts_like_number = text
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'));
    starts_like_number && text.bytes().any(|b| b.is_ascii_digit())
}

/// Reassemble a statement for error context.
fn render(lexemes: &[Lexeme]) -> String {
    let mut out = String::new();
    for (i, lexeme) in lexemes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        match lexeme.kind {
            LexemeKind::Word => out.push_str(&lexeme.text),
            LexemeKind::Quoted => {
                out.push('"');
                out.push_str(&lexeme.text);
                out.push('"');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests;
