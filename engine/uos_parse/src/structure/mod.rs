//! Block structure checks.
//!
//! The tree stays flat: statements of a block are siblings of the opener.
//! This tracker mirrors the nesting the interpreter will later discover by
//! scanning, so that mismatched openers and closers fail the load instead of
//! surfacing halfway through a run.

use uos_ir::NodeKind;

use crate::ParseErrorKind;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Block {
    If { seen_else: bool },
    While,
    For,
}

impl Block {
    fn keyword(self) -> &'static str {
        match self {
            Block::If { .. } => "if",
            Block::While => "while",
            Block::For => "for",
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct OpenBlock {
    block: Block,
    line: u32,
}

/// Tracks open blocks while statements are parsed in order.
#[derive(Debug, Default)]
pub struct BlockStack {
    open: Vec<OpenBlock>,
}

impl BlockStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open blocks.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Record a statement whose payload has kind `kind`.
    ///
    /// Non-control kinds are ignored. A rejected statement leaves the stack
    /// unchanged.
    pub fn observe(&mut self, kind: NodeKind, line: u32) -> Result<(), ParseErrorKind> {
        match kind {
            NodeKind::If => self.open(Block::If { seen_else: false }, line),
            NodeKind::While => self.open(Block::While, line),
            NodeKind::For | NodeKind::ForEach => self.open(Block::For, line),
            NodeKind::ElseIf => match self.open.last() {
                Some(OpenBlock {
                    block: Block::If { seen_else: true },
                    ..
                }) => return Err(ParseErrorKind::ElseIfAfterElse),
                Some(OpenBlock {
                    block: Block::If { .. },
                    ..
                }) => {}
                _ => return Err(unmatched("elseif", "if")),
            },
            NodeKind::Else => match self.open.last_mut() {
                Some(OpenBlock {
                    block: Block::If { seen_else },
                    ..
                }) => {
                    if *seen_else {
                        return Err(ParseErrorKind::DuplicateElse);
                    }
                    *seen_else = true;
                }
                _ => return Err(unmatched("else", "if")),
            },
            NodeKind::EndIf => self.close(|b| matches!(b, Block::If { .. }), "endif", "if")?,
            NodeKind::EndWhile => self.close(|b| b == Block::While, "endwhile", "while")?,
            NodeKind::EndFor => self.close(|b| b == Block::For, "endfor", "for")?,
            NodeKind::Break | NodeKind::Continue => {
                let in_loop = self
                    .open
                    .iter()
                    .any(|o| matches!(o.block, Block::While | Block::For));
                if !in_loop {
                    let keyword = kind.keyword().unwrap_or("break");
                    return Err(ParseErrorKind::OutsideLoop { keyword });
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Blocks never closed, innermost last, as `(keyword, line)`.
    pub fn finish(self) -> Vec<(&'static str, u32)> {
        self.open
            .into_iter()
            .map(|o| (o.block.keyword(), o.line))
            .collect()
    }

    fn open(&mut self, block: Block, line: u32) {
        self.open.push(OpenBlock { block, line });
    }

    fn close(
        &mut self,
        matches: impl Fn(Block) -> bool,
        keyword: &'static str,
        expected: &'static str,
    ) -> Result<(), ParseErrorKind> {
        match self.open.last() {
            Some(top) if matches(top.block) => {
                self.open.pop();
                Ok(())
            }
            _ => Err(unmatched(keyword, expected)),
        }
    }
}

fn unmatched(keyword: &'static str, expected: &'static str) -> ParseErrorKind {
    ParseErrorKind::UnmatchedKeyword { keyword, expected }
}
