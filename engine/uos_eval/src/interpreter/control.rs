//! Statement execution and control flow.
//!
//! Blocks are found by scanning sibling statements, counting nesting depth
//! of the same family:
//!
//! | Family | Openers               | Closer     |
//! |--------|-----------------------|------------|
//! | if     | `if`                  | `endif`    |
//! | while  | `while`               | `endwhile` |
//! | for    | `for`, `for ... in`   | `endfor`   |
//!
//! `break` and `continue` count every loop opener and closer instead, so
//! they find the innermost loop whatever its family.

use std::time::Instant;

use tracing::debug;
use uos_ir::{NodeId, NodeKind};

use super::CompiledScript;
use crate::errors::{
    invalid_argument, list_not_found, loop_beyond_list, ControlAction, EvalError, EvalResult,
};
use crate::{Argument, EngineContext};

/// Which block structure a scan follows.
#[derive(Copy, Clone, Debug)]
enum Family {
    If,
    While,
    For,
    AnyLoop,
}

impl Family {
    fn opens(self, kind: NodeKind) -> bool {
        match self {
            Family::If => kind == NodeKind::If,
            Family::While => kind == NodeKind::While,
            Family::For => matches!(kind, NodeKind::For | NodeKind::ForEach),
            Family::AnyLoop => kind.is_loop_opener(),
        }
    }

    fn closes(self, kind: NodeKind) -> bool {
        match self {
            Family::If => kind == NodeKind::EndIf,
            Family::While => kind == NodeKind::EndWhile,
            Family::For => kind == NodeKind::EndFor,
            Family::AnyLoop => kind.is_loop_closer(),
        }
    }

    fn of_closer(kind: NodeKind) -> Family {
        if kind == NodeKind::EndWhile {
            Family::While
        } else {
            Family::For
        }
    }
}

/// Executes one statement of a script against an engine context.
pub(crate) struct Machine<'a> {
    pub(super) ctx: &'a mut EngineContext,
    pub(super) script: &'a mut CompiledScript,
}

impl<'a> Machine<'a> {
    pub(crate) fn new(ctx: &'a mut EngineContext, script: &'a mut CompiledScript) -> Self {
        Machine { ctx, script }
    }

    /// Run `statement`, leaving the cursor wherever execution continues.
    pub(crate) fn execute(&mut self, statement: NodeId) -> Result<(), ControlAction> {
        let Some(payload) = self.script.payload(statement) else {
            self.advance(statement);
            return Ok(());
        };
        let tree = self.script.tree();
        let kind = tree.kind(payload);
        let line = tree.line(statement);
        debug!(line, kind = %kind, "execute statement");

        let result = match kind {
            NodeKind::If => self.enter_if(statement, payload),
            NodeKind::ElseIf | NodeKind::Else => self.skip_to_endif(statement),
            NodeKind::EndIf => {
                self.script.env_mut().pop_scope();
                self.advance(statement);
                Ok(())
            }
            NodeKind::While => self.enter_while(statement, payload),
            NodeKind::For => self.enter_for(statement, payload),
            NodeKind::ForEach => self.enter_foreach(statement, payload),
            NodeKind::EndWhile | NodeKind::EndFor => {
                self.loop_back(statement, Family::of_closer(kind));
                Ok(())
            }
            NodeKind::Break => self.break_loop(statement),
            NodeKind::Continue => self.continue_loop(statement),
            NodeKind::Stop => return Err(ControlAction::Stop),
            NodeKind::Replay => {
                debug!("replay");
                self.script.rewind();
                Ok(())
            }
            _ => self.run_command(statement),
        };

        result.map_err(|err| {
            let lexeme = self.statement_lexeme(statement);
            ControlAction::from(err.at(line, lexeme.as_deref()))
        })
    }

    /// Keyword or command name of a statement, for error locations.
    fn statement_lexeme(&self, statement: NodeId) -> Option<String> {
        let tree = self.script.tree();
        let node = match tree.first_child(statement) {
            Some(first) if matches!(tree.kind(first), NodeKind::Quiet | NodeKind::Force) => {
                tree.last_child(statement)?
            }
            other => other?,
        };
        tree.lexeme(node).map(str::to_string)
    }

    /// Move to the next statement. Any pending timeout is dropped.
    pub(super) fn advance(&mut self, statement: NodeId) {
        self.script.advance_from(statement);
        self.ctx.clear_timeout();
    }

    /// Continue right after `statement`, skipping the rest of its block.
    fn exit_after(&mut self, closer: NodeId) {
        self.script.env_mut().pop_scope();
        self.advance(closer);
    }

    fn kind_of(&self, statement: NodeId) -> Option<NodeKind> {
        let tree = self.script.tree();
        tree.first_child(statement).map(|payload| tree.kind(payload))
    }

    /// The first statement after `from` at nesting depth zero whose kind is
    /// in `targets`.
    fn scan_forward(&self, from: NodeId, family: Family, targets: &[NodeKind]) -> Option<NodeId> {
        let tree = self.script.tree();
        let mut depth = 0usize;
        let mut cursor = tree.next_sibling(from);
        while let Some(statement) = cursor {
            if let Some(kind) = self.kind_of(statement) {
                if depth == 0 && targets.contains(&kind) {
                    return Some(statement);
                }
                if family.opens(kind) {
                    depth += 1;
                } else if family.closes(kind) {
                    depth = depth.saturating_sub(1);
                }
            }
            cursor = tree.next_sibling(statement);
        }
        None
    }

    /// The loop closer ending the block `from` is in.
    fn closer_after(&self, from: NodeId, family: Family) -> Option<NodeId> {
        let tree = self.script.tree();
        let mut depth = 0usize;
        let mut cursor = tree.next_sibling(from);
        while let Some(statement) = cursor {
            if let Some(kind) = self.kind_of(statement) {
                if family.closes(kind) {
                    if depth == 0 {
                        return Some(statement);
                    }
                    depth -= 1;
                } else if family.opens(kind) {
                    depth += 1;
                }
            }
            cursor = tree.next_sibling(statement);
        }
        None
    }

    /// The loop opener starting the block `from` is in.
    fn opener_before(&self, from: NodeId, family: Family) -> Option<NodeId> {
        let tree = self.script.tree();
        let mut depth = 0usize;
        let mut cursor = tree.prev_sibling(from);
        while let Some(statement) = cursor {
            if let Some(kind) = self.kind_of(statement) {
                if family.opens(kind) {
                    if depth == 0 {
                        return Some(statement);
                    }
                    depth -= 1;
                } else if family.closes(kind) {
                    depth += 1;
                }
            }
            cursor = tree.prev_sibling(statement);
        }
        None
    }

    // if / elseif / else / endif

    fn enter_if(&mut self, statement: NodeId, payload: NodeId) -> EvalResult<()> {
        self.script.env_mut().push_scope(statement);
        if self.condition(payload)? {
            self.advance(statement);
            return Ok(());
        }

        let mut from = statement;
        loop {
            let Some(branch) = self.scan_forward(
                from,
                Family::If,
                &[NodeKind::ElseIf, NodeKind::Else, NodeKind::EndIf],
            ) else {
                self.script.env_mut().pop_scope();
                self.script.finish();
                return Ok(());
            };
            match self.kind_of(branch) {
                Some(NodeKind::ElseIf) => {
                    let condition = self.script.payload(branch).unwrap_or(branch);
                    if self.condition(condition)? {
                        self.advance(branch);
                        return Ok(());
                    }
                    from = branch;
                }
                Some(NodeKind::Else) => {
                    self.advance(branch);
                    return Ok(());
                }
                _ => {
                    self.exit_after(branch);
                    return Ok(());
                }
            }
        }
    }

    /// A branch finished: jump to its `endif`, which closes the frame.
    fn skip_to_endif(&mut self, statement: NodeId) -> EvalResult<()> {
        match self.scan_forward(statement, Family::If, &[NodeKind::EndIf]) {
            Some(endif) => self.script.jump(endif),
            None => self.advance(statement),
        }
        Ok(())
    }

    // Loops

    /// Push the loop's frame on first entry; on re-entry bump its cursor.
    /// Returns whether this is the first entry.
    fn enter_loop(&mut self, statement: NodeId) -> bool {
        let env = self.script.env_mut();
        if env.is_current_start(statement) {
            let frame = env.current_mut();
            frame.loop_index += 1;
            frame.iteration_started = Instant::now();
            false
        } else {
            env.push_scope(statement);
            true
        }
    }

    /// Leave the loop opened by `statement`.
    fn exit_loop(&mut self, statement: NodeId, family: Family) {
        match self.closer_after(statement, family) {
            Some(closer) => self.exit_after(closer),
            None => {
                self.script.env_mut().pop_scope();
                self.script.finish();
            }
        }
    }

    fn enter_while(&mut self, statement: NodeId, payload: NodeId) -> EvalResult<()> {
        self.enter_loop(statement);
        if self.condition(payload)? {
            self.advance(statement);
        } else {
            self.exit_loop(statement, Family::While);
        }
        Ok(())
    }

    fn enter_for(&mut self, statement: NodeId, payload: NodeId) -> EvalResult<()> {
        self.enter_loop(statement);
        let Some(count) = self.script.tree().first_child(payload) else {
            self.exit_loop(statement, Family::For);
            return Ok(());
        };
        let trips = Argument::new(self.script, count).as_uint(self.ctx)?;
        let index = self.script.env().current().loop_index;
        if u32::try_from(index).is_ok_and(|index| index < trips) {
            self.advance(statement);
        } else {
            self.exit_loop(statement, Family::For);
        }
        Ok(())
    }

    /// `for start to list` and `for start to end in list`.
    ///
    /// Each iteration binds `list[]` to the current element in the loop's
    /// frame. The list and the explicit bound are checked on first entry.
    fn enter_foreach(&mut self, statement: NodeId, payload: NodeId) -> EvalResult<()> {
        let first = self.enter_loop(statement);
        let tree = self.script.tree();
        let parts = tree.children(payload);
        let (Some(&start), Some(&list)) = (parts.first(), parts.last()) else {
            self.exit_loop(statement, Family::For);
            return Ok(());
        };
        let bound_node = (parts.len() == 3).then(|| parts[1]);
        let name = tree.lexeme(list).unwrap_or_default().to_string();

        let len = self
            .ctx
            .with_namespace(|ns| ns.list(&name).map(<[_]>::len))
            .ok_or_else(|| list_not_found(&name))?;
        let bound = match bound_node {
            Some(node) => {
                let bound = Argument::new(self.script, node).as_int(self.ctx)?;
                usize::try_from(bound).unwrap_or(0)
            }
            None => len,
        };

        if first {
            let start = Argument::new(self.script, start).as_int(self.ctx)?;
            let start = usize::try_from(start)
                .map_err(|_| invalid_argument("for", format!("negative start index {start}")))?;
            if bound_node.is_some() && bound > len {
                return Err(loop_beyond_list(&name, bound, len));
            }
            self.script.env_mut().current_mut().loop_index = start;
        }

        let index = self.script.env().current().loop_index;
        let element = if index < bound {
            self.ctx
                .with_namespace(|ns| ns.list(&name).and_then(|items| items.get(index).cloned()))
        } else {
            None
        };
        match element {
            Some(value) => {
                debug!(list = %name, index, %value, "foreach element");
                self.script.env_mut().define(format!("{name}[]"), value);
                self.advance(statement);
            }
            None => self.exit_loop(statement, Family::For),
        }
        Ok(())
    }

    /// A loop body finished: go back to the opener.
    fn loop_back(&mut self, from: NodeId, family: Family) {
        match self.opener_before(from, family) {
            Some(opener) => self.repeat(opener),
            None => self.advance(from),
        }
    }

    /// Jump to `opener` for another iteration, first pausing for whatever
    /// is left of the minimum iteration time.
    fn repeat(&mut self, opener: NodeId) {
        let floor = self.ctx.min_loop_iteration();
        let elapsed = self.script.env().current().iteration_started.elapsed();
        if elapsed < floor {
            self.ctx.pause(floor - elapsed);
        }
        self.script.jump(opener);
    }

    /// Pop frames above the loop opened by `opener`, leaving its own frame
    /// on top.
    fn unwind_to(&mut self, opener: NodeId) {
        let env = self.script.env_mut();
        while env.depth() > 1 && !env.is_current_start(opener) {
            env.pop_scope();
        }
    }

    fn break_loop(&mut self, statement: NodeId) -> EvalResult<()> {
        let Some(closer) = self.closer_after(statement, Family::AnyLoop) else {
            return Err(EvalError::new("break outside of a loop"));
        };
        if let Some(opener) = self.opener_before(statement, Family::AnyLoop) {
            self.unwind_to(opener);
        }
        debug!("break");
        self.exit_after(closer);
        Ok(())
    }

    fn continue_loop(&mut self, statement: NodeId) -> EvalResult<()> {
        let Some(opener) = self.opener_before(statement, Family::AnyLoop) else {
            return Err(EvalError::new("continue outside of a loop"));
        };
        self.unwind_to(opener);
        debug!("continue");
        self.repeat(opener);
        Ok(())
    }
}
