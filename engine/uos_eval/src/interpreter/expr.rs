//! Conditions and handler calls.

use tracing::trace;
use uos_ir::{NodeId, NodeKind};

use super::control::Machine;
use super::CompiledScript;
use crate::errors::{unconsumed_arguments, unknown_command, unknown_expression, EvalResult};
use crate::value::relational;
use crate::{Argument, Invocation, Value};

/// A call target with its modifiers, as found among a node's children.
struct Callee {
    node: NodeId,
    quiet: bool,
    force: bool,
}

impl Machine<'_> {
    /// Evaluate the `LOGICAL_EXPRESSION` under an `if`/`elseif`/`while` node.
    ///
    /// `and`/`or` fold left to right and short-circuit.
    pub(super) fn condition(&mut self, keyword: NodeId) -> EvalResult<bool> {
        let Some(logical) = self.script.tree().first_child(keyword) else {
            return Ok(false);
        };
        let parts: Vec<NodeId> = self.script.tree().children(logical).to_vec();
        let Some((&first, rest)) = parts.split_first() else {
            return Ok(false);
        };
        let mut result = self.comparison(first)?;
        for pair in rest.chunks(2) {
            let [op, operand] = pair else {
                break;
            };
            let skip = match self.script.tree().kind(*op) {
                NodeKind::And => !result,
                NodeKind::Or => result,
                _ => false,
            };
            if !skip {
                result = self.comparison(*operand)?;
            }
        }
        Ok(result)
    }

    fn comparison(&mut self, node: NodeId) -> EvalResult<bool> {
        match self.script.tree().kind(node) {
            NodeKind::UnaryExpression => self.unary(node),
            NodeKind::BinaryExpression => self.binary(node),
            _ => Ok(false),
        }
    }

    /// `[not] expression args...`: the expression's result must be truthy.
    fn unary(&mut self, node: NodeId) -> EvalResult<bool> {
        let children = self.script.tree().children(node).to_vec();
        let negated = children
            .first()
            .is_some_and(|&c| self.script.tree().kind(c) == NodeKind::Not);
        let Some(callee) = self.callee(&children) else {
            return Ok(false);
        };
        let Some(value) = self.call_expression(&callee)? else {
            let name = self.script.tree().lexeme(callee.node).unwrap_or_default();
            return Err(unknown_expression(name));
        };
        relational(NodeKind::Equal, &value, &Value::Bool(!negated))
    }

    /// `[not] lhs op rhs`.
    fn binary(&mut self, node: NodeId) -> EvalResult<bool> {
        let children = self.script.tree().children(node).to_vec();
        let tree = self.script.tree();
        let negated = children
            .first()
            .is_some_and(|&c| tree.kind(c) == NodeKind::Not);
        let Some(at) = children.iter().position(|&c| tree.kind(c).is_relational()) else {
            return Ok(false);
        };
        let op = tree.kind(children[at]);
        let (lhs, rhs) = (&children[..at], &children[at + 1..]);
        let (Some(lhs), Some(rhs)) = (self.callee(lhs), self.callee(rhs)) else {
            return Ok(false);
        };

        let mut left = self.side(&lhs)?;
        let mut right = self.side(&rhs)?;
        self.alias_side(&mut left, &right);
        self.alias_side(&mut right, &left);
        trace!(%left, op = %op, %right, "compare");
        let result = relational(op, &left, &right)?;
        Ok(result != negated)
    }

    /// The value of one side of a comparison.
    ///
    /// An operand naming a registered expression is called. Otherwise it is
    /// read like an argument.
    fn side(&mut self, callee: &Callee) -> EvalResult<Value> {
        if self.script.tree().kind(callee.node) == NodeKind::Operand {
            if let Some(value) = self.call_expression(callee)? {
                return Ok(value);
            }
            let tree = self.script.tree();
            if !tree.children(callee.node).is_empty() {
                let name = tree.lexeme(callee.node).unwrap_or_default();
                return Err(unknown_expression(name));
            }
        }
        Argument::new(self.script, callee.node).resolve(self.ctx)
    }

    /// Text that is not a number, compared against a number, may be an
    /// alias name.
    fn alias_side(&self, side: &mut Value, other: &Value) {
        let Value::Str(text) = side else {
            return;
        };
        if matches!(other, Value::Str(_)) || Value::parse_number(text).is_some() {
            return;
        }
        if let Some(serial) = self.ctx.alias(text) {
            *side = Value::Serial(serial);
        }
    }

    /// Pick the call target out of `[NOT] [QUIET] [FORCE] target` siblings.
    fn callee(&self, nodes: &[NodeId]) -> Option<Callee> {
        let tree = self.script.tree();
        let mut quiet = false;
        let mut force = false;
        for &node in nodes {
            match tree.kind(node) {
                NodeKind::Not => {}
                NodeKind::Quiet => quiet = true,
                NodeKind::Force => force = true,
                _ => return Some(Callee { node, quiet, force }),
            }
        }
        None
    }

    /// Call the expression `callee` names. `None` if none is registered.
    fn call_expression(&mut self, callee: &Callee) -> EvalResult<Option<Value>> {
        let name = self.script.tree().lexeme(callee.node).unwrap_or_default();
        let Some(handler) = self.ctx.handlers().expression(name) else {
            return Ok(None);
        };
        let inv = invocation(self.script, callee);
        let value = handler(&mut *self.ctx, &inv)?;
        if inv.unconsumed() > 0 {
            return Err(unconsumed_arguments(inv.name(), inv.unconsumed()));
        }
        trace!(name, %value, "expression");
        Ok(Some(value))
    }

    /// Run a command statement. A handler returning `false` leaves the
    /// cursor where it is.
    pub(super) fn run_command(&mut self, statement: NodeId) -> EvalResult<()> {
        let children = self.script.tree().children(statement).to_vec();
        let Some(callee) = self.callee(&children) else {
            self.advance(statement);
            return Ok(());
        };
        let name = self.script.tree().lexeme(callee.node).unwrap_or_default();
        let handler = self
            .ctx
            .handlers()
            .command(name)
            .ok_or_else(|| unknown_command(name))?;
        let inv = invocation(self.script, &callee);
        if !handler(&mut *self.ctx, &inv)? {
            return Ok(());
        }
        if inv.unconsumed() > 0 {
            return Err(unconsumed_arguments(inv.name(), inv.unconsumed()));
        }
        self.advance(statement);
        Ok(())
    }
}

/// Bind the arguments of `callee` for a handler call.
fn invocation<'s>(script: &'s CompiledScript, callee: &Callee) -> Invocation<'s> {
    let tree = script.tree();
    let args = tree
        .children(callee.node)
        .iter()
        .map(|&arg| Argument::new(script, arg))
        .collect();
    Invocation::new(
        tree.lexeme(callee.node).unwrap_or_default(),
        callee.node,
        tree.line(callee.node),
        args,
        callee.quiet,
        callee.force,
    )
}
