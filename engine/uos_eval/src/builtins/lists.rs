//! List commands. Lists live in the active namespace.

use crate::errors::{invalid_argument, list_not_found, EvalResult};
use crate::value::loosely_equal;
use crate::{EngineContext, Invocation, Value};

/// Which end of a list to work on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum End {
    Front,
    Back,
}

impl End {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "front" => Some(End::Front),
            "back" => Some(End::Back),
            _ => None,
        }
    }
}

fn list_name(ctx: &EngineContext, inv: &Invocation<'_>) -> EvalResult<String> {
    inv.require(0)?.as_string(ctx)
}

/// `createlist name`
pub(super) fn create_list(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<bool> {
    inv.expect_count(1, 1, "1")?;
    let name = list_name(ctx, inv)?;
    ctx.with_namespace_mut(|ns| ns.create_list(name));
    Ok(true)
}

/// `removelist name`
pub(super) fn remove_list(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<bool> {
    inv.expect_count(1, 1, "1")?;
    let name = list_name(ctx, inv)?;
    ctx.with_namespace_mut(|ns| ns.remove_list(&name));
    Ok(true)
}

/// `clearlist name`
pub(super) fn clear_list(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<bool> {
    inv.expect_count(1, 1, "1")?;
    let name = list_name(ctx, inv)?;
    ctx.with_namespace_mut(|ns| match ns.list_mut(&name) {
        Some(list) => {
            list.clear();
            Ok(true)
        }
        None => Err(list_not_found(&name)),
    })
}

/// `pushlist name value [front|back]`
///
/// With `!` a value already in the list is not pushed again.
pub(super) fn push_list(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<bool> {
    inv.expect_count(2, 3, "2 to 3")?;
    let name = list_name(ctx, inv)?;
    let value = inv.require(1)?.resolve_numeric(ctx)?;
    let end = match inv.arg(2) {
        Some(arg) => {
            let word = arg.as_string(ctx)?;
            End::parse(&word).ok_or_else(|| {
                invalid_argument(inv.name(), format!("expected `front` or `back`, got `{word}`"))
            })?
        }
        None => End::Back,
    };
    let unique = inv.force();
    ctx.with_namespace_mut(|ns| {
        let list = ns.list_mut(&name).ok_or_else(|| list_not_found(&name))?;
        if unique && list.iter().any(|item| loosely_equal(item, &value)) {
            return Ok(true);
        }
        match end {
            End::Front => list.insert(0, value),
            End::Back => list.push(value),
        }
        Ok(true)
    })
}

/// `poplist name (value|front|back)`
///
/// Pops one element off an end, or removes the first element equal to
/// `value`. With `!` it pops the whole list, or every equal element.
pub(super) fn pop_list(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<bool> {
    inv.expect_count(2, 2, "2")?;
    let name = list_name(ctx, inv)?;
    let target = inv.require(1)?;
    let end = End::parse(target.lexeme());
    let value = match end {
        Some(_) => None,
        None => Some(target.resolve_numeric(ctx)?),
    };
    let all = inv.force();
    ctx.with_namespace_mut(|ns| {
        let list = ns.list_mut(&name).ok_or_else(|| list_not_found(&name))?;
        match (end, value) {
            (Some(_), _) if all => list.clear(),
            (Some(End::Front), _) => {
                if !list.is_empty() {
                    list.remove(0);
                }
            }
            (Some(End::Back), _) => {
                list.pop();
            }
            (None, Some(value)) => {
                if all {
                    list.retain(|item| !loosely_equal(item, &value));
                } else if let Some(at) = list.iter().position(|item| loosely_equal(item, &value)) {
                    list.remove(at);
                }
            }
            (None, None) => {}
        }
        Ok(true)
    })
}

/// `list name`: number of elements.
pub(super) fn list_length(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<Value> {
    inv.expect_count(1, 1, "1")?;
    let name = list_name(ctx, inv)?;
    let len = ctx
        .with_namespace(|ns| ns.list(&name).map(<[Value]>::len))
        .ok_or_else(|| list_not_found(&name))?;
    Ok(Value::Int(i32::try_from(len).unwrap_or(i32::MAX)))
}

/// `listexists name`
pub(super) fn list_exists(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<Value> {
    inv.expect_count(1, 1, "1")?;
    let name = list_name(ctx, inv)?;
    Ok(Value::Bool(ctx.with_namespace(|ns| ns.has_list(&name))))
}

/// `inlist name value`
pub(super) fn in_list(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<Value> {
    inv.expect_count(2, 2, "2")?;
    let name = list_name(ctx, inv)?;
    let value = inv.require(1)?.resolve_numeric(ctx)?;
    let found = ctx.with_namespace(|ns| {
        ns.list(&name)
            .is_some_and(|items| items.iter().any(|item| loosely_equal(item, &value)))
    });
    Ok(Value::Bool(found))
}
