use std::time::Duration;

use crate::errors::{timer_not_found, EvalResult};
use crate::{EngineContext, Invocation, Value};

/// `createtimer name`: start at zero, restarting an existing timer.
pub(super) fn create_timer(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<bool> {
    inv.expect_count(1, 1, "1")?;
    let name = inv.require(0)?.as_string(ctx)?;
    ctx.with_namespace_mut(|ns| ns.create_timer(name));
    Ok(true)
}

/// `settimer name ms`
pub(super) fn set_timer(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<bool> {
    inv.expect_count(2, 2, "2")?;
    let name = inv.require(0)?.as_string(ctx)?;
    let ms = inv.require(1)?.as_uint(ctx)?;
    ctx.with_namespace_mut(|ns| ns.set_timer(name, Duration::from_millis(u64::from(ms))));
    Ok(true)
}

/// `removetimer name`
pub(super) fn remove_timer(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<bool> {
    inv.expect_count(1, 1, "1")?;
    let name = inv.require(0)?.as_string(ctx)?;
    ctx.with_namespace_mut(|ns| ns.remove_timer(&name));
    Ok(true)
}

/// `timer name`: elapsed milliseconds.
pub(super) fn timer(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<Value> {
    inv.expect_count(1, 1, "1")?;
    let name = inv.require(0)?.as_string(ctx)?;
    let elapsed = ctx
        .with_namespace(|ns| ns.timer(&name))
        .ok_or_else(|| timer_not_found(&name))?;
    Ok(Value::Int(
        i32::try_from(elapsed.as_millis()).unwrap_or(i32::MAX),
    ))
}

/// `timerexists name`
pub(super) fn timer_exists(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<Value> {
    inv.expect_count(1, 1, "1")?;
    let name = inv.require(0)?.as_string(ctx)?;
    Ok(Value::Bool(ctx.with_namespace(|ns| ns.has_timer(&name))))
}
