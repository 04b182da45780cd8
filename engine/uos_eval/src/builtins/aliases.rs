use tracing::debug;

use crate::errors::EvalResult;
use crate::{EngineContext, Invocation, Value};

/// `setalias name value`
pub(super) fn set_alias(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<bool> {
    inv.expect_count(2, 2, "2")?;
    let name = inv.require(0)?.as_string(ctx)?;
    let serial = inv.require(1)?.as_serial(ctx)?;
    debug!(name, serial, namespace = ctx.active_namespace(), "set alias");
    ctx.set_alias(&name, serial);
    Ok(true)
}

/// `unsetalias name`
pub(super) fn unset_alias(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<bool> {
    inv.expect_count(1, 1, "1")?;
    let name = inv.require(0)?.as_string(ctx)?;
    ctx.remove_alias(&name);
    Ok(true)
}

/// `findalias name`
pub(super) fn find_alias(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<Value> {
    inv.expect_count(1, 1, "1")?;
    let name = inv.require(0)?.as_string(ctx)?;
    Ok(Value::Bool(ctx.alias(&name).is_some()))
}
