use std::time::Duration;

use crate::errors::EvalResult;
use crate::{EngineContext, Invocation};

/// `pause ms`
pub(super) fn pause(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<bool> {
    inv.expect_count(1, 1, "1")?;
    let ms = inv.require(0)?.as_uint(ctx)?;
    ctx.pause(Duration::from_millis(u64::from(ms)));
    Ok(true)
}

/// `sysmsg text...`: the arguments joined by spaces, as one output line.
pub(super) fn sysmsg(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<bool> {
    let words = inv
        .rest(0)
        .iter()
        .map(|arg| arg.as_string(ctx))
        .collect::<EvalResult<Vec<_>>>()?;
    ctx.println(&words.join(" "));
    Ok(true)
}
