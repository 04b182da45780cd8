use crate::errors::{invalid_argument, script_not_found, EvalResult};
use crate::host::{ScriptRequest, ScriptStatus};
use crate::{EngineContext, Invocation, Value};

/// `script (run|stop|suspend|resume|isrunning|issuspended) [name] [output_alias]`
///
/// Without a name, or with its own name, the command targets the running
/// script itself. Anything aimed at another script goes through the
/// script table and takes effect after the current tick.
pub(super) fn script(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<bool> {
    inv.expect_count(1, 3, "1 to 3")?;
    let action = inv.require(0)?.as_string(ctx)?;
    let target = inv.arg(1).map(|arg| arg.as_string(ctx)).transpose()?;
    let output = inv.arg(2).map(|arg| arg.as_string(ctx)).transpose()?;
    let own = target.is_none() || target.as_deref() == ctx.script_name();
    let name = target
        .or_else(|| ctx.script_name().map(str::to_string))
        .unwrap_or_default();

    if let Some(request) = ScriptRequest::parse(&action) {
        if own {
            match request {
                ScriptRequest::Stop => ctx.request_stop(),
                ScriptRequest::Suspend => ctx.request_suspend(),
                ScriptRequest::Run | ScriptRequest::Resume => {}
            }
            return Ok(true);
        }
        let table = ctx.scripts().ok_or_else(|| script_not_found(&name))?;
        table.with_write(|table| {
            if !table.contains(&name) {
                return Err(script_not_found(&name));
            }
            table.request(name.as_str(), request);
            Ok(())
        })?;
        return Ok(true);
    }

    let wanted = match action.as_str() {
        "isrunning" => ScriptStatus::Running,
        "issuspended" => ScriptStatus::Suspended,
        other => {
            return Err(invalid_argument(
                inv.name(),
                format!("unknown subcommand `{other}`"),
            ))
        }
    };
    let status = if own {
        if ctx.state().is_suspended() {
            ScriptStatus::Suspended
        } else {
            ScriptStatus::Running
        }
    } else {
        ctx.scripts()
            .and_then(|table| table.read().status(&name))
            .ok_or_else(|| script_not_found(&name))?
    };
    let answer = status == wanted;
    match output {
        Some(alias) => ctx.set_alias(&alias, u32::from(answer)),
        None => {
            if !inv.quiet() {
                ctx.println(&format!("{name}: {}", Value::Bool(answer)));
            }
        }
    }
    Ok(true)
}
