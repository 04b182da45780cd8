//! `namespace` subcommands.
//!
//! ```text
//! namespace isolation (true|false)
//! namespace list
//! namespace (create|activate|delete) name
//! namespace move new [old] [merge|replace]
//! namespace (get|set) name [all|alias|lists|timers] [src] [dst]
//! namespace print [name] [all|alias|lists|timers] [item]
//! ```
//!
//! `get` copies from the named namespace into the active one, `set` the
//! other way around.

use tracing::debug;

use crate::errors::{invalid_argument, namespace_not_found, EvalResult};
use crate::namespace::{Category, MoveMode, Namespace, GLOBAL_NAMESPACE};
use crate::{Argument, EngineContext, Invocation};

pub(super) fn namespace(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<bool> {
    let sub = inv.require(0)?.as_string(ctx)?;
    match sub.as_str() {
        "isolation" => {
            inv.expect_count(2, 2, "2")?;
            let on = inv.require(1)?.as_bool(ctx)?;
            ctx.set_isolation(on);
            inform(ctx, inv, &format!("namespace {} active", ctx.active_namespace()));
        }
        "list" => {
            inv.expect_count(1, 1, "1")?;
            let names = ctx.namespaces().read().names();
            for name in names {
                if name == ctx.active_namespace() {
                    ctx.println(&format!("{name} (active)"));
                } else {
                    ctx.println(&name);
                }
            }
        }
        "create" => {
            inv.expect_count(2, 2, "2")?;
            let name = inv.require(1)?.as_string(ctx)?;
            ctx.namespaces().with_write(|registry| {
                registry.get(&name);
            });
        }
        "activate" => {
            inv.expect_count(2, 2, "2")?;
            let name = inv.require(1)?.as_string(ctx)?;
            if !ctx.namespaces().read().has(&name) {
                return Err(namespace_not_found(&name));
            }
            ctx.activate_namespace(&name);
            inform(ctx, inv, &format!("namespace {name} active"));
        }
        "delete" => {
            inv.expect_count(2, 2, "2")?;
            let name = inv.require(1)?.as_string(ctx)?;
            if !ctx.namespaces().with_write(|registry| registry.delete(&name)) {
                return Err(namespace_not_found(&name));
            }
            if name == ctx.active_namespace() && name != GLOBAL_NAMESPACE {
                reset_active(ctx);
            }
            inform(ctx, inv, &format!("namespace {name} deleted"));
        }
        "move" => move_namespace(ctx, inv)?,
        "get" | "set" => copy(ctx, inv, sub == "get")?,
        "print" => print(ctx, inv)?,
        other => {
            return Err(invalid_argument(
                inv.name(),
                format!("unknown subcommand `{other}`"),
            ))
        }
    }
    Ok(true)
}

/// Confirmation output, silenced by `@`.
fn inform(ctx: &EngineContext, inv: &Invocation<'_>, msg: &str) {
    if !inv.quiet() {
        ctx.println(msg);
    }
}

/// Back to the namespace the script would start in.
fn reset_active(ctx: &mut EngineContext) {
    ctx.activate_namespace(GLOBAL_NAMESPACE);
    let isolation = ctx.isolation();
    ctx.set_isolation(isolation);
    debug!(namespace = ctx.active_namespace(), "active namespace was deleted");
}

fn category(ctx: &EngineContext, inv: &Invocation<'_>, arg: Option<Argument<'_>>) -> EvalResult<Category> {
    let Some(arg) = arg else {
        return Ok(Category::All);
    };
    let word = arg.as_string(ctx)?;
    Category::parse(&word).ok_or_else(|| {
        invalid_argument(
            inv.name(),
            format!("expected all, alias, lists or timers, got `{word}`"),
        )
    })
}

fn optional_string(ctx: &EngineContext, arg: Option<Argument<'_>>) -> EvalResult<Option<String>> {
    arg.map(|arg| arg.as_string(ctx)).transpose()
}

/// `namespace move new [old] [merge|replace]`
fn move_namespace(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<()> {
    inv.expect_count(2, 4, "2 to 4")?;
    let new = inv.require(1)?.as_string(ctx)?;
    let old = optional_string(ctx, inv.arg(2))?.unwrap_or_else(|| ctx.active_namespace().to_string());
    let mode = match optional_string(ctx, inv.arg(3))? {
        Some(word) => MoveMode::parse(&word).ok_or_else(|| {
            invalid_argument(inv.name(), format!("expected merge or replace, got `{word}`"))
        })?,
        None => MoveMode::ErrorIfExists,
    };
    ctx.namespaces()
        .with_write(|registry| registry.move_namespace(&old, &new, mode))?;
    if old == ctx.active_namespace() && old != GLOBAL_NAMESPACE {
        ctx.activate_namespace(&new);
    }
    inform(ctx, inv, &format!("namespace {old} moved to {new}"));
    Ok(())
}

/// `namespace (get|set) name [category] [src] [dst]`
fn copy(ctx: &mut EngineContext, inv: &Invocation<'_>, into_active: bool) -> EvalResult<()> {
    inv.expect_count(2, 5, "2 to 5")?;
    let other = inv.require(1)?.as_string(ctx)?;
    let category = category(ctx, inv, inv.arg(2))?;
    let item = optional_string(ctx, inv.arg(3))?;
    let dst_item = optional_string(ctx, inv.arg(4))?;
    let active = ctx.active_namespace().to_string();
    let (src, dst) = if into_active {
        (other.as_str(), active.as_str())
    } else {
        (active.as_str(), other.as_str())
    };
    ctx.namespaces().with_write(|registry| {
        registry.copy(src, dst, category, item.as_deref(), dst_item.as_deref())
    })
}

/// `namespace print [name] [category] [item]`
fn print(ctx: &mut EngineContext, inv: &Invocation<'_>) -> EvalResult<()> {
    inv.expect_count(1, 4, "1 to 4")?;
    let name = optional_string(ctx, inv.arg(1))?.unwrap_or_else(|| ctx.active_namespace().to_string());
    let category = category(ctx, inv, inv.arg(2))?;
    let item = optional_string(ctx, inv.arg(3))?;
    let lines = ctx.namespaces().with_read(|registry| {
        registry
            .find(&name)
            .map(|ns| describe(&name, ns, category, item.as_deref()))
            .ok_or_else(|| namespace_not_found(&name))
    })?;
    for line in lines {
        ctx.println(&line);
    }
    Ok(())
}

fn describe(name: &str, ns: &Namespace, category: Category, item: Option<&str>) -> Vec<String> {
    let wanted = |candidate: &str| item.is_none_or(|item| item == candidate);
    let mut lines = vec![format!("namespace {name}")];
    if matches!(category, Category::All | Category::Alias) {
        for alias in ns.alias_names().into_iter().filter(|a| wanted(a)) {
            if let Some(serial) = ns.alias(alias) {
                lines.push(format!("  alias {alias} = 0x{serial:X}"));
            }
        }
    }
    if matches!(category, Category::All | Category::Lists) {
        for list in ns.list_names().into_iter().filter(|l| wanted(l)) {
            let items = ns
                .list(list)
                .unwrap_or_default()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("  list {list} = [{items}]"));
        }
    }
    if matches!(category, Category::All | Category::Timers) {
        for timer in ns.timer_names().into_iter().filter(|t| wanted(t)) {
            if let Some(elapsed) = ns.timer(timer) {
                lines.push(format!("  timer {timer} = {} ms", elapsed.as_millis()));
            }
        }
    }
    lines
}
