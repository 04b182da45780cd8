//! Built-in commands and expressions.
//!
//! Only what works on engine state lives here: aliases, lists, timers,
//! namespaces, script control, `pause` and `sysmsg`. Everything that acts
//! on the outside world is registered by the host.

mod aliases;
mod lists;
mod misc;
mod namespace_cmd;
mod script_cmd;
mod timers;

use crate::HandlerRegistry;

/// Register every built-in into `registry`.
pub fn register(registry: &mut HandlerRegistry) {
    registry.register_command("setalias", aliases::set_alias);
    registry.register_command("unsetalias", aliases::unset_alias);
    registry.register_expression("findalias", aliases::find_alias);

    registry.register_command("createlist", lists::create_list);
    registry.register_command("removelist", lists::remove_list);
    registry.register_command("clearlist", lists::clear_list);
    registry.register_command("pushlist", lists::push_list);
    registry.register_command("poplist", lists::pop_list);
    registry.register_expression("list", lists::list_length);
    registry.register_expression("listexists", lists::list_exists);
    registry.register_expression("inlist", lists::in_list);

    registry.register_command("createtimer", timers::create_timer);
    registry.register_command("settimer", timers::set_timer);
    registry.register_command("removetimer", timers::remove_timer);
    registry.register_expression("timer", timers::timer);
    registry.register_expression("timerexists", timers::timer_exists);

    registry.register_command("pause", misc::pause);
    registry.register_command("sysmsg", misc::sysmsg);

    registry.register_command("namespace", namespace_cmd::namespace);
    registry.register_command("script", script_cmd::script);
}

#[cfg(test)]
mod tests;
