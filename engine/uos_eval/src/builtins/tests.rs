use std::time::Duration;

use pretty_assertions::assert_eq;

use crate::{buffer_handler, EvalErrorKind, Interpreter, Value, GLOBAL_NAMESPACE};

fn interpreter(source: &str) -> Interpreter {
    let mut interp = Interpreter::builder()
        .min_loop_iteration(Duration::ZERO)
        .script_name("main.uos")
        .print_handler(buffer_handler())
        .build();
    interp.load_script(source).unwrap();
    interp
}

fn run(interp: &mut Interpreter) -> Vec<String> {
    assert!(interp.start_script());
    let mut ticks = 0;
    while interp.execute_script() {
        ticks += 1;
        assert!(ticks < 1_000, "script did not finish");
    }
    interp.output().take_lines()
}

fn list(interp: &Interpreter, name: &str) -> Option<Vec<Value>> {
    interp
        .context()
        .with_namespace(|ns| ns.list(name).map(<[Value]>::to_vec))
}

fn error_kind(interp: &Interpreter) -> EvalErrorKind {
    interp.last_error().unwrap().kind.clone()
}

#[test]
fn set_find_and_unset_alias() {
    let mut interp = interpreter(
        "setalias bag 0x40001234
setalias spare bag
if findalias bag
  sysmsg found
endif
unsetalias bag
if not findalias bag
  sysmsg gone
endif",
    );
    assert_eq!(run(&mut interp), vec!["found", "gone"]);
    assert_eq!(interp.context().alias("spare"), Some(0x4000_1234));
    assert_eq!(interp.context().alias("bag"), None);
}

#[test]
fn push_and_pop_at_both_ends() {
    let mut interp = interpreter(
        "createlist l
pushlist l 1
pushlist l 2
pushlist l 0 front
pushlist! l 2
poplist l back
sysmsg l[0] l[1]",
    );
    assert_eq!(run(&mut interp), vec!["0 1"]);
    assert_eq!(list(&interp, "l"), Some(vec![Value::Int(0), Value::Int(1)]));
}

#[test]
fn pop_by_value() {
    let mut interp = interpreter(
        "createlist l
pushlist l 1; pushlist l 2; pushlist l 1; pushlist l 3; pushlist l 1
poplist l 1
sysmsg first
poplist! l 1",
    );
    assert!(interp.start_script());
    while interp.output().lines().is_empty() {
        assert!(interp.execute_script());
    }
    assert_eq!(
        list(&interp, "l"),
        Some(vec![Value::Int(2), Value::Int(1), Value::Int(3), Value::Int(1)])
    );
    while interp.execute_script() {}
    assert_eq!(list(&interp, "l"), Some(vec![Value::Int(2), Value::Int(3)]));
}

#[test]
fn forced_pop_of_an_end_empties_the_list() {
    let mut interp = interpreter("createlist l; pushlist l 1; pushlist l 2\npoplist! l front");
    run(&mut interp);
    assert_eq!(list(&interp, "l"), Some(Vec::new()));
}

#[test]
fn list_expressions() {
    let mut interp = interpreter(
        "createlist l
pushlist l 5; pushlist l 6
if list l == 2
  sysmsg two
endif
if inlist l 6 and listexists l
  sysmsg has six
endif
if inlist l 7 or inlist nothere 1
  sysmsg wrong
endif",
    );
    assert_eq!(run(&mut interp), vec!["two", "has six"]);
}

#[test]
fn missing_lists_are_errors() {
    let mut interp = interpreter("if list nope == 0\nendif");
    run(&mut interp);
    assert_eq!(
        error_kind(&interp),
        EvalErrorKind::ListNotFound {
            name: "nope".to_string()
        }
    );

    let mut interp = interpreter("clearlist nope");
    run(&mut interp);
    assert!(matches!(error_kind(&interp), EvalErrorKind::ListNotFound { .. }));

    let mut interp = interpreter("pushlist nope 1");
    run(&mut interp);
    assert!(matches!(error_kind(&interp), EvalErrorKind::ListNotFound { .. }));
}

#[test]
fn pushlist_rejects_bad_end() {
    let mut interp = interpreter("createlist l\npushlist l 1 middle");
    run(&mut interp);
    assert!(interp.last_error().unwrap().is_argument_error());
}

#[test]
fn timers() {
    let mut interp = interpreter(
        "createtimer t
settimer t 5000
if timer t >= 5000
  sysmsg late
endif
if timerexists t
  sysmsg exists
endif
removetimer t
if not timerexists t
  sysmsg removed
endif",
    );
    assert_eq!(run(&mut interp), vec!["late", "exists", "removed"]);
}

#[test]
fn fresh_timer_is_near_zero() {
    let mut interp = interpreter("createtimer t\nif timer t < 1000\n  sysmsg fresh\nendif");
    assert_eq!(run(&mut interp), vec!["fresh"]);
}

#[test]
fn missing_timer_is_an_error() {
    let mut interp = interpreter("if timer nope > 0\nendif");
    run(&mut interp);
    assert_eq!(
        error_kind(&interp),
        EvalErrorKind::TimerNotFound {
            name: "nope".to_string()
        }
    );
}

#[test]
fn sysmsg_joins_arguments() {
    let mut interp = interpreter("sysmsg 'hello world' 42 0x1F");
    assert_eq!(run(&mut interp), vec!["hello world 42 0x1F"]);
}

#[test]
fn wrong_argument_count() {
    let mut interp = interpreter("createlist");
    run(&mut interp);
    assert_eq!(
        error_kind(&interp),
        EvalErrorKind::WrongArgCount {
            command: "createlist".to_string(),
            expected: "1",
            got: 0,
        }
    );
}

#[test]
fn namespace_create_activate_and_copy() {
    let mut interp = interpreter(
        "namespace create bank
namespace activate bank
setalias chest 0x10
@namespace activate global
namespace get bank alias chest
namespace list",
    );
    assert_eq!(
        run(&mut interp),
        vec!["namespace bank active", "bank", "global (active)"]
    );
    assert_eq!(interp.context().active_namespace(), GLOBAL_NAMESPACE);
    assert_eq!(interp.context().alias("chest"), Some(0x10));
}

#[test]
fn namespace_activate_needs_existing() {
    let mut interp = interpreter("namespace activate ghost");
    run(&mut interp);
    assert_eq!(
        error_kind(&interp),
        EvalErrorKind::NamespaceNotFound {
            name: "ghost".to_string()
        }
    );
}

#[test]
fn deleting_active_namespace_falls_back_to_global() {
    let mut interp = interpreter(
        "namespace create temp
@namespace activate temp
@namespace delete temp",
    );
    assert!(run(&mut interp).is_empty());
    assert_eq!(interp.context().active_namespace(), GLOBAL_NAMESPACE);
    assert!(!interp.context().namespaces().read().has("temp"));
}

#[test]
fn namespace_move_renames() {
    let mut interp = interpreter(
        "namespace create old
@namespace activate old
setalias a 1
@namespace move new",
    );
    run(&mut interp);
    let registry = interp.context().namespaces().read();
    assert!(!registry.has("old"));
    assert_eq!(registry.find("new").and_then(|ns| ns.alias("a")), Some(1));
    drop(registry);
    assert_eq!(interp.context().active_namespace(), "new");
}

#[test]
fn namespace_print_describes_contents() {
    let mut interp = interpreter(
        "namespace create bank
@namespace activate bank
setalias chest 0x10
createlist loot; pushlist loot 1; pushlist loot 0x2
namespace print",
    );
    assert_eq!(
        run(&mut interp),
        vec!["namespace bank", "  alias chest = 0x10", "  list loot = [1, 0x2]"]
    );
}

#[test]
fn namespace_isolation_hides_global() {
    let mut interp = interpreter(
        "setalias shared 0x1
@namespace isolation true
if not findalias shared
  sysmsg hidden
endif
setalias mine 0x2
@namespace isolation false",
    );
    assert_eq!(run(&mut interp), vec!["hidden"]);
    let ctx = interp.context();
    assert_eq!(ctx.alias("mine"), None);
    assert_eq!(
        ctx.namespaces()
            .read()
            .find("main")
            .and_then(|ns| ns.alias("mine")),
        Some(2)
    );
}

#[test]
fn unknown_namespace_subcommand() {
    let mut interp = interpreter("namespace shuffle");
    run(&mut interp);
    assert!(interp.last_error().unwrap().is_argument_error());
}

#[test]
fn script_status_of_itself() {
    let mut interp = interpreter("script isrunning main.uos flag\nscript issuspended main.uos other");
    run(&mut interp);
    assert!(interp.last_error().is_none());
    assert_eq!(interp.context().alias("flag"), Some(1));
    assert_eq!(interp.context().alias("other"), Some(0));
}

#[test]
fn script_without_host_cannot_reach_others() {
    let mut interp = interpreter("script run helper");
    run(&mut interp);
    assert_eq!(
        error_kind(&interp),
        EvalErrorKind::ScriptNotFound {
            name: "helper".to_string()
        }
    );
}
