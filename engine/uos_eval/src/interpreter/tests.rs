use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use pretty_assertions::assert_eq;

use super::*;
use crate::{buffer_handler, EvalErrorKind};

const MAX_TICKS: usize = 1_000;

fn interpreter(source: &str) -> Interpreter {
    let mut interp = Interpreter::builder()
        .min_loop_iteration(Duration::ZERO)
        .print_handler(buffer_handler())
        .build();
    interp.load_script(source).unwrap();
    interp
}

/// Tick until the script ends; returns the output lines.
fn run(interp: &mut Interpreter) -> Vec<String> {
    assert!(interp.start_script());
    let mut ticks = 0;
    while interp.execute_script() {
        ticks += 1;
        assert!(ticks < MAX_TICKS, "script did not finish");
    }
    interp.output().take_lines()
}

fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    (Arc::clone(&calls), calls)
}

#[test]
fn runs_statements_in_order() {
    let mut interp = interpreter("sysmsg one; sysmsg two\nsysmsg three");
    assert_eq!(run(&mut interp), vec!["one", "two", "three"]);
    assert!(!interp.is_running());
    assert!(interp.last_error().is_none());
}

#[test]
fn start_without_script() {
    let mut interp = Interpreter::new();
    assert!(!interp.is_loaded());
    assert!(!interp.start_script());
    assert!(!interp.execute_script());
}

#[test]
fn syntax_errors_load_nothing() {
    let mut interp = Interpreter::new();
    let errors = interp.load_script("sysmsg ok\nendif").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(!interp.is_loaded());
}

#[test]
fn unknown_command_ends_the_script() {
    let mut interp = interpreter("sysmsg before\nfly away\nsysmsg after");
    let lines = run(&mut interp);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "before");
    assert_eq!(
        lines[1],
        "runtime error on line 2 (`fly`): unknown command `fly`"
    );
    let err = interp.last_error().unwrap();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnknownCommand {
            name: "fly".to_string()
        }
    );
    assert_eq!(err.line, Some(2));
}

#[test]
fn unconsumed_arguments_are_an_error() {
    let mut interp = interpreter("noop 1 2");
    interp.register_command("noop", |_, _| Ok(true));
    run(&mut interp);
    assert_eq!(
        interp.last_error().unwrap().kind,
        EvalErrorKind::UnconsumedArguments {
            command: "noop".to_string(),
            count: 2,
        }
    );
}

#[test]
fn modifiers_reach_the_handler() {
    let mut interp = interpreter("@probe!\nprobe");
    interp.register_command("probe", |ctx, inv| {
        ctx.println(&format!("{} {}", inv.quiet(), inv.force()));
        Ok(true)
    });
    assert_eq!(run(&mut interp), vec!["true true", "false false"]);
}

#[test]
fn false_from_a_command_runs_it_again() {
    let mut interp = interpreter("waitfor\nsysmsg done");
    let (calls, seen) = counter();
    interp.register_command("waitfor", move |_, _| {
        Ok(calls.fetch_add(1, Ordering::SeqCst) + 1 >= 3)
    });
    assert_eq!(run(&mut interp), vec!["done"]);
    assert_eq!(seen.load(Ordering::SeqCst), 3);
}

#[test]
fn expressions_run_as_commands() {
    let mut interp = interpreter("createlist l\nlistexists l\nsysmsg ok");
    assert_eq!(run(&mut interp), vec!["ok"]);
}

#[test]
fn pause_holds_the_next_statement() {
    let mut interp = interpreter("pause 60000\nsysmsg late");
    assert!(interp.start_script());
    assert!(interp.execute_script());
    assert_eq!(interp.state().name(), "PAUSED");
    assert!(interp.execute_script());
    assert!(interp.output().lines().is_empty());

    interp.stop_script();
    assert!(!interp.is_running());
    assert!(interp.state().is_running());
    assert!(!interp.execute_script());
}

#[test]
fn expired_timeout_that_accepts_moves_on() {
    let mut interp = interpreter("waitgump\nsysmsg after");
    let (calls, seen) = counter();
    interp.register_command("waitgump", move |ctx, _| {
        calls.fetch_add(1, Ordering::SeqCst);
        ctx.timeout(Duration::ZERO, |ctx| {
            ctx.println("timed out");
            true
        });
        Ok(false)
    });
    assert_eq!(run(&mut interp), vec!["timed out", "after"]);
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test]
fn expired_timeout_that_declines_retries() {
    let mut interp = interpreter("waitgump\nsysmsg after");
    let (calls, seen) = counter();
    interp.register_command("waitgump", move |ctx, _| {
        calls.fetch_add(1, Ordering::SeqCst);
        ctx.timeout(Duration::ZERO, |_| false);
        Ok(false)
    });
    assert!(interp.start_script());
    for _ in 0..6 {
        assert!(interp.execute_script());
    }
    // Handler and expiry alternate.
    assert_eq!(seen.load(Ordering::SeqCst), 3);
    assert!(interp.output().lines().is_empty());
}

#[test]
fn suspend_and_resume() {
    let mut interp = interpreter("sysmsg a\nsysmsg b");
    assert!(interp.start_script());
    assert!(interp.execute_script());
    interp.suspend();
    assert!(interp.is_suspended());
    assert!(interp.execute_script());
    assert!(interp.execute_script());
    assert_eq!(interp.output().lines(), vec!["a"]);

    interp.resume();
    assert!(!interp.is_suspended());
    assert!(!interp.execute_script());
    assert_eq!(interp.output().lines(), vec!["a", "b"]);
}

#[test]
fn stop_keyword_is_not_an_error() {
    let mut interp = interpreter("sysmsg a\nstop\nsysmsg b");
    assert_eq!(run(&mut interp), vec!["a"]);
    assert!(interp.last_error().is_none());
}

#[test]
fn script_stop_without_name_stops_itself() {
    let mut interp = interpreter("sysmsg a\nscript stop\nsysmsg b");
    assert_eq!(run(&mut interp), vec!["a"]);
    assert!(interp.last_error().is_none());
}

#[test]
fn script_suspend_without_name_suspends_itself() {
    let mut interp = interpreter("script suspend\nsysmsg b");
    assert!(interp.start_script());
    assert!(interp.execute_script());
    assert!(interp.is_suspended());
    interp.resume();
    assert!(!interp.execute_script());
    assert_eq!(interp.output().lines(), vec!["b"]);
}

#[test]
fn replay_starts_over() {
    let mut interp = interpreter("sysmsg pass\nif again\n  replay\nendif");
    let (calls, _) = counter();
    interp.register_expression("again", move |_, _| {
        Ok(Value::Bool(calls.fetch_add(1, Ordering::SeqCst) + 1 < 3))
    });
    assert_eq!(run(&mut interp), vec!["pass", "pass", "pass"]);
}

#[test]
fn restart_resets_scope_and_cursor() {
    let mut interp = interpreter("sysmsg a\npause 60000\nsysmsg b");
    assert!(interp.start_script());
    assert!(interp.execute_script());
    assert!(interp.execute_script());
    assert!(interp.start_script());
    assert!(interp.state().is_running());
    assert!(interp.execute_script());
    assert_eq!(interp.output().lines(), vec!["a", "a"]);
    assert_eq!(interp.script().unwrap().env().depth(), 1);
}
