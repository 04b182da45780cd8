use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_captures_lines_in_order() {
    let handler = buffer_handler();
    handler.println("first");
    handler.println("second");
    assert_eq!(handler.lines(), vec!["first", "second"]);
    assert_eq!(handler.get_output(), "first\nsecond\n");
}

#[test]
fn take_lines_drains() {
    let handler = buffer_handler();
    handler.println("once");
    assert_eq!(handler.take_lines(), vec!["once"]);
    assert!(handler.lines().is_empty());
}

#[test]
fn silent_and_stdout_capture_nothing() {
    let silent = silent_handler();
    silent.println("dropped");
    assert!(silent.lines().is_empty());
    silent.clear();

    let stdout = stdout_handler();
    assert_eq!(stdout.get_output(), "");
}

#[test]
fn buffer_is_shared_across_threads() {
    let handler = buffer_handler();
    let other = Arc::clone(&handler);
    let worker = std::thread::spawn(move || {
        for _ in 0..50 {
            other.println("a");
        }
    });
    for _ in 0..50 {
        handler.println("b");
    }
    worker.join().unwrap();
    assert_eq!(handler.lines().len(), 100);
}
