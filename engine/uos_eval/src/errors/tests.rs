use super::*;
use pretty_assertions::assert_eq;

#[test]
fn factory_sets_kind_and_message() {
    let err = list_not_found("loot");
    assert_eq!(
        err.kind,
        EvalErrorKind::ListNotFound {
            name: "loot".to_string()
        }
    );
    assert_eq!(err.message, "list `loot` does not exist");
    assert_eq!(err.to_string(), "runtime error: list `loot` does not exist");
}

#[test]
fn location_is_attached_once() {
    let err = unknown_command("fly").at(3, Some("fly")).at(9, Some("other"));
    assert_eq!(err.line, Some(3));
    assert_eq!(
        err.to_string(),
        "runtime error on line 3 (`fly`): unknown command `fly`"
    );
}

#[test]
fn loop_beyond_list_cites_size() {
    let err = loop_beyond_list("l", 5, 2);
    assert_eq!(
        err.message,
        "for loop runs to index 4 but list `l` has size 2"
    );
}

#[test]
fn argument_errors_are_classified() {
    assert!(wrong_arg_count("pause", "1", 0).is_argument_error());
    assert!(unconsumed_arguments("pause", 2).is_argument_error());
    assert!(invalid_argument("pushlist", "bad position").is_argument_error());
    assert!(!timer_not_found("t").is_argument_error());
}

#[test]
fn control_action_wraps_errors() {
    let action = ControlAction::from(EvalError::new("boom"));
    match action {
        ControlAction::Error(err) => assert_eq!(err.message, "boom"),
        ControlAction::Stop => panic!("expected an error"),
    }
}
