use super::*;
use pretty_assertions::assert_eq;

#[test]
fn global_always_exists_and_delete_clears_it() {
    let mut reg = NamespaceRegistry::new();
    assert!(reg.has(GLOBAL_NAMESPACE));
    reg.global().set_alias("pet", 0x10);
    assert!(reg.delete(GLOBAL_NAMESPACE));
    assert!(reg.has(GLOBAL_NAMESPACE));
    assert_eq!(reg.global().alias("pet"), None);
}

#[test]
fn get_creates_lazily() {
    let mut reg = NamespaceRegistry::new();
    assert!(!reg.has("farm"));
    reg.get("farm").create_list("ore");
    assert!(reg.has("farm"));
    assert_eq!(reg.names(), vec!["farm".to_string(), "global".to_string()]);
    assert!(reg.delete("farm"));
    assert!(!reg.delete("farm"));
}

#[test]
fn namespaces_are_isolated() {
    let mut reg = NamespaceRegistry::new();
    reg.get("a").set_alias("x", 1);
    reg.get("b").set_alias("x", 2);
    assert_eq!(reg.get("a").alias("x"), Some(1));
    assert_eq!(reg.get("b").alias("x"), Some(2));
    assert_eq!(reg.global().alias("x"), None);
}

#[test]
fn list_lifecycle() {
    let mut ns = Namespace::default();
    assert!(ns.create_list("l"));
    assert!(!ns.create_list("l"));
    ns.list_mut("l").unwrap().push(Value::Int(1));
    assert_eq!(ns.list("l"), Some(&[Value::Int(1)][..]));
    assert!(ns.remove_list("l"));
    assert_eq!(ns.list("l"), None);
}

#[test]
fn timers_start_near_zero_and_can_be_set() {
    let mut ns = Namespace::default();
    ns.create_timer("t");
    assert!(ns.timer("t").unwrap() < Duration::from_millis(1000));
    ns.set_timer("t", Duration::from_millis(5000));
    assert!(ns.timer("t").unwrap() >= Duration::from_millis(5000));
    ns.set_timer("fresh", Duration::from_millis(250));
    assert!(ns.timer("fresh").unwrap() >= Duration::from_millis(250));
    assert!(ns.remove_timer("t"));
    assert!(!ns.has_timer("t"));
}

#[test]
fn move_modes() {
    let mut reg = NamespaceRegistry::new();
    reg.get("old").set_alias("a", 1);
    reg.get("new").set_alias("b", 2);

    let err = reg
        .move_namespace("old", "new", MoveMode::ErrorIfExists)
        .unwrap_err();
    assert_eq!(err.message, "namespace `new` already exists");

    reg.move_namespace("old", "new", MoveMode::Merge).unwrap();
    assert!(!reg.has("old"));
    assert_eq!(reg.get("new").alias_names(), vec!["a", "b"]);

    reg.get("other").set_alias("c", 3);
    reg.move_namespace("other", "new", MoveMode::Replace).unwrap();
    assert_eq!(reg.get("new").alias_names(), vec!["c"]);

    assert!(reg.move_namespace("missing", "x", MoveMode::Merge).is_err());
}

#[test]
fn moving_global_leaves_it_empty() {
    let mut reg = NamespaceRegistry::new();
    reg.global().set_alias("a", 1);
    reg.move_namespace(GLOBAL_NAMESPACE, "saved", MoveMode::ErrorIfExists)
        .unwrap();
    assert!(reg.global().is_empty());
    assert_eq!(reg.get("saved").alias("a"), Some(1));
}

#[test]
fn copy_whole_category() {
    let mut reg = NamespaceRegistry::new();
    let global = reg.global();
    global.set_alias("a", 1);
    global.create_list("l");
    global.create_timer("t");

    reg.copy_alias(GLOBAL_NAMESPACE, "dst", None, None).unwrap();
    let dst = reg.get("dst");
    assert_eq!(dst.alias("a"), Some(1));
    assert!(!dst.has_list("l"));
    assert!(!dst.has_timer("t"));

    reg.copy_all(GLOBAL_NAMESPACE, "dst2", None, None).unwrap();
    let dst2 = reg.get("dst2");
    assert!(dst2.has_alias("a"));
    assert!(dst2.has_list("l"));
    assert!(dst2.has_timer("t"));
}

#[test]
fn copy_single_item_with_rename() {
    let mut reg = NamespaceRegistry::new();
    reg.global().create_list("loot");
    reg.copy_lists(GLOBAL_NAMESPACE, "dst", Some("loot"), Some("bag"))
        .unwrap();
    assert!(reg.get("dst").has_list("bag"));
    assert!(!reg.get("dst").has_list("loot"));

    let err = reg
        .copy_timers(GLOBAL_NAMESPACE, "dst", Some("nope"), None)
        .unwrap_err();
    assert_eq!(err.message, "namespace `global` has no item `nope`");
    assert!(reg.copy_all("missing", "dst", None, None).is_err());
}

#[test]
fn category_and_mode_words() {
    assert_eq!(Category::parse("lists"), Some(Category::Lists));
    assert_eq!(Category::parse("alias"), Some(Category::Alias));
    assert_eq!(Category::parse("bogus"), None);
    assert_eq!(MoveMode::parse("merge"), Some(MoveMode::Merge));
    assert_eq!(MoveMode::parse("keep"), None);
    assert_eq!(MoveMode::default(), MoveMode::ErrorIfExists);
}
