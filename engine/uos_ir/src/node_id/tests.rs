use super::*;

#[test]
fn test_node_id_valid() {
    let id = NodeId::new(42);
    assert!(id.is_valid());
    assert_eq!(id.index(), 42);
    assert_eq!(id.raw(), 42);
}

#[test]
fn test_node_id_invalid() {
    assert!(!NodeId::INVALID.is_valid());
    assert!(!NodeId::default().is_valid());
}

#[test]
fn test_node_id_debug() {
    assert_eq!(format!("{:?}", NodeId::new(3)), "NodeId(3)");
    assert_eq!(format!("{:?}", NodeId::INVALID), "NodeId::INVALID");
}

#[test]
fn test_memory_size() {
    assert_eq!(std::mem::size_of::<NodeId>(), 4);
}
