use super::*;

#[test]
fn test_from_dotted_splits_segments() {
    let name = QualifiedName::from_dotted("ns.sub.Foo").unwrap();
    assert_eq!(name.leftmost(), "ns");
    assert_eq!(name.rightmost(), "Foo");
    assert_eq!(name.len(), 3);
    assert!(!name.is_identifier());
    assert_eq!(name.to_string(), "ns.sub.Foo");
}

#[test]
fn test_from_dotted_rejects_empty_segments() {
    assert!(QualifiedName::from_dotted("").is_none());
    assert!(QualifiedName::from_dotted("a..b").is_none());
    assert!(QualifiedName::from_dotted(".a").is_none());
    assert!(QualifiedName::from_dotted("a.").is_none());
}

#[test]
fn test_simple_name_has_no_tail() {
    let name = QualifiedName::new("x");
    assert!(name.is_identifier());
    assert_eq!(name.rightmost(), "x");
    assert!(name.all_but_leftmost().is_none());
    assert!(name.all_but_rightmost().is_none());
}

#[test]
fn test_all_but_leftmost_and_rightmost() {
    let name = QualifiedName::from_dotted("a.b.c").unwrap();
    assert_eq!(name.all_but_leftmost().unwrap().to_string(), "b.c");
    assert_eq!(name.all_but_rightmost().unwrap().to_string(), "a.b");
    assert_eq!(
        name.all_but_rightmost().unwrap().join("z").to_string(),
        "a.b.z"
    );
}

#[test]
fn test_equality_is_structural() {
    let dotted = QualifiedName::from_dotted("a.b").unwrap();
    let joined = QualifiedName::new("a").join("b");
    assert_eq!(dotted, joined);
    assert_eq!(
        joined.segments().collect::<Vec<_>>(),
        vec!["a", "b"],
    );
}
