use crate::*;

#[test]
fn test_interner_intrinsics() {
    let interner = TypeInterner::new();

    assert_eq!(
        interner.lookup(TypeId::NUMBER),
        Some(TypeData::Intrinsic(IntrinsicKind::Number))
    );
    assert_eq!(
        interner.lookup(TypeId::TOP_OBJECT),
        Some(TypeData::Intrinsic(IntrinsicKind::TopObject))
    );
    assert_eq!(interner.len(), TypeId::INTRINSIC_COUNT as usize);
}

#[test]
fn test_interner_deduplication() {
    let interner = TypeInterner::new();

    let a = interner.object(vec![("x".to_string(), TypeId::NUMBER)]);
    let b = interner.object(vec![("x".to_string(), TypeId::NUMBER)]);
    let c = interner.object(vec![("x".to_string(), TypeId::STRING)]);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_object_property_order_is_irrelevant() {
    let interner = TypeInterner::new();
    let ab = interner.object(vec![
        ("a".to_string(), TypeId::NUMBER),
        ("b".to_string(), TypeId::STRING),
    ]);
    let ba = interner.object(vec![
        ("b".to_string(), TypeId::STRING),
        ("a".to_string(), TypeId::NUMBER),
    ]);
    assert_eq!(ab, ba);
    assert_eq!(interner.object_property(ab, "b"), Some(TypeId::STRING));
}

#[test]
fn test_union_normalization() {
    let interner = TypeInterner::new();

    let ns = interner.union([TypeId::NUMBER, TypeId::STRING]);
    let sn = interner.union([TypeId::STRING, TypeId::NUMBER, TypeId::NUMBER]);
    assert_eq!(ns, sn);

    // Nested unions flatten.
    let nested = interner.union([ns, TypeId::NULL]);
    assert_eq!(
        interner.union_members(nested),
        Some(vec![TypeId::NUMBER, TypeId::STRING, TypeId::NULL])
    );

    assert_eq!(interner.union([TypeId::NUMBER]), TypeId::NUMBER);
    assert_eq!(interner.union([]), TypeId::BOTTOM);
    assert_eq!(interner.union([TypeId::NUMBER, TypeId::TOP]), TypeId::TOP);
    assert_eq!(interner.union([TypeId::TRUE, TypeId::FALSE]), TypeId::BOOLEAN);
}
