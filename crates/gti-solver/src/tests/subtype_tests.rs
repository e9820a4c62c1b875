use crate::test_hierarchy::TestHierarchy;
use crate::*;

#[test]
fn test_top_unknown_and_bottom() {
    let interner = TypeInterner::new();
    let hierarchy = TestHierarchy::default();
    let checker = SubtypeChecker::new(&interner, &hierarchy);

    assert!(checker.is_subtype(TypeId::NUMBER, TypeId::TOP));
    assert!(!checker.is_subtype(TypeId::TOP, TypeId::NUMBER));
    assert!(checker.is_subtype(TypeId::UNKNOWN, TypeId::NUMBER));
    assert!(checker.is_subtype(TypeId::NUMBER, TypeId::UNKNOWN));
    assert!(checker.is_subtype(TypeId::BOTTOM, TypeId::STRING));
    assert!(!checker.is_subtype(TypeId::NUMBER, TypeId::STRING));
    assert!(checker.is_subtype(TypeId::TRUE, TypeId::BOOLEAN));
}

#[test]
fn test_union_subtyping() {
    let interner = TypeInterner::new();
    let hierarchy = TestHierarchy::default();
    let checker = SubtypeChecker::new(&interner, &hierarchy);

    let num_or_str = interner.union([TypeId::NUMBER, TypeId::STRING]);
    assert!(checker.is_subtype(TypeId::NUMBER, num_or_str));
    assert!(!checker.is_subtype(num_or_str, TypeId::NUMBER));
    let wider = interner.union([TypeId::NUMBER, TypeId::STRING, TypeId::NULL]);
    assert!(checker.is_subtype(num_or_str, wider));
}

#[test]
fn test_records_use_width_and_depth() {
    let interner = TypeInterner::new();
    let hierarchy = TestHierarchy::default();
    let checker = SubtypeChecker::new(&interner, &hierarchy);

    let wide = interner.object(vec![
        ("a".to_string(), TypeId::NUMBER),
        ("b".to_string(), TypeId::STRING),
    ]);
    let narrow = interner.object(vec![("a".to_string(), TypeId::NUMBER)]);
    assert!(checker.is_subtype(wide, narrow));
    assert!(!checker.is_subtype(narrow, wide));
    assert!(checker.is_subtype(wide, TypeId::TOP_OBJECT));
    assert!(!checker.is_subtype(TypeId::NUMBER, TypeId::TOP_OBJECT));
}

#[test]
fn test_nominal_subtyping_through_hierarchy() {
    let interner = TypeInterner::new();
    let mut hierarchy = TestHierarchy::default();
    let iface = hierarchy.interface("I");
    let base = hierarchy.class("Base");
    let derived = hierarchy.class("Derived");
    hierarchy.extend(base, NominalRef::new(iface));
    hierarchy.extend(derived, NominalRef::new(base));
    hierarchy.prop(base, "p", TypeId::NUMBER);
    let checker = SubtypeChecker::new(&interner, &hierarchy);

    let i = interner.nominal(NominalRef::new(iface));
    let b = interner.nominal(NominalRef::new(base));
    let d = interner.nominal(NominalRef::new(derived));
    assert!(checker.is_subtype(d, b));
    assert!(checker.is_subtype(d, i));
    assert!(!checker.is_subtype(b, d));

    let record = interner.object(vec![("p".to_string(), TypeId::NUMBER)]);
    assert!(checker.is_subtype(d, record));
    let other = interner.object(vec![("q".to_string(), TypeId::NUMBER)]);
    assert!(!checker.is_subtype(d, other));
}

#[test]
fn test_generic_arguments_follow_extends_clause() {
    let interner = TypeInterner::new();
    let mut hierarchy = TestHierarchy::default();
    let boxed = hierarchy.class("Box");
    hierarchy.params(boxed, &["T"]);
    let numbers = hierarchy.class("NumberBox");
    hierarchy.extend(numbers, NominalRef::with_args(boxed, vec![TypeId::NUMBER]));
    let checker = SubtypeChecker::new(&interner, &hierarchy);

    let nb = interner.nominal(NominalRef::new(numbers));
    let box_num = interner.nominal(NominalRef::with_args(boxed, vec![TypeId::NUMBER]));
    let box_str = interner.nominal(NominalRef::with_args(boxed, vec![TypeId::STRING]));
    assert!(checker.is_subtype(nb, box_num));
    assert!(!checker.is_subtype(nb, box_str));
}

#[test]
fn test_function_variance() {
    let interner = TypeInterner::new();
    let hierarchy = TestHierarchy::default();
    let checker = SubtypeChecker::new(&interner, &hierarchy);
    let num_or_str = interner.union([TypeId::NUMBER, TypeId::STRING]);

    let takes_wide = interner.function(FunctionShape {
        params: vec![num_or_str],
        rest: None,
        returns: TypeId::NUMBER,
        constructs: None,
    });
    let takes_num = interner.function(FunctionShape {
        params: vec![TypeId::NUMBER],
        rest: None,
        returns: TypeId::NUMBER,
        constructs: None,
    });
    let returns_top = interner.function(FunctionShape {
        params: vec![TypeId::NUMBER],
        rest: None,
        returns: TypeId::TOP,
        constructs: None,
    });
    assert!(checker.is_subtype(takes_wide, takes_num));
    assert!(!checker.is_subtype(takes_num, takes_wide));
    assert!(checker.is_subtype(takes_num, returns_top));
    assert!(!checker.is_subtype(returns_top, takes_num));
}

#[test]
fn test_enum_element_is_subtype_of_its_declared_type() {
    let interner = TypeInterner::new();
    let mut hierarchy = TestHierarchy::default();
    hierarchy.enums.push(("Color".to_string(), TypeId::STRING));
    let checker = SubtypeChecker::new(&interner, &hierarchy);
    let element = interner.enum_element(EnumId(0));
    assert!(checker.is_subtype(element, TypeId::STRING));
    assert!(!checker.is_subtype(TypeId::STRING, element));
    assert_eq!(TypeFormatter::new(&interner, &hierarchy).format(element), "Color");
}

#[test]
fn test_meet_is_unique_minimum_regardless_of_order() {
    let interner = TypeInterner::new();
    let mut hierarchy = TestHierarchy::default();
    let a = hierarchy.class("A");
    let c = hierarchy.class("C");
    let d = hierarchy.class("D");
    hierarchy.extend(a, NominalRef::new(c));
    hierarchy.extend(a, NominalRef::new(d));
    let checker = SubtypeChecker::new(&interner, &hierarchy);
    let ta = interner.nominal(NominalRef::new(a));
    let tc = interner.nominal(NominalRef::new(c));
    let td = interner.nominal(NominalRef::new(d));

    assert_eq!(meet_all(&checker, &[tc, ta, td]), Some(ta));
    assert_eq!(meet_all(&checker, &[tc, td, ta]), Some(ta));
    // C and D alone have no common minimum.
    assert_eq!(meet_all(&checker, &[tc, td]), None);
    assert_eq!(meet_all(&checker, &[td, tc]), None);
    assert_eq!(meet_all(&checker, &[]), Some(TypeId::TOP));
}
