use super::*;
use crate::nominal::{NominalKind, ObjectShape};

fn q(dotted: &str) -> QualifiedName {
    QualifiedName::from_dotted(dotted).unwrap()
}

fn tree_with_child() -> (ScopeTree, ScopeId, ScopeId) {
    let mut tree = ScopeTree::new();
    let global = tree.create(None, NodeIndex(0), None, Vec::new());
    let inner = tree.create(Some(global), NodeIndex(1), Some("f".to_string()), vec!["x".to_string()]);
    (tree, global, inner)
}

#[test]
fn test_rebinding_with_another_kind_is_fatal() {
    let (mut tree, global, inner) = tree_with_child();
    tree.get_mut(global).add_local("a", None, false).unwrap();
    let err = tree
        .get_mut(global)
        .add_function("a", inner)
        .unwrap_err();
    assert_eq!(
        err,
        GtiError::DuplicateBinding {
            name: "a".to_string(),
            existing: "local",
            added: "function",
        }
    );
}

#[test]
fn test_outer_vars_are_early_detected() {
    let (mut tree, global, inner) = tree_with_child();
    tree.get_mut(global).add_local("shared", None, false).unwrap();
    assert!(tree.is_outer_var_early(inner, "shared"));
    assert!(!tree.is_outer_var_early(inner, "x"));
    assert!(!tree.is_outer_var_early(inner, "f"));
    assert!(!tree.is_outer_var_early(inner, "missing"));

    tree.get_mut(inner).add_outer_var("shared");
    tree.get_mut(inner).add_outer_var("shared");
    assert_eq!(tree.get(inner).outer_vars().collect::<Vec<_>>(), vec!["shared"]);
}

#[test]
fn test_lookup_prefers_innermost_binding() {
    let (mut tree, global, inner) = tree_with_child();
    tree.get_mut(global).add_local("v", Some(TypeId::STRING), false).unwrap();
    tree.get_mut(inner).add_local("v", Some(TypeId::NUMBER), true).unwrap();
    let (found, binding) = tree.lookup(inner, "v").unwrap();
    assert_eq!(found, inner);
    assert_eq!(binding, &Binding::Local(Some(TypeId::NUMBER)));
    assert!(tree.get(inner).is_const_var("v"));
    assert!(!tree.get(global).is_const_var("v"));
}

#[test]
fn test_declared_type_of_reads_formals_and_this() {
    let (mut tree, _global, inner) = tree_with_child();
    let table = TypeTable::new();
    let interner = TypeInterner::new();
    let mut declared = DeclaredFunctionType::untyped(1);
    declared.formals[0] = Some(TypeId::BOOLEAN);
    tree.get_mut(inner).declared_type = Some(declared);

    assert_eq!(
        tree.declared_type_of(inner, "x", &table, &interner),
        Some(TypeId::BOOLEAN)
    );
    assert_eq!(tree.declared_type_of(inner, "this", &table, &interner), None);
    assert!(tree.declared_type_of(inner, "f", &table, &interner).is_some());
    assert_eq!(tree.declared_type_of(inner, "nope", &table, &interner), None);
}

#[test]
fn test_namespace_lookup_through_class_binding() {
    let (mut tree, global, inner) = tree_with_child();
    let mut table = TypeTable::new();
    let foo = table.new_nominal(q("Foo"), NominalKind::Class, ObjectShape::Unrestricted, Vec::new(), NodeIndex(2));
    let sub = table.new_namespace_literal(q("Foo.Inner"), NodeIndex(3));
    let foo_ns = table.nominal_namespace(foo);
    table.namespace_mut(foo_ns).add_sub_namespace("Inner", sub);
    tree.get_mut(global).add_function("Foo", inner).unwrap();
    tree.get_mut(global).set_function_nominal("Foo", foo);

    assert_eq!(tree.get_namespace(inner, "Foo", &table), Some(foo_ns));
    assert_eq!(tree.namespace_of(inner, &q("Foo.Inner"), &table), Some(sub));
    assert_eq!(tree.get_nominal_type(inner, &q("Foo"), &table), Some(foo));
    assert!(tree.is_defined(global, &q("Foo.Inner"), &table));
    assert!(!tree.is_defined(global, &q("Foo.Other"), &table));
}

#[test]
fn test_formal_shadows_outer_namespace() {
    let (mut tree, global, inner) = tree_with_child();
    let mut table = TypeTable::new();
    let ns = table.new_namespace_literal(q("x"), NodeIndex(2));
    tree.get_mut(global).add_namespace("x", ns).unwrap();
    assert_eq!(tree.get_namespace(global, "x", &table), Some(ns));
    assert_eq!(tree.get_namespace(inner, "x", &table), None);
}

#[test]
fn test_compact_flattens_namespaces() {
    let (mut tree, global, _) = tree_with_child();
    let mut table = TypeTable::new();
    let interner = TypeInterner::new();
    let ns = table.new_namespace_literal(q("ns"), NodeIndex(2));
    table.namespace_mut(ns).add_property("n", TypeId::NUMBER, false);
    let td = table.new_typedef(q("T"), gti_ast::TypeExpr::Unknown, NodeIndex(3));
    tree.get_mut(global).add_namespace("ns", ns).unwrap();
    tree.get_mut(global).add_typedef("T", td).unwrap();

    tree.compact(global, &table, &interner);
    let scope = tree.get(global);
    assert!(scope.binding("T").is_none());
    let Some(Binding::Local(Some(ty))) = scope.binding("ns") else {
        panic!("namespace should become a typed local");
    };
    assert_eq!(interner.object_property(*ty, "n"), Some(TypeId::NUMBER));
    assert!(scope.typedefs.is_empty());
}
