//! Inheritance: edges installed from `@extends`/`@implements`, and the
//! finalizer merging and checking inherited properties.

use gti_ast::{Expr, FunctionLit, JsDoc, NodeData, SourceFile, Stmt, TypeExpr, lower};
use gti_binder::{GlobalTypeInfo, GlobalTypeInfoBuilder, GlobalTypeInfoOptions, process};
use gti_common::diagnostics::diagnostic_codes;
use gti_solver::TypeId;

fn run(statements: Vec<Stmt>) -> GlobalTypeInfo {
    let program = lower(&SourceFile::new("test.js", statements));
    process(&program, &GlobalTypeInfoOptions::default()).expect("no fatal error")
}

fn get_error_codes(info: &GlobalTypeInfo) -> Vec<u32> {
    info.diagnostics().iter().map(|d| d.code).collect()
}

fn ty(name: &str) -> TypeExpr {
    TypeExpr::name(name)
}

fn class(name: &str, doc: JsDoc) -> Stmt {
    Stmt::function(FunctionLit::named(name).with_doc(doc.constructor()))
}

fn interface(name: &str, doc: JsDoc) -> Stmt {
    Stmt::function(FunctionLit::named(name).with_doc(doc.interface()))
}

fn proto(class: &str, prop: &str, doc: JsDoc) -> Stmt {
    Stmt::expr(Expr::qname(&format!("{class}.prototype.{prop}"))).with_doc(doc)
}

/// `/** doc */ C.prototype.m = function() {};`
fn method(class: &str, prop: &str, doc: JsDoc) -> Stmt {
    let function = Expr::function(FunctionLit::anonymous());
    Stmt::expr(Expr::qname(&format!("{class}.prototype.{prop}")).assign(function)).with_doc(doc)
}

/// `C.prototype.m = function(params) {};`, documented when `doc` is given.
fn method_with_params<const N: usize>(
    class: &str,
    prop: &str,
    params: [&str; N],
    doc: Option<JsDoc>,
) -> Stmt {
    let function = Expr::function(FunctionLit::anonymous().params(params));
    let stmt = Stmt::expr(Expr::qname(&format!("{class}.prototype.{prop}")).assign(function));
    match doc {
        Some(doc) => stmt.with_doc(doc),
        None => stmt,
    }
}

#[test]
fn test_inheritance_cycle_reported_once() {
    let info = run(vec![
        class("A", JsDoc::new().extends(ty("B"))),
        class("B", JsDoc::new().extends(ty("A"))),
    ]);
    let codes = get_error_codes(&info);
    assert_eq!(codes, vec![diagnostic_codes::INHERITANCE_CYCLE]);
    for name in ["A", "B"] {
        let id = info.table().nominal_by_name(name).unwrap();
        assert!(info.table().nominal(id).is_finalized(), "{name} not finalized");
    }
}

#[test]
fn test_subclass_declared_first_is_requeued() {
    let info = run(vec![
        class("Sub", JsDoc::new().extends(ty("Base"))),
        class("Base", JsDoc::new()),
        proto("Base", "p", JsDoc::new().with_type(ty("number"))),
    ]);
    let codes = get_error_codes(&info);
    assert!(codes.is_empty(), "unexpected diagnostics: {:?}", codes);
    assert_eq!(info.finalize_stats().finalized, 2);
    assert_eq!(info.finalize_stats().requeues, 1);

    let sub = info.table().nominal_by_name("Sub").unwrap();
    let p = info.table().nominal(sub).property("p").unwrap();
    assert_eq!(p.declared_type, Some(TypeId::NUMBER));
    assert!(p.inherited);
}

#[test]
fn test_widening_override_is_invalid() {
    let info = run(vec![
        class("Base", JsDoc::new()),
        proto("Base", "p", JsDoc::new().with_type(ty("number"))),
        class("Sub", JsDoc::new().extends(ty("Base"))),
        proto("Sub", "p", JsDoc::new().with_type(TypeExpr::Any)),
    ]);
    let diag = info
        .diagnostics()
        .iter()
        .find(|d| d.code == diagnostic_codes::INVALID_PROP_OVERRIDE)
        .expect("INVALID_PROP_OVERRIDE");
    assert_eq!(diag.args, vec!["p".to_string(), "number".to_string(), "*".to_string()]);
}

#[test]
fn test_narrowing_override_is_allowed() {
    let info = run(vec![
        class("Base", JsDoc::new()),
        proto("Base", "p", JsDoc::new().with_type(TypeExpr::Any)),
        class("Sub", JsDoc::new().extends(ty("Base"))),
        proto("Sub", "p", JsDoc::new().with_type(ty("number"))),
    ]);
    let codes = get_error_codes(&info);
    assert!(codes.is_empty(), "unexpected diagnostics: {:?}", codes);
    let sub = info.table().nominal_by_name("Sub").unwrap();
    let p = info.table().nominal(sub).property("p").unwrap();
    assert_eq!(p.declared_type, Some(TypeId::NUMBER));
    assert!(!p.inherited);
}

#[test]
fn test_incompatible_properties_from_two_interfaces() {
    let info = run(vec![
        interface("I1", JsDoc::new()),
        proto("I1", "p", JsDoc::new().with_type(ty("number"))),
        interface("I2", JsDoc::new()),
        proto("I2", "p", JsDoc::new().with_type(ty("string"))),
        interface("J", JsDoc::new().extends(ty("I1")).extends(ty("I2"))),
    ]);
    let codes = get_error_codes(&info);
    assert_eq!(codes, vec![diagnostic_codes::INCOMPATIBLE_EXTENDED_PROPERTY_TYPE]);
    assert_eq!(info.diagnostics()[0].args, vec!["J".to_string(), "p".to_string()]);
    let j = info.table().nominal_by_name("J").unwrap();
    assert!(info.table().nominal(j).property("p").is_none());
}

#[test]
fn test_missing_interface_method() {
    let info = run(vec![
        interface("I", JsDoc::new()),
        method("I", "m", JsDoc::new().returns(ty("number"))),
        class("C", JsDoc::new().implements(ty("I"))),
    ]);
    let diag = info
        .diagnostics()
        .iter()
        .find(|d| d.code == diagnostic_codes::INTERFACE_METHOD_NOT_IMPLEMENTED)
        .expect("INTERFACE_METHOD_NOT_IMPLEMENTED");
    assert_eq!(diag.args, vec!["m".to_string(), "I".to_string(), "C".to_string()]);
}

#[test]
fn test_implemented_interface_method() {
    let info = run(vec![
        interface("I", JsDoc::new()),
        method("I", "m", JsDoc::new().returns(ty("number"))),
        class("C", JsDoc::new().implements(ty("I"))),
        method("C", "m", JsDoc::new().returns(ty("number"))),
    ]);
    let codes = get_error_codes(&info);
    assert!(codes.is_empty(), "unexpected diagnostics: {:?}", codes);
    let c = info.table().nominal_by_name("C").unwrap();
    let m = info.table().nominal(c).property("m").unwrap();
    let shape = info.interner().function_shape(m.declared_type.unwrap()).unwrap();
    assert_eq!(shape.returns, TypeId::NUMBER);
}

#[test]
fn test_method_meet_over_two_interfaces() {
    let signature = |param: &str| JsDoc::new().param("x", ty(param)).returns(ty("number"));
    let program = lower(&SourceFile::new(
        "test.js",
        vec![
            interface("I1", JsDoc::new()),
            method_with_params("I1", "m", ["x"], Some(signature("number"))),
            interface("I2", JsDoc::new()),
            method_with_params("I2", "m", ["x"], Some(signature("string"))),
            class("C", JsDoc::new().implements(ty("I1")).implements(ty("I2"))),
            method_with_params("C", "m", ["x"], None),
        ],
    ));
    let info = process(&program, &GlobalTypeInfoOptions::default()).unwrap();
    let codes = get_error_codes(&info);
    assert!(codes.is_empty(), "unexpected diagnostics: {:?}", codes);

    let c = info.table().nominal_by_name("C").unwrap();
    let m = info.table().nominal(c).property("m").unwrap().declared_type.unwrap();
    assert_eq!(info.format_type(m), "function((number|string)): number");

    // The method's own scope carries the merged signature.
    let stmt = program.arena.block_statements(program.root)[5];
    let Some(NodeData::ExprStatement { expression }) = program.arena.data(stmt) else {
        panic!("expected an expression statement");
    };
    let Some(NodeData::Assign { value, .. }) = program.arena.data(*expression) else {
        panic!("expected an assignment");
    };
    let scope = info.function_scope(*value).unwrap();
    let declared = info.scope(scope).declared_type.as_ref().unwrap();
    let either = info.interner().union([TypeId::NUMBER, TypeId::STRING]);
    assert_eq!(declared.formals, vec![Some(either)]);
    assert_eq!(declared.return_type, Some(TypeId::NUMBER));
    assert_eq!(declared.to_function_type(info.interner()), m);
}

#[test]
fn test_final_method_cannot_be_overridden() {
    let info = run(vec![
        class("Base", JsDoc::new()),
        method("Base", "m", JsDoc::new().constant().returns(ty("number"))),
        class("Sub", JsDoc::new().extends(ty("Base"))),
        method("Sub", "m", JsDoc::new().returns(ty("number"))),
    ]);
    let codes = get_error_codes(&info);
    assert_eq!(codes, vec![diagnostic_codes::CANNOT_OVERRIDE_FINAL_METHOD]);
}

#[test]
fn test_override_without_super_property() {
    let info = run(vec![
        class("Foo", JsDoc::new()),
        proto("Foo", "z", JsDoc::new().with_type(ty("number")).with_override()),
    ]);
    let codes = get_error_codes(&info);
    assert_eq!(codes, vec![diagnostic_codes::UNKNOWN_OVERRIDE]);
}

#[test]
fn test_generic_super_class_is_instantiated() {
    let info = run(vec![
        class("Box", JsDoc::new().template("T")),
        proto("Box", "value", JsDoc::new().with_type(ty("T"))),
        class("NumBox", JsDoc::new().extends(TypeExpr::apply("Box", [ty("number")]))),
    ]);
    let codes = get_error_codes(&info);
    assert!(codes.is_empty(), "unexpected diagnostics: {:?}", codes);
    let num_box = info.table().nominal_by_name("NumBox").unwrap();
    let value = info.table().nominal(num_box).property("value").unwrap();
    assert_eq!(value.declared_type, Some(TypeId::NUMBER));
}

#[test]
fn test_bad_base_types() {
    let info = run(vec![
        class("F", JsDoc::new().extends(ty("number"))),
        Stmt::function(FunctionLit::named("g").with_doc(JsDoc::new().extends(ty("F")).implements(ty("F")))),
        interface("I", JsDoc::new()),
        class("G", JsDoc::new().extends(ty("I"))),
        interface("J", JsDoc::new().implements(ty("I"))),
        interface("K", JsDoc::new().extends(ty("F"))),
    ]);
    let codes = get_error_codes(&info);
    for expected in [
        diagnostic_codes::EXTENDS_NON_OBJECT,
        diagnostic_codes::EXTENDS_NOT_ON_CTOR_OR_INTERF,
        diagnostic_codes::IMPLEMENTS_WITHOUT_CONSTRUCTOR,
        diagnostic_codes::CONFLICTING_EXTENDED_TYPE,
        diagnostic_codes::CONFLICTING_IMPLEMENTED_TYPE,
    ] {
        assert!(codes.contains(&expected), "missing {expected}, got {:?}", codes);
    }
    let conflicting: Vec<&Vec<String>> = info
        .diagnostics()
        .iter()
        .filter(|d| d.code == diagnostic_codes::CONFLICTING_EXTENDED_TYPE)
        .map(|d| &d.args)
        .collect();
    assert_eq!(
        conflicting,
        vec![
            &vec!["constructor".to_string(), "G".to_string()],
            &vec!["interface".to_string(), "K".to_string()],
        ]
    );
}

#[test]
fn test_shape_and_body_restrictions() {
    let info = run(vec![
        class("Plain", JsDoc::new()),
        class("S", JsDoc::new().with_struct().extends(ty("Plain"))),
        interface("I", JsDoc::new()),
        class("D", JsDoc::new().with_dict().implements(ty("I"))),
        Stmt::function(
            FunctionLit::named("Bodied")
                .body([Stmt::ret(None)])
                .with_doc(JsDoc::new().interface()),
        ),
    ]);
    let codes = get_error_codes(&info);
    for expected in [
        diagnostic_codes::CONFLICTING_SHAPE_TYPE,
        diagnostic_codes::DICT_IMPLEMENTS_INTERF,
        diagnostic_codes::INTERFACE_WITH_A_BODY,
    ] {
        assert!(codes.contains(&expected), "missing {expected}, got {:?}", codes);
    }
}

#[test]
fn test_finalizing_twice_is_a_noop() {
    let program = lower(&SourceFile::new(
        "test.js",
        vec![
            class("Base", JsDoc::new()),
            proto("Base", "p", JsDoc::new().with_type(ty("number"))),
            class("Sub", JsDoc::new().extends(ty("Base"))),
            proto("Sub", "q", JsDoc::new().with_override().with_type(ty("string"))),
        ],
    ));
    let mut builder = GlobalTypeInfoBuilder::new(&program);
    builder.build_scopes().unwrap();
    let first = builder.finalize_nominal_types().unwrap();
    assert_eq!(first.finalized, 2);

    let sub = builder.table().nominal_by_name("Sub").unwrap();
    let property_names = |builder: &GlobalTypeInfoBuilder<'_>| -> Vec<String> {
        let mut names: Vec<String> = builder
            .table()
            .nominal(sub)
            .properties()
            .map(|(name, _)| name.to_string())
            .collect();
        names.sort();
        names
    };
    let codes_before: Vec<u32> = builder.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes_before, vec![diagnostic_codes::UNKNOWN_OVERRIDE]);
    let props_before = property_names(&builder);
    assert_eq!(props_before, vec!["p".to_string(), "q".to_string()]);

    let second = builder.finalize_nominal_types().unwrap();
    assert_eq!(second.finalized, 0);
    assert_eq!(second.requeues, 0);
    let codes_after: Vec<u32> = builder.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes_after, codes_before);
    assert_eq!(property_names(&builder), props_before);

    let info = builder.finish();
    assert_eq!(info.finalize_stats().finalized, 2);
    assert_eq!(info.diagnostics().len(), 1);
}
