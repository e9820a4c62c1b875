use gti_ast::{BinaryOp, Expr, FunctionLit, JsDoc, ObjectProp, SourceFile, Stmt, TypeExpr, UnaryOp, lower};
use gti_binder::{GlobalTypeInfo, GlobalTypeInfoOptions, process};
use gti_common::diagnostics::diagnostic_codes;
use gti_solver::TypeId;

fn run(statements: Vec<Stmt>) -> GlobalTypeInfo {
    run_file(SourceFile::new("test.js", statements))
}

fn run_file(file: SourceFile) -> GlobalTypeInfo {
    process(&lower(&file), &GlobalTypeInfoOptions::default()).expect("no fatal error")
}

fn get_error_codes(info: &GlobalTypeInfo) -> Vec<u32> {
    info.diagnostics().iter().map(|d| d.code).collect()
}

fn konst(name: &str, init: Option<Expr>) -> Stmt {
    Stmt::var(name, init).with_doc(JsDoc::new().constant())
}

fn global_type(info: &GlobalTypeInfo, name: &str) -> Option<TypeId> {
    info.declared_type_of(info.global_scope(), name)
}

#[test]
fn test_literal_initializers() {
    let info = run(vec![
        konst("n", Some(Expr::num(1.0))),
        Stmt::const_("s", Some(Expr::string("a"))),
        konst("t", Some(Expr::boolean(true))),
        konst("z", Some(Expr::Null)),
    ]);
    let codes = get_error_codes(&info);
    assert!(codes.is_empty(), "unexpected diagnostics: {:?}", codes);
    assert_eq!(global_type(&info, "n"), Some(TypeId::NUMBER));
    assert_eq!(global_type(&info, "s"), Some(TypeId::STRING));
    assert_eq!(global_type(&info, "t"), Some(TypeId::TRUE));
    assert_eq!(global_type(&info, "z"), Some(TypeId::NULL));
    assert!(info.scope(info.global_scope()).is_const_var("s"));
}

#[test]
fn test_operators() {
    let info = run(vec![
        konst("concat", Some(Expr::binary(BinaryOp::Add, Expr::string("a"), Expr::num(1.0)))),
        konst("sum", Some(Expr::binary(BinaryOp::Add, Expr::num(1.0), Expr::num(2.0)))),
        konst("product", Some(Expr::binary(BinaryOp::Mul, Expr::name("a"), Expr::name("b")))),
        konst("less", Some(Expr::binary(BinaryOp::Lt, Expr::name("a"), Expr::name("b")))),
        konst("not", Some(Expr::unary(UnaryOp::Not, Expr::name("a")))),
        konst("kind", Some(Expr::unary(UnaryOp::TypeOf, Expr::name("a")))),
        konst("nothing", Some(Expr::unary(UnaryOp::Void, Expr::num(0.0)))),
    ]);
    assert_eq!(global_type(&info, "concat"), Some(TypeId::STRING));
    assert_eq!(global_type(&info, "sum"), Some(TypeId::NUMBER));
    assert_eq!(global_type(&info, "product"), Some(TypeId::NUMBER));
    assert_eq!(global_type(&info, "less"), Some(TypeId::BOOLEAN));
    assert_eq!(global_type(&info, "not"), Some(TypeId::BOOLEAN));
    assert_eq!(global_type(&info, "kind"), Some(TypeId::STRING));
    assert_eq!(global_type(&info, "nothing"), Some(TypeId::UNDEFINED));
}

#[test]
fn test_names_objects_and_casts() {
    let info = run(vec![
        konst("a", Some(Expr::num(1.0))),
        konst("b", Some(Expr::name("a"))),
        konst(
            "o",
            Some(Expr::object([
                ObjectProp::new("x", Expr::num(1.0)),
                ObjectProp::new("y", Expr::Null).with_doc(JsDoc::new().with_type(TypeExpr::name("string"))),
            ])),
        ),
        konst("c", Some(Expr::cast(Expr::name("q"), TypeExpr::name("boolean")))),
    ]);
    assert_eq!(global_type(&info, "b"), Some(TypeId::NUMBER));
    let o = global_type(&info, "o").unwrap();
    assert_eq!(info.interner().object_property(o, "x"), Some(TypeId::NUMBER));
    assert_eq!(info.interner().object_property(o, "y"), Some(TypeId::STRING));
    assert_eq!(global_type(&info, "c"), Some(TypeId::BOOLEAN));
}

#[test]
fn test_calls_and_instances() {
    let info = run(vec![
        Stmt::function(
            FunctionLit::named("Foo").with_doc(JsDoc::new().constructor()),
        ),
        Stmt::function(
            FunctionLit::named("make").with_doc(JsDoc::new().returns(TypeExpr::name("string"))),
        ),
        konst("inst", Some(Expr::new_instance(Expr::name("Foo"), []))),
        konst("made", Some(Expr::name("make").call([]))),
    ]);
    let codes = get_error_codes(&info);
    assert!(codes.is_empty(), "unexpected diagnostics: {:?}", codes);
    let foo = info.table().nominal_by_name("Foo").unwrap();
    let inst = global_type(&info, "inst").unwrap();
    assert_eq!(info.interner().nominal_ref(inst).map(|r| r.id), Some(foo));
    assert_eq!(global_type(&info, "made"), Some(TypeId::STRING));
}

#[test]
fn test_namespace_member_reads() {
    let info = run(vec![
        konst("ns", Some(Expr::object([]))),
        Stmt::expr(Expr::qname("ns.k").assign(Expr::num(2.0))).with_doc(JsDoc::new().constant()),
        konst("copy", Some(Expr::qname("ns.k"))),
    ]);
    let codes = get_error_codes(&info);
    assert!(codes.is_empty(), "unexpected diagnostics: {:?}", codes);
    assert_eq!(global_type(&info, "copy"), Some(TypeId::NUMBER));
}

#[test]
fn test_constant_without_initializer() {
    let info = run(vec![konst("c", None)]);
    let codes = get_error_codes(&info);
    assert_eq!(codes, vec![diagnostic_codes::CONST_WITHOUT_INITIALIZER]);
    assert_eq!(global_type(&info, "c"), None);
}

#[test]
fn test_uninferrable_initializer() {
    let info = run(vec![konst("c", Some(Expr::name("unknownFn").call([])))]);
    let codes = get_error_codes(&info);
    assert_eq!(codes, vec![diagnostic_codes::COULD_NOT_INFER_CONST_TYPE]);
}

#[test]
fn test_externs_constants_must_be_annotated() {
    let file = SourceFile::new("test.js", []).with_externs([konst("e", Some(Expr::num(1.0))), konst("f", None)]);
    let info = run_file(file);
    let codes = get_error_codes(&info);
    assert_eq!(
        codes,
        vec![
            diagnostic_codes::COULD_NOT_INFER_CONST_TYPE,
            diagnostic_codes::COULD_NOT_INFER_CONST_TYPE
        ]
    );
}

#[test]
fn test_constant_instance_property() {
    let info = run(vec![Stmt::function(
        FunctionLit::named("Foo")
            .body([Stmt::expr(Expr::qname("this.k").assign(Expr::string("v"))).with_doc(JsDoc::new().constant())])
            .with_doc(JsDoc::new().constructor()),
    )]);
    let codes = get_error_codes(&info);
    assert!(codes.is_empty(), "unexpected diagnostics: {:?}", codes);
    let foo = info.table().nominal_by_name("Foo").unwrap();
    let k = info.table().nominal(foo).property("k").unwrap();
    assert_eq!(k.declared_type, Some(TypeId::STRING));
    assert!(k.is_const);
}
