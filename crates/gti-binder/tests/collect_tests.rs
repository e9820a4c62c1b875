//! Named-type collection: namespaces, typedefs, enums, classes and the
//! diagnostics tied to their declaration form.

use gti_ast::{Expr, FunctionLit, JsDoc, NodeIndex, ObjectProp, SourceFile, Stmt, TypeExpr, lower};
use gti_binder::{
    DeclaredTypeResolver, EnumKeyStyle, GlobalTypeInfo, GlobalTypeInfoBuilder, GlobalTypeInfoOptions,
    JsDocTypeResolver, ResolveContext, TypedefId, process,
};
use gti_common::diagnostics::diagnostic_codes;
use gti_solver::{DeclaredFunctionType, NominalHierarchy, NominalRef, TypeData, TypeId};

fn run(statements: Vec<Stmt>) -> GlobalTypeInfo {
    run_with(statements, GlobalTypeInfoOptions::default())
}

fn run_with(statements: Vec<Stmt>, options: GlobalTypeInfoOptions) -> GlobalTypeInfo {
    let program = lower(&SourceFile::new("test.js", statements));
    process(&program, &options).expect("no fatal error")
}

fn get_error_codes(info: &GlobalTypeInfo) -> Vec<u32> {
    info.diagnostics().iter().map(|d| d.code).collect()
}

fn namespace(name: &str) -> Stmt {
    Stmt::var(name, Some(Expr::object([]))).with_doc(JsDoc::new().constant())
}

fn typed_var(name: &str, ty: TypeExpr) -> Stmt {
    Stmt::var(name, None).with_doc(JsDoc::new().with_type(ty))
}

#[test]
fn test_qualified_typedef_resolves_through_namespace() {
    let info = run(vec![
        namespace("ns"),
        Stmt::expr(Expr::qname("ns.Num")).with_doc(JsDoc::new().with_typedef(TypeExpr::name("number"))),
        typed_var("x", TypeExpr::name("ns.Num")),
    ]);
    let codes = get_error_codes(&info);
    assert!(codes.is_empty(), "unexpected diagnostics: {:?}", codes);
    assert_eq!(info.declared_type_of(info.global_scope(), "x"), Some(TypeId::NUMBER));
}

#[test]
fn test_typedef_may_be_used_before_its_declaration() {
    let info = run(vec![
        typed_var("x", TypeExpr::name("Str")),
        Stmt::var("Str", None).with_doc(JsDoc::new().with_typedef(TypeExpr::name("string"))),
    ]);
    assert_eq!(info.declared_type_of(info.global_scope(), "x"), Some(TypeId::STRING));
}

#[test]
fn test_initialized_typedef_is_reported() {
    let info = run(vec![
        Stmt::var("T", Some(Expr::num(1.0))).with_doc(JsDoc::new().with_typedef(TypeExpr::name("number"))),
    ]);
    let codes = get_error_codes(&info);
    assert!(
        codes.contains(&diagnostic_codes::CANNOT_INIT_TYPEDEF),
        "expected CANNOT_INIT_TYPEDEF, got {:?}",
        codes
    );
}

#[test]
fn test_enum_element_type_and_members() {
    let info = run(vec![
        namespace("ns"),
        Stmt::expr(Expr::qname("ns.Color").assign(Expr::object([
            ObjectProp::new("RED", Expr::string("r")),
            ObjectProp::new("GREEN", Expr::string("g")),
        ])))
        .with_doc(JsDoc::new().with_enum(Some(TypeExpr::name("string")))),
        typed_var("c", TypeExpr::name("ns.Color")),
    ]);
    let codes = get_error_codes(&info);
    assert!(codes.is_empty(), "unexpected diagnostics: {:?}", codes);

    let ty = info.declared_type_of(info.global_scope(), "c").unwrap();
    let Some(TypeData::EnumElement(id)) = info.interner().lookup(ty) else {
        panic!("expected an enum element, got {}", info.format_type(ty));
    };
    let e = info.table().enum_type(id);
    assert_eq!(e.element_type, Some(TypeId::STRING));
    assert_eq!(e.members, vec!["RED".to_string(), "GREEN".to_string()]);
    assert_eq!(info.format_type(ty), "ns.Color");
}

#[test]
fn test_enum_without_literal_is_malformed() {
    let info = run(vec![
        Stmt::var("E", Some(Expr::num(3.0))).with_doc(JsDoc::new().with_enum(None)),
    ]);
    let codes = get_error_codes(&info);
    assert!(
        codes.contains(&diagnostic_codes::MALFORMED_ENUM),
        "expected MALFORMED_ENUM, got {:?}",
        codes
    );
}

#[test]
fn test_enum_duplicate_and_non_constant_keys() {
    let statements = vec![
        Stmt::var(
            "E",
            Some(Expr::object([
                ObjectProp::new("A", Expr::num(1.0)),
                ObjectProp::new("A", Expr::num(2.0)),
                ObjectProp::new("lower", Expr::num(3.0)),
            ])),
        )
        .with_doc(JsDoc::new().with_enum(None)),
    ];
    let lenient = run(statements.clone());
    let codes = get_error_codes(&lenient);
    assert_eq!(codes, vec![diagnostic_codes::DUPLICATE_PROP_IN_ENUM]);

    let strict = run_with(
        statements,
        GlobalTypeInfoOptions {
            enum_key_style: EnumKeyStyle::UpperCase,
            ..GlobalTypeInfoOptions::default()
        },
    );
    let codes = get_error_codes(&strict);
    assert!(codes.contains(&diagnostic_codes::DUPLICATE_PROP_IN_ENUM), "{:?}", codes);
    assert!(codes.contains(&diagnostic_codes::ENUM_NOT_CONSTANT), "{:?}", codes);
}

#[test]
fn test_anonymous_constructor_is_reported() {
    let ctor = FunctionLit::anonymous().with_doc(JsDoc::new().constructor());
    let info = run(vec![Stmt::expr(Expr::function(ctor).call([]))]);
    let codes = get_error_codes(&info);
    assert!(
        codes.contains(&diagnostic_codes::ANONYMOUS_NOMINAL_TYPE),
        "expected ANONYMOUS_NOMINAL_TYPE, got {:?}",
        codes
    );
    assert_eq!(info.table().nominal_count(), 0);
}

#[test]
fn test_struct_without_constructor_is_reported() {
    let info = run(vec![Stmt::function(
        FunctionLit::named("f").with_doc(JsDoc::new().with_struct()),
    )]);
    let codes = get_error_codes(&info);
    assert!(
        codes.contains(&diagnostic_codes::CONSTRUCTOR_REQUIRED),
        "expected CONSTRUCTOR_REQUIRED, got {:?}",
        codes
    );
}

#[test]
fn test_param_not_in_parameter_list() {
    let info = run(vec![Stmt::function(
        FunctionLit::named("f")
            .params(["a"])
            .with_doc(JsDoc::new().param("a", TypeExpr::name("number")).param("b", TypeExpr::name("string"))),
    )]);
    let diag = info
        .diagnostics()
        .iter()
        .find(|d| d.code == diagnostic_codes::INEXISTENT_PARAM)
        .expect("INEXISTENT_PARAM");
    assert_eq!(diag.args, vec!["b".to_string(), "f".to_string()]);
}

#[test]
fn test_class_on_namespace_is_a_sub_namespace() {
    let ctor = FunctionLit::anonymous().with_doc(JsDoc::new().constructor());
    let info = run(vec![
        namespace("ns"),
        Stmt::expr(Expr::qname("ns.Foo").assign(Expr::function(ctor))),
        typed_var("f", TypeExpr::name("ns.Foo")),
    ]);
    let codes = get_error_codes(&info);
    assert!(codes.is_empty(), "unexpected diagnostics: {:?}", codes);
    let id = info.table().nominal_by_name("ns.Foo").expect("ns.Foo registered");
    let ty = info.declared_type_of(info.global_scope(), "f").unwrap();
    assert_eq!(info.interner().nominal_ref(ty).map(|r| r.id), Some(id));
    assert_eq!(info.table().nominal_name(id), "ns.Foo");
}

#[test]
fn test_unknown_type_name_reported_once_per_site() {
    let info = run(vec![typed_var(
        "x",
        TypeExpr::union([TypeExpr::name("Nope"), TypeExpr::name("Nope")]),
    )]);
    let codes = get_error_codes(&info);
    assert_eq!(codes, vec![diagnostic_codes::UNRECOGNIZED_TYPE_NAME]);

    let quiet = run_with(
        vec![typed_var("x", TypeExpr::name("Nope"))],
        GlobalTypeInfoOptions {
            report_unknown_type_names: false,
            ..GlobalTypeInfoOptions::default()
        },
    );
    assert!(quiet.diagnostics().is_empty());
}

/// Knows one host-provided type name and defers everything else.
struct HostResolver {
    inner: JsDocTypeResolver,
}

impl HostResolver {
    fn is_host_name(annotation: &TypeExpr) -> bool {
        matches!(annotation, TypeExpr::Name { name } if name == "HostString")
    }
}

impl DeclaredTypeResolver for HostResolver {
    fn declared_type(&mut self, annotation: &TypeExpr, cx: &ResolveContext<'_>) -> TypeId {
        if Self::is_host_name(annotation) {
            return TypeId::STRING;
        }
        self.inner.declared_type(annotation, cx)
    }

    fn has_known_type(&self, annotation: &TypeExpr, cx: &ResolveContext<'_>) -> bool {
        Self::is_host_name(annotation) || self.inner.has_known_type(annotation, cx)
    }

    fn nominal_type(&mut self, annotation: &TypeExpr, cx: &ResolveContext<'_>) -> Option<NominalRef> {
        self.inner.nominal_type(annotation, cx)
    }

    fn implemented_interfaces(&mut self, doc: &JsDoc, cx: &ResolveContext<'_>) -> Vec<NominalRef> {
        self.inner.implemented_interfaces(doc, cx)
    }

    fn extended_interfaces(&mut self, doc: &JsDoc, cx: &ResolveContext<'_>) -> Vec<NominalRef> {
        self.inner.extended_interfaces(doc, cx)
    }

    fn function_type(
        &mut self,
        doc: Option<&JsDoc>,
        formals: &[String],
        cx: &ResolveContext<'_>,
    ) -> DeclaredFunctionType {
        self.inner.function_type(doc, formals, cx)
    }

    fn resolve_typedef(&mut self, id: TypedefId, cx: &ResolveContext<'_>) -> TypeId {
        self.inner.resolve_typedef(id, cx)
    }

    fn resolve_enum(&mut self, annotation: Option<&TypeExpr>, cx: &ResolveContext<'_>) -> TypeId {
        self.inner.resolve_enum(annotation, cx)
    }

    fn take_unknown_type_names(&mut self) -> Vec<(NodeIndex, String)> {
        self.inner.take_unknown_type_names()
    }

    fn take_warnings(&mut self) -> Vec<(NodeIndex, String)> {
        self.inner.take_warnings()
    }
}

#[test]
fn test_custom_resolver_supplies_host_names() {
    let program = lower(&SourceFile::new(
        "test.js",
        [
            typed_var("s", TypeExpr::name("HostString")),
            typed_var("u", TypeExpr::name("Missing")),
        ],
    ));
    let mut builder = GlobalTypeInfoBuilder::new(&program).with_resolver(Box::new(HostResolver {
        inner: JsDocTypeResolver::new(),
    }));
    builder.build_scopes().unwrap();
    builder.finalize_nominal_types().unwrap();
    let info = builder.finish();

    assert_eq!(info.declared_type_of(info.global_scope(), "s"), Some(TypeId::STRING));
    let unknown: Vec<&[String]> = info
        .diagnostics()
        .iter()
        .filter(|d| d.code == diagnostic_codes::UNRECOGNIZED_TYPE_NAME)
        .map(|d| d.args.as_slice())
        .collect();
    assert_eq!(unknown, vec![&["Missing".to_string()][..]]);
}
