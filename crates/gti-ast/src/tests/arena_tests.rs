use super::*;
use crate::doc::TypeExpr;
use crate::lower::lower;
use crate::tree::{Expr, FunctionLit, ObjectProp, SourceFile, Stmt};

fn first_statement(program: &crate::Program) -> NodeIndex {
    program.arena.block_statements(program.root)[0]
}

fn expression_of(arena: &NodeArena, stmt: NodeIndex) -> NodeIndex {
    match arena.data(stmt) {
        Some(NodeData::ExprStatement { expression }) => *expression,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn test_qualified_name_of_property_chain() {
    let file = SourceFile::new("a.js", [Stmt::expr(Expr::qname("a.b.c"))]);
    let program = lower(&file);
    let expr = expression_of(&program.arena, first_statement(&program));
    let name = program.arena.qualified_name(expr).unwrap();
    assert_eq!(name.to_string(), "a.b.c");
    assert!(program.arena.is_qualified_name(expr));
}

#[test]
fn test_this_access_is_not_a_qualified_name() {
    let file = SourceFile::new("a.js", [Stmt::expr(Expr::qname("this.x"))]);
    let program = lower(&file);
    let expr = expression_of(&program.arena, first_statement(&program));
    assert!(program.arena.qualified_name(expr).is_none());
    let (object, prop) = program.arena.get_prop(expr).unwrap();
    assert!(program.arena.is_this(object));
    assert_eq!(prop, "x");
}

#[test]
fn test_function_name_forms() {
    let file = SourceFile::new(
        "a.js",
        [
            Stmt::function(FunctionLit::named("f")),
            Stmt::var("g", Some(Expr::function(FunctionLit::anonymous()))),
            Stmt::expr(Expr::qname("ns.Foo").assign(Expr::function(FunctionLit::anonymous()))),
            Stmt::expr(Expr::function(FunctionLit::anonymous()).call([])),
        ],
    );
    let program = lower(&file);
    let arena = &program.arena;
    let functions: Vec<NodeIndex> = (0..arena.len() as u32)
        .map(NodeIndex)
        .filter(|&i| arena.get(i).is_some_and(Node::is_function))
        .collect();
    assert_eq!(functions.len(), 4);
    assert_eq!(arena.function_name(functions[0]), FunctionName::Simple("f".into()));
    assert_eq!(arena.function_name(functions[1]), FunctionName::Simple("g".into()));
    match arena.function_name(functions[2]) {
        FunctionName::Qualified { name, .. } => assert_eq!(name.to_string(), "ns.Foo"),
        other => panic!("expected qualified name, got {other:?}"),
    }
    assert_eq!(arena.function_name(functions[3]), FunctionName::Anonymous);
}

#[test]
fn test_best_jsdoc_reaches_through_var_and_assignment() {
    let file = SourceFile::new(
        "a.js",
        [
            Stmt::var("x", Some(Expr::num(1.0)))
                .with_doc(JsDoc::new().with_type(TypeExpr::name("number"))),
            Stmt::expr(Expr::qname("Foo.prototype.m").assign(Expr::function(FunctionLit::anonymous())))
                .with_doc(JsDoc::new().returns(TypeExpr::name("string"))),
        ],
    );
    let program = lower(&file);
    let arena = &program.arena;
    let stmts = arena.block_statements(program.root).to_vec();
    let NodeData::Var { declarations, .. } = arena.data(stmts[0]).unwrap() else {
        panic!("expected var");
    };
    let doc = arena.best_jsdoc(declarations[0]).unwrap();
    assert_eq!(doc.ty, Some(TypeExpr::name("number")));

    let assign = expression_of(arena, stmts[1]);
    let NodeData::Assign { target, value } = arena.data(assign).unwrap() else {
        panic!("expected assignment");
    };
    assert!(arena.is_prototype_method(*value));
    assert!(arena.is_prototype_property(*target));
    assert_eq!(arena.prototype_property_declaration(stmts[1]), Some(*target));
    assert!(arena.best_jsdoc(*value).unwrap().returns.is_some());
}

#[test]
fn test_namespace_declaration_shapes() {
    let file = SourceFile::new(
        "a.js",
        [
            Stmt::var("ns", Some(Expr::object([]))).with_doc(JsDoc::new().constant()),
            Stmt::var("plain", Some(Expr::object([]))),
            Stmt::const_(
                "filled",
                Some(Expr::object([ObjectProp::new("a", Expr::num(1.0))])),
            ),
        ],
    );
    let program = lower(&file);
    let arena = &program.arena;
    let decls: Vec<NodeIndex> = arena
        .block_statements(program.root)
        .iter()
        .map(|&s| match arena.data(s) {
            Some(NodeData::Var { declarations, .. }) => declarations[0],
            _ => NodeIndex::NONE,
        })
        .collect();
    assert!(arena.is_namespace_decl(decls[0]));
    assert!(!arena.is_namespace_decl(decls[1]));
    assert!(!arena.is_namespace_decl(decls[2]));
}
