//! Owned syntax tree.
//!
//! This is the interchange form: it deserializes from JSON for the CLI and
//! has small constructors so tests can write programs directly. Lower it
//! with [`crate::lower`] before running the builder.

use crate::doc::{JsDoc, TypeExpr};
use crate::node::{BinaryOp, UnaryOp, VarKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub file_name: String,
    #[serde(default)]
    pub statements: Vec<Stmt>,
    /// Declarations-only code processed before `statements`.
    #[serde(default)]
    pub externs: Vec<Stmt>,
}

impl SourceFile {
    pub fn new(file_name: impl Into<String>, statements: impl IntoIterator<Item = Stmt>) -> Self {
        Self {
            file_name: file_name.into(),
            statements: statements.into_iter().collect(),
            externs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_externs(mut self, externs: impl IntoIterator<Item = Stmt>) -> Self {
        self.externs = externs.into_iter().collect();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VarDeclarator {
    pub name: String,
    #[serde(default)]
    pub init: Option<Expr>,
    #[serde(default)]
    pub doc: Option<JsDoc>,
}

impl VarDeclarator {
    pub fn new(name: impl Into<String>, init: Option<Expr>) -> Self {
        Self {
            name: name.into(),
            init,
            doc: None,
        }
    }

    #[must_use]
    pub fn with_doc(mut self, doc: JsDoc) -> Self {
        self.doc = Some(doc);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    pub name: String,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stmt {
    Var {
        #[serde(default = "default_var_kind")]
        var_kind: VarKind,
        declarations: Vec<VarDeclarator>,
        #[serde(default)]
        doc: Option<JsDoc>,
    },
    Function {
        function: FunctionLit,
    },
    Expr {
        expr: Expr,
        #[serde(default)]
        doc: Option<JsDoc>,
    },
    Return {
        #[serde(default)]
        expr: Option<Expr>,
    },
    If {
        condition: Expr,
        #[serde(default)]
        then_branch: Vec<Stmt>,
        #[serde(default)]
        else_branch: Vec<Stmt>,
    },
    Block {
        #[serde(default)]
        statements: Vec<Stmt>,
    },
    Try {
        #[serde(default)]
        block: Vec<Stmt>,
        #[serde(default)]
        catch: Option<CatchClause>,
        #[serde(default)]
        finally: Vec<Stmt>,
    },
}

fn default_var_kind() -> VarKind {
    VarKind::Var
}

impl Stmt {
    pub fn var(name: impl Into<String>, init: Option<Expr>) -> Self {
        Self::declare(VarKind::Var, vec![VarDeclarator::new(name, init)])
    }

    pub fn let_(name: impl Into<String>, init: Option<Expr>) -> Self {
        Self::declare(VarKind::Let, vec![VarDeclarator::new(name, init)])
    }

    pub fn const_(name: impl Into<String>, init: Option<Expr>) -> Self {
        Self::declare(VarKind::Const, vec![VarDeclarator::new(name, init)])
    }

    pub fn declare(var_kind: VarKind, declarations: Vec<VarDeclarator>) -> Self {
        Self::Var {
            var_kind,
            declarations,
            doc: None,
        }
    }

    pub fn expr(expr: Expr) -> Self {
        Self::Expr { expr, doc: None }
    }

    pub fn function(function: FunctionLit) -> Self {
        Self::Function { function }
    }

    pub fn ret(expr: Option<Expr>) -> Self {
        Self::Return { expr }
    }

    pub fn block(statements: impl IntoIterator<Item = Stmt>) -> Self {
        Self::Block {
            statements: statements.into_iter().collect(),
        }
    }

    pub fn if_(condition: Expr, then_branch: impl IntoIterator<Item = Stmt>) -> Self {
        Self::If {
            condition,
            then_branch: then_branch.into_iter().collect(),
            else_branch: Vec::new(),
        }
    }

    pub fn try_catch(
        block: impl IntoIterator<Item = Stmt>,
        name: impl Into<String>,
        body: impl IntoIterator<Item = Stmt>,
    ) -> Self {
        Self::Try {
            block: block.into_iter().collect(),
            catch: Some(CatchClause {
                name: name.into(),
                body: body.into_iter().collect(),
            }),
            finally: Vec::new(),
        }
    }

    /// Attach a documentation comment to the statement (or to the function
    /// it declares).
    #[must_use]
    pub fn with_doc(mut self, new_doc: JsDoc) -> Self {
        match &mut self {
            Self::Var { doc, .. } | Self::Expr { doc, .. } => *doc = Some(new_doc),
            Self::Function { function } => function.doc = Some(new_doc),
            _ => {}
        }
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionLit {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub body: Vec<Stmt>,
    #[serde(default)]
    pub doc: Option<JsDoc>,
}

impl FunctionLit {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn params<S: Into<String>>(mut self, params: impl IntoIterator<Item = S>) -> Self {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl IntoIterator<Item = Stmt>) -> Self {
        self.body = body.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: JsDoc) -> Self {
        self.doc = Some(doc);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectProp {
    pub key: String,
    pub value: Expr,
    #[serde(default)]
    pub doc: Option<JsDoc>,
}

impl ObjectProp {
    pub fn new(key: impl Into<String>, value: Expr) -> Self {
        Self {
            key: key.into(),
            value,
            doc: None,
        }
    }

    #[must_use]
    pub fn with_doc(mut self, doc: JsDoc) -> Self {
        self.doc = Some(doc);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Name {
        name: String,
    },
    This,
    Number {
        value: f64,
    },
    Str {
        value: String,
    },
    True,
    False,
    Null,
    GetProp {
        object: Box<Expr>,
        property: String,
    },
    GetElem {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        #[serde(default)]
        arguments: Vec<Expr>,
    },
    New {
        callee: Box<Expr>,
        #[serde(default)]
        arguments: Vec<Expr>,
    },
    Object {
        #[serde(default)]
        properties: Vec<ObjectProp>,
        #[serde(default)]
        doc: Option<JsDoc>,
    },
    Array {
        #[serde(default)]
        elements: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        when_true: Box<Expr>,
        when_false: Box<Expr>,
    },
    Function {
        function: Box<FunctionLit>,
    },
    Cast {
        expression: Box<Expr>,
        ty: TypeExpr,
    },
}

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name { name: name.into() }
    }

    /// `a.b.c` as a chain of property accesses; a leading `this` segment
    /// becomes `This`.
    pub fn qname(dotted: &str) -> Self {
        let mut segments = dotted.split('.');
        let first = segments.next().unwrap_or_default();
        let head = if first == "this" {
            Self::This
        } else {
            Self::name(first)
        };
        segments.fold(head, |object, property| object.prop(property))
    }

    pub fn num(value: f64) -> Self {
        Self::Number { value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Str {
            value: value.into(),
        }
    }

    pub fn boolean(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }

    pub fn object(properties: impl IntoIterator<Item = ObjectProp>) -> Self {
        Self::Object {
            properties: properties.into_iter().collect(),
            doc: None,
        }
    }

    /// An object literal lending its properties to `target`.
    pub fn lends_object(target: &str, properties: impl IntoIterator<Item = ObjectProp>) -> Self {
        Self::Object {
            properties: properties.into_iter().collect(),
            doc: Some(JsDoc::new().lends(target)),
        }
    }

    pub fn array(elements: impl IntoIterator<Item = Expr>) -> Self {
        Self::Array {
            elements: elements.into_iter().collect(),
        }
    }

    pub fn function(function: FunctionLit) -> Self {
        Self::Function {
            function: Box::new(function),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn new_instance(callee: Expr, arguments: impl IntoIterator<Item = Expr>) -> Self {
        Self::New {
            callee: Box::new(callee),
            arguments: arguments.into_iter().collect(),
        }
    }

    pub fn cast(expression: Expr, ty: TypeExpr) -> Self {
        Self::Cast {
            expression: Box::new(expression),
            ty,
        }
    }

    #[must_use]
    pub fn prop(self, property: impl Into<String>) -> Self {
        Self::GetProp {
            object: Box::new(self),
            property: property.into(),
        }
    }

    #[must_use]
    pub fn assign(self, value: Expr) -> Self {
        Self::Assign {
            target: Box::new(self),
            value: Box::new(value),
        }
    }

    #[must_use]
    pub fn call(self, arguments: impl IntoIterator<Item = Expr>) -> Self {
        Self::Call {
            callee: Box::new(self),
            arguments: arguments.into_iter().collect(),
        }
    }
}
