//! Lowering of the owned tree into a [`NodeArena`].

use crate::arena::NodeArena;
use crate::doc::JsDoc;
use crate::node::{NodeData, NodeFlags, NodeIndex};
use crate::tree::{CatchClause, Expr, FunctionLit, SourceFile, Stmt};
use gti_common::Span;

/// A lowered compilation unit.
#[derive(Clone, Debug)]
pub struct Program {
    pub file_name: String,
    pub arena: NodeArena,
    pub root: NodeIndex,
    /// Script of the declarations-only tree, or `NONE`.
    pub externs_root: NodeIndex,
}

/// Lower `file` into an arena. Externs are lowered first and flagged
/// `FROM_EXTERNS`; spans are node ordinals.
pub fn lower(file: &SourceFile) -> Program {
    let mut lowerer = Lowerer {
        arena: NodeArena::new(),
    };
    let externs_root = if file.externs.is_empty() {
        NodeIndex::NONE
    } else {
        let root = lowerer.script(&file.externs);
        lowerer.arena.link_subtree(root, NodeFlags::FROM_EXTERNS);
        root
    };
    let root = lowerer.script(&file.statements);
    lowerer.arena.link_subtree(root, NodeFlags::empty());
    Program {
        file_name: file.file_name.clone(),
        arena: lowerer.arena,
        root,
        externs_root,
    }
}

struct Lowerer {
    arena: NodeArena,
}

impl Lowerer {
    fn alloc(&mut self, data: NodeData) -> NodeIndex {
        let pos = self.arena.len() as u32;
        self.arena.alloc(data, Span::at(pos))
    }

    fn attach(&mut self, index: NodeIndex, doc: Option<&JsDoc>) {
        if let Some(doc) = doc {
            self.arena.set_doc(index, doc.clone());
        }
    }

    fn script(&mut self, statements: &[Stmt]) -> NodeIndex {
        let statements = self.statements(statements);
        self.alloc(NodeData::Script { statements })
    }

    fn block(&mut self, statements: &[Stmt]) -> NodeIndex {
        let statements = self.statements(statements);
        self.alloc(NodeData::Block { statements })
    }

    fn statements(&mut self, statements: &[Stmt]) -> Vec<NodeIndex> {
        statements.iter().map(|s| self.stmt(s)).collect()
    }

    fn stmt(&mut self, stmt: &Stmt) -> NodeIndex {
        match stmt {
            Stmt::Var {
                var_kind,
                declarations,
                doc,
            } => {
                let declarations = declarations
                    .iter()
                    .map(|decl| {
                        let initializer = self.opt_expr(decl.init.as_ref());
                        let index = self.alloc(NodeData::VarDecl {
                            name: decl.name.clone(),
                            initializer,
                        });
                        self.attach(index, decl.doc.as_ref());
                        index
                    })
                    .collect();
                let index = self.alloc(NodeData::Var {
                    var_kind: *var_kind,
                    declarations,
                });
                self.attach(index, doc.as_ref());
                index
            }
            Stmt::Function { function } => self.function(function),
            Stmt::Expr { expr, doc } => {
                let expression = self.expr(expr);
                let index = self.alloc(NodeData::ExprStatement { expression });
                // Comments document the assignment or access, not the statement.
                if self.arena.jsdoc(expression).is_none() {
                    self.attach(expression, doc.as_ref());
                } else {
                    self.attach(index, doc.as_ref());
                }
                index
            }
            Stmt::Return { expr } => {
                let expression = self.opt_expr(expr.as_ref());
                self.alloc(NodeData::Return { expression })
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let condition = self.expr(condition);
                let then_branch = self.block(then_branch);
                let else_branch = if else_branch.is_empty() {
                    NodeIndex::NONE
                } else {
                    self.block(else_branch)
                };
                self.alloc(NodeData::If {
                    condition,
                    then_branch,
                    else_branch,
                })
            }
            Stmt::Block { statements } => self.block(statements),
            Stmt::Try {
                block,
                catch,
                finally,
            } => {
                let block = self.block(block);
                let catch_clause = match catch {
                    Some(CatchClause { name, body }) => {
                        let body = self.block(body);
                        self.alloc(NodeData::CatchClause {
                            name: name.clone(),
                            body,
                        })
                    }
                    None => NodeIndex::NONE,
                };
                let finally_block = if finally.is_empty() {
                    NodeIndex::NONE
                } else {
                    self.block(finally)
                };
                self.alloc(NodeData::Try {
                    block,
                    catch_clause,
                    finally_block,
                })
            }
        }
    }

    fn function(&mut self, function: &FunctionLit) -> NodeIndex {
        let body = self.block(&function.body);
        let index = self.alloc(NodeData::Function {
            name: function.name.clone(),
            params: function.params.clone(),
            body,
        });
        self.attach(index, function.doc.as_ref());
        index
    }

    fn opt_expr(&mut self, expr: Option<&Expr>) -> NodeIndex {
        expr.map_or(NodeIndex::NONE, |e| self.expr(e))
    }

    fn exprs(&mut self, exprs: &[Expr]) -> Vec<NodeIndex> {
        exprs.iter().map(|e| self.expr(e)).collect()
    }

    fn expr(&mut self, expr: &Expr) -> NodeIndex {
        match expr {
            Expr::Name { name } => self.alloc(NodeData::Name { name: name.clone() }),
            Expr::This => self.alloc(NodeData::This),
            Expr::Number { value } => self.alloc(NodeData::Number { value: *value }),
            Expr::Str { value } => self.alloc(NodeData::Str {
                value: value.clone(),
            }),
            Expr::True => self.alloc(NodeData::True),
            Expr::False => self.alloc(NodeData::False),
            Expr::Null => self.alloc(NodeData::Null),
            Expr::GetProp { object, property } => {
                let object = self.expr(object);
                self.alloc(NodeData::GetProp {
                    object,
                    property: property.clone(),
                })
            }
            Expr::GetElem { object, index } => {
                let object = self.expr(object);
                let index = self.expr(index);
                self.alloc(NodeData::GetElem { object, index })
            }
            Expr::Assign { target, value } => {
                let target = self.expr(target);
                let value = self.expr(value);
                self.alloc(NodeData::Assign { target, value })
            }
            Expr::Call { callee, arguments } => {
                let callee = self.expr(callee);
                let arguments = self.exprs(arguments);
                self.alloc(NodeData::Call { callee, arguments })
            }
            Expr::New { callee, arguments } => {
                let callee = self.expr(callee);
                let arguments = self.exprs(arguments);
                self.alloc(NodeData::New { callee, arguments })
            }
            Expr::Object { properties, doc } => {
                let properties = properties
                    .iter()
                    .map(|prop| {
                        let value = self.expr(&prop.value);
                        let index = self.alloc(NodeData::PropertyAssignment {
                            key: prop.key.clone(),
                            value,
                        });
                        self.attach(index, prop.doc.as_ref());
                        index
                    })
                    .collect();
                let index = self.alloc(NodeData::ObjectLit { properties });
                self.attach(index, doc.as_ref());
                index
            }
            Expr::Array { elements } => {
                let elements = self.exprs(elements);
                self.alloc(NodeData::ArrayLit { elements })
            }
            Expr::Unary { op, operand } => {
                let operand = self.expr(operand);
                self.alloc(NodeData::Unary { op: *op, operand })
            }
            Expr::Binary { op, left, right } => {
                let left = self.expr(left);
                let right = self.expr(right);
                self.alloc(NodeData::Binary {
                    op: *op,
                    left,
                    right,
                })
            }
            Expr::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                let condition = self.expr(condition);
                let when_true = self.expr(when_true);
                let when_false = self.expr(when_false);
                self.alloc(NodeData::Conditional {
                    condition,
                    when_true,
                    when_false,
                })
            }
            Expr::Function { function } => self.function(function),
            Expr::Cast { expression, ty } => {
                let expression = self.expr(expression);
                let index = self.alloc(NodeData::Cast { expression });
                self.arena
                    .set_doc(index, JsDoc::new().with_type(ty.clone()));
                index
            }
        }
    }
}
