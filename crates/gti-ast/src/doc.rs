//! Documentation-comment annotations.
//!
//! Annotation text is parsed upstream; the builder receives structured
//! values. `TypeExpr` is an unresolved type annotation: names in it are
//! resolved later against the scope that declares it.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Marker tags that carry no payload.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct DocFlags: u16 {
        const CONSTRUCTOR = 1 << 0;
        const INTERFACE = 1 << 1;
        const STRUCT = 1 << 2;
        const DICT = 1 << 3;
        const CONST = 1 << 4;
        const OVERRIDE = 1 << 5;
        const FINAL = 1 << 6;
        const ENUM = 1 << 7;
    }
}

/// An unresolved type annotation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    /// A (possibly dotted) type name: `number`, `Foo`, `ns.Bar`, `T`.
    Name { name: String },
    /// `*`
    Any,
    /// `?`
    Unknown,
    Union { members: Vec<TypeExpr> },
    /// `{a: number, b: string}`
    Record { fields: Vec<(String, TypeExpr)> },
    /// `function(number, string): boolean`
    Function {
        params: Vec<TypeExpr>,
        returns: Option<Box<TypeExpr>>,
    },
    /// `Foo<number>`
    Apply { base: String, args: Vec<TypeExpr> },
}

impl TypeExpr {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name { name: name.into() }
    }

    pub fn union(members: impl IntoIterator<Item = TypeExpr>) -> Self {
        Self::Union {
            members: members.into_iter().collect(),
        }
    }

    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, TypeExpr)>) -> Self {
        Self::Record {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn function(params: impl IntoIterator<Item = TypeExpr>, returns: Option<TypeExpr>) -> Self {
        Self::Function {
            params: params.into_iter().collect(),
            returns: returns.map(Box::new),
        }
    }

    pub fn apply(base: impl Into<String>, args: impl IntoIterator<Item = TypeExpr>) -> Self {
        Self::Apply {
            base: base.into(),
            args: args.into_iter().collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocParam {
    pub name: String,
    #[serde(default)]
    pub ty: Option<TypeExpr>,
    /// `@param {...number} rest`
    #[serde(default)]
    pub rest: bool,
}

/// A parsed documentation comment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsDoc {
    pub flags: DocFlags,
    /// `@type`
    pub ty: Option<TypeExpr>,
    /// `@typedef`
    pub typedef: Option<TypeExpr>,
    /// `@enum {T}`; the tag itself is `DocFlags::ENUM`.
    pub enum_type: Option<TypeExpr>,
    pub params: Vec<DocParam>,
    /// `@return`
    pub returns: Option<TypeExpr>,
    /// `@this`
    pub this_type: Option<TypeExpr>,
    /// `@extends`: the base class of a constructor, or the extended
    /// interfaces of an interface.
    pub extends: Vec<TypeExpr>,
    /// `@implements`
    pub implements: Vec<TypeExpr>,
    /// `@template`
    pub template: Vec<String>,
    /// `@lends {target}`
    pub lends: Option<String>,
    /// `@suppress {...}`
    pub suppressions: Vec<String>,
}

impl JsDoc {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Builder-style setters, used by tests and by callers constructing
    // annotations programmatically.

    #[must_use]
    pub fn constructor(mut self) -> Self {
        self.flags |= DocFlags::CONSTRUCTOR;
        self
    }

    #[must_use]
    pub fn interface(mut self) -> Self {
        self.flags |= DocFlags::INTERFACE;
        self
    }

    #[must_use]
    pub fn with_struct(mut self) -> Self {
        self.flags |= DocFlags::STRUCT;
        self
    }

    #[must_use]
    pub fn with_dict(mut self) -> Self {
        self.flags |= DocFlags::DICT;
        self
    }

    #[must_use]
    pub fn constant(mut self) -> Self {
        self.flags |= DocFlags::CONST;
        self
    }

    #[must_use]
    pub fn with_override(mut self) -> Self {
        self.flags |= DocFlags::OVERRIDE;
        self
    }

    #[must_use]
    pub fn with_final(mut self) -> Self {
        self.flags |= DocFlags::FINAL;
        self
    }

    #[must_use]
    pub fn with_type(mut self, ty: TypeExpr) -> Self {
        self.ty = Some(ty);
        self
    }

    #[must_use]
    pub fn with_typedef(mut self, ty: TypeExpr) -> Self {
        self.typedef = Some(ty);
        self
    }

    #[must_use]
    pub fn with_enum(mut self, element: Option<TypeExpr>) -> Self {
        self.flags |= DocFlags::ENUM;
        self.enum_type = element;
        self
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<String>, ty: TypeExpr) -> Self {
        self.params.push(DocParam {
            name: name.into(),
            ty: Some(ty),
            rest: false,
        });
        self
    }

    #[must_use]
    pub fn rest_param(mut self, name: impl Into<String>, ty: TypeExpr) -> Self {
        self.params.push(DocParam {
            name: name.into(),
            ty: Some(ty),
            rest: true,
        });
        self
    }

    #[must_use]
    pub fn returns(mut self, ty: TypeExpr) -> Self {
        self.returns = Some(ty);
        self
    }

    #[must_use]
    pub fn this(mut self, ty: TypeExpr) -> Self {
        self.this_type = Some(ty);
        self
    }

    #[must_use]
    pub fn extends(mut self, ty: TypeExpr) -> Self {
        self.extends.push(ty);
        self
    }

    #[must_use]
    pub fn implements(mut self, ty: TypeExpr) -> Self {
        self.implements.push(ty);
        self
    }

    #[must_use]
    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.template.push(name.into());
        self
    }

    #[must_use]
    pub fn lends(mut self, target: impl Into<String>) -> Self {
        self.lends = Some(target.into());
        self
    }

    #[must_use]
    pub fn suppress(mut self, warning: impl Into<String>) -> Self {
        self.suppressions.push(warning.into());
        self
    }

    // Queries

    pub fn is_constructor(&self) -> bool {
        self.flags.contains(DocFlags::CONSTRUCTOR)
    }

    pub fn is_interface(&self) -> bool {
        self.flags.contains(DocFlags::INTERFACE)
    }

    pub fn is_constructor_or_interface(&self) -> bool {
        self.flags
            .intersects(DocFlags::CONSTRUCTOR | DocFlags::INTERFACE)
    }

    pub fn makes_struct(&self) -> bool {
        self.flags.contains(DocFlags::STRUCT)
    }

    pub fn makes_dict(&self) -> bool {
        self.flags.contains(DocFlags::DICT)
    }

    /// `@const` and `@final` both make a declaration constant.
    pub fn is_constant(&self) -> bool {
        self.flags.intersects(DocFlags::CONST | DocFlags::FINAL)
    }

    pub fn is_override(&self) -> bool {
        self.flags.contains(DocFlags::OVERRIDE)
    }

    pub fn has_enum(&self) -> bool {
        self.flags.contains(DocFlags::ENUM)
    }

    pub fn has_typedef(&self) -> bool {
        self.typedef.is_some()
    }

    pub fn has_type(&self) -> bool {
        self.ty.is_some()
    }

    pub fn has_base_type(&self) -> bool {
        !self.extends.is_empty()
    }

    pub fn is_suppressed(&self, warning: &str) -> bool {
        self.suppressions.iter().any(|s| s == warning)
    }

    /// Whether the comment describes a function signature rather than a
    /// value type.
    pub fn contains_function_declaration(&self) -> bool {
        !self.params.is_empty()
            || self.returns.is_some()
            || self.this_type.is_some()
            || !self.template.is_empty()
            || self.is_constructor_or_interface()
    }

    /// The comment's single type annotation (`@type`, `@typedef` or `@enum`).
    pub fn type_annotation(&self) -> Option<&TypeExpr> {
        self.ty.as_ref().or(self.typedef.as_ref())
    }

    pub fn param_type(&self, name: &str) -> Option<&TypeExpr> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.ty.as_ref())
    }

    pub fn is_rest_param(&self, name: &str) -> bool {
        self.params.iter().any(|p| p.rest && p.name == name)
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }
}
