//! Type ids and interned type structure.

use serde::Serialize;

/// Handle to an interned type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const BOTTOM: TypeId = TypeId(0);
    /// `?`: compatible with everything in both directions.
    pub const UNKNOWN: TypeId = TypeId(1);
    /// `*`: supertype of everything.
    pub const TOP: TypeId = TypeId(2);
    pub const NUMBER: TypeId = TypeId(3);
    pub const STRING: TypeId = TypeId(4);
    pub const BOOLEAN: TypeId = TypeId(5);
    pub const TRUE: TypeId = TypeId(6);
    pub const FALSE: TypeId = TypeId(7);
    pub const NULL: TypeId = TypeId(8);
    pub const UNDEFINED: TypeId = TypeId(9);
    /// `Object`: supertype of every object, instance and function type.
    pub const TOP_OBJECT: TypeId = TypeId(10);

    /// Number of pre-registered intrinsic types.
    pub const INTRINSIC_COUNT: u32 = 11;

    #[must_use]
    pub const fn is_intrinsic(self) -> bool {
        self.0 < Self::INTRINSIC_COUNT
    }

    #[must_use]
    pub const fn is_unknown(self) -> bool {
        self.0 == Self::UNKNOWN.0
    }
}

/// Identity of a class or interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NominalId(pub u32);

/// Identity of an enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EnumId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    Bottom,
    Unknown,
    Top,
    Number,
    String,
    Boolean,
    True,
    False,
    Null,
    Undefined,
    TopObject,
}

impl IntrinsicKind {
    pub(crate) const ALL: [IntrinsicKind; TypeId::INTRINSIC_COUNT as usize] = [
        Self::Bottom,
        Self::Unknown,
        Self::Top,
        Self::Number,
        Self::String,
        Self::Boolean,
        Self::True,
        Self::False,
        Self::Null,
        Self::Undefined,
        Self::TopObject,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Unknown => "?",
            Self::Top => "*",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::TopObject => "Object",
        }
    }
}

/// A class or interface instantiated with type arguments. An empty argument
/// list means "uninstantiated" (arguments unknown).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NominalRef {
    pub id: NominalId,
    pub type_args: Vec<TypeId>,
}

impl NominalRef {
    #[must_use]
    pub const fn new(id: NominalId) -> Self {
        Self {
            id,
            type_args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_args(id: NominalId, type_args: Vec<TypeId>) -> Self {
        Self { id, type_args }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionShape {
    pub params: Vec<TypeId>,
    pub rest: Option<TypeId>,
    pub returns: TypeId,
    /// Set for constructor functions.
    pub constructs: Option<NominalId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Intrinsic(IntrinsicKind),
    /// Sorted, deduplicated, at least two members, no nested unions.
    Union(Vec<TypeId>),
    /// Structural record; properties sorted by name.
    Object(Vec<(String, TypeId)>),
    /// Instance of a class or interface.
    Nominal(NominalRef),
    Function(FunctionShape),
    TypeVar(String),
    /// A member of an enum.
    EnumElement(EnumId),
}
