//! Diagnostic codes, message templates and the lookup table.
use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const DUPLICATE_JSDOC: u32 = 7001;
    pub const REDECLARED_PROPERTY: u32 = 7002;
    pub const INVALID_PROP_OVERRIDE: u32 = 7003;
    pub const EXTENDS_NOT_ON_CTOR_OR_INTERF: u32 = 7004;
    pub const EXTENDS_NON_OBJECT: u32 = 7005;
    pub const CTOR_IN_DIFFERENT_SCOPE: u32 = 7006;
    pub const UNRECOGNIZED_TYPE_NAME: u32 = 7007;
    pub const INTERFACE_WITH_A_BODY: u32 = 7008;
    pub const INHERITANCE_CYCLE: u32 = 7009;
    pub const DICT_IMPLEMENTS_INTERF: u32 = 7010;
    pub const CONSTRUCTOR_REQUIRED: u32 = 7011;
    pub const INEXISTENT_PARAM: u32 = 7012;
    pub const IMPLEMENTS_WITHOUT_CONSTRUCTOR: u32 = 7013;
    pub const CONST_WITHOUT_INITIALIZER: u32 = 7014;
    pub const COULD_NOT_INFER_CONST_TYPE: u32 = 7015;
    pub const MISPLACED_CONST_ANNOTATION: u32 = 7016;
    pub const CANNOT_OVERRIDE_FINAL_METHOD: u32 = 7017;
    pub const CANNOT_INIT_TYPEDEF: u32 = 7018;
    pub const ANONYMOUS_NOMINAL_TYPE: u32 = 7019;
    pub const MALFORMED_ENUM: u32 = 7020;
    pub const DUPLICATE_PROP_IN_ENUM: u32 = 7021;
    pub const UNDECLARED_NAMESPACE: u32 = 7022;
    pub const BAD_JSDOC_ANNOTATION: u32 = 7023;
    pub const CONFLICTING_EXTENDED_TYPE: u32 = 7024;
    pub const CONFLICTING_IMPLEMENTED_TYPE: u32 = 7025;
    pub const CONFLICTING_SHAPE_TYPE: u32 = 7026;
    pub const ENUM_NOT_CONSTANT: u32 = 7027;
    pub const INCOMPATIBLE_EXTENDED_PROPERTY_TYPE: u32 = 7028;
    pub const MULTIPLE_VAR_DEF: u32 = 7029;
    pub const UNKNOWN_OVERRIDE: u32 = 7030;
    pub const INTERFACE_METHOD_NOT_IMPLEMENTED: u32 = 7031;
    pub const LENDS_ON_NON_OBJECT: u32 = 7032;
}

pub mod diagnostic_messages {
    pub const DUPLICATE_JSDOC: &str = "Found two JsDoc comments for variable: {0}";
    pub const REDECLARED_PROPERTY: &str = "Found two declarations for property {0} of type {1}.";
    pub const INVALID_PROP_OVERRIDE: &str = "Invalid redeclaration of property {0}.\ninherited type  : {1}\noverriding type : {2}";
    pub const EXTENDS_NOT_ON_CTOR_OR_INTERF: &str = "@extends used without @constructor or @interface for {0}.";
    pub const EXTENDS_NON_OBJECT: &str = "{0} extends non-object type {1}.";
    pub const CTOR_IN_DIFFERENT_SCOPE: &str = "Modifying the prototype is only allowed if the constructor is in the same scope.";
    pub const UNRECOGNIZED_TYPE_NAME: &str = "Type annotation references non-existent type {0}.";
    pub const INTERFACE_WITH_A_BODY: &str = "Interface definitions should have an empty body.";
    pub const INHERITANCE_CYCLE: &str = "Cycle detected in inheritance chain of type {0}";
    pub const DICT_IMPLEMENTS_INTERF: &str = "Class {0} is a dict. Dicts can't implement interfaces.";
    pub const CONSTRUCTOR_REQUIRED: &str = "{0} used without @constructor.";
    pub const INEXISTENT_PARAM: &str = "parameter {0} does not appear in {1}'s parameter list";
    pub const IMPLEMENTS_WITHOUT_CONSTRUCTOR: &str = "@implements used without @constructor or @interface for {0}";
    pub const CONST_WITHOUT_INITIALIZER: &str = "Constants must be initialized when they are defined.";
    pub const COULD_NOT_INFER_CONST_TYPE: &str = "All constants must be typed. The compiler could not infer the type of this constant. Please use an explicit type annotation.";
    pub const MISPLACED_CONST_ANNOTATION: &str = "This property can't be annotated as constant.";
    pub const CANNOT_OVERRIDE_FINAL_METHOD: &str = "Final method {0} cannot be overriden.";
    pub const CANNOT_INIT_TYPEDEF: &str = "A typedef variable represents a type name; it cannot be assigned a value.";
    pub const ANONYMOUS_NOMINAL_TYPE: &str = "Must specify a name when defining a class or interface.";
    pub const MALFORMED_ENUM: &str = "Enum definition must be an object literal.";
    pub const DUPLICATE_PROP_IN_ENUM: &str = "Property {0} appears twice in the enum declaration.";
    pub const UNDECLARED_NAMESPACE: &str = "Undeclared reference to {0}.";
    pub const BAD_JSDOC_ANNOTATION: &str = "Bad annotation: {0}";
    pub const CONFLICTING_EXTENDED_TYPE: &str = "{1} cannot extend this type; {0}s can only extend {0}s";
    pub const CONFLICTING_IMPLEMENTED_TYPE: &str = "{0} cannot implement this type; an interface can only extend, but not implement interfaces";
    pub const CONFLICTING_SHAPE_TYPE: &str = "{1} cannot extend this type; a {0} can only extend a {0}";
    pub const ENUM_NOT_CONSTANT: &str = "enum key {0} must be a syntactic constant";
    pub const INCOMPATIBLE_EXTENDED_PROPERTY_TYPE: &str = "Class {0} inherits property {1} from multiple interfaces with incompatible types.";
    pub const MULTIPLE_VAR_DEF: &str = "declaration of multiple variables with shared type information";
    pub const UNKNOWN_OVERRIDE: &str = "property {0} not defined on any supertype of {1}";
    pub const INTERFACE_METHOD_NOT_IMPLEMENTED: &str = "property {0} on interface {1} is not implemented by type {2}";
    pub const LENDS_ON_NON_OBJECT: &str = "May only lend properties to object types. {0} has type {1}.";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::DUPLICATE_JSDOC,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::DUPLICATE_JSDOC,
    },
    DiagnosticMessage {
        code: diagnostic_codes::REDECLARED_PROPERTY,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::REDECLARED_PROPERTY,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_PROP_OVERRIDE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_PROP_OVERRIDE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXTENDS_NOT_ON_CTOR_OR_INTERF,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXTENDS_NOT_ON_CTOR_OR_INTERF,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXTENDS_NON_OBJECT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXTENDS_NON_OBJECT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CTOR_IN_DIFFERENT_SCOPE,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::CTOR_IN_DIFFERENT_SCOPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNRECOGNIZED_TYPE_NAME,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::UNRECOGNIZED_TYPE_NAME,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INTERFACE_WITH_A_BODY,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INTERFACE_WITH_A_BODY,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INHERITANCE_CYCLE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INHERITANCE_CYCLE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DICT_IMPLEMENTS_INTERF,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DICT_IMPLEMENTS_INTERF,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONSTRUCTOR_REQUIRED,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::CONSTRUCTOR_REQUIRED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INEXISTENT_PARAM,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::INEXISTENT_PARAM,
    },
    DiagnosticMessage {
        code: diagnostic_codes::IMPLEMENTS_WITHOUT_CONSTRUCTOR,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::IMPLEMENTS_WITHOUT_CONSTRUCTOR,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONST_WITHOUT_INITIALIZER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CONST_WITHOUT_INITIALIZER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::COULD_NOT_INFER_CONST_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::COULD_NOT_INFER_CONST_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MISPLACED_CONST_ANNOTATION,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::MISPLACED_CONST_ANNOTATION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_OVERRIDE_FINAL_METHOD,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_OVERRIDE_FINAL_METHOD,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_INIT_TYPEDEF,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_INIT_TYPEDEF,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ANONYMOUS_NOMINAL_TYPE,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::ANONYMOUS_NOMINAL_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MALFORMED_ENUM,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::MALFORMED_ENUM,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DUPLICATE_PROP_IN_ENUM,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::DUPLICATE_PROP_IN_ENUM,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNDECLARED_NAMESPACE,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::UNDECLARED_NAMESPACE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::BAD_JSDOC_ANNOTATION,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::BAD_JSDOC_ANNOTATION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONFLICTING_EXTENDED_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CONFLICTING_EXTENDED_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONFLICTING_IMPLEMENTED_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CONFLICTING_IMPLEMENTED_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONFLICTING_SHAPE_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CONFLICTING_SHAPE_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ENUM_NOT_CONSTANT,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::ENUM_NOT_CONSTANT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INCOMPATIBLE_EXTENDED_PROPERTY_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INCOMPATIBLE_EXTENDED_PROPERTY_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MULTIPLE_VAR_DEF,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::MULTIPLE_VAR_DEF,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNKNOWN_OVERRIDE,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::UNKNOWN_OVERRIDE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INTERFACE_METHOD_NOT_IMPLEMENTED,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::INTERFACE_METHOD_NOT_IMPLEMENTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::LENDS_ON_NON_OBJECT,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::LENDS_ON_NON_OBJECT,
    },
];
