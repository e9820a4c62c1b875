use super::*;

#[test]
fn test_missing_fields_take_defaults() {
    let options: GlobalTypeInfoOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, GlobalTypeInfoOptions::default());

    let options: GlobalTypeInfoOptions =
        serde_json::from_str(r#"{ "enum_key_style": "upper_case" }"#).unwrap();
    assert_eq!(options.enum_key_style, EnumKeyStyle::UpperCase);
    assert_eq!(options.max_worklist_iterations, MAX_WORKLIST_ITERATIONS);
    assert!(options.report_unknown_type_names);
}

#[test]
fn test_unknown_key_style_is_rejected() {
    let parsed = serde_json::from_str::<GlobalTypeInfoOptions>(r#"{ "enum_key_style": "camel" }"#);
    assert!(parsed.is_err());
}

#[test]
fn test_enum_key_conventions() {
    assert!(EnumKeyStyle::Any.is_valid_enum_key("red"));
    assert!(!EnumKeyStyle::Any.is_valid_enum_key(""));
    assert!(EnumKeyStyle::UpperCase.is_valid_enum_key("RED_2"));
    assert!(!EnumKeyStyle::UpperCase.is_valid_enum_key("Red"));
    assert!(!EnumKeyStyle::UpperCase.is_valid_enum_key("2RED"));
    assert!(!EnumKeyStyle::UpperCase.is_valid_enum_key(""));
}
