use super::*;

#[test]
fn test_format_message_substitutes_positional_args() {
    let text = format_message("{0} extends non-object type {1}.", &["Foo", "number"]);
    assert_eq!(text, "Foo extends non-object type number.");
}

#[test]
fn test_from_code_uses_registered_template_and_category() {
    let diag = Diagnostic::from_code(
        "a.js",
        10,
        3,
        diagnostic_codes::INHERITANCE_CYCLE,
        &["Foo"],
    );
    assert_eq!(diag.code, diagnostic_codes::INHERITANCE_CYCLE);
    assert_eq!(diag.category, DiagnosticCategory::Error);
    assert_eq!(diag.message_text, "Cycle detected in inheritance chain of type Foo");
    assert_eq!(diag.args, vec!["Foo".to_string()]);
    assert!(diag.is_error());
}

#[test]
fn test_codes_are_unique() {
    let mut codes: Vec<u32> = DIAGNOSTIC_MESSAGES.iter().map(|m| m.code).collect();
    let total = codes.len();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), total, "duplicate diagnostic code in table");
}

#[test]
fn test_warning_category_lookup() {
    assert_eq!(
        get_diagnostic_category(diagnostic_codes::UNKNOWN_OVERRIDE),
        Some(DiagnosticCategory::Warning)
    );
    assert!(get_message_template(1).is_none());
}

#[test]
fn test_serialized_diagnostic_omits_empty_args() {
    let diag = Diagnostic::from_code("a.js", 0, 1, diagnostic_codes::INTERFACE_WITH_A_BODY, &[]);
    let json = serde_json::to_value(&diag).unwrap();
    assert!(json.get("args").is_none());
    assert_eq!(json["code"], diagnostic_codes::INTERFACE_WITH_A_BODY);
    assert_eq!(json["category"], "Error");
}
