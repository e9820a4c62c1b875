use colored::Colorize;
use serde_json::json;

use crate::cli::driver::{CheckResult, ScopeSummary};
use gti_common::{Diagnostic, DiagnosticCategory};

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    /// `file:offset - error GTI7009: message`
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = if diagnostic.file.is_empty() {
            "<unknown>".to_string()
        } else {
            format!("{}:{}", diagnostic.file, diagnostic.start)
        };
        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        let code = self.format_code(diagnostic.code);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);
        output
    }

    pub fn render_summary(&self, result: &CheckResult) -> String {
        let errors = result.error_count();
        let warnings = result.diagnostics.len() - errors;
        let line = format!(
            "{}: {} error(s), {} warning(s); {} type(s) finalized",
            result.file_name, errors, warnings, result.stats.finalized
        );
        if !self.color {
            return line;
        }
        if errors > 0 {
            line.red().to_string()
        } else {
            line.green().to_string()
        }
    }

    pub fn render_scopes(&self, scopes: &[ScopeSummary]) -> String {
        let mut out = String::new();
        for scope in scopes {
            let header = format!("scope {} {}", scope.id, scope.name);
            if self.color {
                out.push_str(&header.bold().to_string());
            } else {
                out.push_str(&header);
            }
            if let Some(parent) = scope.parent {
                out.push_str(&format!(" (in {parent})"));
            }
            out.push('\n');
            for binding in &scope.bindings {
                let ty = binding.ty.as_deref().unwrap_or("<undeclared>");
                out.push_str(&format!("  {}: {}\n", binding.name, ty));
            }
        }
        out
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };

        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }

        let label = format!("GTI{}", code);
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}

/// The whole result as one JSON document.
pub fn render_json(result: &CheckResult) -> serde_json::Result<String> {
    let mut value = json!({
        "file": result.file_name,
        "diagnostics": result.diagnostics,
        "finalized": result.stats.finalized,
        "requeues": result.stats.requeues,
    });
    if let Some(scopes) = &result.scopes {
        value["scopes"] = serde_json::to_value(scopes)?;
    }
    serde_json::to_string_pretty(&value)
}
