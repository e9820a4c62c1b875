//! Load inputs, run the builder, and collect what the reporter prints.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use crate::cli::args::CheckArgs;
use gti_ast::{SourceFile, lower};
use gti_binder::{FinalizeStats, GlobalTypeInfo, GlobalTypeInfoOptions, process};
use gti_common::Diagnostic;

/// One scope of the result, with its names rendered as type strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScopeSummary {
    pub id: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u32>,
    pub bindings: Vec<BindingSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BindingSummary {
    pub name: String,
    /// `None` when the name has no declared type.
    #[serde(rename = "type")]
    pub ty: Option<String>,
}

#[derive(Debug)]
pub struct CheckResult {
    pub file_name: String,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: FinalizeStats,
    /// Filled in with `--dump-scopes`.
    pub scopes: Option<Vec<ScopeSummary>>,
}

impl CheckResult {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }
}

pub fn read_source_file(path: &Path) -> Result<SourceFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut file: SourceFile = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse source file {}", path.display()))?;
    if file.file_name.is_empty() {
        file.file_name = path.display().to_string();
    }
    Ok(file)
}

/// Options from `path`, or the defaults when no config file is given.
pub fn load_options(path: Option<&Path>) -> Result<GlobalTypeInfoOptions> {
    let Some(path) = path else {
        return Ok(GlobalTypeInfoOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

pub fn check(args: &CheckArgs) -> Result<CheckResult> {
    let mut file = read_source_file(&args.file)?;
    if let Some(externs) = args.externs.as_deref() {
        let externs = read_source_file(externs)?;
        file.externs.extend(externs.statements);
        file.externs.extend(externs.externs);
    }
    let mut options = load_options(args.config.as_deref())?;
    if let Some(ceiling) = args.max_worklist_iterations {
        options.max_worklist_iterations = ceiling;
    }
    debug!(file = %file.file_name, ?options, "checking");

    let program = lower(&file);
    let result = process(&program, &options)
        .with_context(|| format!("global type info failed for {}", file.file_name))?;
    let scopes = args.dump_scopes.then(|| summarize_scopes(&result));
    let stats = result.finalize_stats();
    info!(
        file = %file.file_name,
        diagnostics = result.diagnostics().len(),
        finalized = stats.finalized,
        "check complete"
    );
    Ok(CheckResult {
        file_name: file.file_name,
        stats,
        scopes,
        diagnostics: result.into_diagnostics(),
    })
}

/// Scopes innermost first, names in declaration order.
pub fn summarize_scopes(info: &GlobalTypeInfo) -> Vec<ScopeSummary> {
    info.scopes()
        .map(|scope| {
            let mut names: Vec<&str> = scope.formals.iter().map(String::as_str).collect();
            names.extend(scope.bindings().map(|(name, _)| name));
            let bindings = names
                .into_iter()
                .map(|name| BindingSummary {
                    name: name.to_string(),
                    ty: info
                        .declared_type_of(scope.id, name)
                        .map(|ty| info.format_type(ty)),
                })
                .collect();
            ScopeSummary {
                id: scope.id.0,
                name: match &scope.name {
                    Some(name) => name.clone(),
                    None if scope.is_top_level() => "<global>".to_string(),
                    None => "<anonymous>".to_string(),
                },
                parent: scope.parent.map(|p| p.0),
                bindings,
            }
        })
        .collect()
}
