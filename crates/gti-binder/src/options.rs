//! Builder configuration.

use gti_common::limits::MAX_WORKLIST_ITERATIONS;
use serde::{Deserialize, Serialize};

/// Which object-literal keys are accepted as enum members.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumKeyStyle {
    /// Any non-empty key.
    #[default]
    Any,
    /// `UPPER_CASE_WITH_DIGITS`.
    UpperCase,
}

/// Project naming conventions consulted by the builder.
pub trait CodingConvention {
    fn is_valid_enum_key(&self, key: &str) -> bool;
}

impl CodingConvention for EnumKeyStyle {
    fn is_valid_enum_key(&self, key: &str) -> bool {
        match self {
            Self::Any => !key.is_empty(),
            Self::UpperCase => {
                key.chars().next().is_some_and(|c| c.is_ascii_uppercase())
                    && key
                        .chars()
                        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalTypeInfoOptions {
    /// Re-queue ceiling for the inheritance worklist.
    pub max_worklist_iterations: usize,
    pub enum_key_style: EnumKeyStyle,
    /// Report annotation names that resolve to nothing.
    pub report_unknown_type_names: bool,
}

impl Default for GlobalTypeInfoOptions {
    fn default() -> Self {
        Self {
            max_worklist_iterations: MAX_WORKLIST_ITERATIONS,
            enum_key_style: EnumKeyStyle::Any,
            report_unknown_type_names: true,
        }
    }
}

#[cfg(test)]
#[path = "tests/options_tests.rs"]
mod tests;
