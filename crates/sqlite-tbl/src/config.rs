//! Numeric template file for `--format-file`.
//!
//! ```json
//! {
//!   "defaults": { "integer": "%'d", "float": "%'.2f" },
//!   "columns":  { "amount": "$%'.2f", "year": "%d" }
//! }
//! ```
//!
//! Both sections are optional.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::AppResult;
use crate::render::registry::FormatRegistry;
use crate::render::row::RowRenderer;
use crate::render::template::NumericTemplate;

/// Default templates for numeric cells without an override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultTemplates {
    #[serde(default)]
    pub integer: Option<String>,
    #[serde(default)]
    pub float: Option<String>,
}

/// Contents of a `--format-file` JSON document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatFile {
    #[serde(default)]
    pub defaults: DefaultTemplates,
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
}

impl FormatFile {
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let file = serde_json::from_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded format file");
        Ok(file)
    }
}

/// Builds the row renderer from the optional format file and `-p` directives.
///
/// File entries go in first so command-line directives replace them.
/// Unusable templates are logged and skipped.
pub fn build_renderer<I, S>(file: Option<FormatFile>, directives: I) -> RowRenderer
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let file = file.unwrap_or_default();
    let mut registry = FormatRegistry::new();
    for (column, template) in &file.columns {
        if let Err(e) = registry.register(column, template) {
            tracing::warn!("{e}");
        }
    }
    registry.apply_directives(directives);
    if !registry.is_empty() {
        tracing::debug!(overrides = registry.len(), "column format overrides registered");
    }

    let integer = default_template(file.defaults.integer.as_deref(), "integer")
        .unwrap_or_else(NumericTemplate::grouped_integer);
    let float = default_template(file.defaults.float.as_deref(), "float")
        .unwrap_or_else(NumericTemplate::grouped_float);
    RowRenderer::new(registry, integer, float)
}

fn default_template(template: Option<&str>, kind: &str) -> Option<NumericTemplate> {
    match template?.parse() {
        Ok(t) => Some(t),
        Err(e) => {
            tracing::warn!(kind, "ignoring default template: {e}");
            None
        }
    }
}
