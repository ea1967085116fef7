use std::collections::BTreeMap;

use thiserror::Error;

use super::template::{NumericTemplate, TemplateError};

/// Separates the column name from its template in a `-p` directive.
pub const DIRECTIVE_SEPARATOR: char = ',';

#[derive(Debug, Error)]
pub enum DirectiveError {
    #[error("could not parse format argument '{0}'")]
    MissingSeparator(String),

    #[error("column '{column}': {source}")]
    Template {
        column: String,
        #[source]
        source: TemplateError,
    },
}

/// Per-column numeric templates, keyed by result column name.
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    overrides: BTreeMap<String, NumericTemplate>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `template` for `column`, replacing any earlier one.
    pub fn set_override(&mut self, column: impl Into<String>, template: NumericTemplate) {
        let column = column.into();
        if let Some(old) = self.overrides.insert(column.clone(), template) {
            tracing::debug!(column = %column, replaced = %old, "format override replaced");
        }
    }

    pub fn lookup<'a>(&'a self, column: &str, default: &'a NumericTemplate) -> &'a NumericTemplate {
        self.overrides.get(column).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Registers a `column,template` directive.
    ///
    /// The column name ends at the first separator; everything after it,
    /// commas included, is the template.
    pub fn apply_directive(&mut self, directive: &str) -> Result<(), DirectiveError> {
        let (column, template) = directive
            .split_once(DIRECTIVE_SEPARATOR)
            .ok_or_else(|| DirectiveError::MissingSeparator(directive.to_string()))?;
        self.register(column, template)
    }

    /// Parses and stores one template.
    pub fn register(&mut self, column: &str, template: &str) -> Result<(), DirectiveError> {
        let template = template
            .parse::<NumericTemplate>()
            .map_err(|source| DirectiveError::Template {
                column: column.to_string(),
                source,
            })?;
        self.set_override(column, template);
        Ok(())
    }

    /// Applies each directive in order. Bad directives are logged and skipped.
    pub fn apply_directives<I, S>(&mut self, directives: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for directive in directives {
            if let Err(e) = self.apply_directive(directive.as_ref()) {
                tracing::warn!("{e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NumericTemplate {
        s.parse().unwrap()
    }

    #[test]
    fn test_last_registration_wins() {
        let mut reg = FormatRegistry::new();
        reg.apply_directive("amount,%'.2f").unwrap();
        reg.apply_directive("amount,%d").unwrap();

        let default = t("%'f");
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.lookup("amount", &default).as_str(), "%d");
    }

    #[test]
    fn test_unregistered_column_falls_back_to_default() {
        let mut reg = FormatRegistry::new();
        reg.set_override("amount", t("%.1f"));
        let default = t("%'d");
        assert_eq!(reg.lookup("qty", &default).as_str(), "%'d");
    }

    #[test]
    fn test_directive_without_separator_is_rejected() {
        let mut reg = FormatRegistry::new();
        let err = reg.apply_directive("badformat").unwrap_err();
        assert!(matches!(err, DirectiveError::MissingSeparator(_)));
        assert_eq!(err.to_string(), "could not parse format argument 'badformat'");
        assert!(reg.is_empty());

        let default = t("%'d");
        assert_eq!(reg.lookup("badformat", &default).as_str(), "%'d");
    }

    #[test]
    fn test_template_may_contain_separator() {
        let mut reg = FormatRegistry::new();
        reg.apply_directive("total,%d, net").unwrap();
        let default = t("%d");
        assert_eq!(reg.lookup("total", &default).format_int(3), "3, net");
    }

    #[test]
    fn test_oversized_template_is_skipped() {
        let mut reg = FormatRegistry::new();
        reg.apply_directives(["a,%.70000f", "b,%99999999999999999999d"]);
        assert!(reg.is_empty());

        let err = reg.apply_directive("a,%.70000f").unwrap_err();
        assert!(matches!(
            err,
            DirectiveError::Template {
                source: TemplateError::TooWide { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_apply_directives_skips_bad_entries() {
        let mut reg = FormatRegistry::new();
        reg.apply_directives(["badformat", "a,%x", "b,%s", "c,%.1f"]);
        assert_eq!(reg.len(), 2);

        let default = t("%d");
        assert_eq!(reg.lookup("a", &default).as_str(), "%x");
        assert_eq!(reg.lookup("b", &default).as_str(), "%d");
        assert_eq!(reg.lookup("c", &default).as_str(), "%.1f");
    }
}
