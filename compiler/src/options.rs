use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default ceiling on element nesting (column sets inside columns).
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// How failed field assertions are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    /// Failures drop the offending element silently.
    Off,
    /// Failures drop the offending element and emit a warning.
    #[default]
    Warning,
    /// Failures abort the whole compilation.
    Error,
}

impl ValidationLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationLevel::Off => "off",
            ValidationLevel::Warning => "warning",
            ValidationLevel::Error => "error",
        }
    }
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(ValidationLevel::Off),
            "warning" => Ok(ValidationLevel::Warning),
            "error" => Ok(ValidationLevel::Error),
            other => Err(format!(
                "unknown validation level '{}' (expected off, warning or error)",
                other
            )),
        }
    }
}

/// Options fixed for the lifetime of a [`Compiler`](crate::Compiler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    pub validate: ValidationLevel,
    /// Locale used to pick `i18n` text, e.g. `en_us`.
    pub locale: Option<String>,
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            validate: ValidationLevel::default(),
            locale: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CompileOptions {
    pub fn with_validate(mut self, validate: ValidationLevel) -> Self {
        self.validate = validate;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_parse_from_their_names() {
        for level in [ValidationLevel::Off, ValidationLevel::Warning, ValidationLevel::Error] {
            assert_eq!(level.as_str().parse::<ValidationLevel>(), Ok(level));
        }
        assert!("strict".parse::<ValidationLevel>().is_err());
    }

    #[test]
    fn defaults() {
        let options = CompileOptions::default();
        assert_eq!(options.validate, ValidationLevel::Warning);
        assert_eq!(options.locale, None);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let options: CompileOptions =
            serde_json::from_str(r#"{"validate": "error"}"#).expect("deserialize");
        assert_eq!(options, CompileOptions::default().with_validate(ValidationLevel::Error));
    }
}
