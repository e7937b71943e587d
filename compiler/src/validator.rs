use crate::error::{CompileError, DiagnosticError};
use crate::options::ValidationLevel;

/// A failed field assertion, before any severity policy is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub message: String,
}

/// Pure assertion: `Ok` when `condition` holds.
pub fn check(condition: bool, message: impl Into<String>) -> Result<(), Violation> {
    if condition {
        Ok(())
    } else {
        Err(Violation {
            message: message.into(),
        })
    }
}

/// Applies the instance's [`ValidationLevel`] to field assertions and
/// collects the resulting warnings.
#[derive(Debug)]
pub struct FieldValidator {
    level: ValidationLevel,
    source_id: usize,
    diagnostics: Vec<DiagnosticError>,
}

impl FieldValidator {
    pub fn new(level: ValidationLevel, source_id: usize) -> Self {
        FieldValidator {
            level,
            source_id,
            diagnostics: Vec::new(),
        }
    }

    /// Returns whether `condition` held. At `error` level a failure is
    /// returned as a fatal `SchemaViolation` instead.
    pub fn assert(
        &mut self,
        condition: bool,
        message: impl Into<String>,
        path: &str,
    ) -> Result<bool, DiagnosticError> {
        match check(condition, message) {
            Ok(()) => Ok(true),
            Err(violation) => self.apply(violation, path).map(|()| false),
        }
    }

    /// Like [`assert`](Self::assert) for several pre-computed conditions.
    /// Stops at the first failure, so at most one diagnostic is emitted.
    pub fn assert_all<M: Into<String>>(
        &mut self,
        checks: impl IntoIterator<Item = (bool, M)>,
        path: &str,
    ) -> Result<bool, DiagnosticError> {
        for (condition, message) in checks {
            if !self.assert(condition, message, path)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Record an informational diagnostic regardless of level.
    pub fn notice(&mut self, error: CompileError, path: &str) {
        self.diagnostics
            .push(DiagnosticError::warning(error, path, self.source_id));
    }

    /// Build a fatal diagnostic at `path`.
    pub fn fatal(&self, error: CompileError, path: &str) -> DiagnosticError {
        DiagnosticError::fatal(error, path, self.source_id)
    }

    pub fn diagnostics(&self) -> &[DiagnosticError] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<DiagnosticError> {
        self.diagnostics
    }

    fn apply(&mut self, violation: Violation, path: &str) -> Result<(), DiagnosticError> {
        let error = CompileError::SchemaViolation(violation.message);
        match self.level {
            ValidationLevel::Off => Ok(()),
            ValidationLevel::Warning => {
                self.notice(error, path);
                Ok(())
            }
            ValidationLevel::Error => Err(self.fatal(error, path)),
        }
    }
}

/// Why compiling a subtree stopped early.
#[derive(Debug)]
pub(crate) enum Flow {
    /// Drop this subtree and continue with its siblings.
    Skip,
    /// Abort the whole compilation.
    Abort(DiagnosticError),
}

impl From<DiagnosticError> for Flow {
    fn from(error: DiagnosticError) -> Self {
        Flow::Abort(error)
    }
}

pub(crate) type Step<T> = Result<T, Flow>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_is_pure() {
        assert_eq!(check(true, "unused"), Ok(()));
        assert_eq!(
            check(false, "img.alt is required"),
            Err(Violation {
                message: "img.alt is required".to_string()
            })
        );
    }

    #[test]
    fn off_returns_the_condition_silently() {
        let mut v = FieldValidator::new(ValidationLevel::Off, 0);
        assert_eq!(v.assert(true, "x", "elements[0]"), Ok(true));
        assert_eq!(v.assert(false, "x", "elements[0]"), Ok(false));
        assert!(v.diagnostics().is_empty());
    }

    #[test]
    fn warning_records_failures() {
        let mut v = FieldValidator::new(ValidationLevel::Warning, 4);
        assert_eq!(v.assert(false, "div.text is required", "elements[2]"), Ok(false));
        let diags = v.into_diagnostics();
        assert_eq!(diags.len(), 1);
        assert!(diags[0].is_warning);
        assert_eq!(diags[0].source_id, 4);
        assert_eq!(diags[0].path.as_deref(), Some("elements[2]"));
        assert_eq!(diags[0].to_string(), "div.text is required");
    }

    #[test]
    fn error_level_fails() {
        let mut v = FieldValidator::new(ValidationLevel::Error, 0);
        let err = v.assert(false, "img.alt is required", "elements[1]").unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(
            err.error,
            CompileError::SchemaViolation("img.alt is required".to_string())
        );
    }

    #[test]
    fn assert_all_stops_at_first_failure() {
        let mut v = FieldValidator::new(ValidationLevel::Warning, 0);
        let ok = v
            .assert_all(
                [(true, "a"), (false, "b is required"), (false, "c is required")],
                "elements[0]",
            )
            .expect("warning level never fails");
        assert!(!ok);
        assert_eq!(v.diagnostics().len(), 1);
        assert_eq!(v.diagnostics()[0].to_string(), "b is required");
    }

    #[test]
    fn notices_ignore_the_level() {
        let mut v = FieldValidator::new(ValidationLevel::Off, 0);
        v.notice(CompileError::NotImplemented("actions".into()), "elements[0]");
        assert_eq!(v.diagnostics().len(), 1);
    }
}
