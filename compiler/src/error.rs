use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};

use card::parser::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// The input is not a well-formed card document.
    MalformedDocument(String),
    /// A field or tag contract was violated.
    SchemaViolation(String),
    /// A tag outside its grammar. `field` names where the tag was read.
    UnknownTag {
        field: &'static str,
        tag: String,
        allowed: String,
    },
    /// A recognized tag that produces no output yet. Informational.
    NotImplemented(String),
    /// Nesting went past the configured depth limit.
    DepthExceeded(usize),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::MalformedDocument(msg) => write!(f, "{}", msg),
            CompileError::SchemaViolation(msg) => write!(f, "{}", msg),
            CompileError::UnknownTag { field, tag, allowed } => {
                write!(f, "{} {} is not allowed, allowed values are {}", field, tag, allowed)
            }
            CompileError::NotImplemented(tag) => {
                write!(f, "element.tag {} is not implemented yet", tag)
            }
            CompileError::DepthExceeded(limit) => {
                write!(f, "nesting depth exceeds the limit of {}", limit)
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// A compile error or warning enriched with location information.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticError {
    pub error: CompileError,
    /// JSON path of the offending value, e.g. `elements[1]`.
    pub path: Option<String>,
    pub span: Option<Range<usize>>,
    pub source_id: usize,
    pub is_warning: bool,
    pub notes: Vec<String>,
}

impl DiagnosticError {
    /// A non-fatal diagnostic at a JSON path.
    pub fn warning(error: CompileError, path: &str, source_id: usize) -> Self {
        DiagnosticError {
            error,
            path: Some(path.to_string()),
            span: None,
            source_id,
            is_warning: true,
            notes: Vec::new(),
        }
    }

    /// A fatal diagnostic at a JSON path.
    pub fn fatal(error: CompileError, path: &str, source_id: usize) -> Self {
        DiagnosticError {
            is_warning: false,
            ..Self::warning(error, path, source_id)
        }
    }

    pub fn is_fatal(&self) -> bool {
        !self.is_warning
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let severity = if self.is_warning {
            Severity::Warning
        } else {
            Severity::Error
        };
        let labels = match &self.span {
            Some(span) => vec![Label::primary(self.source_id, span.clone())],
            None => Vec::new(),
        };
        let mut notes = Vec::new();
        if let Some(path) = &self.path {
            notes.push(format!("at {}", path));
        }
        notes.extend(self.notes.iter().cloned());
        Diagnostic::new(severity)
            .with_message(self.error.to_string())
            .with_labels(labels)
            .with_notes(notes)
    }
}

impl From<CompileError> for DiagnosticError {
    fn from(error: CompileError) -> Self {
        DiagnosticError {
            error,
            path: None,
            span: None,
            source_id: 0,
            is_warning: false,
            notes: Vec::new(),
        }
    }
}

impl From<ParseError> for DiagnosticError {
    fn from(error: ParseError) -> Self {
        DiagnosticError {
            error: CompileError::MalformedDocument(error.message),
            path: None,
            span: Some(error.span),
            source_id: error.file_id,
            is_warning: false,
            notes: error.notes,
        }
    }
}

impl fmt::Display for DiagnosticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl std::error::Error for DiagnosticError {}
