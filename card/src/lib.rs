pub mod element;
pub mod header;
pub mod markdown;
pub mod output;
pub mod parser;
pub mod style;
pub mod text;

use serde_json::Value;

/// A parsed card document.
///
/// Fields are kept as raw JSON values: the grammar is enforced by the
/// compiler so that a malformed field becomes a diagnostic instead of a
/// parse failure.
#[derive(Debug, Clone, PartialEq)]
pub struct CardDocument {
    /// Card-level options. Reserved, never consulted.
    pub config: Option<Value>,
    /// The `header` section, `None` when absent or `null`.
    pub header: Option<Value>,
    /// The `elements` section, `None` when absent or `null`.
    pub elements: Option<Value>,
    /// The source file ID (for error reporting with codespan-reporting).
    pub source_id: usize,
}
