use std::fmt;

use serde_json::{Map, Value};

/// Tags accepted in the top-level `elements` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementTag {
    ColumnSet,
    Div,
    Markdown,
    Hr,
    Img,
    Note,
    Actions,
}

impl ElementTag {
    pub const ALL: [ElementTag; 7] = [
        ElementTag::ColumnSet,
        ElementTag::Div,
        ElementTag::Markdown,
        ElementTag::Hr,
        ElementTag::Img,
        ElementTag::Note,
        ElementTag::Actions,
    ];

    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementTag::ColumnSet => "column_set",
            ElementTag::Div => "div",
            ElementTag::Markdown => "markdown",
            ElementTag::Hr => "hr",
            ElementTag::Img => "img",
            ElementTag::Note => "note",
            ElementTag::Actions => "actions",
        }
    }

    /// Recognized tags that do not produce output yet.
    pub fn is_deferred(self) -> bool {
        matches!(self, ElementTag::Actions | ElementTag::Markdown)
    }

    /// Comma-separated list of every accepted tag, for error messages.
    pub fn allowed() -> String {
        join_tags(Self::ALL.iter().map(|t| t.as_str()))
    }
}

impl fmt::Display for ElementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tags accepted inside a `note` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbeddedTag {
    PlainText,
    LarkMd,
    Img,
}

impl EmbeddedTag {
    pub const ALL: [EmbeddedTag; 3] = [EmbeddedTag::PlainText, EmbeddedTag::LarkMd, EmbeddedTag::Img];

    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmbeddedTag::PlainText => "plain_text",
            EmbeddedTag::LarkMd => "lark_md",
            EmbeddedTag::Img => "img",
        }
    }

    pub fn allowed() -> String {
        join_tags(Self::ALL.iter().map(|t| t.as_str()))
    }
}

impl fmt::Display for EmbeddedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn join_tags<'a>(tags: impl Iterator<Item = &'a str>) -> String {
    tags.collect::<Vec<_>>().join(", ")
}

// ---------------------------------------------------------------------------
// Field access
// ---------------------------------------------------------------------------

/// A string field that is present and non-empty.
pub fn non_empty_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// A non-empty array field.
pub fn non_empty_array<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a [Value]> {
    object
        .get(key)
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .map(Vec::as_slice)
}

/// Loose truthiness used by card flags: `null`, `false`, `0`, and `""` are
/// false, everything else (including empty arrays and objects) is true.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Read a number given either as a JSON number or as a numeric string.
/// Strings spelling infinity or NaN are not numbers.
pub fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Short human description of a JSON value's type.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Render a tag value for diagnostics: strings verbatim, anything else as JSON.
pub fn describe_tag(tag: Option<&Value>) -> String {
    match tag {
        None => "(missing)".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn element_tags_round_trip_through_their_names() {
        for tag in ElementTag::ALL {
            assert_eq!(ElementTag::parse(tag.as_str()), Some(tag));
        }
        assert_eq!(ElementTag::parse("table"), None);
        assert_eq!(ElementTag::parse("DIV"), None);
    }

    #[test]
    fn only_actions_and_markdown_are_deferred() {
        let deferred: Vec<_> = ElementTag::ALL.into_iter().filter(|t| t.is_deferred()).collect();
        assert_eq!(deferred, vec![ElementTag::Markdown, ElementTag::Actions]);
    }

    #[test]
    fn allowed_lists() {
        assert_eq!(ElementTag::allowed(), "column_set, div, markdown, hr, img, note, actions");
        assert_eq!(EmbeddedTag::allowed(), "plain_text, lark_md, img");
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(is_truthy(Some(&json!("0"))));
        assert!(is_truthy(Some(&json!([]))));
        assert!(is_truthy(Some(&json!(1.5))));
    }

    #[test]
    fn numbers_from_numbers_and_numeric_strings() {
        assert_eq!(as_number(&json!(300)), Some(300.0));
        assert_eq!(as_number(&json!(" 42.5 ")), Some(42.5));
        assert_eq!(as_number(&json!("abc")), None);
        assert_eq!(as_number(&json!("NaN")), None);
        assert_eq!(as_number(&json!("inf")), None);
        assert_eq!(as_number(&json!("Infinity")), None);
        assert_eq!(as_number(&json!("-inf")), None);
        assert_eq!(as_number(&json!(true)), None);
    }

    #[test]
    fn describes_tags() {
        assert_eq!(describe_tag(None), "(missing)");
        assert_eq!(describe_tag(Some(&json!("table"))), "table");
        assert_eq!(describe_tag(Some(&json!(7))), "7");
    }
}
