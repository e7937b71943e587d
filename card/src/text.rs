use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A text value with an optional per-locale table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i18n: Option<BTreeMap<String, String>>,
}

impl Text {
    /// Read a text object leniently: fields of the wrong type are ignored.
    pub fn from_value(value: &Value) -> Self {
        value.as_object().map(Self::from_object).unwrap_or_default()
    }

    pub fn from_object(object: &Map<String, Value>) -> Self {
        let content = object.get("content").and_then(Value::as_str).map(str::to_owned);
        let i18n = object.get("i18n").and_then(Value::as_object).map(|table| {
            table
                .iter()
                .filter_map(|(locale, text)| Some((locale.clone(), text.as_str()?.to_owned())))
                .collect()
        });
        Text { content, i18n }
    }

    /// Whether either `content` or `i18n` carries something to show.
    pub fn is_populated(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty()) || self.i18n.is_some()
    }

    pub fn resolve(&self, locale: Option<&str>) -> String {
        resolve(self, locale)
    }
}

/// Pick the display string for `locale`: the matching `i18n` entry, then
/// `content`, then the empty string. Empty entries count as missing.
pub fn resolve(text: &Text, locale: Option<&str>) -> String {
    let localized = locale.and_then(|locale| text.i18n.as_ref()?.get(locale));
    localized
        .filter(|s| !s.is_empty())
        .or(text.content.as_ref().filter(|s| !s.is_empty()))
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn text(value: Value) -> Text {
        Text::from_value(&value)
    }

    #[test]
    fn localized_entry_wins() {
        let t = text(json!({"content": "A", "i18n": {"fr": "B"}}));
        assert_eq!(resolve(&t, Some("fr")), "B");
    }

    #[test]
    fn falls_back_to_content() {
        assert_eq!(resolve(&text(json!({"content": "A"})), Some("fr")), "A");
        assert_eq!(resolve(&text(json!({"content": "A", "i18n": {"en_us": "E"}})), Some("fr")), "A");
        assert_eq!(resolve(&text(json!({"content": "A", "i18n": {"fr": ""}})), Some("fr")), "A");
        assert_eq!(resolve(&text(json!({"content": "A", "i18n": {"fr": "B"}})), None), "A");
    }

    #[test]
    fn empty_when_nothing_matches() {
        assert_eq!(resolve(&text(json!({})), Some("fr")), "");
        assert_eq!(resolve(&text(json!({"i18n": {"en_us": "E"}})), Some("fr")), "");
    }

    #[test]
    fn lenient_reading() {
        let t = text(json!({"content": 5, "i18n": {"fr": "B", "de": 1}}));
        assert_eq!(t.content, None);
        assert_eq!(t.i18n.as_ref().map(BTreeMap::len), Some(1));
        assert!(t.is_populated());
        assert!(!text(json!({"content": ""})).is_populated());
        assert!(!text(json!("not an object")).is_populated());
    }
}
