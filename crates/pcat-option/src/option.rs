//! Selectable option types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier carried by a [`SelectOption`]
///
/// Catalogue records use numeric ids, free-form lists use strings. Both
/// serialise untagged so they round-trip with the wire format unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Numeric identifier
    Number(i64),
    /// Textual identifier
    Text(String),
}

impl OptionValue {
    /// Read a value out of a JSON scalar
    ///
    /// Returns `None` for anything that is not an integer or a string.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(Self::Number),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Compare ignoring the numeric/text distinction
    ///
    /// `"7"` and `7` identify the same record: route parameters arrive as
    /// strings while record ids are numbers.
    #[must_use]
    pub fn loosely_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(n), Self::Text(s)) | (Self::Text(s), Self::Number(n)) => {
                s.trim().parse::<i64>().is_ok_and(|parsed| parsed == *n)
            }
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A single entry in a selectable list
///
/// Values must be unique within one displayed list. Labels are display-only
/// and may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    value: OptionValue,
    label: String,
}

impl SelectOption {
    /// Create new option
    #[inline]
    pub fn new(value: impl Into<OptionValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Get value
    #[inline]
    #[must_use]
    pub fn value(&self) -> &OptionValue {
        &self.value
    }

    /// Get label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn option_serialises_untagged() {
        let numeric = SelectOption::new(12, "Axle");
        let text = SelectOption::new("front", "Front");

        assert_eq!(
            serde_json::to_value(&numeric).unwrap(),
            json!({ "value": 12, "label": "Axle" })
        );
        assert_eq!(
            serde_json::to_value(&text).unwrap(),
            json!({ "value": "front", "label": "Front" })
        );

        let back: SelectOption = serde_json::from_value(json!({ "value": 3, "label": "x" })).unwrap();
        assert_eq!(back.value(), &OptionValue::Number(3));
    }

    #[test]
    fn from_json_scalars() {
        assert_eq!(OptionValue::from_json(&json!(5)), Some(OptionValue::Number(5)));
        assert_eq!(
            OptionValue::from_json(&json!("a")),
            Some(OptionValue::Text("a".into()))
        );
        assert_eq!(OptionValue::from_json(&json!(1.5)), None);
        assert_eq!(OptionValue::from_json(&json!(null)), None);
    }

    #[test]
    fn loose_equality_across_kinds() {
        assert!(OptionValue::from(7).loosely_eq(&OptionValue::from("7")));
        assert!(OptionValue::from(" 7 ").loosely_eq(&OptionValue::from(7)));
        assert!(!OptionValue::from(7).loosely_eq(&OptionValue::from("seven")));
        assert!(!OptionValue::from("a").loosely_eq(&OptionValue::from("A")));
    }

    #[test]
    fn display_renders_raw_value() {
        assert_eq!(OptionValue::from(42).to_string(), "42");
        assert_eq!(OptionValue::from("rear").to_string(), "rear");
    }
}
