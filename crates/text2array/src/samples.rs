//! # Samples
//!
//! A [`Sample`] is an ordered mapping from field name to [`FieldValue`].
//!
//! Field values are scalars (strings, integers, floats) or arbitrarily nested
//! lists of them. Before encoding, text fields hold strings; after
//! [`crate::Vocab::apply_to`], they hold the integer codes in the same shape.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{FieldName, TokenIndex};

/// The value held by a single field of a [`Sample`].
///
/// Serialized untagged, so a sample reads and writes as a plain JSON object:
/// `{"ws": ["a", "b"], "i": 1, "f": 0.5}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// An integer; also the result of encoding a token.
    Int(i64),

    /// An unsigned integer above `i64::MAX`.
    UInt(u64),

    /// A floating point number.
    Float(f64),

    /// A string token.
    Str(String),

    /// A list of values.
    List(Vec<FieldValue>),
}

/// An ordered mapping from field name to value.
pub type Sample = IndexMap<FieldName, FieldValue>;

/// Build a [`Sample`] from `name => value` pairs.
///
/// Values may be anything with a `From` conversion into [`FieldValue`]:
/// ```
/// use text2array::{FieldValue, sample};
///
/// let s = sample! { "ws" => vec!["a", "b"], "i" => 1 };
/// assert_eq!(s["i"], FieldValue::Int(1));
/// ```
#[macro_export]
macro_rules! sample {
    () => {
        $crate::Sample::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut sample = $crate::Sample::new();
        $(
            sample.insert(
                ::std::string::String::from($name),
                $crate::FieldValue::from($value),
            );
        )+
        sample
    }};
}

impl FieldValue {
    /// Wrap a token index.
    pub fn from_index(index: TokenIndex) -> Self {
        FieldValue::Int(index as i64)
    }

    /// The string, if this is a [`FieldValue::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The items, if this is a [`FieldValue::List`].
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// A short name for the kind of value, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Int(_) | FieldValue::UInt(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Str(_) => "str",
            FieldValue::List(_) => "list",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(value) => FieldValue::Int(value),
            Err(_) => FieldValue::UInt(value),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_macro() {
        let s = sample! {
            "w" => "c",
            "ws" => vec!["a", "b"],
            "cs" => vec![vec!["a"], vec![]],
            "i" => 3,
            "f" => 0.5,
        };

        assert_eq!(
            s.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["w", "ws", "cs", "i", "f"]
        );
        assert_eq!(s["w"], FieldValue::Str("c".to_string()));
        assert_eq!(
            s["ws"],
            FieldValue::List(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            s["cs"],
            FieldValue::List(vec![
                FieldValue::List(vec!["a".into()]),
                FieldValue::List(vec![]),
            ])
        );
        assert_eq!(s["i"], FieldValue::Int(3));
        assert_eq!(s["f"], FieldValue::Float(0.5));

        assert!(sample! {}.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let s: Sample = serde_json::from_str(r#"{"ws": ["a", "b"], "i": 1, "f": 0.5}"#).unwrap();
        assert_eq!(s, sample! { "ws" => vec!["a", "b"], "i" => 1, "f" => 0.5 });

        let text = serde_json::to_string(&s).unwrap();
        assert_eq!(text, r#"{"ws":["a","b"],"i":1,"f":0.5}"#);
    }

    #[test]
    fn test_accessors() {
        let v: FieldValue = vec!["a"].into();
        assert_eq!(v.as_list().map(|l| l.len()), Some(1));
        assert_eq!(v.as_str(), None);
        assert_eq!(v.kind_name(), "list");

        assert_eq!(FieldValue::from("x").as_str(), Some("x"));
        assert_eq!(FieldValue::from_index(7), FieldValue::Int(7));

        assert_eq!(FieldValue::from(5u64), FieldValue::Int(5));
        assert_eq!(FieldValue::from(u64::MAX), FieldValue::UInt(u64::MAX));
        assert_eq!(FieldValue::from(u64::MAX).kind_name(), "int");
    }

    #[test]
    fn test_json_large_unsigned() {
        let s: Sample = serde_json::from_str(r#"{"id": 18446744073709551615, "n": -3}"#).unwrap();
        assert_eq!(s["id"], FieldValue::UInt(u64::MAX));
        assert_eq!(s["n"], FieldValue::Int(-3));
        assert_eq!(
            serde_json::to_string(&s).unwrap(),
            r#"{"id":18446744073709551615,"n":-3}"#
        );
    }
}
