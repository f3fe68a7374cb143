//! Drawing options shared by every glyph.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use glyphwork_core::color::Color;

/// One drawing option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Flat, insertion-ordered map of drawing options.
///
/// # Examples
///
/// ```
/// use glyphwork::glyph::Parameters;
///
/// let mut params = Parameters::base();
/// params.set("strokeWidth", 2.0);
/// assert_eq!(params.number("strokeWidth"), Some(2.0));
/// assert_eq!(params.text("primaryColor"), Some("#00897B"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(IndexMap<String, ParamValue>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// The options every glyph kind starts from.
    pub fn base() -> Self {
        let mut params = Self::new();
        params.set("strokeColor", "#78909C");
        params.set("primaryColor", "#00897B");
        params.set("secondaryColor", "#F50057");
        params.set("lightColor", "#E1F5FE");
        params.set("darkColor", "#880E4F");
        params.set("strokeWidth", 1.0);
        params.set("thickPathSize", 6.0);
        params.set("narrowPathSize", 3.0);
        params
    }

    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(ParamValue::as_f64)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_str)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ParamValue::as_bool)
    }

    /// Parses a text option as a color. Unknown keys and unparsable values yield `None`.
    pub fn color(&self, key: &str) -> Option<Color> {
        self.text(key).and_then(|s| Color::new(s).ok())
    }

    /// Overlays `overrides` onto these options; overriding keys keep their original position.
    pub fn merge(&mut self, overrides: &Parameters) {
        for (key, value) in overrides.iter() {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_parameters() {
        let params = Parameters::base();
        assert_eq!(params.len(), 8);
        assert_eq!(params.text("strokeColor"), Some("#78909C"));
        assert_eq!(params.number("thickPathSize"), Some(6.0));
        assert!(params.color("darkColor").is_some());
    }

    #[test]
    fn test_merge_keeps_order_and_overrides() {
        let mut params = Parameters::base();
        let overrides: Parameters = [("strokeColor", "red")].into_iter().collect();
        params.merge(&overrides);
        params.merge(&[("showLabel", true)].into_iter().collect());

        let keys: Vec<_> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys[0], "strokeColor");
        assert_eq!(keys.last(), Some(&"showLabel"));
        assert_eq!(params.text("strokeColor"), Some("red"));
        assert_eq!(params.flag("showLabel"), Some(true));
    }

    #[test]
    fn test_typed_accessors_reject_other_variants() {
        let params = Parameters::base();
        assert_eq!(params.number("strokeColor"), None);
        assert_eq!(params.text("strokeWidth"), None);
        assert_eq!(params.flag("missing"), None);
    }

    #[test]
    fn test_json_shape_is_flat() {
        let params: Parameters = [("a", ParamValue::from(1.5)), ("b", "x".into())]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"a":1.5,"b":"x"}"#);

        let back: Parameters = serde_json::from_str(r#"{"flag":false,"n":3}"#).unwrap();
        assert_eq!(back.flag("flag"), Some(false));
        assert_eq!(back.number("n"), Some(3.0));
    }
}
