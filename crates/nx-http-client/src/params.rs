//! Ordered parameter and header bags

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A single parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// String value
    Str(String),
    /// Integer value
    Int(i64),
    /// Floating point value; integral values serialize as integers and
    /// non-finite values as JSON `null`
    Float(f64),
    /// Boolean value
    Bool(bool),
}

/// Largest integer magnitude a float holds exactly (2^53)
const MAX_SAFE_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

/// Write `v` the way JavaScript's `Number.prototype.toString` does
fn fmt_js_number(v: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("NaN");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if v == 0.0 {
        return f.write_str("0");
    }
    if (1e-6..1e21).contains(&v.abs()) {
        return write!(f, "{}", v);
    }

    let exp = format!("{:e}", v);
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{}e+{}", mantissa, exponent)
        }
        _ => f.write_str(&exp),
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(v) => fmt_js_number(*v, f),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&ParamValue> for serde_json::Value {
    fn from(value: &ParamValue) -> Self {
        match value {
            ParamValue::Str(s) => serde_json::Value::String(s.clone()),
            ParamValue::Int(i) => serde_json::Value::from(*i),
            ParamValue::Float(v) if v.fract() == 0.0 && v.abs() <= MAX_SAFE_FLOAT_INT => {
                serde_json::Value::from(*v as i64)
            }
            ParamValue::Float(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            ParamValue::Bool(b) => serde_json::Value::Bool(*b),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serde_json::Value::from(self).serialize(serializer)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Float(value.into())
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    ParamValue::Int(value.into())
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Ordered mapping from parameter name to value
///
/// Iteration follows insertion order. Inserting an existing key replaces the
/// value but keeps the original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Create an empty parameter bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a parameter by name
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterate over parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no parameters are present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as a JSON object text, keys in insertion order
    pub fn to_json(&self) -> String {
        let object: serde_json::Map<String, serde_json::Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
            .collect();
        serde_json::Value::Object(object).to_string()
    }
}

impl Serialize for Params {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Ordered list of header name/value pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Create an empty header list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value for `name`, compared ASCII case-insensitively
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over headers in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of headers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no headers are present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.append(k, v);
        }
        headers
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// How query string keys and values are written into the URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryEncoding {
    /// Keys and values are concatenated as-is. Reserved characters such as
    /// `&` or `=` inside a value corrupt the query string.
    #[default]
    Verbatim,
    /// Keys and values are `application/x-www-form-urlencoded` escaped
    Percent,
}

impl QueryEncoding {
    /// Render `params` as `?k=v&k=v&`, trailing ampersand included
    pub fn render(&self, params: &Params) -> String {
        let mut query = String::from("?");
        for (key, value) in params.iter() {
            let value = value.to_string();
            match self {
                QueryEncoding::Verbatim => {
                    query.push_str(key);
                    query.push('=');
                    query.push_str(&value);
                }
                QueryEncoding::Percent => {
                    query.extend(url::form_urlencoded::byte_serialize(key.as_bytes()));
                    query.push('=');
                    query.extend(url::form_urlencoded::byte_serialize(value.as_bytes()));
                }
            }
            query.push('&');
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_value_display() {
        assert_eq!(ParamValue::from("hi").to_string(), "hi");
        assert_eq!(ParamValue::from(1).to_string(), "1");
        assert_eq!(ParamValue::from(2.5).to_string(), "2.5");
        assert_eq!(ParamValue::from(true).to_string(), "true");
    }

    #[test]
    fn test_float_display_matches_js_number_text() {
        assert_eq!(ParamValue::from(1.0).to_string(), "1");
        assert_eq!(ParamValue::from(-0.0).to_string(), "0");
        assert_eq!(ParamValue::from(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(ParamValue::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(ParamValue::from(f64::NAN).to_string(), "NaN");
        assert_eq!(ParamValue::from(1e21).to_string(), "1e+21");
        assert_eq!(ParamValue::from(-1.5e22).to_string(), "-1.5e+22");
        assert_eq!(ParamValue::from(1e20).to_string(), "100000000000000000000");
        assert_eq!(ParamValue::from(0.000001).to_string(), "0.000001");
        assert_eq!(ParamValue::from(1.5e-7).to_string(), "1.5e-7");
    }

    #[test]
    fn test_integral_float_serializes_as_integer() {
        let params = Params::from([("a", 1.0), ("b", 2.5), ("c", -3.0)]);
        assert_eq!(params.to_json(), r#"{"a":1,"b":2.5,"c":-3}"#);
        let json = serde_json::to_string(&params).expect("serializable");
        assert_eq!(json, r#"{"a":1,"b":2.5,"c":-3}"#);
    }

    #[test]
    fn test_to_json_keeps_insertion_order() {
        let params = Params::from([("z", "last"), ("a", "first")]);
        assert_eq!(params.to_json(), r#"{"z":"last","a":"first"}"#);
    }

    #[test]
    fn test_float_query_matches_js_number_text() {
        let params = Params::from([("i", f64::INFINITY), ("big", 1e21), ("one", 1.0)]);
        assert_eq!(
            QueryEncoding::Verbatim.render(&params),
            "?i=Infinity&big=1e+21&one=1&"
        );
    }

    #[test]
    fn test_params_keep_insertion_order() {
        let params = Params::from([("b", 2), ("a", 1), ("c", 3)]);
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_params_replace_in_place() {
        let mut params = Params::from([("a", 1), ("b", 2)]);
        params.insert("a", "x");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some(&ParamValue::Str("x".to_string())));
        assert_eq!(params.iter().next().map(|(k, _)| k), Some("a"));
    }

    #[test]
    fn test_params_serialize_as_ordered_object() {
        let mut params = Params::new();
        params.insert("a", 1);
        params.insert("b", 2);
        params.insert("note", "hi");
        params.insert("ok", false);
        let json = serde_json::to_string(&params).expect("serializable");
        assert_eq!(json, r#"{"a":1,"b":2,"note":"hi","ok":false}"#);
    }

    #[test]
    fn test_non_finite_float_serializes_to_null() {
        let params = Params::from([("x", f64::NAN), ("y", f64::INFINITY)]);
        let json = serde_json::to_string(&params).expect("serializable");
        assert_eq!(json, r#"{"x":null,"y":null}"#);
        assert_eq!(params.to_json(), r#"{"x":null,"y":null}"#);
    }

    #[test]
    fn test_headers_case_insensitive_lookup() {
        let headers = Headers::from([("Content-Type", "application/json")]);
        assert_eq!(headers.get("content-type"), Some("application/json"));
        assert_eq!(headers.get("accept"), None);
    }

    #[test]
    fn test_verbatim_query_keeps_reserved_characters() {
        let params = Params::from([("q", "a&b=c"), ("n", "1")]);
        assert_eq!(QueryEncoding::Verbatim.render(&params), "?q=a&b=c&n=1&");
    }

    #[test]
    fn test_percent_query_escapes_reserved_characters() {
        let params = Params::from([("q", "a&b=c d")]);
        assert_eq!(QueryEncoding::Percent.render(&params), "?q=a%26b%3Dc+d&");
    }

    #[test]
    fn test_empty_params_render_bare_question_mark() {
        assert_eq!(QueryEncoding::Verbatim.render(&Params::new()), "?");
    }
}
