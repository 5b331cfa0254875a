//! Case-insensitive header mapping shared by request and response descriptors.
//!
//! # Design Decisions
//! - Names are stored as received; lookups ignore ASCII case
//! - Insertion order is preserved so headers are relayed in upstream order
//! - `set-cookie` is the only field carried as a sequence

use std::fmt;

use axum::http::HeaderMap;

/// Name of the multi-valued cookie header.
pub const SET_COOKIE: &str = "set-cookie";

/// Decode raw field bytes one char per byte (ISO-8859-1).
///
/// Obs-text bytes survive a round trip through [`encode_field`] unchanged.
pub fn decode_field(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encode a field value back to wire bytes.
///
/// Text made only of chars up to U+00FF maps back byte for byte; anything
/// wider is written as UTF-8.
pub fn encode_field(value: &str) -> Vec<u8> {
    if value.chars().all(|c| u32::from(c) <= 0xFF) {
        value.chars().map(|c| c as u8).collect()
    } else {
        value.as_bytes().to_vec()
    }
}

/// A header field value: a single string or an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Single(String),
    Multi(Vec<String>),
}

impl FieldValue {
    /// Returns the value as a single string, joining sequences with `", "`.
    pub fn to_single(&self) -> String {
        match self {
            FieldValue::Single(v) => v.clone(),
            FieldValue::Multi(vs) => vs.join(", "),
        }
    }

    /// Borrow the value if it is a single string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Single(v) => Some(v),
            FieldValue::Multi(_) => None,
        }
    }

    /// Iterate over every value, one item for a single string.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            FieldValue::Single(v) => std::slice::from_ref(v),
            FieldValue::Multi(vs) => vs,
        };
        values.iter().map(String::as_str)
    }

    /// Number of values carried.
    pub fn len(&self) -> usize {
        match self {
            FieldValue::Single(_) => 1,
            FieldValue::Multi(vs) => vs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Single(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Single(v)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(vs: Vec<String>) -> Self {
        FieldValue::Multi(vs)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_single())
    }
}

/// Ordered, case-insensitive header mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, FieldValue)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.position(name).map(|i| &self.entries[i].1)
    }

    /// Get a mutable field value by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        let i = self.position(name)?;
        Some(&mut self.entries[i].1)
    }

    /// Get a field as a single string. Sequences are joined with `", "`.
    pub fn get_str(&self, name: &str) -> Option<String> {
        self.get(name).map(FieldValue::to_single)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Set a field, overwriting any prior value for the same name.
    ///
    /// An overwritten field keeps its original position and spelling.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Remove a field, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.position(name).map(|i| self.entries.remove(i).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build from an `http` header map.
    ///
    /// Every `set-cookie` instance lands in one sequence; other repeated
    /// fields are joined with `", "`. Values are decoded with [`decode_field`].
    pub fn from_header_map(map: &HeaderMap) -> Self {
        let mut headers = Headers::new();
        for name in map.keys() {
            let values: Vec<String> = map
                .get_all(name)
                .iter()
                .map(|v| decode_field(v.as_bytes()))
                .collect();

            let value = if name.as_str() == SET_COOKIE {
                FieldValue::Multi(values)
            } else if values.len() == 1 {
                FieldValue::Single(values.into_iter().next().unwrap_or_default())
            } else {
                FieldValue::Single(values.join(", "))
            };
            headers.entries.push((name.as_str().to_string(), value));
        }
        headers
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.set(k, v);
        }
        headers
    }
}
