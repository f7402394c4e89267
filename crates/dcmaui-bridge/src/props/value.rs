use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use indexmap::IndexMap;
use smartstring::alias::String as SmartString;
use std::fmt;

use super::PropError;

/// A dynamically typed property value as decoded from a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<PropValue>),
    Map(PropertySet),
}

impl PropValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PropValue::Null => "null",
            PropValue::Bool(_) => "bool",
            PropValue::Int(_) => "integer",
            PropValue::Float(_) => "float",
            PropValue::String(_) => "string",
            PropValue::List(_) => "list",
            PropValue::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view of the value. Floats with no fractional part count as integers.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropValue::Int(i) => Some(*i),
            PropValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Int(i) => Some(*i as f64),
            PropValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropValue]> {
        match self {
            PropValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&PropertySet> {
        match self {
            PropValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::String(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::String(value)
    }
}

impl From<PropertySet> for PropValue {
    fn from(value: PropertySet) -> Self {
        PropValue::Map(value)
    }
}

/// Ordered key/value property bag. Keys keep the order they were decoded in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    entries: IndexMap<SmartString, PropValue>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert or replace a value. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<SmartString>, value: impl Into<PropValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder-style insert, handy for event data.
    pub fn with(mut self, key: impl Into<SmartString>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.entries.shift_remove(key)
    }

    /// Append every entry of `other`, replacing existing keys.
    pub fn extend(&mut self, other: PropertySet) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Present, non-null value for `key`.
    fn present(&self, key: &str) -> Option<&PropValue> {
        self.get(key).filter(|v| !v.is_null())
    }

    fn wrong_type(key: &str, expected: &'static str, found: &PropValue) -> PropError {
        PropError::WrongType {
            key: key.to_string(),
            expected,
            found: found.type_name(),
        }
    }

    pub fn opt_str(&self, key: &str) -> Result<Option<&str>, PropError> {
        match self.present(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| Self::wrong_type(key, "string", value)),
        }
    }

    pub fn require_str(&self, key: &str) -> Result<&str, PropError> {
        self.opt_str(key)?.ok_or_else(|| PropError::Missing {
            key: key.to_string(),
        })
    }

    pub fn opt_bool(&self, key: &str) -> Result<Option<bool>, PropError> {
        match self.present(key) {
            None => Ok(None),
            Some(value) => value
                .as_bool()
                .map(Some)
                .ok_or_else(|| Self::wrong_type(key, "bool", value)),
        }
    }

    pub fn opt_i64(&self, key: &str) -> Result<Option<i64>, PropError> {
        match self.present(key) {
            None => Ok(None),
            Some(value) => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| Self::wrong_type(key, "integer", value)),
        }
    }

    pub fn opt_f64(&self, key: &str) -> Result<Option<f64>, PropError> {
        match self.present(key) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| Self::wrong_type(key, "number", value)),
        }
    }

    pub fn opt_list(&self, key: &str) -> Result<Option<&[PropValue]>, PropError> {
        match self.present(key) {
            None => Ok(None),
            Some(value) => value
                .as_list()
                .map(Some)
                .ok_or_else(|| Self::wrong_type(key, "list", value)),
        }
    }

    pub fn opt_map(&self, key: &str) -> Result<Option<&PropertySet>, PropError> {
        match self.present(key) {
            None => Ok(None),
            Some(value) => value
                .as_map()
                .map(Some)
                .ok_or_else(|| Self::wrong_type(key, "map", value)),
        }
    }
}

impl FromIterator<(SmartString, PropValue)> for PropertySet {
    fn from_iter<T: IntoIterator<Item = (SmartString, PropValue)>>(iter: T) -> Self {
        let mut set = PropertySet::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

impl Serialize for PropValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropValue::Null => serializer.serialize_unit(),
            PropValue::Bool(b) => serializer.serialize_bool(*b),
            PropValue::Int(i) => serializer.serialize_i64(*i),
            PropValue::Float(f) => serializer.serialize_f64(*f),
            PropValue::String(s) => serializer.serialize_str(s),
            PropValue::List(items) => items.serialize(serializer),
            PropValue::Map(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for PropertySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

struct PropValueVisitor;

impl<'de> Visitor<'de> for PropValueVisitor {
    type Value = PropValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a property value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<PropValue, E> {
        Ok(PropValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<PropValue, E> {
        Ok(PropValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<PropValue, D::Error> {
        PropValue::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<PropValue, E> {
        Ok(PropValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<PropValue, E> {
        Ok(PropValue::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<PropValue, E> {
        Ok(match i64::try_from(v) {
            Ok(i) => PropValue::Int(i),
            Err(_) => PropValue::Float(v as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<PropValue, E> {
        Ok(PropValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<PropValue, E> {
        Ok(PropValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<PropValue, E> {
        Ok(PropValue::String(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<PropValue, E> {
        match std::str::from_utf8(v) {
            Ok(s) => Ok(PropValue::String(s.to_string())),
            Err(_) => Err(E::invalid_type(de::Unexpected::Bytes(v), &self)),
        }
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<PropValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(PropValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<PropValue, A::Error> {
        let mut map = PropertySet::new();
        while let Some((key, value)) = access.next_entry::<String, PropValue>()? {
            map.insert(key, value);
        }
        Ok(PropValue::Map(map))
    }
}

impl<'de> Deserialize<'de> for PropValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PropValueVisitor)
    }
}

impl<'de> Deserialize<'de> for PropertySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match PropValue::deserialize(deserializer)? {
            PropValue::Map(map) => Ok(map),
            other => Err(de::Error::invalid_type(
                de::Unexpected::Other(other.type_name()),
                &"a map of properties",
            )),
        }
    }
}
