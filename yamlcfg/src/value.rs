//! Loaded document tree and the typed conversions applied to its values

use crate::error::DocumentError;
use crate::key::{ConfigKey, KEY_SEPARATOR};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Nested mapping of a loaded document
pub type Mapping = BTreeMap<String, ConfigValue>;

/// A single value of a loaded YAML document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Only used for integers above `i64::MAX`
    UInt(u64),
    Float(f64),
    String(String),
    Sequence(Vec<ConfigValue>),
    Mapping(Mapping),
}

impl ConfigValue {
    /// Convert a parsed YAML value, rejecting non-scalar mapping keys
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self, DocumentError> {
        use serde_yaml::Value;

        Ok(match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(b) => ConfigValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ConfigValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    ConfigValue::UInt(u)
                } else {
                    ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => ConfigValue::String(s),
            Value::Sequence(items) => ConfigValue::Sequence(
                items
                    .into_iter()
                    .map(ConfigValue::from_yaml)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Mapping(map) => {
                let mut out = Mapping::new();
                for (k, v) in map {
                    out.insert(mapping_key(k)?, ConfigValue::from_yaml(v)?);
                }
                ConfigValue::Mapping(out)
            }
            // Tags carry no meaning for key lookups
            Value::Tagged(tagged) => ConfigValue::from_yaml(tagged.value)?,
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Short name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Int(_) => "int",
            ConfigValue::UInt(_) => "uint",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Sequence(_) => "sequence",
            ConfigValue::Mapping(_) => "mapping",
        }
    }

    /// Scalars render as text; sequences and mappings do not convert
    pub fn try_string(&self) -> Option<String> {
        match self {
            ConfigValue::String(s) => Some(s.clone()),
            ConfigValue::Bool(b) => Some(b.to_string()),
            ConfigValue::Int(i) => Some(i.to_string()),
            ConfigValue::UInt(u) => Some(u.to_string()),
            ConfigValue::Float(f) => Some(f.to_string()),
            ConfigValue::Null | ConfigValue::Sequence(_) | ConfigValue::Mapping(_) => None,
        }
    }

    /// Signed integer, if the value represents one exactly
    pub fn try_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            ConfigValue::UInt(u) => i64::try_from(*u).ok(),
            ConfigValue::Float(f) => integral_float(*f, i64::MIN as f64, i64::MAX as f64)
                .map(|f| f as i64),
            ConfigValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Negative values never convert
    pub fn try_uint(&self) -> Option<u64> {
        match self {
            ConfigValue::UInt(u) => Some(*u),
            ConfigValue::Int(i) => u64::try_from(*i).ok(),
            ConfigValue::Float(f) => integral_float(*f, 0.0, u64::MAX as f64).map(|f| f as u64),
            ConfigValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Booleans, and the strings `true`/`false` in any case
    pub fn try_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            ConfigValue::String(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") {
                    Some(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Some(false)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => write!(f, "null"),
            ConfigValue::String(s) => write!(f, "string {:?}", s),
            ConfigValue::Sequence(items) => write!(f, "sequence of {} items", items.len()),
            ConfigValue::Mapping(map) => write!(f, "mapping with {} keys", map.len()),
            scalar => write!(
                f,
                "{} {}",
                scalar.type_name(),
                scalar.try_string().unwrap_or_default()
            ),
        }
    }
}

/// `f` if it is a whole number inside `[min, max)`
fn integral_float(f: f64, min: f64, max: f64) -> Option<f64> {
    if f.is_finite() && f.fract() == 0.0 && f >= min && f < max {
        Some(f)
    } else {
        None
    }
}

fn mapping_key(key: serde_yaml::Value) -> Result<String, DocumentError> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Tagged(tagged) => mapping_key(tagged.value),
        other => Err(DocumentError::Invalid(format!(
            "unsupported mapping key {:?}",
            other
        ))),
    }
}

/// Top-level mapping of one loaded YAML file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Mapping,
}

impl Document {
    /// Parse YAML text. Empty input yields an empty document.
    pub fn parse(content: &str) -> Result<Self, DocumentError> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        Self::from_yaml(value)
    }

    /// Build from an already parsed YAML value
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self, DocumentError> {
        match ConfigValue::from_yaml(value)? {
            ConfigValue::Null => Ok(Self::default()),
            ConfigValue::Mapping(root) => Ok(Self { root }),
            other => Err(DocumentError::Invalid(format!(
                "top level must be a mapping, found {}",
                other.type_name()
            ))),
        }
    }

    /// Resolve a key, descending one mapping level per segment.
    /// Null values read as absent.
    pub fn lookup(&self, key: &ConfigKey<'_>) -> Option<&ConfigValue> {
        lookup_in(&self.root, key.segments()).filter(|v| !v.is_null())
    }

    /// Top-level keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// Mapping keys may themselves contain the separator, so the longest
/// literal prefix of the remaining segments is tried first.
fn lookup_in<'a>(map: &'a Mapping, segments: &[&str]) -> Option<&'a ConfigValue> {
    for split in (1..=segments.len()).rev() {
        let head = segments[..split].join(KEY_SEPARATOR);
        let Some(value) = find_key(map, &head) else {
            continue;
        };
        if split == segments.len() {
            return Some(value);
        }
        if let ConfigValue::Mapping(inner) = value {
            if let Some(found) = lookup_in(inner, &segments[split..]) {
                return Some(found);
            }
        }
    }
    None
}

/// Exact match first, then ASCII case-insensitive
fn find_key<'a>(map: &'a Mapping, key: &str) -> Option<&'a ConfigValue> {
    map.get(key).or_else(|| {
        map.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}
