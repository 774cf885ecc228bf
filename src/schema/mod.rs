//! Layout document parsing and validation.

pub(crate) mod validate;

use std::fmt;
use std::path::Path;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Value;
use serde_path_to_error::Segment;

use crate::foundation::error::{CardError, CardResult};
use crate::scene::layout::Layout;
use validate::{SchemaError, SchemaErrors, SchemaPathElem};

/// Serialization format of a layout document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocFormat {
    Json,
    Yaml,
}

impl DocFormat {
    /// Guess from a file extension; anything other than `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Parse and validate a layout document.
///
/// Mapping keys that repeat (including YAML keys that only collide once
/// stringified, such as `1` and `"1"`) are rejected rather than merged.
pub fn parse_layout(text: &str, format: DocFormat) -> CardResult<Layout> {
    let value = match format {
        DocFormat::Json => json_document(text)?,
        DocFormat::Yaml => {
            let yaml = serde_yaml::from_str::<serde_yaml::Value>(text)
                .map_err(|e| CardError::validation(format!("invalid YAML document: {e}")))?;
            yaml_to_json(yaml, &mut Vec::new()).map_err(SchemaErrors::from)?
        }
    };
    Layout::from_value(&value)
}

impl Layout {
    /// Validate an untyped document tree.
    pub fn from_value(value: &Value) -> CardResult<Self> {
        validate::layout_from_value(value).map_err(CardError::from)
    }
}

fn json_document(text: &str) -> CardResult<Value> {
    let mut de = serde_json::Deserializer::from_str(text);
    let value = serde_path_to_error::deserialize::<_, UniqueKeys>(&mut de).map_err(|e| {
        let path: Vec<SchemaPathElem> = e
            .path()
            .iter()
            .filter_map(|segment| match segment {
                Segment::Seq { index } => Some(SchemaPathElem::Index(*index)),
                Segment::Map { key } => Some(SchemaPathElem::Member(key.clone())),
                _ => None,
            })
            .collect();
        let inner = e.into_inner();
        if inner.is_data() {
            SchemaErrors::from(SchemaError::at(&path, inner.to_string())).into()
        } else {
            CardError::validation(format!("invalid JSON document: {inner}"))
        }
    })?;
    de.end()
        .map_err(|e| CardError::validation(format!("invalid JSON document: {e}")))?;
    Ok(value.0)
}

/// A JSON tree whose objects never repeat a key.
struct UniqueKeys(Value);

impl<'de> Deserialize<'de> for UniqueKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(UniqueKeysVisitor).map(UniqueKeys)
    }
}

struct UniqueKeysVisitor;

impl<'de> Visitor<'de> for UniqueKeysVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        serde_json::Number::from_f64(v)
            .map(Value::Number)
            .ok_or_else(|| E::custom("non-finite number"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        UniqueKeys::deserialize(deserializer).map(|v| v.0)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut out = Vec::new();
        while let Some(UniqueKeys(v)) = seq.next_element()? {
            out.push(v);
        }
        Ok(Value::Array(out))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut out = serde_json::Map::new();
        while let Some(key) = map.next_key::<String>()? {
            let UniqueKeys(v) = map.next_value()?;
            if out.contains_key(&key) {
                return Err(de::Error::custom(format!("duplicate key \"{key}\"")));
            }
            out.insert(key, v);
        }
        Ok(Value::Object(out))
    }
}

/// Convert a YAML tree to JSON, stringifying non-string mapping keys
/// (`colors: {0.5: red}` is common in gradient stops).
///
/// `path` tracks the position for error reports and is left as it was passed in.
pub(crate) fn yaml_to_json(
    value: serde_yaml::Value,
    path: &mut Vec<SchemaPathElem>,
) -> Result<Value, SchemaError> {
    use serde_yaml::Value as Y;

    Ok(match value {
        Y::Null => Value::Null,
        Y::Bool(b) => Value::Bool(b),
        Y::Number(n) => yaml_number(&n).map_err(|e| SchemaError::at(path, e))?,
        Y::String(s) => Value::String(s),
        Y::Sequence(seq) => {
            let mut out = Vec::with_capacity(seq.len());
            for (i, item) in seq.into_iter().enumerate() {
                path.push(SchemaPathElem::Index(i));
                let item = yaml_to_json(item, path);
                path.pop();
                out.push(item?);
            }
            Value::Array(out)
        }
        Y::Mapping(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                let key = yaml_key(k).map_err(|e| SchemaError::at(path, e))?;
                if out.contains_key(&key) {
                    return Err(SchemaError::at(path, format!("duplicate key \"{key}\"")));
                }
                path.push(SchemaPathElem::Member(key.clone()));
                let v = yaml_to_json(v, path);
                path.pop();
                out.insert(key, v?);
            }
            Value::Object(out)
        }
        Y::Tagged(tagged) => yaml_to_json(tagged.value, path)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Result<Value, String> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Value::from(u));
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| format!("unsupported number {n}"))
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, String> {
    use serde_yaml::Value as Y;

    match key {
        Y::String(s) => Ok(s),
        Y::Number(n) => Ok(n.to_string()),
        Y::Bool(b) => Ok(b.to_string()),
        Y::Null => Ok("null".to_owned()),
        Y::Tagged(tagged) => yaml_key(tagged.value),
        Y::Sequence(_) | Y::Mapping(_) => Err("mapping keys must be scalars".to_owned()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/mod.rs"]
mod tests;
