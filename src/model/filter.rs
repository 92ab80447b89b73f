// src/model/filter.rs
//! Database query predicates and sort lists in Notion's filter JSON shape.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A Notion database filter.
///
/// `Simple` is a property condition such as
/// `{"property": "Status", "select": {"equals": "Draft"}}`; `condition`
/// holds every key other than `property`. `Timestamp` is the same shape
/// keyed by `timestamp` instead, e.g.
/// `{"timestamp": "last_edited_time", "last_edited_time": {"after": "..."}}`.
/// `And`/`Or` serialize as `{"and": [...]}` and `{"or": [...]}`.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPredicate {
    Simple {
        property: String,
        condition: Map<String, Value>,
    },
    Timestamp {
        timestamp: String,
        condition: Map<String, Value>,
    },
    And(Vec<FilterPredicate>),
    Or(Vec<FilterPredicate>),
}

impl FilterPredicate {
    /// `{"property": property, kind: condition}`, e.g. `kind = "select"`.
    pub fn simple(property: impl Into<String>, kind: impl Into<String>, condition: Value) -> Self {
        let mut map = Map::new();
        map.insert(kind.into(), condition);
        FilterPredicate::Simple {
            property: property.into(),
            condition: map,
        }
    }

    /// A select property equal to `value`.
    pub fn select_equals(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::simple(
            property,
            "select",
            serde_json::json!({ "equals": value.into() }),
        )
    }

    /// A compound with no children, which constrains nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterPredicate::Simple { .. } | FilterPredicate::Timestamp { .. } => false,
            FilterPredicate::And(predicates) | FilterPredicate::Or(predicates) => {
                predicates.is_empty()
            }
        }
    }

    /// Reads a predicate from Notion filter JSON.
    pub fn from_value(value: Value) -> Result<Self, String> {
        let Value::Object(mut map) = value else {
            return Err("filter must be a JSON object".to_string());
        };

        if let Some(children) = map.remove("and") {
            return Ok(FilterPredicate::And(parse_children("and", children)?));
        }
        if let Some(children) = map.remove("or") {
            return Ok(FilterPredicate::Or(parse_children("or", children)?));
        }

        if let Some(property) = map.remove("property") {
            let Value::String(property) = property else {
                return Err("'property' must be a string".to_string());
            };
            return Ok(FilterPredicate::Simple {
                property,
                condition: map,
            });
        }

        match map.remove("timestamp") {
            Some(Value::String(timestamp)) => Ok(FilterPredicate::Timestamp {
                timestamp,
                condition: map,
            }),
            Some(_) => Err("'timestamp' must be a string".to_string()),
            None => Err("filter needs a 'property', 'timestamp', 'and' or 'or' key".to_string()),
        }
    }
}

fn parse_children(key: &str, children: Value) -> Result<Vec<FilterPredicate>, String> {
    let Value::Array(children) = children else {
        return Err(format!("'{}' must hold an array of filters", key));
    };
    children.into_iter().map(FilterPredicate::from_value).collect()
}

impl Serialize for FilterPredicate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FilterPredicate::Simple {
                property,
                condition,
            } => serialize_keyed(serializer, "property", property, condition),
            FilterPredicate::Timestamp {
                timestamp,
                condition,
            } => serialize_keyed(serializer, "timestamp", timestamp, condition),
            FilterPredicate::And(predicates) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("and", predicates)?;
                map.end()
            }
            FilterPredicate::Or(predicates) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("or", predicates)?;
                map.end()
            }
        }
    }
}

fn serialize_keyed<S>(
    serializer: S,
    key: &str,
    name: &str,
    condition: &Map<String, Value>,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(condition.len() + 1))?;
    map.serialize_entry(key, name)?;
    for (key, value) in condition {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

impl<'de> Deserialize<'de> for FilterPredicate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        FilterPredicate::from_value(value).map_err(D::Error::custom)
    }
}

/// Sort objects passed through to Notion untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortSpec(pub Vec<Value>);

impl SortSpec {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
