//! Search filter queries
//!
//! The index-search backend does not accept the externally tagged layout a
//! derived `Serialize` would produce. It wants a bare `bool` query whose
//! clauses are keyed by the clause kind, with term-level values written
//! inline under the field name:
//!
//! ```json
//! {"bool": {"filter": [{"term": {"__typeName.keyword": "Table"}}],
//!           "must_not": [{"exists": {"field": "certificateStatus"}}]}}
//! ```
//!
//! An empty query is written as `{"match_all": {}}`.

use crate::error::{AtlanError, Result};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Field holding an asset's type name
pub const TYPE_NAME_FIELD: &str = "__typeName.keyword";
/// Field holding an asset's lifecycle state
pub const STATE_FIELD: &str = "__state";
/// Field holding an asset's connection qualified name
pub const CONNECTION_FIELD: &str = "connectionQualifiedName";

/// A single filter clause
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// Field equals the value exactly
    Term { field: String, value: Value },
    /// Field equals any of the values
    Terms { field: String, values: Vec<Value> },
    /// String field starts with the prefix
    Prefix { field: String, value: String },
    /// Field has any value
    Exists { field: String },
    /// Field lies in `[gte, lt)`; either bound may be open
    Range {
        field: String,
        gte: Option<Value>,
        lt: Option<Value>,
    },
}

impl FilterClause {
    fn to_value(&self) -> Value {
        match self {
            Self::Term { field, value } => json!({ "term": { field: value } }),
            Self::Terms { field, values } => json!({ "terms": { field: values } }),
            Self::Prefix { field, value } => json!({ "prefix": { field: value } }),
            Self::Exists { field } => json!({ "exists": { "field": field } }),
            Self::Range { field, gte, lt } => {
                let mut bounds = Map::new();
                if let Some(gte) = gte {
                    bounds.insert("gte".to_string(), gte.clone());
                }
                if let Some(lt) = lt {
                    bounds.insert("lt".to_string(), lt.clone());
                }
                json!({ "range": { field: bounds } })
            }
        }
    }

    fn from_value(value: &Value) -> Result<Self> {
        let (kind, body) = single_entry(value, "filter clause")?;
        if kind == "exists" {
            let field = body
                .get("field")
                .and_then(Value::as_str)
                .ok_or_else(|| AtlanError::deserialization("exists clause needs a string 'field'"))?;
            return Ok(Self::Exists {
                field: field.to_string(),
            });
        }

        let (field, operand) = single_entry(body, kind)?;
        let field = field.to_string();
        match kind {
            "term" => Ok(Self::Term {
                field,
                value: operand.clone(),
            }),
            "terms" => {
                let values = operand
                    .as_array()
                    .ok_or_else(|| AtlanError::deserialization(format!("terms on '{field}' needs an array")))?;
                Ok(Self::Terms {
                    field,
                    values: values.clone(),
                })
            }
            "prefix" => {
                let value = operand
                    .as_str()
                    .ok_or_else(|| AtlanError::deserialization(format!("prefix on '{field}' needs a string")))?;
                Ok(Self::Prefix {
                    field,
                    value: value.to_string(),
                })
            }
            "range" => Ok(Self::Range {
                gte: operand.get("gte").cloned(),
                lt: operand.get("lt").cloned(),
                field,
            }),
            other => Err(AtlanError::deserialization(format!(
                "unsupported filter clause '{other}'"
            ))),
        }
    }
}

/// The only entry of a one-key object
fn single_entry<'a>(value: &'a Value, what: &str) -> Result<(&'a str, &'a Value)> {
    match value.as_object() {
        Some(map) if map.len() == 1 => map
            .iter()
            .next()
            .map(|(key, body)| (key.as_str(), body))
            .ok_or_else(|| AtlanError::deserialization(format!("empty {what}"))),
        _ => Err(AtlanError::deserialization(format!(
            "{what} must be an object with exactly one key"
        ))),
    }
}

/// Conjunction of filter clauses, with optional exclusions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterQuery {
    filter: Vec<FilterClause>,
    must_not: Vec<FilterClause>,
}

impl FilterQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active assets of any of `type_names`
    #[must_use]
    pub fn active_of_types<I, S>(type_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new()
            .term(STATE_FIELD, "ACTIVE")
            .terms(TYPE_NAME_FIELD, type_names.into_iter().map(|t| Value::String(t.into())))
    }

    /// Assets under a connection
    #[must_use]
    pub fn within_connection(connection_qualified_name: impl Into<String>) -> Self {
        Self::new().term(CONNECTION_FIELD, connection_qualified_name.into())
    }

    #[must_use]
    pub fn term(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.push(FilterClause::Term {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn terms(mut self, field: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Self {
        self.filter.push(FilterClause::Terms {
            field: field.into(),
            values: values.into_iter().collect(),
        });
        self
    }

    #[must_use]
    pub fn prefix(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter.push(FilterClause::Prefix {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn exists(mut self, field: impl Into<String>) -> Self {
        self.filter.push(FilterClause::Exists { field: field.into() });
        self
    }

    #[must_use]
    pub fn range(mut self, field: impl Into<String>, gte: Option<Value>, lt: Option<Value>) -> Self {
        self.filter.push(FilterClause::Range {
            field: field.into(),
            gte,
            lt,
        });
        self
    }

    /// Exclude anything matching `clause`
    #[must_use]
    pub fn exclude(mut self, clause: FilterClause) -> Self {
        self.must_not.push(clause);
        self
    }

    /// Clauses every match must satisfy
    #[must_use]
    pub fn filters(&self) -> &[FilterClause] {
        &self.filter
    }

    /// Clauses no match may satisfy
    #[must_use]
    pub fn exclusions(&self) -> &[FilterClause] {
        &self.must_not
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filter.is_empty() && self.must_not.is_empty()
    }

    /// Render the backend's query document
    #[must_use]
    pub fn to_value(&self) -> Value {
        if self.is_empty() {
            return json!({ "match_all": {} });
        }
        let mut clauses = Map::new();
        if !self.filter.is_empty() {
            clauses.insert(
                "filter".to_string(),
                Value::Array(self.filter.iter().map(FilterClause::to_value).collect()),
            );
        }
        if !self.must_not.is_empty() {
            clauses.insert(
                "must_not".to_string(),
                Value::Array(self.must_not.iter().map(FilterClause::to_value).collect()),
            );
        }
        json!({ "bool": clauses })
    }

    /// Read a query document written by [`FilterQuery::to_value`]
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::DeserializationError` for anything other than
    /// `match_all` or a `bool` query built from the supported clauses.
    pub fn from_value(value: &Value) -> Result<Self> {
        let (kind, body) = single_entry(value, "filter query")?;
        match kind {
            "match_all" => Ok(Self::new()),
            "bool" => {
                let clauses = |key: &str| -> Result<Vec<FilterClause>> {
                    match body.get(key) {
                        None => Ok(Vec::new()),
                        Some(Value::Array(items)) => items.iter().map(FilterClause::from_value).collect(),
                        Some(_) => Err(AtlanError::deserialization(format!("bool.{key} must be an array"))),
                    }
                };
                Ok(Self {
                    filter: clauses("filter")?,
                    must_not: clauses("must_not")?,
                })
            }
            other => Err(AtlanError::deserialization(format!(
                "unsupported query '{other}'"
            ))),
        }
    }
}

impl Serialize for FilterQuery {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FilterQuery {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_term_values_are_written_inline() {
        let query = FilterQuery::new().term(TYPE_NAME_FIELD, "Table");

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"bool": {"filter": [{"term": {"__typeName.keyword": "Table"}}]}})
        );
    }

    #[test]
    fn test_full_query_shape() {
        let query = FilterQuery::active_of_types(["Table", "View"])
            .prefix("qualifiedName", "default/snowflake/1700000000/")
            .range("__timestamp", Some(json!(1_700_000_000_000_i64)), None)
            .exclude(FilterClause::Exists {
                field: "certificateStatus".to_string(),
            });

        assert_eq!(
            query.to_value(),
            json!({"bool": {
                "filter": [
                    {"term": {"__state": "ACTIVE"}},
                    {"terms": {"__typeName.keyword": ["Table", "View"]}},
                    {"prefix": {"qualifiedName": "default/snowflake/1700000000/"}},
                    {"range": {"__timestamp": {"gte": 1_700_000_000_000_i64}}}
                ],
                "must_not": [{"exists": {"field": "certificateStatus"}}]
            }})
        );

        let text = serde_json::to_string(&query).unwrap();
        let back: FilterQuery = serde_json::from_str(&text).unwrap();
        assert_eq!(back, query);
    }

    #[test]
    fn test_empty_query_matches_all() {
        let query = FilterQuery::new();
        assert!(query.is_empty());
        assert_eq!(serde_json::to_value(&query).unwrap(), json!({"match_all": {}}));
        let back: FilterQuery = serde_json::from_value(json!({"match_all": {}})).unwrap();
        assert!(back.is_empty());
    }

    #[test]
    fn test_connection_scope() {
        let query = FilterQuery::within_connection("default/snowflake/1700000000");
        assert_eq!(
            query.filters(),
            &[FilterClause::Term {
                field: CONNECTION_FIELD.to_string(),
                value: json!("default/snowflake/1700000000"),
            }]
        );
        assert!(query.exclusions().is_empty());
    }

    #[test]
    fn test_standard_layout_is_rejected() {
        // Externally tagged layout a derived impl would write
        let derived = json!({"filter": [{"Term": {"field": "__state", "value": "ACTIVE"}}]});
        assert!(FilterQuery::from_value(&derived).is_err());
        assert!(FilterQuery::from_value(&json!({"bool": {"filter": {"term": {"a": 1}}}})).is_err());
        assert!(FilterQuery::from_value(&json!({"bool": {"filter": [{"fuzzy": {"a": "b"}}]}})).is_err());
    }
}
