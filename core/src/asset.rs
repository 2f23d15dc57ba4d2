//! Asset envelopes
//!
//! Assets are read from `{typeName, guid, attributes}` documents. Unlike
//! struct values, an asset whose `typeName` is not modelled here is still
//! accepted and kept as [`Asset::Indistinct`].

use crate::error::{AtlanError, Result};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

/// Attributes every asset carries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_qualified_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionAttributes {
    #[serde(flatten)]
    pub core: AssetCore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub admin_roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub admin_users: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub admin_groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_query: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_query_preview: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAttributes {
    #[serde(flatten)]
    pub core: AssetCore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaAttributes {
    #[serde(flatten)]
    pub core: AssetCore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableAttributes {
    #[serde(flatten)]
    pub core: AssetCore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnAttributes {
    #[serde(flatten)]
    pub core: AssetCore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

/// Envelope around one asset's attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord<A> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub attributes: A,
}

/// Asset of a type this crate does not model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndistinctAsset {
    #[serde(skip)]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

/// Any asset, dispatched on `typeName`
#[derive(Debug, Clone, PartialEq)]
pub enum Asset {
    Connection(AssetRecord<ConnectionAttributes>),
    Database(AssetRecord<DatabaseAttributes>),
    Schema(AssetRecord<SchemaAttributes>),
    Table(AssetRecord<TableAttributes>),
    Column(AssetRecord<ColumnAttributes>),
    /// Catch-all for every other asset type
    Indistinct(IndistinctAsset),
}

impl Asset {
    /// `typeName` of this asset
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Connection(_) => "Connection",
            Self::Database(_) => "Database",
            Self::Schema(_) => "Schema",
            Self::Table(_) => "Table",
            Self::Column(_) => "Column",
            Self::Indistinct(asset) => &asset.type_name,
        }
    }

    /// GUID, if the asset has been persisted
    #[must_use]
    pub fn guid(&self) -> Option<&str> {
        match self {
            Self::Connection(a) => a.guid.as_deref(),
            Self::Database(a) => a.guid.as_deref(),
            Self::Schema(a) => a.guid.as_deref(),
            Self::Table(a) => a.guid.as_deref(),
            Self::Column(a) => a.guid.as_deref(),
            Self::Indistinct(a) => a.guid.as_deref(),
        }
    }

    /// Dispatch a JSON document on its `typeName`
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::DeserializationError` if the document is not an
    /// object, lacks `typeName`, or its attributes do not fit a modelled type.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut doc) = value else {
            return Err(AtlanError::deserialization("asset must be a JSON object"));
        };
        let Some(Value::String(type_name)) = doc.remove("typeName") else {
            return Err(AtlanError::deserialization("asset is missing a string typeName"));
        };
        let body = Value::Object(doc);
        let typed = |e: serde_json::Error| AtlanError::DeserializationError {
            message: e.to_string(),
            type_name: Some(type_name.clone()),
        };
        let asset = match type_name.as_str() {
            "Connection" => Self::Connection(serde_json::from_value(body).map_err(typed)?),
            "Database" => Self::Database(serde_json::from_value(body).map_err(typed)?),
            "Schema" => Self::Schema(serde_json::from_value(body).map_err(typed)?),
            "Table" => Self::Table(serde_json::from_value(body).map_err(typed)?),
            "Column" => Self::Column(serde_json::from_value(body).map_err(typed)?),
            _ => {
                trace!(type_name = %type_name, "keeping unmodelled asset as indistinct");
                let mut asset: IndistinctAsset = serde_json::from_value(body).map_err(typed)?;
                asset.type_name = type_name.clone();
                Self::Indistinct(asset)
            }
        };
        Ok(asset)
    }

    /// Render back to the `{typeName, guid, attributes}` document
    ///
    /// # Errors
    ///
    /// Returns an error if the attributes cannot be serialized.
    pub fn to_value(&self) -> Result<Value> {
        let body = match self {
            Self::Connection(a) => serde_json::to_value(a)?,
            Self::Database(a) => serde_json::to_value(a)?,
            Self::Schema(a) => serde_json::to_value(a)?,
            Self::Table(a) => serde_json::to_value(a)?,
            Self::Column(a) => serde_json::to_value(a)?,
            Self::Indistinct(a) => serde_json::to_value(a)?,
        };
        let mut doc = Map::new();
        doc.insert("typeName".to_string(), Value::String(self.type_name().to_string()));
        if let Value::Object(fields) = body {
            doc.extend(fields);
        }
        Ok(Value::Object(doc))
    }
}

impl Serialize for Asset {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_known_asset_dispatch() {
        let asset: Asset = serde_json::from_value(json!({
            "typeName": "Table",
            "guid": "1234",
            "attributes": {
                "qualifiedName": "default/snowflake/1/DB/SCH/ORDERS",
                "name": "ORDERS",
                "rowCount": 10
            }
        }))
        .unwrap();

        match &asset {
            Asset::Table(table) => {
                assert_eq!(table.attributes.core.name.as_deref(), Some("ORDERS"));
                assert_eq!(table.attributes.row_count, Some(10));
            }
            other => panic!("expected a table, got {}", other.type_name()),
        }
        assert_eq!(asset.guid(), Some("1234"));

        let back: Asset = serde_json::from_value(serde_json::to_value(&asset).unwrap()).unwrap();
        assert_eq!(back, asset);
    }

    #[test]
    fn test_unknown_asset_is_indistinct() {
        let asset = Asset::from_value(json!({
            "typeName": "SnowflakePipe",
            "attributes": {"name": "ingest", "snowflakePipeIsAutoIngestEnabled": true}
        }))
        .unwrap();

        assert_eq!(asset.type_name(), "SnowflakePipe");
        match &asset {
            Asset::Indistinct(other) => {
                assert_eq!(other.attributes["snowflakePipeIsAutoIngestEnabled"], json!(true));
            }
            _ => panic!("expected the catch-all variant"),
        }

        let rendered = asset.to_value().unwrap();
        assert_eq!(rendered["typeName"], "SnowflakePipe");
        assert_eq!(rendered["attributes"]["name"], "ingest");
    }

    #[test]
    fn test_missing_type_name_fails() {
        assert!(Asset::from_value(json!({"attributes": {}})).is_err());
    }
}
