//! Struct value types and their `typeName`-keyed dispatch
//!
//! Struct values travel as flat JSON objects: a `typeName` discriminator plus
//! the struct's own `camelCase` fields. The set of struct types is closed;
//! an unregistered discriminator is an error, never a default variant.

use crate::error::{AtlanError, Result};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

macro_rules! atlan_structs {
    ($( $(#[$doc:meta])* $name:ident ),+ $(,)?) => {
        /// Any struct value known to this crate
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "typeName")]
        pub enum AtlanStruct {
            $( $(#[$doc])* $name($name), )+
        }

        impl AtlanStruct {
            /// Every registered discriminator value, in declaration order
            pub const TYPE_NAMES: &'static [&'static str] = &[$( stringify!($name), )+];

            /// Discriminator of this value
            #[must_use]
            pub fn type_name(&self) -> &'static str {
                match self {
                    $( Self::$name(_) => stringify!($name), )+
                }
            }

            fn from_fields(type_name: &str, fields: Map<String, Value>) -> Result<Self> {
                match type_name {
                    $(
                        stringify!($name) => serde_json::from_value::<$name>(Value::Object(fields))
                            .map(Self::$name)
                            .map_err(|e| AtlanError::DeserializationError {
                                message: e.to_string(),
                                type_name: Some(type_name.to_string()),
                            }),
                    )+
                    other => Err(AtlanError::unknown_type_name(other)),
                }
            }
        }

        $(
            impl From<$name> for AtlanStruct {
                fn from(value: $name) -> Self {
                    Self::$name(value)
                }
            }
        )+
    };
}

atlan_structs! {
    /// Task action button
    Action,
    /// Condition attached to an access policy
    AuthPolicyCondition,
    /// Time window during which a policy applies
    AuthPolicyValiditySchedule,
    /// CloudWatch metric reference
    AwsCloudWatchMetric,
    /// AWS resource tag
    AwsTag,
    /// Azure resource tag
    AzureTag,
    /// Colouring rule for a badge
    BadgeCondition,
    /// Value and how often it occurs in a column
    ColumnValueFrequencyMap,
    /// Filter applied by a dbt metric
    DbtMetricFilter,
    /// Google Cloud label
    GoogleLabel,
    /// Google Cloud tag
    GoogleTag,
    /// Bucketed distribution of values
    Histogram,
    /// Consumer group lag on a Kafka topic partition
    KafkaTopicConsumption,
    /// Monte Carlo rule threshold comparison
    MCRuleComparison,
    /// Monte Carlo rule schedule
    MCRuleSchedule,
    /// Usage and cost statistics for an asset
    PopularityInsights,
    /// Tag from a source system attached to an asset
    SourceTagAttachment,
    /// Key/value pair of a source tag attachment
    SourceTagAttachmentValue,
    /// Attribute of a source tag
    SourceTagAttribute,
    /// Who starred an asset, and when
    StarredDetails,
}

impl AtlanStruct {
    /// Dispatch a JSON object on its `typeName` field
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::DeserializationError` if the value is not an object,
    /// has no string `typeName`, names an unregistered struct type, or its
    /// fields do not fit the selected type.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(AtlanError::deserialization("struct value must be a JSON object"));
        };
        let type_name = match fields.remove("typeName") {
            Some(Value::String(type_name)) => type_name,
            Some(other) => {
                return Err(AtlanError::deserialization(format!(
                    "typeName must be a string, found {other}"
                )));
            }
            None => return Err(AtlanError::deserialization("missing typeName")),
        };
        Self::from_fields(&type_name, fields)
    }

    /// Parse a JSON string and dispatch it
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid JSON or dispatch fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| AtlanError::deserialization(e.to_string()))?;
        Self::from_value(value)
    }

    /// Whether `type_name` is a registered discriminator
    #[must_use]
    pub fn is_registered(type_name: &str) -> bool {
        Self::TYPE_NAMES.contains(&type_name)
    }
}

impl<'de> Deserialize<'de> for AtlanStruct {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_action_fronted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_action_display_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPolicyCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_condition_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policy_condition_values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPolicyValiditySchedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_validity_schedule_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_validity_schedule_end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_validity_schedule_timezone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsCloudWatchMetric {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_cloud_watch_metric_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_cloud_watch_metric_scope: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_tag_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_tag_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_tag_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_tag_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_condition_operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_condition_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_condition_colorhex: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnValueFrequencyMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_value_frequency: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbtMetricFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbt_metric_filter_column_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbt_metric_filter_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbt_metric_filter_operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbt_metric_filter_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLabel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_label_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_label_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_tag_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_tag_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Histogram {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boundaries: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frequencies: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaTopicConsumption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_partition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_lag: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_current_offset: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MCRuleComparison {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_rule_comparison_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_rule_comparison_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_rule_comparison_metric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_rule_comparison_operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_rule_comparison_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_rule_comparison_is_threshold_relative: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MCRuleSchedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_rule_schedule_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_rule_schedule_interval_in_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_rule_schedule_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_rule_schedule_crontab: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_rule_schedule_timezone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularityInsights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_query_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_query_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_total_user_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_compute_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_max_compute_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_compute_cost_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_last_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_warehouse: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceTagAttachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tag_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tag_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tag_guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tag_connector_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_tag_value: Vec<SourceTagAttachmentValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_source_tag_synced: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tag_sync_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tag_sync_error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceTagAttachmentValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_attachment_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_attachment_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceTagAttribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_attribute_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_attribute_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarredDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_starred_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_starred_at: Option<i64>,
}
