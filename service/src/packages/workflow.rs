//! Argo workflow submission documents

#![allow(missing_docs)] // field names mirror the orchestrator's schema

use atlan_core::{AtlanError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Workflow document submitted to the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub metadata: WorkflowMetadata,
    pub spec: WorkflowSpec,
    /// Secrets and other out-of-band inputs referenced by the parameters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payload: Vec<PackageParameter>,
}

impl Workflow {
    /// Parameter value of the entry task, if set
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.spec
            .templates
            .iter()
            .flat_map(|template| &template.dag.tasks)
            .flat_map(|task| &task.arguments.parameters)
            .find(|pair| pair.name == name)
            .map(|pair| pair.value.as_str())
    }

    /// Serialize to compact JSON
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::SerializationError` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| AtlanError::serialization(e.to_string()))
    }

    /// Serialize to indented JSON
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::SerializationError` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| AtlanError::serialization(e.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowMetadata {
    #[serde(default)]
    pub labels: IndexMap<String, String>,
    #[serde(default)]
    pub annotations: IndexMap<String, String>,
    pub name: String,
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSpec {
    pub templates: Vec<WorkflowTemplate>,
    pub entrypoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_metadata: Option<WorkflowMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTemplate {
    pub name: String,
    pub dag: WorkflowDag,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDag {
    pub tasks: Vec<WorkflowTask>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTask {
    pub name: String,
    pub arguments: WorkflowParameters,
    pub template_ref: WorkflowTemplateRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowParameters {
    pub parameters: Vec<NameValuePair>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTemplateRef {
    pub name: String,
    pub template: String,
    pub cluster_scope: bool,
}

/// One workflow parameter; values are always strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValuePair {
    pub name: String,
    pub value: String,
}

impl NameValuePair {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Payload entry, e.g. a credential referenced as `{{credentialGuid}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageParameter {
    pub parameter: String,
    #[serde(rename = "type")]
    pub parameter_type: String,
    pub body: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_names() {
        let task = WorkflowTask {
            name: "run".to_string(),
            arguments: WorkflowParameters {
                parameters: vec![NameValuePair::new("delete-type", "SOFT")],
            },
            template_ref: WorkflowTemplateRef {
                name: "atlan-connection-delete".to_string(),
                template: "main".to_string(),
                cluster_scope: true,
            },
        };

        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            json!({
                "name": "run",
                "arguments": {"parameters": [{"name": "delete-type", "value": "SOFT"}]},
                "templateRef": {"name": "atlan-connection-delete", "template": "main", "clusterScope": true}
            })
        );
    }
}
