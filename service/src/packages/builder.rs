//! Accumulates the labels, annotations and parameters of one package run

use super::workflow::{
    NameValuePair, PackageParameter, Workflow, WorkflowDag, WorkflowMetadata, WorkflowParameters,
    WorkflowSpec, WorkflowTask, WorkflowTemplate, WorkflowTemplateRef,
};
use indexmap::IndexMap;
use serde_json::Value;

/// Namespace packages run in
pub const DEFAULT_NAMESPACE: &str = "default";

/// Template every package exposes as its entry point
pub const ENTRYPOINT: &str = "main";

/// Label and annotation keys owned by the orchestrator
#[allow(missing_docs)]
pub mod keys {
    pub const CERTIFIED: &str = "orchestration.atlan.com/certified";
    pub const SOURCE: &str = "orchestration.atlan.com/source";
    pub const SOURCE_CATEGORY: &str = "orchestration.atlan.com/sourceCategory";
    pub const TYPE: &str = "orchestration.atlan.com/type";
    pub const VERIFIED: &str = "orchestration.atlan.com/verified";
    pub const PREVIEW: &str = "orchestration.atlan.com/preview";
    pub const ATLAN_UI: &str = "orchestration.atlan.com/atlan-ui";
    pub const ALLOW_SCHEDULE: &str = "orchestration.atlan.com/allowSchedule";
    pub const CATEGORIES: &str = "orchestration.atlan.com/categories";
    pub const DOCS_URL: &str = "orchestration.atlan.com/docsUrl";
    pub const EMOJI: &str = "orchestration.atlan.com/emoji";
    pub const ICON: &str = "orchestration.atlan.com/icon";
    pub const LOGO: &str = "orchestration.atlan.com/logo";
    pub const MARKETPLACE_LINK: &str = "orchestration.atlan.com/marketplaceLink";
    pub const NAME: &str = "orchestration.atlan.com/name";
    pub const ATLAN_NAME: &str = "orchestration.atlan.com/atlanName";
    pub const PACKAGE_INSTALLER: &str = "package.argoproj.io/installer";
    pub const PACKAGE_NAME: &str = "package.argoproj.io/name";
    pub const PACKAGE_REGISTRY: &str = "package.argoproj.io/registry";
    pub const PACKAGE_DESCRIPTION: &str = "package.argoproj.io/description";
    pub const PACKAGE_HOMEPAGE: &str = "package.argoproj.io/homepage";
    pub const PACKAGE_KEYWORDS: &str = "package.argoproj.io/keywords";
    pub const PACKAGE_REPOSITORY: &str = "package.argoproj.io/repository";
    pub const PACKAGE_SUPPORT: &str = "package.argoproj.io/support";
}

const REGISTRY: &str = "https://packages.atlan.com";
const REPOSITORY: &str = "git+https://github.com/atlanhq/marketplace-packages.git";
const SUPPORT: &str = "support@atlan.com";

/// Encode a value so it is a valid Kubernetes label value
///
/// `@atlan/snowflake` becomes `a-t-ratlans-l-a-s-hsnowflake`.
#[must_use]
pub fn encode_label_value(value: &str) -> String {
    value
        .replace('@', "a-t-r")
        .replace('/', "s-l-a-s-h")
        .replace(':', "c-o-l-o-n")
}

/// Template name of a package: `@atlan/connection-delete` runs `atlan-connection-delete`
#[must_use]
pub fn template_name(package_name: &str) -> String {
    package_name.trim_start_matches('@').replace('/', "-")
}

/// Builder for one workflow document
#[derive(Debug, Clone)]
pub struct PackageBuilder {
    prefix: String,
    package_name: String,
    epoch: i64,
    namespace: String,
    labels: IndexMap<String, String>,
    annotations: IndexMap<String, String>,
    parameters: Vec<NameValuePair>,
    payload: Vec<PackageParameter>,
}

impl PackageBuilder {
    /// Start a package run stamped with the current time
    ///
    /// `prefix` names the workflow (`{prefix}-{epoch}`), `package_name` is the
    /// registry name such as `@atlan/snowflake`.
    #[must_use]
    pub fn new(prefix: impl Into<String>, package_name: impl Into<String>) -> Self {
        let package_name = package_name.into();
        let mut builder = Self {
            prefix: prefix.into(),
            package_name,
            epoch: chrono::Utc::now().timestamp(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            labels: IndexMap::new(),
            annotations: IndexMap::new(),
            parameters: Vec::new(),
            payload: Vec::new(),
        };
        builder.add_registry_metadata();
        builder
    }

    /// Fix the run's epoch seconds
    #[must_use]
    pub fn with_epoch(mut self, epoch: i64) -> Self {
        self.epoch = epoch;
        self
    }

    /// Run in a namespace other than `default`
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    fn add_registry_metadata(&mut self) {
        self.add_label(keys::PACKAGE_INSTALLER, "argopm");
        self.add_label(keys::PACKAGE_NAME, encode_label_value(&self.package_name));
        self.add_label(keys::PACKAGE_REGISTRY, encode_label_value(REGISTRY));
        self.add_annotation(keys::PACKAGE_NAME, self.package_name.clone());
        self.add_annotation(keys::PACKAGE_REGISTRY, REGISTRY);
        self.add_annotation(keys::PACKAGE_REPOSITORY, REPOSITORY);
        self.add_annotation(keys::PACKAGE_SUPPORT, SUPPORT);
        self.add_annotation(
            keys::MARKETPLACE_LINK,
            format!("{REGISTRY}/-/web/detail/{}", self.package_name),
        );
    }

    /// Seconds since the epoch this run is stamped with
    #[must_use]
    pub fn epoch(&self) -> i64 {
        self.epoch
    }

    /// Registry name of the package
    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Name of the rendered workflow
    #[must_use]
    pub fn workflow_name(&self) -> String {
        format!("{}-{}", self.prefix, self.epoch)
    }

    /// Add or replace a label
    pub fn add_label(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Add or replace an annotation
    pub fn add_annotation(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    /// Add or replace a parameter of the entry task
    pub fn add_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.parameters.iter_mut().find(|pair| pair.name == name) {
            Some(existing) => existing.value = value,
            None => self.parameters.push(NameValuePair::new(name, value)),
        }
        self
    }

    /// Add a payload entry
    pub fn add_payload(
        &mut self,
        parameter: impl Into<String>,
        parameter_type: impl Into<String>,
        body: Value,
    ) -> &mut Self {
        self.payload.push(PackageParameter {
            parameter: parameter.into(),
            parameter_type: parameter_type.into(),
            body,
        });
        self
    }

    /// Parameter value, if set
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|pair| pair.name == name)
            .map(|pair| pair.value.as_str())
    }

    /// Render the workflow document
    #[must_use]
    pub fn to_workflow(&self) -> Workflow {
        let template = template_name(&self.package_name);
        let mut workflow_annotations = IndexMap::new();
        workflow_annotations.insert(keys::PACKAGE_NAME.to_string(), self.package_name.clone());

        Workflow {
            metadata: WorkflowMetadata {
                labels: self.labels.clone(),
                annotations: self.annotations.clone(),
                name: self.workflow_name(),
                namespace: self.namespace.clone(),
            },
            spec: WorkflowSpec {
                templates: vec![WorkflowTemplate {
                    name: ENTRYPOINT.to_string(),
                    dag: WorkflowDag {
                        tasks: vec![WorkflowTask {
                            name: "run".to_string(),
                            arguments: WorkflowParameters {
                                parameters: self.parameters.clone(),
                            },
                            template_ref: WorkflowTemplateRef {
                                name: template,
                                template: ENTRYPOINT.to_string(),
                                cluster_scope: true,
                            },
                        }],
                    },
                }],
                entrypoint: ENTRYPOINT.to_string(),
                workflow_metadata: Some(WorkflowMetadata {
                    annotations: workflow_annotations,
                    ..WorkflowMetadata::default()
                }),
            },
            payload: self.payload.clone(),
        }
    }
}
