//! Build request model.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::component::ComponentName;
use crate::error::Result;

/// One caller's request for a custom build.
///
/// `included_components` keeps the raw strings the caller sent. Names outside
/// the catalogue are not an error here; synthesis simply skips them.
///
/// # Example
///
/// ```
/// use smelter_config::{BuildConfiguration, ComponentName};
///
/// let config = BuildConfiguration::from_json_str(
///     r#"{
///         "orgId": "ORG1@AdobeOrg",
///         "edgeConfigId": "11111111-1111-1111-1111-111111111111",
///         "includedComponents": ["Identity", "Context"]
///     }"#,
/// )
/// .unwrap();
///
/// assert!(!config.minify);
/// assert_eq!(
///     config.known_components(),
///     vec![ComponentName::Context, ComponentName::Identity]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfiguration {
    pub org_id: String,

    pub edge_config_id: String,

    #[serde(default)]
    pub included_components: IndexSet<String>,

    /// Older clients omit this field.
    #[serde(default)]
    pub minify: bool,
}

impl BuildConfiguration {
    pub fn new(org_id: impl Into<String>, edge_config_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            edge_config_id: edge_config_id.into(),
            included_components: IndexSet::new(),
            minify: false,
        }
    }

    /// Add components by name. Duplicates collapse.
    pub fn with_components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.included_components
            .extend(components.into_iter().map(Into::into));
        self
    }

    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Create from an already-parsed JSON body.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn includes(&self, component: ComponentName) -> bool {
        self.included_components.contains(component.as_str())
    }

    /// Requested components that exist in the catalogue, in catalogue order.
    pub fn known_components(&self) -> Vec<ComponentName> {
        ComponentName::ALL
            .into_iter()
            .filter(|c| self.includes(*c))
            .collect()
    }

    /// Requested names that match no catalogued component, in request order.
    pub fn unknown_components(&self) -> Vec<&str> {
        self.included_components
            .iter()
            .filter(|name| name.parse::<ComponentName>().is_err())
            .map(String::as_str)
            .collect()
    }
}
