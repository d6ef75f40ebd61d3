//! Parsing of build requests as they arrive from callers.

use serde_json::json;
use smelter_config::{BuildConfiguration, ComponentName, ConfigError};

#[test]
fn test_parses_current_protocol() {
    let config = BuildConfiguration::from_value(json!({
        "orgId": "ORG1@AdobeOrg",
        "edgeConfigId": "11111111-1111-1111-1111-111111111111",
        "includedComponents": ["Context", "Identity"],
        "minify": true
    }))
    .unwrap();

    assert_eq!(config.org_id, "ORG1@AdobeOrg");
    assert_eq!(config.edge_config_id, "11111111-1111-1111-1111-111111111111");
    assert!(config.minify);
    assert!(config.includes(ComponentName::Context));
    assert!(config.includes(ComponentName::Identity));
    assert!(!config.includes(ComponentName::Privacy));
}

#[test]
fn test_minify_defaults_to_false_for_older_clients() {
    let config = BuildConfiguration::from_json_str(
        r#"{"orgId":"o","edgeConfigId":"e","includedComponents":["Privacy"]}"#,
    )
    .unwrap();
    assert!(!config.minify);
}

#[test]
fn test_missing_component_list_is_empty_selection() {
    let config = BuildConfiguration::from_json_str(r#"{"orgId":"o","edgeConfigId":"e"}"#).unwrap();
    assert!(config.included_components.is_empty());
    assert!(config.known_components().is_empty());
}

#[test]
fn test_unknown_names_survive_parsing() {
    let config = BuildConfiguration::from_value(json!({
        "orgId": "o",
        "edgeConfigId": "e",
        "includedComponents": ["Telemetry", "Audiences"]
    }))
    .unwrap();

    assert_eq!(config.unknown_components(), vec!["Telemetry"]);
    assert_eq!(config.known_components(), vec![ComponentName::Audiences]);
}

#[test]
fn test_duplicate_entries_collapse() {
    let config = BuildConfiguration::from_value(json!({
        "orgId": "o",
        "edgeConfigId": "e",
        "includedComponents": ["Identity", "Identity"]
    }))
    .unwrap();
    assert_eq!(config.included_components.len(), 1);
}

#[test]
fn test_missing_identifiers_are_rejected() {
    let err = BuildConfiguration::from_json_str(r#"{"includedComponents":[]}"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRequest(_)));
    assert!(err.to_string().contains("orgId"));
}

#[test]
fn test_wrong_minify_type_is_rejected() {
    let result = BuildConfiguration::from_value(json!({
        "orgId": "o",
        "edgeConfigId": "e",
        "minify": "yes"
    }));
    assert!(result.is_err());
}

#[test]
fn test_serializes_with_wire_field_names() {
    let config = BuildConfiguration::new("o", "e")
        .with_components(["Identity"])
        .with_minify(true);
    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(
        value,
        json!({
            "orgId": "o",
            "edgeConfigId": "e",
            "includedComponents": ["Identity"],
            "minify": true
        })
    );
}
