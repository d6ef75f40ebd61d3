//! Aggregation source synthesis.
//!
//! Turns a build request into the text of the aggregation module: one
//! default import per selected registry entry, then a single default export
//! listing the imported factories.

use smelter_config::BuildConfiguration;

use crate::registry::{ComponentRegistry, RegistryEntry};

/// Synthesize aggregation source for `configuration`.
///
/// Emission follows the registry's declaration order, never the request's,
/// so set-equal selections always produce identical text. Names outside the
/// catalogue contribute nothing.
///
/// # Example
///
/// ```
/// use smelter_bundler::{ComponentRegistry, synthesize};
/// use smelter_config::BuildConfiguration;
///
/// let config = BuildConfiguration::new("org", "edge").with_components(["Identity", "Context"]);
/// let source = synthesize(&config, ComponentRegistry::standard());
///
/// assert_eq!(
///     source,
///     "import createIdentity from \"../components/Identity\";\n\
///      import createContext from \"../components/Context\";\n\
///      \n\
///      export default [createIdentity, createContext];\n"
/// );
/// ```
pub fn synthesize(configuration: &BuildConfiguration, registry: &ComponentRegistry) -> String {
    let selected: Vec<&RegistryEntry> = registry
        .entries()
        .iter()
        .filter(|entry| configuration.includes(entry.component))
        .collect();

    let mut source = String::new();
    for entry in &selected {
        source.push_str(&format!(
            "import {} from \"{}\";\n",
            entry.symbol, entry.import_path
        ));
    }
    if !selected.is_empty() {
        source.push('\n');
    }

    let symbols = selected
        .iter()
        .map(|entry| entry.symbol)
        .collect::<Vec<_>>()
        .join(", ");
    source.push_str(&format!("export default [{symbols}];\n"));

    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use smelter_config::ComponentName;

    fn config(components: &[&str]) -> BuildConfiguration {
        BuildConfiguration::new("ORG1@AdobeOrg", "11111111-1111-1111-1111-111111111111")
            .with_components(components.iter().copied())
    }

    fn import_lines(source: &str) -> Vec<&str> {
        source.lines().filter(|l| l.starts_with("import ")).collect()
    }

    #[test]
    fn test_empty_selection() {
        let source = synthesize(&config(&[]), ComponentRegistry::standard());
        assert_eq!(source, "export default [];\n");
    }

    #[test]
    fn test_context_and_identity() {
        let source = synthesize(&config(&["Context", "Identity"]), ComponentRegistry::standard());
        assert_eq!(
            import_lines(&source),
            vec![
                "import createIdentity from \"../components/Identity\";",
                "import createContext from \"../components/Context\";",
            ]
        );
        assert!(source.ends_with("export default [createIdentity, createContext];\n"));
    }

    #[test]
    fn test_request_order_does_not_matter() {
        let registry = ComponentRegistry::standard();
        let forward = synthesize(&config(&["Privacy", "Audiences", "EventMerge"]), registry);
        let reverse = synthesize(&config(&["EventMerge", "Audiences", "Privacy"]), registry);
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_unknown_names_are_dropped() {
        let registry = ComponentRegistry::standard();
        let with_unknown = synthesize(&config(&["Telemetry", "Privacy", "privacy"]), registry);
        let without = synthesize(&config(&["Privacy"]), registry);
        assert_eq!(with_unknown, without);
        assert_eq!(import_lines(&with_unknown).len(), 1);
    }

    #[test]
    fn test_full_catalogue_follows_registry_order() {
        let names: Vec<&str> = ComponentName::ALL.iter().rev().map(|c| c.as_str()).collect();
        let source = synthesize(&config(&names), ComponentRegistry::standard());

        let expected: Vec<String> = ComponentRegistry::standard()
            .entries()
            .iter()
            .map(|e| format!("import {} from \"{}\";", e.symbol, e.import_path))
            .collect();
        assert_eq!(import_lines(&source), expected);
        assert_eq!(source.matches("export default").count(), 1);
    }

    #[test]
    fn test_custom_registry() {
        static ENTRIES: [RegistryEntry; 1] = [RegistryEntry {
            component: ComponentName::Privacy,
            import_path: "./privacy",
            symbol: "createPrivacy",
        }];
        static REGISTRY: ComponentRegistry = ComponentRegistry::new(&ENTRIES);

        let source = synthesize(&config(&["Privacy", "Identity"]), &REGISTRY);
        assert_eq!(
            source,
            "import createPrivacy from \"./privacy\";\n\nexport default [createPrivacy];\n"
        );
    }
}
