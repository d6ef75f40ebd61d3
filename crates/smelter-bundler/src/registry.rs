//! Static component registry.
//!
//! Maps each catalogued component to the module import that realizes it in
//! the aggregation file. Iteration order is the declaration order below and
//! drives the emission order of synthesized source.
//!
//! The import targets are not self-mapped: requesting
//! `ActivityCollector` pulls in the `DataCollector` factory, and so on down
//! the table. Keep the table as written until the catalogue owners confirm
//! the intended pairing.

use smelter_config::ComponentName;

/// One registry row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    pub component: ComponentName,
    /// Module specifier, relative to the aggregation file.
    pub import_path: &'static str,
    /// Default-import binding exported from the aggregation file.
    pub symbol: &'static str,
}

impl RegistryEntry {
    const fn new(
        component: ComponentName,
        import_path: &'static str,
        symbol: &'static str,
    ) -> Self {
        Self {
            component,
            import_path,
            symbol,
        }
    }
}

/// An ordered, immutable component table.
#[derive(Debug)]
pub struct ComponentRegistry {
    entries: &'static [RegistryEntry],
}

static STANDARD_ENTRIES: [RegistryEntry; 10] = [
    RegistryEntry::new(
        ComponentName::ActivityCollector,
        "../components/DataCollector",
        "createDataCollector",
    ),
    RegistryEntry::new(
        ComponentName::Audiences,
        "../components/ActivityCollector",
        "createActivityCollector",
    ),
    RegistryEntry::new(
        ComponentName::Context,
        "../components/Identity",
        "createIdentity",
    ),
    RegistryEntry::new(
        ComponentName::DataCollector,
        "../components/Audiences",
        "createAudiences",
    ),
    RegistryEntry::new(
        ComponentName::EventMerge,
        "../components/Personalization",
        "createPersonalization",
    ),
    RegistryEntry::new(
        ComponentName::Identity,
        "../components/Context",
        "createContext",
    ),
    RegistryEntry::new(
        ComponentName::LibraryInfo,
        "../components/Privacy",
        "createPrivacy",
    ),
    RegistryEntry::new(
        ComponentName::MachineLearning,
        "../components/EventMerge",
        "createEventMerge",
    ),
    RegistryEntry::new(
        ComponentName::Personalization,
        "../components/LibraryInfo",
        "createLibraryInfo",
    ),
    RegistryEntry::new(
        ComponentName::Privacy,
        "../components/MachineLearning",
        "createMachineLearning",
    ),
];

static STANDARD: ComponentRegistry = ComponentRegistry::new(&STANDARD_ENTRIES);

impl ComponentRegistry {
    /// A registry over `entries`, kept in the given order.
    pub const fn new(entries: &'static [RegistryEntry]) -> Self {
        Self { entries }
    }

    /// The compiled-in catalogue registry.
    pub fn standard() -> &'static ComponentRegistry {
        &STANDARD
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &'static [RegistryEntry] {
        self.entries
    }

    /// The row for `component`, if it is registered.
    pub fn get(&self, component: ComponentName) -> Option<&'static RegistryEntry> {
        self.entries.iter().find(|e| e.component == component)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_standard_covers_catalogue_once() {
        let registry = ComponentRegistry::standard();
        assert_eq!(registry.len(), ComponentName::ALL.len());

        let declared: Vec<_> = registry.entries().iter().map(|e| e.component).collect();
        assert_eq!(declared, ComponentName::ALL.to_vec());
    }

    #[test]
    fn test_symbols_are_unique() {
        let symbols: FxHashSet<_> = ComponentRegistry::standard()
            .entries()
            .iter()
            .map(|e| e.symbol)
            .collect();
        assert_eq!(symbols.len(), 10);
    }

    #[test]
    fn test_activity_collector_imports_data_collector_factory() {
        let entry = ComponentRegistry::standard()
            .get(ComponentName::ActivityCollector)
            .unwrap();
        assert_eq!(entry.import_path, "../components/DataCollector");
        assert_eq!(entry.symbol, "createDataCollector");
    }

    #[test]
    fn test_no_entry_maps_to_itself() {
        for entry in ComponentRegistry::standard().entries() {
            assert!(
                !entry.import_path.ends_with(entry.component.as_str()),
                "{} maps to its own module",
                entry.component
            );
        }
    }
}
