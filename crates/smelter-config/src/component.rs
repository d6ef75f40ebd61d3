//! The closed catalogue of optional feature components.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A catalogued feature component that may be included in a custom build.
///
/// The set is closed: request entries that do not parse into one of these
/// are carried as raw strings and skipped during synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentName {
    ActivityCollector,
    Audiences,
    Context,
    DataCollector,
    EventMerge,
    Identity,
    LibraryInfo,
    MachineLearning,
    Personalization,
    Privacy,
}

impl ComponentName {
    /// Every component, in catalogue order.
    pub const ALL: [ComponentName; 10] = [
        ComponentName::ActivityCollector,
        ComponentName::Audiences,
        ComponentName::Context,
        ComponentName::DataCollector,
        ComponentName::EventMerge,
        ComponentName::Identity,
        ComponentName::LibraryInfo,
        ComponentName::MachineLearning,
        ComponentName::Personalization,
        ComponentName::Privacy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentName::ActivityCollector => "ActivityCollector",
            ComponentName::Audiences => "Audiences",
            ComponentName::Context => "Context",
            ComponentName::DataCollector => "DataCollector",
            ComponentName::EventMerge => "EventMerge",
            ComponentName::Identity => "Identity",
            ComponentName::LibraryInfo => "LibraryInfo",
            ComponentName::MachineLearning => "MachineLearning",
            ComponentName::Personalization => "Personalization",
            ComponentName::Privacy => "Privacy",
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no catalogued component.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component: {0}")]
pub struct UnknownComponent(pub String);

impl FromStr for ComponentName {
    type Err = UnknownComponent;

    /// Exact, case-sensitive match against the catalogue names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentName::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownComponent(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_catalogue_name() {
        for component in ComponentName::ALL {
            assert_eq!(component.as_str().parse::<ComponentName>(), Ok(component));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("identity".parse::<ComponentName>().is_err());
        assert!("IDENTITY".parse::<ComponentName>().is_err());
        assert!("".parse::<ComponentName>().is_err());
    }

    #[test]
    fn test_unknown_component_message() {
        let err = "Telemetry".parse::<ComponentName>().unwrap_err();
        assert_eq!(err.to_string(), "unknown component: Telemetry");
    }

    #[test]
    fn test_serde_uses_bare_name() {
        let json = serde_json::to_string(&ComponentName::MachineLearning).unwrap();
        assert_eq!(json, "\"MachineLearning\"");
    }
}
