//! Diagnostic classification for Rolldown errors.
//!
//! Rolldown's error types are batched and change between releases, so the
//! adapter works from their formatted text. The kind is only used to tag log
//! events; callers always receive the full text.

use std::fmt;

/// Broad category of an engine failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The entry module could not be found.
    UnresolvedEntry,
    /// An import inside the graph did not resolve.
    UnresolvedImport,
    /// A module failed to parse.
    ParseError,
    /// An import names a binding the target does not export.
    MissingExport,
    Plugin,
    Other,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::UnresolvedEntry => "UnresolvedEntry",
            DiagnosticKind::UnresolvedImport => "UnresolvedImport",
            DiagnosticKind::ParseError => "ParseError",
            DiagnosticKind::MissingExport => "MissingExport",
            DiagnosticKind::Plugin => "Plugin",
            DiagnosticKind::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Classify formatted error text.
pub fn classify(message: &str) -> DiagnosticKind {
    if message.contains("UnresolvedEntry") {
        DiagnosticKind::UnresolvedEntry
    } else if message.contains("UnresolvedImport") || message.contains("Could not resolve") {
        DiagnosticKind::UnresolvedImport
    } else if message.contains("MissingExport") || message.contains("is not exported") {
        DiagnosticKind::MissingExport
    } else if message.contains("Parse error")
        || message.contains("Syntax")
        || message.contains("Unexpected token")
        || message.contains("Expected")
    {
        DiagnosticKind::ParseError
    } else if message.contains("Plugin") {
        DiagnosticKind::Plugin
    } else {
        DiagnosticKind::Other
    }
}

/// Render a Rolldown error and log its kind.
pub fn describe_rolldown_error(error: &dyn fmt::Debug) -> String {
    let message = format!("{error:?}");
    tracing::debug!(kind = %classify(&message), "Rolldown reported an error");
    message
}
