//! `smelter components`

use smelter_bundler::ComponentRegistry;
use std::fmt::Write as _;

use crate::error::Result;

/// Catalogue table in registry order: requested name, import path, symbol.
pub fn render(registry: &ComponentRegistry) -> String {
    let mut out = String::new();
    for entry in registry.entries() {
        let _ = writeln!(
            out,
            "{:<18} {:<34} {}",
            entry.component.as_str(),
            entry.import_path,
            entry.symbol
        );
    }
    out
}

pub fn execute() -> Result<()> {
    print!("{}", render(ComponentRegistry::standard()));
    Ok(())
}
