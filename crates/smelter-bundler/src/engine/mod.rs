//! Bundling engine contract.
//!
//! The orchestrator drives any [`BundleEngine`] through one session per
//! build: open against the entry module, generate once, close exactly once.
//! [`RolldownEngine`] is the production implementation.

pub mod rolldown;

pub use self::rolldown::RolldownEngine;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Module-resolution policy applied when a session opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionPolicy {
    /// `package.json` fields consulted, in priority order.
    pub main_fields: Vec<String>,
    /// Resolve Node builtins before same-named packages.
    pub prefer_builtins: bool,
    /// Target the browser platform.
    pub browser: bool,
    /// Interoperate with CommonJS dependencies.
    pub commonjs: bool,
}

impl ResolutionPolicy {
    /// Fixed policy for feature bundles: ESM first, falling back to the
    /// `browser` field (needed by packages like `uuid`).
    pub fn browser_bundle() -> Self {
        Self {
            main_fields: vec![
                "module".to_string(),
                "main".to_string(),
                "browser".to_string(),
            ],
            prefer_builtins: false,
            browser: true,
            commonjs: true,
        }
    }
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self::browser_bundle()
    }
}

/// Output-stage options for one generate call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// Minify the emitted code.
    pub minify: bool,
}

/// One artifact as emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOutput {
    /// Generated JavaScript.
    Chunk {
        /// Chunk name, `index` for the entry chunk.
        name: String,
        /// File name the engine would write, e.g. `index.js`.
        file_name: String,
        /// Generated code.
        code: String,
    },
    /// Non-code artifact such as a source map. Counted but never returned.
    Asset {
        /// File name the engine would write.
        file_name: String,
    },
}

/// Errors raised by an engine session.
///
/// `Generate` carries the engine's own diagnostic text unchanged, so a
/// failed build reports exactly what the bundler said.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The entry module could not be opened.
    #[error("failed to open bundle session for {}: {message}", .entry.display())]
    Open { entry: PathBuf, message: String },

    /// Parsing, resolution or code generation failed.
    #[error("{0}")]
    Generate(String),

    /// Releasing the session failed.
    #[error("failed to close bundle session: {0}")]
    Close(String),

    /// `generate` did not finish within the configured deadline.
    #[error("engine timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

/// Opens build sessions.
#[async_trait]
pub trait BundleEngine: Send + Sync + std::fmt::Debug {
    /// Open a session rooted at `entry`. Fails with [`EngineError::Open`]
    /// when the entry cannot be read.
    async fn open_session(
        &self,
        entry: &Path,
        resolution: &ResolutionPolicy,
    ) -> Result<Box<dyn EngineSession>, EngineError>;
}

/// One open build session.
///
/// `close` must be idempotent; callers invoke it exactly once per opened
/// session whatever `generate` returned.
#[async_trait]
pub trait EngineSession: Send {
    /// Bundle the entry once and return every emitted artifact.
    async fn generate(&mut self, options: &OutputOptions) -> Result<Vec<RawOutput>, EngineError>;

    /// Release the session.
    async fn close(&mut self) -> Result<(), EngineError>;
}
