#![cfg_attr(docsrs, feature(doc_cfg))]

//! # smelter-bundler
//!
//! Custom feature-bundle builds for a component-based analytics library.
//!
//! A build request names the components an organisation wants. The
//! orchestrator synthesizes an aggregation module importing exactly those
//! components, swaps it into the library's source tree for the duration of
//! one Rolldown build, restores the original file, and reports the emitted
//! chunks.
//!
//! ```no_run
//! use smelter_bundler::BuildOrchestrator;
//! use smelter_config::BuildConfiguration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let orchestrator =
//!     BuildOrchestrator::new("alloy/src/index.js", "alloy/src/core/componentCreators.js");
//! let request = BuildConfiguration::new("ORG1@AdobeOrg", "edge-config")
//!     .with_components(["Context", "Identity"])
//!     .with_minify(true);
//!
//! let result = orchestrator.build(&request).await;
//! println!("{}", serde_json::to_string(&result).unwrap());
//! # }
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events and installs no subscriber. Enable the
//! `logging` feature for [`logging::init_logging`].

pub mod collector;
pub mod diagnostics;
pub mod engine;
pub mod fs;
pub mod orchestrator;
pub mod registry;
pub mod result;
pub mod synthesis;
pub mod transaction;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

pub use collector::{CollectedOutput, OutputSummary, collect};
pub use engine::{
    BundleEngine, EngineError, EngineSession, OutputOptions, RawOutput, ResolutionPolicy,
    RolldownEngine,
};
pub use fs::{NativeFs, SourceFs};
pub use orchestrator::{BuildOrchestrator, FAILURE_PREFIX};
pub use registry::{ComponentRegistry, RegistryEntry};
pub use result::{BuildResult, OutputChunk};
pub use synthesis::synthesize;
pub use transaction::{SourceTreeTransaction, TransactionError, clear_poison, is_poisoned};

pub use smelter_config::{BuildConfiguration, ComponentName};

/// Any failure inside a build.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl Error {
    /// True when the source tree may have been left modified.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Transaction(err) => err.is_fatal(),
            Error::Engine(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
