//! One custom build, start to finish.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use smelter_config::{BuildConfiguration, SmelterSettings};
use tracing::Instrument;

use crate::collector::collect;
use crate::engine::{
    BundleEngine, EngineError, EngineSession, OutputOptions, RawOutput, ResolutionPolicy,
    RolldownEngine,
};
use crate::fs::{NativeFs, SourceFs};
use crate::registry::ComponentRegistry;
use crate::result::{BuildResult, OutputChunk};
use crate::synthesis::synthesize;
use crate::transaction::SourceTreeTransaction;
use crate::Result;

/// Prefix of every failure message.
pub const FAILURE_PREFIX: &str = "Failed bundle build: ";

/// Drives synthesis, the source swap and the engine for each build.
///
/// Builds against the same aggregation file are serialized; the orchestrator
/// itself holds no per-build state and can be shared freely.
#[derive(Debug, Clone)]
pub struct BuildOrchestrator {
    entry: PathBuf,
    aggregation_path: PathBuf,
    engine: Arc<dyn BundleEngine>,
    fs: Arc<dyn SourceFs>,
    registry: &'static ComponentRegistry,
    resolution: ResolutionPolicy,
    engine_timeout: Option<Duration>,
}

impl BuildOrchestrator {
    /// Rolldown over the real filesystem with the standard registry.
    pub fn new(entry: impl Into<PathBuf>, aggregation_path: impl Into<PathBuf>) -> Self {
        Self {
            entry: entry.into(),
            aggregation_path: aggregation_path.into(),
            engine: Arc::new(RolldownEngine::new()),
            fs: Arc::new(NativeFs::new()),
            registry: ComponentRegistry::standard(),
            resolution: ResolutionPolicy::browser_bundle(),
            engine_timeout: None,
        }
    }

    /// Paths, Rolldown working directory and engine timeout from loaded
    /// settings.
    pub fn from_settings(settings: &SmelterSettings) -> Self {
        Self::new(settings.entry_path(), settings.aggregation_path())
            .with_engine(RolldownEngine::new().with_cwd(&settings.source_root))
            .with_engine_timeout(settings.engine_timeout())
    }

    /// Replace the Rolldown engine.
    pub fn with_engine(mut self, engine: impl BundleEngine + 'static) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    /// Replace the filesystem the aggregation swap goes through.
    pub fn with_fs(mut self, fs: Arc<dyn SourceFs>) -> Self {
        self.fs = fs;
        self
    }

    /// Synthesize from `registry` instead of the standard table.
    pub fn with_registry(mut self, registry: &'static ComponentRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Deadline for the generate step; `None` waits indefinitely.
    pub fn with_engine_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.engine_timeout = timeout;
        self
    }

    pub fn entry(&self) -> &Path {
        &self.entry
    }

    pub fn aggregation_path(&self) -> &Path {
        &self.aggregation_path
    }

    /// Run one build. Never fails; errors come back as
    /// [`BuildResult::Failure`].
    ///
    /// The build runs on its own task, so dropping the returned future does
    /// not interrupt it: the session is still closed and the aggregation file
    /// still restored. Requires a tokio runtime.
    pub async fn build(&self, configuration: &BuildConfiguration) -> BuildResult {
        let span = tracing::info_span!(
            "build",
            org_id = %configuration.org_id,
            edge_config_id = %configuration.edge_config_id,
            components = ?configuration.included_components,
            minify = configuration.minify,
        );

        let start = Instant::now();
        let orchestrator = self.clone();
        let configuration = configuration.clone();
        let task = tokio::spawn(
            async move { orchestrator.run(&configuration).await }.instrument(span),
        );

        match task.await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!("Build task ended abnormally: {}", err);
                BuildResult::Failure {
                    elapsed_time_ms: start.elapsed().as_secs_f64() * 1000.0,
                    message: format!("{FAILURE_PREFIX}build task ended abnormally: {err}"),
                }
            }
        }
    }

    async fn run(&self, configuration: &BuildConfiguration) -> BuildResult {
        let start = Instant::now();

        let unknown = configuration.unknown_components();
        if !unknown.is_empty() {
            tracing::warn!("Ignoring unknown components: {}", unknown.join(", "));
        }

        let source = synthesize(configuration, self.registry);
        tracing::debug!("Synthesized aggregation source:\n{}", source);

        let outcome = self.swap_and_bundle(&source, configuration.minify).await;
        let elapsed_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        match outcome {
            Ok(chunks) => {
                tracing::info!(
                    "Built {} chunks in {:.1}ms",
                    chunks.len(),
                    elapsed_time_ms
                );
                BuildResult::Success {
                    elapsed_time_ms,
                    chunks,
                }
            }
            Err(err) => {
                if !err.is_fatal() {
                    tracing::warn!("Build failed: {}", err);
                }
                BuildResult::Failure {
                    elapsed_time_ms,
                    message: format!("{FAILURE_PREFIX}{err}"),
                }
            }
        }
    }

    /// The transaction is ended whatever the bundle step returned.
    async fn swap_and_bundle(&self, source: &str, minify: bool) -> Result<Vec<OutputChunk>> {
        let transaction =
            SourceTreeTransaction::begin(Arc::clone(&self.fs), &self.aggregation_path, source)
                .await?;

        let built = self.bundle(minify).await;
        let restored = transaction.end().await;

        match (built, restored) {
            (built, Ok(())) => built,
            (Ok(_), Err(restore)) => Err(restore.into()),
            (Err(build), Err(restore)) => {
                tracing::error!("Build error superseded by restore failure: {}", build);
                Err(restore.into())
            }
        }
    }

    /// The session is closed whatever generate returned.
    async fn bundle(&self, minify: bool) -> Result<Vec<OutputChunk>> {
        let mut session = self
            .engine
            .open_session(&self.entry, &self.resolution)
            .await?;

        let options = OutputOptions { minify };
        let generated = self.generate(session.as_mut(), &options).await;
        let closed = session.close().await;

        let raw = match (generated, closed) {
            (Ok(raw), Ok(())) => raw,
            (Ok(_), Err(close)) => return Err(close.into()),
            (Err(generate), Ok(())) => return Err(generate.into()),
            (Err(generate), Err(close)) => {
                tracing::warn!("Failed to close session after failed build: {}", close);
                return Err(generate.into());
            }
        };

        Ok(collect(raw, minify).chunks)
    }

    async fn generate(
        &self,
        session: &mut dyn EngineSession,
        options: &OutputOptions,
    ) -> std::result::Result<Vec<RawOutput>, EngineError> {
        match self.engine_timeout {
            Some(limit) => tokio::time::timeout(limit, session.generate(options))
                .await
                .map_err(|_| EngineError::Timeout(limit))?,
            None => session.generate(options).await,
        }
    }
}

impl From<&SmelterSettings> for BuildOrchestrator {
    fn from(settings: &SmelterSettings) -> Self {
        Self::from_settings(settings)
    }
}

