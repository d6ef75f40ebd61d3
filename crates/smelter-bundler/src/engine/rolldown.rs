use async_trait::async_trait;
use path_clean::PathClean;
use rolldown::{
    Bundler, BundlerBuilder, BundlerOptions, InputItem, Platform, RawMinifyOptions, ResolveOptions,
};
use std::path::{Path, PathBuf};

use super::{BundleEngine, EngineError, EngineSession, OutputOptions, RawOutput, ResolutionPolicy};
use crate::diagnostics::describe_rolldown_error;

/// [`BundleEngine`] backed by Rolldown.
#[derive(Debug, Clone, Default)]
pub struct RolldownEngine {
    cwd: Option<PathBuf>,
}

impl RolldownEngine {
    /// Engine resolving from each entry's own directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `node_modules` from `cwd` instead of the entry's directory.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

#[async_trait]
impl BundleEngine for RolldownEngine {
    async fn open_session(
        &self,
        entry: &Path,
        resolution: &ResolutionPolicy,
    ) -> Result<Box<dyn EngineSession>, EngineError> {
        match tokio::fs::try_exists(entry).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(EngineError::Open {
                    entry: entry.to_path_buf(),
                    message: "entry module does not exist".to_string(),
                });
            }
            Err(e) => {
                return Err(EngineError::Open {
                    entry: entry.to_path_buf(),
                    message: e.to_string(),
                });
            }
        }

        // Rolldown treats a relative input as a bare specifier.
        let entry = absolute(entry);
        let cwd = match &self.cwd {
            Some(cwd) => absolute(cwd),
            None => entry
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("/")),
        };

        tracing::debug!(entry = %entry.display(), cwd = %cwd.display(), "Opening Rolldown session");

        Ok(Box::new(RolldownSession {
            entry,
            cwd,
            resolution: resolution.clone(),
            bundler: None,
            closed: false,
        }))
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .clean()
}

/// Rolldown fixes minification at construction, so the bundler is built on
/// `generate` once the output options are known.
struct RolldownSession {
    entry: PathBuf,
    cwd: PathBuf,
    resolution: ResolutionPolicy,
    bundler: Option<Bundler>,
    closed: bool,
}

impl RolldownSession {
    fn bundler_options(&self, output: &OutputOptions) -> BundlerOptions {
        let mut options = BundlerOptions {
            input: Some(vec![InputItem {
                name: Some("index".to_string()),
                import: self.entry.to_string_lossy().to_string(),
            }]),
            cwd: Some(self.cwd.clone()),
            ..Default::default()
        };

        options.platform = Some(if self.resolution.browser {
            Platform::Browser
        } else {
            Platform::Node
        });

        if output.minify {
            options.minify = Some(RawMinifyOptions::from(true));
        }

        options.resolve = Some(resolve_options(&self.cwd, &self.resolution));
        options
    }
}

/// `node_modules` lookup walks from `cwd` up to the filesystem root.
fn resolve_options(cwd: &Path, policy: &ResolutionPolicy) -> ResolveOptions {
    let mut modules = Vec::new();
    let mut current = Some(cwd);
    while let Some(dir) = current {
        modules.push(dir.join("node_modules").to_string_lossy().to_string());
        current = dir.parent();
    }
    modules.push("node_modules".to_string());

    let mut conditions = vec!["import".to_string(), "default".to_string()];
    if policy.browser {
        conditions.insert(0, "browser".to_string());
    }
    if policy.commonjs {
        conditions.push("require".to_string());
    }
    if policy.prefer_builtins {
        conditions.push("node".to_string());
    }

    ResolveOptions {
        main_fields: Some(policy.main_fields.clone()),
        condition_names: Some(conditions),
        extensions: Some(vec![
            ".js".to_string(),
            ".mjs".to_string(),
            ".cjs".to_string(),
            ".json".to_string(),
        ]),
        modules: Some(modules),
        symlinks: Some(true),
        ..Default::default()
    }
}

#[async_trait]
impl EngineSession for RolldownSession {
    async fn generate(&mut self, options: &OutputOptions) -> Result<Vec<RawOutput>, EngineError> {
        let bundler = BundlerBuilder::default()
            .with_options(self.bundler_options(options))
            .build()
            .map_err(|e| EngineError::Generate(describe_rolldown_error(&e)))?;
        let bundler = self.bundler.insert(bundler);

        let output = bundler
            .generate()
            .await
            .map_err(|e| EngineError::Generate(describe_rolldown_error(&e)))?;

        Ok(output
            .assets
            .iter()
            .map(|output| match output {
                rolldown_common::Output::Chunk(chunk) => RawOutput::Chunk {
                    name: chunk.name.to_string(),
                    file_name: chunk.filename.to_string(),
                    code: chunk.code.clone(),
                },
                rolldown_common::Output::Asset(asset) => RawOutput::Asset {
                    file_name: asset.filename.to_string(),
                },
            })
            .collect())
    }

    async fn close(&mut self) -> Result<(), EngineError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if let Some(mut bundler) = self.bundler.take() {
            bundler
                .close()
                .await
                .map_err(|e| EngineError::Close(describe_rolldown_error(&e)))?;
        }
        tracing::debug!(entry = %self.entry.display(), "Closed Rolldown session");
        Ok(())
    }
}
