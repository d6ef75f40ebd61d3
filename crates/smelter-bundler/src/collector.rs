//! Engine output shaping.

use crate::engine::RawOutput;
use crate::result::OutputChunk;

/// Counts of what the engine emitted, before filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputSummary {
    /// Code chunks, all of which are returned.
    pub chunk_count: usize,
    /// Assets, which are dropped.
    pub asset_count: usize,
}

impl OutputSummary {
    /// Everything the engine emitted.
    pub fn total(&self) -> usize {
        self.chunk_count + self.asset_count
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedOutput {
    pub chunks: Vec<OutputChunk>,
    pub summary: OutputSummary,
}

/// Keep the code chunks, in engine order, named by their output file name.
///
/// `minify` only tags the log line; the engine already applied it.
pub fn collect(raw: Vec<RawOutput>, minify: bool) -> CollectedOutput {
    let mut summary = OutputSummary::default();
    let mut chunks = Vec::new();

    for output in raw {
        match output {
            RawOutput::Chunk {
                file_name, code, ..
            } => {
                summary.chunk_count += 1;
                chunks.push(OutputChunk::new(file_name, code));
            }
            RawOutput::Asset { file_name } => {
                summary.asset_count += 1;
                tracing::trace!("Skipping asset {}", file_name);
            }
        }
    }

    tracing::info!(
        minify,
        "Generated outputs: {} results ({} chunks, {} assets)",
        summary.total(),
        summary.chunk_count,
        summary.asset_count
    );

    CollectedOutput { chunks, summary }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(name: &str, file_name: &str, code: &str) -> RawOutput {
        RawOutput::Chunk {
            name: name.to_string(),
            file_name: file_name.to_string(),
            code: code.to_string(),
        }
    }

    #[test]
    fn test_assets_are_dropped_and_counted() {
        let collected = collect(
            vec![
                chunk("index", "index.js", "export{};"),
                RawOutput::Asset {
                    file_name: "logo.svg".to_string(),
                },
                chunk("shared", "shared-abc123.js", "const a=1;"),
            ],
            false,
        );

        let names: Vec<&str> = collected.chunks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["index.js", "shared-abc123.js"]);
        assert_eq!(
            collected.summary,
            OutputSummary {
                chunk_count: 2,
                asset_count: 1
            }
        );
    }

    #[test]
    fn test_size_is_utf8_byte_length() {
        let collected = collect(vec![chunk("index", "index.js", "const é = 1;")], true);
        assert_eq!(collected.chunks[0].size, Some(13));
    }

    #[test]
    fn test_empty_output() {
        let collected = collect(Vec::new(), false);
        assert!(collected.chunks.is_empty());
        assert_eq!(collected.summary.total(), 0);
    }
}
