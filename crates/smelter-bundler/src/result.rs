//! Build outcome types and their JSON shape.

use serde::{Deserialize, Serialize};

/// One emitted code chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputChunk {
    pub name: String,
    pub code: String,
    /// UTF-8 byte length of `code`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl OutputChunk {
    /// A chunk with `size` computed from `code`.
    ///
    /// # Examples
    ///
    /// ```
    /// use smelter_bundler::OutputChunk;
    ///
    /// let chunk = OutputChunk::new("index.js", "export default [];");
    /// assert_eq!(chunk.size, Some(18));
    /// ```
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        let code = code.into();
        let size = Some(code.len() as u64);
        Self {
            name: name.into(),
            code,
            size,
        }
    }
}

/// Outcome of one build.
///
/// Serializes as `{"success": true, "elapsedTime": n, "chunks": [...]}` or
/// `{"success": false, "elapsedTime": n, "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireResult", try_from = "WireResult")]
pub enum BuildResult {
    Success {
        elapsed_time_ms: f64,
        chunks: Vec<OutputChunk>,
    },
    Failure {
        elapsed_time_ms: f64,
        message: String,
    },
}

impl BuildResult {
    /// `true` for [`BuildResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, BuildResult::Success { .. })
    }

    /// Wall-clock duration of the build in milliseconds.
    pub fn elapsed_time_ms(&self) -> f64 {
        match self {
            BuildResult::Success {
                elapsed_time_ms, ..
            }
            | BuildResult::Failure {
                elapsed_time_ms, ..
            } => *elapsed_time_ms,
        }
    }

    /// Chunks of a successful build; empty on failure.
    pub fn chunks(&self) -> &[OutputChunk] {
        match self {
            BuildResult::Success { chunks, .. } => chunks,
            BuildResult::Failure { .. } => &[],
        }
    }

    /// Failure message, always starting with
    /// [`FAILURE_PREFIX`](crate::FAILURE_PREFIX).
    pub fn message(&self) -> Option<&str> {
        match self {
            BuildResult::Success { .. } => None,
            BuildResult::Failure { message, .. } => Some(message),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResult {
    success: bool,
    elapsed_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chunks: Option<Vec<OutputChunk>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl From<BuildResult> for WireResult {
    fn from(result: BuildResult) -> Self {
        match result {
            BuildResult::Success {
                elapsed_time_ms,
                chunks,
            } => WireResult {
                success: true,
                elapsed_time: elapsed_time_ms,
                chunks: Some(chunks),
                message: None,
            },
            BuildResult::Failure {
                elapsed_time_ms,
                message,
            } => WireResult {
                success: false,
                elapsed_time: elapsed_time_ms,
                chunks: None,
                message: Some(message),
            },
        }
    }
}

impl TryFrom<WireResult> for BuildResult {
    type Error = String;

    fn try_from(wire: WireResult) -> Result<Self, Self::Error> {
        match (wire.success, wire.chunks, wire.message) {
            (true, chunks, None) => Ok(BuildResult::Success {
                elapsed_time_ms: wire.elapsed_time,
                chunks: chunks.unwrap_or_default(),
            }),
            (false, None, Some(message)) => Ok(BuildResult::Failure {
                elapsed_time_ms: wire.elapsed_time,
                message,
            }),
            (true, _, Some(_)) => Err("successful result must not carry a message".to_string()),
            (false, Some(_), _) => Err("failed result must not carry chunks".to_string()),
            (false, None, None) => Err("failed result is missing its message".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let result = BuildResult::Success {
            elapsed_time_ms: 12.5,
            chunks: vec![OutputChunk::new("index.js", "export{};")],
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "success": true,
                "elapsedTime": 12.5,
                "chunks": [{ "name": "index.js", "code": "export{};", "size": 9 }]
            })
        );
    }

    #[test]
    fn test_failure_shape() {
        let result = BuildResult::Failure {
            elapsed_time_ms: 3.0,
            message: "Failed bundle build: boom".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "success": false,
                "elapsedTime": 3.0,
                "message": "Failed bundle build: boom"
            })
        );
    }

    #[test]
    fn test_size_omitted_when_absent() {
        let chunk = OutputChunk {
            name: "a.js".to_string(),
            code: String::new(),
            size: None,
        };
        assert_eq!(
            serde_json::to_value(&chunk).unwrap(),
            json!({ "name": "a.js", "code": "" })
        );
    }

    #[test]
    fn test_parse_failure() {
        let result: BuildResult = serde_json::from_str(
            r#"{"success": false, "elapsedTime": 0.25, "message": "nope"}"#,
        )
        .unwrap();
        assert!(!result.is_success());
        assert_eq!(result.message(), Some("nope"));
        assert!(result.chunks().is_empty());
        assert_eq!(result.elapsed_time_ms(), 0.25);
    }

    #[test]
    fn test_parse_rejects_mixed_shape() {
        let err = serde_json::from_str::<BuildResult>(
            r#"{"success": false, "elapsedTime": 1, "chunks": []}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("must not carry chunks"));
    }
}
