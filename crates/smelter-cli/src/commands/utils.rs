//! Shared helpers for commands.

use figment::providers::Serialized;
use smelter_config::{BuildConfiguration, SmelterSettings};
use std::path::Path;
use tokio::io::AsyncReadExt;

use crate::cli::RequestSource;
use crate::error::{Result, ResultExt};

/// Load settings from every layer, with `--source-root` on top.
pub fn load_settings(config: Option<&Path>, source_root: Option<&Path>) -> Result<SmelterSettings> {
    let mut figment = SmelterSettings::figment(config)?;
    if let Some(root) = source_root {
        figment = figment.merge(Serialized::default("source_root", root));
    }
    Ok(SmelterSettings::extract(figment)?)
}

/// Read and parse a build request.
pub async fn read_request(source: &RequestSource) -> Result<BuildConfiguration> {
    let json = match source {
        RequestSource::Stdin => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
        RequestSource::File(path) => tokio::fs::read_to_string(path).await.with_path(path)?,
    };
    Ok(BuildConfiguration::from_json_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_request_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(
            &path,
            r#"{"orgId": "ORG1@AdobeOrg", "edgeConfigId": "e1", "includedComponents": ["Privacy"]}"#,
        )
        .unwrap();

        let request = read_request(&RequestSource::File(path)).await.unwrap();
        assert_eq!(request.org_id, "ORG1@AdobeOrg");
        assert!(!request.minify);
    }

    #[tokio::test]
    async fn test_read_request_reports_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_request(&RequestSource::File(path)).await.unwrap_err();
        assert!(matches!(err, CliError::Request(_)));
    }

    #[tokio::test]
    async fn test_read_request_missing_file() {
        let err = read_request(&RequestSource::File(PathBuf::from("/no/such/request.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_source_root_override() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("smelter.toml");
        std::fs::write(&config, "source_root = \"from-file\"\n").unwrap();

        let settings = load_settings(Some(&config), Some(Path::new("from-flag"))).unwrap();
        assert_eq!(settings.source_root, PathBuf::from("from-flag"));

        let settings = load_settings(Some(&config), None).unwrap();
        assert_eq!(settings.source_root, PathBuf::from("from-file"));
    }
}
