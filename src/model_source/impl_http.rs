use crate::error::ModelLoadError;
use crate::model_source::interface::{ModelSource, METADATA_ARTIFACT, TOPOLOGY_ARTIFACT};
use reqwest::blocking::Client;
use reqwest::StatusCode;

/// Fetches the model artifacts relative to a base URL.
pub struct ModelSourceHttp {
    base_url: String,
    client: Client,
}

impl ModelSourceHttp {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client: Client::new(),
        }
    }

    pub fn artifact_url(&self, artifact: &str) -> String {
        format!("{}{}", self.base_url, artifact)
    }

    fn fetch(&self, artifact: &str) -> Result<Vec<u8>, ModelLoadError> {
        let url = self.artifact_url(artifact);
        tracing::debug!(target: "model_source::http", %url, "Fetching artifact");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ModelLoadError::Fetch {
                artifact: url.clone(),
                reason: e.to_string(),
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ModelLoadError::MissingArtifact(url)),
            status if !status.is_success() => Err(ModelLoadError::Fetch {
                artifact: url,
                reason: format!("HTTP {}", status),
            }),
            _ => response
                .bytes()
                .map(|bytes| bytes.to_vec())
                .map_err(|e| ModelLoadError::Fetch {
                    artifact: url,
                    reason: e.to_string(),
                }),
        }
    }
}

fn normalize_base_url(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    }
}

impl ModelSource for ModelSourceHttp {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    fn fetch_topology(&self) -> Result<Vec<u8>, ModelLoadError> {
        self.fetch(TOPOLOGY_ARTIFACT)
    }

    fn fetch_metadata(&self) -> Result<Vec<u8>, ModelLoadError> {
        self.fetch(METADATA_ARTIFACT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_url_adds_separator() {
        let source = ModelSourceHttp::new("https://example.com/models/waste");
        assert_eq!(
            source.artifact_url(METADATA_ARTIFACT),
            "https://example.com/models/waste/metadata.json"
        );
    }

    #[test]
    fn test_artifact_url_keeps_existing_separator() {
        let source = ModelSourceHttp::new("https://example.com/models/waste/");
        assert_eq!(
            source.artifact_url(TOPOLOGY_ARTIFACT),
            "https://example.com/models/waste/model.onnx"
        );
    }
}
