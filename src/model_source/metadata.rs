use crate::error::ModelLoadError;
use serde::Deserialize;

const DEFAULT_IMAGE_SIZE: u32 = 224;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    pub labels: Vec<String>,
    #[serde(default = "default_image_size")]
    pub image_size: u32,
}

fn default_image_size() -> u32 {
    DEFAULT_IMAGE_SIZE
}

impl ModelMetadata {
    pub fn parse(bytes: &[u8]) -> Result<Self, ModelLoadError> {
        let metadata: ModelMetadata = serde_json::from_slice(bytes)
            .map_err(|e| ModelLoadError::MalformedMetadata(e.to_string()))?;

        if metadata.labels.is_empty() {
            return Err(ModelLoadError::MalformedMetadata(
                "label list is empty".to_string(),
            ));
        }

        if metadata.image_size == 0 {
            return Err(ModelLoadError::MalformedMetadata(
                "imageSize must be positive".to_string(),
            ));
        }

        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_teachable_machine_metadata() {
        let json = br#"{
            "tfjsVersion": "1.3.1",
            "modelName": "tm-my-image-model",
            "labels": ["Battery", "Glass", "Plastic"],
            "imageSize": 224
        }"#;

        let metadata = ModelMetadata::parse(json).unwrap();
        assert_eq!(metadata.labels, vec!["Battery", "Glass", "Plastic"]);
        assert_eq!(metadata.image_size, 224);
    }

    #[test]
    fn test_parse_defaults_image_size() {
        let metadata = ModelMetadata::parse(br#"{"labels": ["Paper"]}"#).unwrap();
        assert_eq!(metadata.image_size, 224);
    }

    #[test]
    fn test_parse_rejects_missing_labels() {
        let result = ModelMetadata::parse(br#"{"imageSize": 224}"#);
        assert!(matches!(result, Err(ModelLoadError::MalformedMetadata(_))));
    }

    #[test]
    fn test_parse_rejects_empty_labels() {
        let result = ModelMetadata::parse(br#"{"labels": []}"#);
        assert!(matches!(result, Err(ModelLoadError::MalformedMetadata(_))));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let result = ModelMetadata::parse(b"<html>not found</html>");
        assert!(matches!(result, Err(ModelLoadError::MalformedMetadata(_))));
    }
}
