use crate::error::ModelLoadError;

pub const TOPOLOGY_ARTIFACT: &str = "model.onnx";
pub const METADATA_ARTIFACT: &str = "metadata.json";

/// Where the two model artifacts come from. Both are required before the
/// model can become ready.
pub trait ModelSource: Send {
    fn describe(&self) -> String;
    fn fetch_topology(&self) -> Result<Vec<u8>, ModelLoadError>;
    fn fetch_metadata(&self) -> Result<Vec<u8>, ModelLoadError>;
}
