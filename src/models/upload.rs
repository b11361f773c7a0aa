use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    Signed,
    Unsigned,
}

/// Body of `POST /uploads/sign-cloudinary`
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadSignatureRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

/// Upload parameters for a direct-to-storage upload; `params` are opaque
/// form fields passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadSignature {
    pub mode: UploadMode,
    pub upload_url: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}
