use super::client::GatewayClient;
use super::format::ApiResult;
use crate::models::{UploadSignature, UploadSignatureRequest};

impl GatewayClient {
    /// Ask the API for direct-upload parameters (owners only)
    pub async fn sign_upload(&self, request: &UploadSignatureRequest) -> ApiResult<UploadSignature> {
        self.post("/uploads/sign-cloudinary", request).await
    }
}
