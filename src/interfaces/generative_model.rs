use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64 encoded bytes.
    pub data: String,
}

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub inline_image: Option<InlineImage>,
    /// Ask the model for a JSON document instead of prose.
    pub json_response: bool,
}

#[async_trait]
pub trait GenerativeModelInterface {
    /// `Ok(None)` when the model answered without any text.
    async fn generate(&self, request: GenerateRequest) -> Result<Option<String>, String>;
}
