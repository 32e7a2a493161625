pub mod image_client;

use crate::{
    config::HfConfig,
    error::Result,
    models::{GeneratedImage, GenerationRequest},
    FluxError,
};

pub use image_client::ImageClient;

pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/black-forest-labs/FLUX.1-schnell";
pub const DEFAULT_MODEL: &str = "black-forest-labs/FLUX.1-schnell";

#[derive(Clone)]
pub struct HfClient {
    image_client: ImageClient,
    token: Option<String>,
}

impl HfClient {
    pub fn new(config: HfConfig) -> Self {
        let endpoint = config
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let model_id = config.model_id.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            image_client: ImageClient::new(reqwest::Client::new(), endpoint, model_id),
            token: config.token,
        }
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// One-call generation using the configured token.
    pub async fn generate(&self, request: GenerationRequest) -> Result<GeneratedImage> {
        let token = self.token.as_deref().ok_or_else(|| {
            FluxError::ConfigError("Hugging Face API token is required".into())
        })?;

        self.image_client.generate(token, request).await
    }
}
