use crate::{
    error::{FluxError, Result},
    models::{GeneratedImage, GenerationRequest, ModelInfo},
};
use reqwest::Client;

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    endpoint: String,
    model_id: String,
}

impl ImageClient {
    pub fn new(client: Client, endpoint: String, model_id: String) -> Self {
        Self {
            client,
            endpoint,
            model_id,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    fn build_headers(&self, token: &str) -> Result<reqwest::header::HeaderMap> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", token)
                .parse()
                .map_err(|_| FluxError::ConfigError("API token contains invalid characters".into()))?,
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json"
                .parse()
                .map_err(|_| FluxError::ConfigError("invalid content type header".into()))?,
        );
        Ok(headers)
    }

    /// Issue one POST to the inference endpoint and return the raw image
    /// bytes. The credential is read per call; no retry is attempted for any
    /// status, including 503.
    pub async fn generate(&self, token: &str, request: GenerationRequest) -> Result<GeneratedImage> {
        let payload = request.payload();

        log::info!("Generating image with model: {}", self.model_id);
        log::debug!("Request parameters: {}", payload["parameters"]);

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.build_headers(token)?)
            .json(&payload)
            .send()
            .await
            .map_err(|e| FluxError::NetworkError(format!("inference request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Inference API error: {} - {}", status.as_u16(), body);
            return Err(classify_status(status.as_u16(), body));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("image/png")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FluxError::NetworkError(format!("failed to read image body: {}", e)))?;

        if bytes.is_empty() {
            return Err(FluxError::ServerError {
                status: status.as_u16(),
                body: "empty image payload".into(),
            });
        }

        Ok(GeneratedImage::new(
            bytes.to_vec(),
            content_type,
            self.model_id.clone(),
        ))
    }

    pub fn supported_models() -> Vec<ModelInfo> {
        vec![ModelInfo {
            id: "black-forest-labs/FLUX.1-schnell".to_string(),
            name: "FLUX.1 schnell".to_string(),
            provider: "Black Forest Labs".to_string(),
            description: "Fast text-to-image, ignores guidance scale".to_string(),
        }]
    }
}

/// Map a non-success HTTP status to the error taxonomy. 503 means the model
/// is still loading on the inference side; the caller retries manually.
pub(crate) fn classify_status(status: u16, body: String) -> FluxError {
    match status {
        401 => FluxError::AuthError("Invalid API token. Please verify your token.".into()),
        503 => FluxError::ModelLoadingError(
            "The model is loading. Please try again in a few seconds.".into(),
        ),
        429 => FluxError::RateLimitError(
            "Rate limit exceeded. Please wait a moment before trying again.".into(),
        ),
        _ => FluxError::ServerError { status, body },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth() {
        let err = classify_status(401, "unauthorized".into());
        assert!(matches!(err, FluxError::AuthError(_)));
        assert!(err.to_string().to_lowercase().contains("invalid"));
        assert!(err.to_string().to_lowercase().contains("token"));
    }

    #[test]
    fn test_classify_model_loading() {
        let err = classify_status(503, "loading".into());
        assert!(matches!(err, FluxError::ModelLoadingError(_)));
        assert!(err.to_string().to_lowercase().contains("loading"));
    }

    #[test]
    fn test_classify_rate_limit() {
        let err = classify_status(429, "slow down".into());
        assert!(matches!(err, FluxError::RateLimitError(_)));
        assert!(err.to_string().to_lowercase().contains("rate limit"));
    }

    #[test]
    fn test_classify_other_status_carries_body() {
        let err = classify_status(500, "internal failure".into());
        match &err {
            FluxError::ServerError { status, body } => {
                assert_eq!(*status, 500);
                assert_eq!(body, "internal failure");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("internal failure"));
    }

    #[test]
    fn test_supported_models() {
        let models = ImageClient::supported_models();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "black-forest-labs/FLUX.1-schnell");
    }

    #[test]
    fn test_header_rejects_invalid_token() {
        let client = ImageClient::new(
            Client::new(),
            "https://example.invalid".into(),
            "m".into(),
        );
        assert!(client.build_headers("ok-token").is_ok());
        assert!(client.build_headers("bad\ntoken").is_err());
    }
}
