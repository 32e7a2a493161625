use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub num_inference_steps: Option<u32>,
    pub seed: Option<i64>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            width: None,
            height: None,
            num_inference_steps: None,
            seed: None,
        }
    }

    /// Wire payload for the inference endpoint. The seed key is absent when
    /// no seed was requested; FLUX.1-schnell ignores guidance, so the scale
    /// is pinned to 0.
    pub fn payload(&self) -> Value {
        let mut payload = json!({
            "inputs": self.prompt,
            "parameters": {
                "width": self.width.unwrap_or(1024),
                "height": self.height.unwrap_or(1024),
                "num_inference_steps": self.num_inference_steps.unwrap_or(4),
                "guidance_scale": 0,
            }
        });

        if let Some(seed) = self.seed {
            payload["parameters"]["seed"] = json!(seed);
        }

        payload
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub model: String,
    pub created_ms: i64,
}

impl GeneratedImage {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
            model: model.into(),
            created_ms: Utc::now().timestamp_millis(),
        }
    }

    pub fn filename(&self) -> String {
        format!("flux-image-{}.png", self.created_ms)
    }

    /// Inline `data:` URI for the image, usable as an image source without
    /// touching the filesystem.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            base64::encode(&self.bytes)
        )
    }
}
