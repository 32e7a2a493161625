use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct HfConfig {
    pub endpoint: Option<String>,
    pub model_id: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub token_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub hf: Option<HfConfig>,
    pub storage: Option<StorageConfig>,
}

impl Default for HfConfig {
    fn default() -> Self {
        HfConfig {
            endpoint: None,
            model_id: None,
            token: None,
        }
    }
}

impl HfConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let endpoint = env::var("HF_ENDPOINT").ok();
        let model_id = env::var("HF_MODEL_ID").ok();
        let token = env::var("HF_API_TOKEN").ok();

        HfConfig {
            endpoint,
            model_id,
            token,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            token_file: None,
            output_dir: None,
        }
    }
}

impl StorageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let token_file = env::var("RFLUX_TOKEN_FILE").ok().map(PathBuf::from);
        let output_dir = env::var("RFLUX_OUTPUT_DIR").ok().map(PathBuf::from);

        StorageConfig {
            token_file,
            output_dir,
        }
    }

    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = Some(path.into());
        self
    }

    pub fn with_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            hf: None,
            storage: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Config {
            hf: Some(HfConfig::from_env()),
            storage: Some(StorageConfig::from_env()),
        }
    }

    pub fn with_hf(mut self, config: HfConfig) -> Self {
        self.hf = Some(config);
        self
    }

    pub fn with_storage(mut self, config: StorageConfig) -> Self {
        self.storage = Some(config);
        self
    }
}
