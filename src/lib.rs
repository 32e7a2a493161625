//! rflux is a small client for the Hugging Face inference endpoint serving
//! FLUX.1-schnell: build a prompt and parameters, issue one POST, get image
//! bytes back. The [`session::GenerationSession`] wraps the client with the
//! form state, busy guard, notifications and file saving of the full
//! generation flow.

pub mod config;
pub mod error;
pub mod hf;
pub mod logger;
pub mod models;
pub mod notify;
pub mod session;
pub mod storage;
pub mod ui;

pub use config::{Config, HfConfig, StorageConfig};
pub use error::{FluxError, Result};
pub use hf::{HfClient, ImageClient};
pub use models::{GeneratedImage, GenerationRequest, ModelInfo};
pub use notify::{Notification, NotificationKind, Notifier};
pub use session::{GenerationSession, ImageGenerator, Outcome};
pub use storage::{CredentialStore, FileTokenStore, MemoryTokenStore};
