use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::{FluxError, Result},
    models::{GeneratedImage, GenerationRequest},
    notify::Notifier,
    storage::CredentialStore,
    ui::{FormFields, ImageRegion, TriggerControl},
};

pub const MISSING_TOKEN_MESSAGE: &str = "Please enter your Hugging Face API token";
pub const MISSING_PROMPT_MESSAGE: &str = "Please describe the image you want to generate";
pub const SUCCESS_MESSAGE: &str = "Image generated successfully!";

/// Backend seam for the session. Implemented by [`crate::hf::ImageClient`];
/// the credential comes from the form at call time, so it is an argument
/// rather than construction state.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, token: &str, request: GenerationRequest) -> Result<GeneratedImage>;
}

#[async_trait]
impl ImageGenerator for crate::hf::ImageClient {
    async fn generate(&self, token: &str, request: GenerationRequest) -> Result<GeneratedImage> {
        crate::hf::ImageClient::generate(self, token, request).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A generation was already in flight; nothing happened.
    Busy,
    /// An input check failed before any request was sent.
    Rejected,
    Generated,
    Failed,
}

/// One session's worth of state: the form, the trigger control, the image
/// region, the notification region, the busy flag and the last image, all
/// fields of one object instead of free-floating globals.
pub struct GenerationSession {
    generator: Arc<dyn ImageGenerator>,
    store: Arc<dyn CredentialStore>,
    output_dir: PathBuf,
    busy: AtomicBool,
    pub form: FormFields,
    pub trigger: TriggerControl,
    pub image_region: ImageRegion,
    pub notifier: Notifier,
    last_image: Option<GeneratedImage>,
}

impl GenerationSession {
    pub fn new(
        generator: Arc<dyn ImageGenerator>,
        store: Arc<dyn CredentialStore>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            generator,
            store,
            output_dir: output_dir.into(),
            busy: AtomicBool::new(false),
            form: FormFields::new(),
            trigger: TriggerControl::idle(),
            image_region: ImageRegion::Empty,
            notifier: Notifier::new(),
            last_image: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn last_image(&self) -> Option<&GeneratedImage> {
        self.last_image.as_ref()
    }

    /// Load-time hook: populate the token field from the credential store.
    pub async fn load_saved_token(&mut self) -> Result<bool> {
        match self.store.load().await? {
            Some(token) => {
                self.form.token = token;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Persist the current token, gated on the caller's interactive
    /// confirmation. Empty tokens are never written.
    pub async fn persist_token(&self, confirmed: bool) -> Result<bool> {
        let token = self.form.token.trim();
        if !confirmed || token.is_empty() {
            return Ok(false);
        }
        self.store.save(token).await?;
        log::info!("API token saved for future sessions");
        Ok(true)
    }

    /// Run one generation attempt end to end. Every error surfaces as a
    /// notification; the busy flag and trigger control are restored on every
    /// exit path past the guard.
    pub async fn generate(&mut self) -> Outcome {
        if self.busy.load(Ordering::SeqCst) {
            return Outcome::Busy;
        }

        let token = self.form.token.trim().to_string();
        let prompt = self.form.prompt.trim().to_string();

        if token.is_empty() {
            self.notifier.show_error(MISSING_TOKEN_MESSAGE);
            return Outcome::Rejected;
        }
        if prompt.is_empty() {
            self.notifier.show_error(MISSING_PROMPT_MESSAGE);
            return Outcome::Rejected;
        }
        let seed = match parse_seed(&self.form.seed) {
            Ok(seed) => seed,
            Err(err) => {
                self.notifier.show_error(err.to_string());
                return Outcome::Rejected;
            }
        };

        self.busy.store(true, Ordering::SeqCst);
        self.trigger = TriggerControl::loading();
        self.image_region = ImageRegion::Loading;
        self.notifier.clear();

        let request = GenerationRequest {
            prompt,
            width: Some(self.form.width),
            height: Some(self.form.height),
            num_inference_steps: Some(self.form.steps),
            seed,
        };

        let result = self.generator.generate(&token, request).await;
        let outcome = match result {
            Ok(image) => match self.accept_image(image).await {
                Ok(path) => {
                    log::info!("Image saved to: {}", path.display());
                    self.notifier.show_success(SUCCESS_MESSAGE);
                    Outcome::Generated
                }
                Err(err) => self.fail_with(err),
            },
            Err(err) => self.fail_with(err),
        };

        // Restore the idle affordances no matter how the attempt ended.
        self.busy.store(false, Ordering::SeqCst);
        self.trigger = TriggerControl::idle();

        outcome
    }

    async fn accept_image(&mut self, image: GeneratedImage) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| FluxError::StorageError(format!("failed to create output dir: {}", e)))?;

        let filename = image.filename();
        let path = self.output_dir.join(&filename);
        tokio::fs::write(&path, &image.bytes)
            .await
            .map_err(|e| FluxError::StorageError(format!("failed to save image: {}", e)))?;

        self.image_region = ImageRegion::Image {
            source: image.to_data_url(),
            download: crate::ui::Download {
                path: path.clone(),
                filename,
            },
        };
        self.last_image = Some(image);

        Ok(path)
    }

    fn fail_with(&mut self, err: FluxError) -> Outcome {
        log::error!("Image generation failed: {}", err);
        self.image_region = ImageRegion::Error;
        self.notifier.show_error(err.to_string());
        Outcome::Failed
    }
}

/// An empty seed means "let the model pick"; anything else must parse as an
/// integer. A malformed value is rejected instead of being forwarded.
fn parse_seed(raw: &str) -> Result<Option<i64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>().map(Some).map_err(|_| {
        FluxError::ValidationError(format!("Seed must be a whole number, got '{}'", raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationKind;
    use crate::storage::MemoryTokenStore;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use uuid::Uuid;

    enum Script {
        Succeed(Vec<u8>),
        FailStatus(u16, &'static str),
        FailNetwork,
    }

    struct ScriptedGenerator {
        script: Script,
        calls: AtomicUsize,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedGenerator {
        fn new(script: Script) -> Arc<Self> {
            Arc::new(Self {
                script,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImageGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            _token: &str,
            request: GenerationRequest,
        ) -> Result<GeneratedImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request);
            match &self.script {
                Script::Succeed(bytes) => {
                    Ok(GeneratedImage::new(bytes.clone(), "image/png", "test-model"))
                }
                Script::FailStatus(status, body) => Err(crate::hf::image_client::classify_status(
                    *status,
                    (*body).to_string(),
                )),
                Script::FailNetwork => {
                    Err(FluxError::NetworkError("connection refused".into()))
                }
            }
        }
    }

    fn temp_output_dir() -> PathBuf {
        std::env::temp_dir().join(format!("rflux-session-{}", Uuid::new_v4()))
    }

    fn session_with(script: Script) -> (GenerationSession, Arc<ScriptedGenerator>, PathBuf) {
        let generator = ScriptedGenerator::new(script);
        let output_dir = temp_output_dir();
        let mut session = GenerationSession::new(
            generator.clone(),
            Arc::new(MemoryTokenStore::new()),
            output_dir.clone(),
        );
        session.form.token = "hf_test_token".to_string();
        session.form.prompt = "a castle".to_string();
        (session, generator, output_dir)
    }

    #[tokio::test]
    async fn test_busy_flag_short_circuits() {
        let (mut session, generator, _dir) = session_with(Script::Succeed(vec![1]));
        session.busy.store(true, Ordering::SeqCst);

        let outcome = session.generate().await;

        assert_eq!(outcome, Outcome::Busy);
        assert_eq!(generator.call_count(), 0);
        assert_eq!(session.trigger, TriggerControl::idle());
        assert_eq!(session.image_region, ImageRegion::Empty);
        assert!(session.notifier.visible().is_empty());
    }

    #[tokio::test]
    async fn test_missing_token_rejected_before_request() {
        let (mut session, generator, _dir) = session_with(Script::Succeed(vec![1]));
        session.form.token.clear();

        let outcome = session.generate().await;

        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(generator.call_count(), 0);
        let visible = session.notifier.visible();
        assert_eq!(visible.len(), 1);
        assert!(visible[0].message.contains("token"));
    }

    #[tokio::test]
    async fn test_missing_prompt_rejected_before_request() {
        let (mut session, generator, _dir) = session_with(Script::Succeed(vec![1]));
        session.form.prompt = "   ".to_string();

        let outcome = session.generate().await;

        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(generator.call_count(), 0);
        let visible = session.notifier.visible();
        assert!(visible[0].message.contains("describe"));
    }

    #[tokio::test]
    async fn test_non_numeric_seed_rejected() {
        let (mut session, generator, _dir) = session_with(Script::Succeed(vec![1]));
        session.form.seed = "lots".to_string();

        let outcome = session.generate().await;

        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(generator.call_count(), 0);
        assert!(session.notifier.visible()[0].message.contains("Seed"));
    }

    #[tokio::test]
    async fn test_seed_forwarded_as_integer() {
        let (mut session, generator, _dir) = session_with(Script::Succeed(vec![1]));
        session.form.seed = "42".to_string();

        session.generate().await;

        let requests = generator.requests.lock().unwrap();
        assert_eq!(requests[0].seed, Some(42));
    }

    #[tokio::test]
    async fn test_blank_seed_absent_from_request() {
        let (mut session, generator, _dir) = session_with(Script::Succeed(vec![1]));

        session.generate().await;

        let requests = generator.requests.lock().unwrap();
        assert_eq!(requests[0].seed, None);
        assert!(requests[0].payload()["parameters"].get("seed").is_none());
    }

    #[tokio::test]
    async fn test_success_populates_image_region_and_saves_file() {
        let (mut session, generator, dir) = session_with(Script::Succeed(vec![0x89, 0x50, 0x4e]));

        let outcome = session.generate().await;

        assert_eq!(outcome, Outcome::Generated);
        assert_eq!(generator.call_count(), 1);

        match &session.image_region {
            ImageRegion::Image { source, download } => {
                assert!(source.starts_with("data:image/png;base64,"));
                assert!(download.filename.starts_with("flux-image-"));
                assert!(download.filename.ends_with(".png"));
                let stamp = &download.filename
                    ["flux-image-".len()..download.filename.len() - ".png".len()];
                assert!(stamp.chars().all(|c| c.is_ascii_digit()));

                let saved = std::fs::read(&download.path).unwrap();
                assert_eq!(saved, vec![0x89, 0x50, 0x4e]);
            }
            other => panic!("unexpected image region: {:?}", other),
        }

        assert!(session.last_image().is_some());
        let visible = session.notifier.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].kind, NotificationKind::Success);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_new_success_supersedes_last_image() {
        let (mut session, _generator, dir) = session_with(Script::Succeed(vec![1, 2, 3]));

        session.generate().await;
        let first_stamp = session.last_image().unwrap().created_ms;

        session.generate().await;
        let second_stamp = session.last_image().unwrap().created_ms;

        assert!(second_stamp >= first_stamp);
        assert_eq!(session.last_image().unwrap().bytes, vec![1, 2, 3]);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_model_loading_failure_surfaces_message() {
        let (mut session, _generator, _dir) = session_with(Script::FailStatus(503, "loading"));

        let outcome = session.generate().await;

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(session.image_region, ImageRegion::Error);
        let visible = session.notifier.visible();
        assert_eq!(visible[0].kind, NotificationKind::Error);
        assert!(visible[0].message.to_lowercase().contains("loading"));
    }

    #[tokio::test]
    async fn test_server_failure_carries_status_and_body() {
        let (mut session, _generator, _dir) =
            session_with(Script::FailStatus(500, "internal failure"));

        session.generate().await;

        let message = &session.notifier.visible()[0].message;
        assert!(message.contains("500"));
        assert!(message.contains("internal failure"));
    }

    #[tokio::test]
    async fn test_cleanup_runs_on_success() {
        let (mut session, _generator, dir) = session_with(Script::Succeed(vec![1]));

        session.generate().await;

        assert!(!session.is_busy());
        assert_eq!(session.trigger, TriggerControl::idle());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_cleanup_runs_on_network_failure() {
        let (mut session, _generator, _dir) = session_with(Script::FailNetwork);

        let outcome = session.generate().await;

        assert_eq!(outcome, Outcome::Failed);
        assert!(!session.is_busy());
        assert_eq!(session.trigger, TriggerControl::idle());
        assert!(session.notifier.visible()[0]
            .message
            .contains("connection refused"));
    }

    #[tokio::test]
    async fn test_load_saved_token_populates_form() {
        let generator = ScriptedGenerator::new(Script::Succeed(vec![1]));
        let store = Arc::new(MemoryTokenStore::with_token("hf_saved"));
        let mut session = GenerationSession::new(generator, store, temp_output_dir());

        assert!(session.load_saved_token().await.unwrap());
        assert_eq!(session.form.token, "hf_saved");
    }

    #[tokio::test]
    async fn test_persist_token_requires_confirmation() {
        let generator = ScriptedGenerator::new(Script::Succeed(vec![1]));
        let store = Arc::new(MemoryTokenStore::new());
        let mut session =
            GenerationSession::new(generator, store.clone(), temp_output_dir());
        session.form.token = "hf_new".to_string();

        assert!(!session.persist_token(false).await.unwrap());
        assert_eq!(store.load().await.unwrap(), None);

        assert!(session.persist_token(true).await.unwrap());
        assert_eq!(store.load().await.unwrap().as_deref(), Some("hf_new"));
    }

    #[tokio::test]
    async fn test_persist_token_skips_empty() {
        let generator = ScriptedGenerator::new(Script::Succeed(vec![1]));
        let store = Arc::new(MemoryTokenStore::new());
        let session = GenerationSession::new(generator, store.clone(), temp_output_dir());

        assert!(!session.persist_token(true).await.unwrap());
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("").unwrap(), None);
        assert_eq!(parse_seed("  ").unwrap(), None);
        assert_eq!(parse_seed("42").unwrap(), Some(42));
        assert_eq!(parse_seed("-7").unwrap(), Some(-7));
        assert!(parse_seed("4.2").is_err());
        assert!(parse_seed("lots").is_err());
    }
}
