use std::env;
use std::sync::Arc;

use rflux::{
    Config, FileTokenStore, GenerationSession, HfClient, HfConfig, ImageClient, Outcome,
    StorageConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file first
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    rflux::logger::init_with_config(
        rflux::logger::LoggerConfig::development().with_level(rflux::logger::LogLevel::Debug),
    )?;

    let config = Config::from_env();
    rflux::logger::log_startup_info("rflux", env!("CARGO_PKG_VERSION"), rflux::hf::DEFAULT_ENDPOINT);
    rflux::logger::log_config_info(&config);

    // Check the credential (without printing the actual value)
    match env::var("HF_API_TOKEN") {
        Ok(token) => {
            log::info!("✅ Hugging Face token found in environment");
            log::debug!("Token starts with: {}...", &token[..5.min(token.len())]);
        }
        Err(_) => {
            log::warn!("⚠️  No HF_API_TOKEN in the environment, will try the saved token");
        }
    }

    log::info!("🖼️  Available image generation models:");
    for model in ImageClient::supported_models() {
        log::info!("  {} - {} ({})", model.id, model.name, model.provider);
    }

    let hf_config = config.hf.clone().unwrap_or_else(HfConfig::new);
    let storage_config = config.storage.clone().unwrap_or_else(StorageConfig::new);

    let client = HfClient::new(hf_config.clone());
    let store = FileTokenStore::new(
        storage_config
            .token_file
            .unwrap_or_else(|| ".rflux_token.json".into()),
    );

    let mut session = GenerationSession::new(
        Arc::new(client.image().clone()),
        Arc::new(store),
        storage_config.output_dir.unwrap_or_else(|| ".".into()),
    );

    // Load-time hook: a previously saved token fills the field
    if session.load_saved_token().await? {
        log::info!("🔑 Loaded saved API token");
    }
    if let Some(token) = hf_config.token {
        session.form.token = token;
    }

    session.form.prompt = env::args().skip(1).collect::<Vec<_>>().join(" ");
    if session.form.prompt.is_empty() {
        log::info!("No prompt given, picking one of the examples");
        session.form.fill_example_prompt();
    }
    log::info!("📝 Prompt: {}", session.form.prompt);

    let timer = rflux::logger::timer("image generation");
    let outcome = session.generate().await;
    drop(timer);

    for note in session.notifier.visible() {
        match note.kind {
            rflux::NotificationKind::Success => log::info!("✅ {}", note.message),
            rflux::NotificationKind::Error => log::error!("❌ {}", note.message),
        }
    }

    match outcome {
        Outcome::Generated => {
            if let rflux::ui::ImageRegion::Image { download, .. } = &session.image_region {
                log::info!("💾 Image saved to: {}", download.path.display());
            }
        }
        Outcome::Rejected => log::warn!("⚠️  Generation rejected before any request was sent"),
        Outcome::Failed => log::warn!("💡 The request failed; see the message above"),
        Outcome::Busy => log::warn!("⚠️  A generation was already in flight"),
    }

    Ok(())
}
