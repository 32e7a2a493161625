pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;
pub use traits::CredentialStore;

/// Fixed key the credential is stored under, mirroring the browser-local
/// storage entry this store replaces.
pub const TOKEN_KEY: &str = "hf_api_token";
