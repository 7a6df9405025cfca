use serde::Deserialize;
use std::env;
use std::path::Path;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = [
    "https://react-firebase-plant-nursery.vercel.app",
    "http://localhost:5173",
];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub body_limit_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API from a browser.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Firestore,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// JSON seed for the memory backend.
    pub seed_path: Option<String>,
    pub firestore: Option<FirestoreConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_firestore_url")]
    pub base_url: String,
    pub access_token: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_database() -> String { "(default)".to_string() }
fn default_firestore_url() -> String { "https://firestore.googleapis.com".to_string() }
fn default_page_size() -> u32 { 300 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from(Path::new("config"), &run_mode, env::var("PORT").ok())
    }

    /// Layers, lowest priority first: built-in defaults, `<dir>/default`,
    /// `<dir>/<run_mode>`, `<dir>/local`, `NURSERY__*` variables, then `port`.
    pub fn load_from(dir: &Path, run_mode: &str, port: Option<String>) -> Result<Self, config::ConfigError> {
        let file = |name: &str| {
            config::File::with_name(&dir.join(name).to_string_lossy()).required(false)
        };

        let s = config::Config::builder()
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.body_limit_bytes", DEFAULT_BODY_LIMIT_BYTES as i64)?
            .set_default(
                "cors.allowed_origins",
                DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect::<Vec<_>>(),
            )?
            .set_default("store.backend", "memory")?
            .add_source(file("default"))
            .add_source(file(run_mode))
            // Not checked in
            .add_source(file("local"))
            // Eg.. `NURSERY__STORE__BACKEND=firestore`
            .add_source(
                config::Environment::with_prefix("NURSERY")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            // Hosting platforms hand out the port through a bare `PORT`; blank means unset.
            .set_override_option("server.port", port.filter(|p| !p.trim().is_empty()))?
            .build()?;

        s.try_deserialize()
    }
}
