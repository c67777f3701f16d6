//! Runtime configuration loaded from the environment.

use std::path::PathBuf;

use card_composer::CardConfig;

/// Default request body limit for uploads (20MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub asset_dir: PathBuf,
    pub font_path: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 8080,
            asset_dir: PathBuf::from("assets"),
            font_path: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a key lookup; unset or malformed values use defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let g = |key: &str| -> String { get(key).unwrap_or_default().trim().to_string() };

        let asset_dir = match g("ASSET_DIR") {
            dir if dir.is_empty() => defaults.asset_dir,
            dir => PathBuf::from(dir),
        };
        let font_path = Some(g("FONT_PATH"))
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Self {
            server_port: parse_u16(&g("SERVER_PORT"), defaults.server_port),
            asset_dir,
            font_path,
            max_upload_bytes: parse_usize(&g("MAX_UPLOAD_BYTES"), defaults.max_upload_bytes),
        }
    }

    /// Composer settings derived from this configuration.
    pub fn card_config(&self) -> CardConfig {
        CardConfig {
            asset_dir: self.asset_dir.clone(),
            font_paths: self.font_path.iter().cloned().collect(),
            ..CardConfig::default()
        }
    }
}

fn parse_u16(s: &str, default: u16) -> u16 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

fn parse_usize(s: &str, default: usize) -> usize {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}
