use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::services::downloader::Downloader;
use crate::core::services::ytmusic::YtMusicClient;
use crate::error::ConfigError;

fn default_api_base_url() -> String {
    "https://music.youtube.com/youtubei/v1".to_string()
}

fn default_ytdlp_program() -> String {
    "yt-dlp".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the YouTube Music internal API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Name or path of the yt-dlp executable
    #[serde(default = "default_ytdlp_program")]
    pub ytdlp_program: String,

    /// HTTP request timeout (seconds)
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// UI language sent with every metadata request ("hl")
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            ytdlp_program: default_ytdlp_program(),
            request_timeout_seconds: default_request_timeout_seconds(),
            language: default_language(),
        }
    }
}

impl Config {
    /// Loads configuration from an explicit path, or from the standard
    /// config directory if a file exists there. Anything missing falls
    /// back to defaults; the tool works with no config file at all.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(Path::new(path));
        }

        if let Some(default_path) = Self::default_config_path() {
            if default_path.exists() {
                return Self::from_file(&default_path);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn default_config_path() -> Option<PathBuf> {
        match ProjectDirs::from("net", "musicdock", "ytmbridge") {
            Some(project_dirs) => Some(project_dirs.config_dir().join("config.toml")),
            None => {
                warn!("ProjectDirs unavailable; skipping default config lookup");
                None
            }
        }
    }

    pub fn create_metadata_client(&self) -> YtMusicClient {
        YtMusicClient::new(&self.api_base_url, &self.language, self.request_timeout_seconds)
    }

    pub fn create_downloader(&self) -> Downloader {
        Downloader::new(&self.ytdlp_program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://music.youtube.com/youtubei/v1");
        assert_eq!(config.ytdlp_program, "yt-dlp");
        assert_eq!(config.request_timeout_seconds, 30);
        assert_eq!(config.language, "en");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("ytdlp_program = \"/opt/yt-dlp\"").unwrap();
        assert_eq!(config.ytdlp_program, "/opt/yt-dlp");
        assert_eq!(config.api_base_url, default_api_base_url());
        assert_eq!(config.request_timeout_seconds, 30);
    }
}
