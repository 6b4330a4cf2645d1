use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extractor: ExtractorConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Program and leading arguments used to run yt-dlp,
    /// e.g. ["yt-dlp"] or ["python3", "-m", "yt_dlp"]
    pub command: Vec<String>,
    /// Netscape-format cookies file for private or age-gated videos
    pub cookies_file: Option<PathBuf>,
    /// Timeout in seconds for a single yt-dlp invocation (default: 300)
    pub timeout_seconds: u64,
    /// Subtitle format preference passed to --sub-format
    pub sub_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where downloaded artifacts are written (default: current directory)
    pub directory: Option<PathBuf>,
    /// Save a cleaned plain-text transcript instead of the subtitle file
    pub clean_transcript: bool,
    /// Convert raw subtitle downloads to SRT (requires ffmpeg)
    pub convert_raw_to_srt: bool,
    /// Preferred language when no track is chosen explicitly
    pub language: Option<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            command: vec!["yt-dlp".to_string()],
            cookies_file: None,
            timeout_seconds: 300,
            sub_format: "vtt/srt/best".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            clean_transcript: true,
            convert_raw_to_srt: true,
            language: Some("en".to_string()),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let content =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}
