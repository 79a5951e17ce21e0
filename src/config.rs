//! Configuration management for lipikar using the prefer crate.
//!
//! `Config` mirrors the file on disk (every key optional). It is resolved
//! into an `ExtractorConfig`, which is what the pipelines are built from.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ocr::{LanguagePacks, DEFAULT_DPI};
use crate::vision::{DEFAULT_API_BASE, DEFAULT_MODEL};

/// Environment variable overriding the rasterizer binary.
pub const ENV_PDFTOPPM: &str = "LIPIKAR_PDFTOPPM";
/// Environment variable overriding the text reader binary.
pub const ENV_PDFTOTEXT: &str = "LIPIKAR_PDFTOTEXT";
/// Environment variable overriding the OCR binary.
pub const ENV_TESSERACT: &str = "LIPIKAR_TESSERACT";
/// Environment variable overriding the vision model identifier.
pub const ENV_VISION_MODEL: &str = "LIPIKAR_VISION_MODEL";

/// Default request timeout for the vision model, in seconds.
pub const DEFAULT_VISION_TIMEOUT_SECS: u64 = 120;

/// Resolved settings every extractor is constructed from.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub rasterizer_binary: PathBuf,
    pub text_reader_binary: PathBuf,
    pub ocr_binary: PathBuf,
    pub rasterization_dpi: u32,
    pub vision_model: String,
    pub vision_api_base: String,
    pub vision_timeout: Duration,
    /// Parent for per-call scratch directories. System temp dir if unset.
    pub temp_root: Option<PathBuf>,
    pub language_packs: LanguagePacks,
    /// Where the HTTP boundary stores uploads and results.
    pub upload_dir: PathBuf,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            rasterizer_binary: PathBuf::from("pdftoppm"),
            text_reader_binary: PathBuf::from("pdftotext"),
            ocr_binary: PathBuf::from("tesseract"),
            rasterization_dpi: DEFAULT_DPI,
            vision_model: DEFAULT_MODEL.to_string(),
            vision_api_base: DEFAULT_API_BASE.to_string(),
            vision_timeout: Duration::from_secs(DEFAULT_VISION_TIMEOUT_SECS),
            temp_root: None,
            language_packs: LanguagePacks::default(),
            upload_dir: PathBuf::from("uploads"),
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rasterizer_binary_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_reader_binary_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_binary_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rasterization_dpi: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision_model_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision_api_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_language_packs: Option<LanguagePacks>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers lipikar config files in standard locations.
    pub async fn load() -> Self {
        // Use prefer for file discovery, then parse with serde
        match prefer::load("lipikar").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}; using defaults", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse config text in the format named by `ext`.
    pub fn parse(contents: &str, ext: &str) -> Result<Self, String> {
        match ext {
            "toml" => toml::from_str(contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e)),
            "yaml" | "yml" => serde_yaml::from_str(contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e)),
            _ => serde_json::from_str(contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e)),
        }
    }

    /// Get the base directory for resolving relative paths.
    /// Returns the config file's parent directory if available, otherwise None.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Resolve a binary setting. Bare names stay as-is so they are looked
    /// up in PATH; anything with a separator is a path.
    fn resolve_binary(&self, value: &str, base_dir: &Path) -> PathBuf {
        if value.contains('/') || value.starts_with('~') {
            self.resolve_path(value, base_dir)
        } else {
            PathBuf::from(value)
        }
    }

    /// Apply configuration on top of `settings`.
    /// `base_dir` is used to resolve relative paths (typically config file dir or CWD).
    pub fn apply_to_settings(&self, settings: &mut ExtractorConfig, base_dir: &Path) {
        if let Some(ref binary) = self.rasterizer_binary_path {
            settings.rasterizer_binary = self.resolve_binary(binary, base_dir);
        }
        if let Some(ref binary) = self.text_reader_binary_path {
            settings.text_reader_binary = self.resolve_binary(binary, base_dir);
        }
        if let Some(ref binary) = self.ocr_binary_path {
            settings.ocr_binary = self.resolve_binary(binary, base_dir);
        }
        if let Some(dpi) = self.rasterization_dpi {
            settings.rasterization_dpi = dpi;
        }
        if let Some(ref model) = self.vision_model_identifier {
            settings.vision_model = model.clone();
        }
        if let Some(ref base) = self.vision_api_base {
            settings.vision_api_base = base.clone();
        }
        if let Some(secs) = self.vision_timeout_secs {
            settings.vision_timeout = Duration::from_secs(secs);
        }
        if let Some(ref root) = self.temp_root {
            settings.temp_root = Some(self.resolve_path(root, base_dir));
        }
        if let Some(ref dir) = self.upload_dir {
            settings.upload_dir = self.resolve_path(dir, base_dir);
        }
        if let Some(ref packs) = self.ocr_language_packs {
            settings.language_packs = packs.clone();
        }
    }

    /// Build resolved settings: defaults, then this file, then environment
    /// overrides.
    pub fn to_settings(&self) -> ExtractorConfig {
        let base_dir = self
            .base_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        let mut settings = ExtractorConfig::default();
        self.apply_to_settings(&mut settings, &base_dir);
        apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
        settings
    }
}

/// Apply `LIPIKAR_*` overrides. `lookup` is the environment.
pub fn apply_env_overrides<F>(settings: &mut ExtractorConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get(ENV_PDFTOPPM) {
        settings.rasterizer_binary = PathBuf::from(v);
    }
    if let Some(v) = get(ENV_PDFTOTEXT) {
        settings.text_reader_binary = PathBuf::from(v);
    }
    if let Some(v) = get(ENV_TESSERACT) {
        settings.ocr_binary = PathBuf::from(v);
    }
    if let Some(v) = get(ENV_VISION_MODEL) {
        settings.vision_model = v;
    }
}

/// Load settings from an explicit file, or discover one.
pub async fn load_settings(explicit: Option<&Path>) -> anyhow::Result<ExtractorConfig> {
    let config = match explicit {
        Some(path) => Config::load_from_path(path)
            .await
            .map_err(anyhow::Error::msg)?,
        None => Config::load().await,
    };
    if let Some(ref path) = config.source_path {
        tracing::info!("Loaded config from {}", path.display());
    }
    Ok(config.to_settings())
}
