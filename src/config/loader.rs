use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "screech.json";

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ScreechConfig {
    #[serde(rename = "baseUrl")]
    pub base_url: Option<String>,
    #[serde(rename = "healthTimeoutSecs")]
    pub health_timeout_secs: Option<u64>,
    #[serde(rename = "captureTimeoutSecs")]
    pub capture_timeout_secs: Option<u64>,
    #[serde(rename = "downloadDir")]
    pub download_dir: Option<String>,
    pub save: Option<bool>,
    pub viewport: Option<ViewportConfig>,
    #[serde(rename = "targetUrl")]
    pub target_url: Option<String>,
    #[serde(rename = "recordingDurationSecs")]
    pub recording_duration_secs: Option<u32>,
    pub env: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ScreechConfig,
    pub path: PathBuf,
    pub dir: PathBuf,
}

/// Loads `screech.json` from `target`, which may be the file itself or the
/// directory holding it. A missing file is not an error.
pub fn load_config(target: &Path) -> Result<Option<LoadedConfig>> {
    let resolved = if target.is_absolute() {
        target.to_path_buf()
    } else {
        std::env::current_dir()?.join(target)
    };

    let (file_path, dir) = if resolved.is_dir() {
        (resolved.join(CONFIG_FILE_NAME), resolved)
    } else {
        let dir = match resolved.parent() {
            Some(parent) => parent.to_path_buf(),
            None => std::env::current_dir()?,
        };
        (resolved, dir)
    };

    if !file_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&file_path)
        .with_context(|| format!("reading config {}", file_path.display()))?;

    let config: ScreechConfig = serde_json::from_str(&contents)
        .with_context(|| format!("parsing config {}", file_path.display()))?;

    Ok(Some(LoadedConfig {
        config,
        path: file_path,
        dir,
    }))
}
