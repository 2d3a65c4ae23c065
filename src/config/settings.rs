use std::{path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TARGET_URL: &str =
    "https://giphy.com/gifs/rickroll-rick-astley-never-gonna-give-you-up-Vuw9m5wXviFIQ";
pub const DEFAULT_WIDTH: u32 = 1920;
pub const DEFAULT_HEIGHT: u32 = 1080;
pub const DEFAULT_RECORDING_SECS: u32 = 5;
pub const DEFAULT_DOWNLOAD_DIR: &str = "downloads";
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CAPTURE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings handed to `CaptureClient::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub health_timeout: Duration,
    pub capture_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
            capture_timeout: DEFAULT_CAPTURE_TIMEOUT,
        }
    }
}

/// What a single run captures and where the results go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOptions {
    pub target_url: String,
    pub width: u32,
    pub height: u32,
    pub record: bool,
    pub duration_seconds: u32,
    pub save: bool,
    pub download_dir: PathBuf,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            record: false,
            duration_seconds: DEFAULT_RECORDING_SECS,
            save: true,
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
        }
    }
}
