use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

/// JSON body sent to `/screenshot` and `/recording`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureRequest {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub width: u32,
    pub height: u32,
}

impl CaptureRequest {
    pub fn screenshot(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            duration: None,
            width,
            height,
        }
    }

    pub fn recording(url: impl Into<String>, duration: u32, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            duration: Some(duration),
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    Screenshot,
    Recording,
}

impl CaptureKind {
    /// Prefix used for saved files and the endpoint path.
    pub fn label(self) -> &'static str {
        match self {
            CaptureKind::Screenshot => "screenshot",
            CaptureKind::Recording => "recording",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            CaptureKind::Screenshot => "png",
            CaptureKind::Recording => "mp4",
        }
    }
}

impl fmt::Display for CaptureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the captured media lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Base64 text embedded in the response body.
    Inline(String),
    /// Path on the capture server's filesystem.
    RemotePath(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawCaptureData")]
pub struct CaptureData {
    pub id: String,
    pub url: String,
    pub timestamp: String,
    pub payload: Payload,
    pub duration_seconds: Option<u32>,
}

#[derive(Deserialize)]
struct RawCaptureData {
    id: String,
    url: String,
    timestamp: String,
    image_data: Option<String>,
    file_path: Option<PathBuf>,
    #[serde(alias = "duration_seconds")]
    duration: Option<u32>,
}

impl TryFrom<RawCaptureData> for CaptureData {
    type Error = String;

    fn try_from(raw: RawCaptureData) -> Result<Self, Self::Error> {
        let payload = match (raw.image_data, raw.file_path) {
            (Some(encoded), _) => Payload::Inline(encoded),
            (None, Some(path)) => Payload::RemotePath(path),
            (None, None) => {
                return Err(format!(
                    "capture {} carries neither image_data nor file_path",
                    raw.id
                ))
            }
        };

        Ok(Self {
            id: raw.id,
            url: raw.url,
            timestamp: raw.timestamp,
            payload,
            duration_seconds: raw.duration,
        })
    }
}

/// Response envelope returned by the capture endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CaptureResult {
    pub success: bool,
    #[serde(default)]
    pub data: Option<CaptureData>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Captured(CaptureData),
    Failed(String),
}

impl CaptureResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn into_outcome(self) -> CaptureOutcome {
        match (self.success, self.data) {
            (true, Some(data)) => CaptureOutcome::Captured(data),
            (true, None) => {
                CaptureOutcome::Failed("server reported success without capture data".to_string())
            }
            (false, _) => CaptureOutcome::Failed(
                self.error
                    .unwrap_or_else(|| "server reported failure without a message".to_string()),
            ),
        }
    }
}
