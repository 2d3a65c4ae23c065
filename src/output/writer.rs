use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use colored::Colorize;
use tracing::debug;

use crate::client::{CaptureData, CaptureKind, Payload};

use super::printer::format_file_link;

/// Saves a capture under `download_dir`, printing the outcome. Failures are
/// reported and turned into `false`.
pub fn persist(data: &CaptureData, kind: CaptureKind, download_dir: &Path) -> bool {
    match save_capture(data, kind, download_dir) {
        Ok(path) => {
            let size = fs::metadata(&path).map(|m| m.len()).unwrap_or_default();
            println!(
                "{} Saved {} to: {}",
                "✓".green(),
                kind,
                format_file_link(&path)
            );
            println!("   {} {} bytes", "File size:".bold(), size);
            true
        }
        Err(err) => {
            println!("{} Error saving {}: {:#}", "✗".red(), kind, err);
            false
        }
    }
}

/// Writes `{kind}_{id}.{ext}` into `download_dir`, decoding inline payloads
/// and copying remote-path payloads. Nothing is written when the payload is
/// unusable.
pub fn save_capture(data: &CaptureData, kind: CaptureKind, download_dir: &Path) -> Result<PathBuf> {
    let path = download_dir.join(capture_file_name(&data.id, kind));

    match &data.payload {
        Payload::Inline(encoded) => {
            let bytes = BASE64
                .decode(encoded.trim())
                .with_context(|| format!("decoding {} data for {}", kind, data.id))?;
            ensure_dir(download_dir)?;
            fs::write(&path, &bytes)
                .with_context(|| format!("writing {} to {}", kind, path.display()))?;
            debug!(path = %path.display(), bytes = bytes.len(), "decoded inline payload");
        }
        Payload::RemotePath(source) => {
            if !source.exists() {
                bail!("source file {} does not exist", source.display());
            }
            ensure_dir(download_dir)?;
            let copied = fs::copy(source, &path).with_context(|| {
                format!("copying {} to {}", source.display(), path.display())
            })?;
            debug!(from = %source.display(), to = %path.display(), bytes = copied, "copied remote-path payload");
        }
    }

    Ok(path)
}

pub(crate) fn capture_file_name(id: &str, kind: CaptureKind) -> String {
    format!(
        "{}_{}.{}",
        kind.label(),
        sanitize_component(id),
        kind.extension()
    )
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating download directory {}", dir.display()))
}

pub(crate) fn sanitize_component(value: &str) -> String {
    if value.is_empty() {
        return "capture".to_string();
    }
    value
        .chars()
        .map(|ch| match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => ch,
            _ => '-',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn inline(id: &str, encoded: &str) -> CaptureData {
        CaptureData {
            id: id.to_string(),
            url: "https://example.com".to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            payload: Payload::Inline(encoded.to_string()),
            duration_seconds: None,
        }
    }

    fn remote(id: &str, path: PathBuf) -> CaptureData {
        CaptureData {
            id: id.to_string(),
            url: "https://example.com".to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            payload: Payload::RemotePath(path),
            duration_seconds: Some(5),
        }
    }

    #[test]
    fn sanitize_component_replaces_invalid_characters() {
        assert_eq!(sanitize_component("abc123"), "abc123");
        assert_eq!(sanitize_component("../../etc/passwd"), "------etc-passwd");
        assert_eq!(sanitize_component("abc-"), "abc-");
        assert_eq!(sanitize_component("-_-"), "-_-");
        assert_eq!(sanitize_component(""), "capture");
        assert_eq!(
            sanitize_component("0b7c2f4e-1d2a-4c1b-9a57-6f1e0d5c9b21"),
            "0b7c2f4e-1d2a-4c1b-9a57-6f1e0d5c9b21"
        );
    }

    #[test]
    fn capture_file_name_uses_kind_extension() {
        assert_eq!(
            capture_file_name("abc123", CaptureKind::Screenshot),
            "screenshot_abc123.png"
        );
        assert_eq!(
            capture_file_name("rec 1", CaptureKind::Recording),
            "recording_rec-1.mp4"
        );
        assert_eq!(
            capture_file_name("abc-", CaptureKind::Screenshot),
            "screenshot_abc-.png"
        );
    }

    #[test]
    fn decode_strategy_round_trips_bytes() -> Result<()> {
        let temp = tempdir()?;
        let dir = temp.path().join("downloads");
        let original: Vec<u8> = (0..=255u8).cycle().take(4099).collect();
        let data = inline("abc123", &BASE64.encode(&original));

        let path = save_capture(&data, CaptureKind::Screenshot, &dir)?;

        assert_eq!(path, dir.join("screenshot_abc123.png"));
        assert_eq!(fs::read(&path)?, original);
        Ok(())
    }

    #[test]
    fn directory_creation_is_idempotent() -> Result<()> {
        let temp = tempdir()?;
        let dir = temp.path().join("downloads");
        fs::create_dir_all(&dir)?;

        assert!(persist(&inline("one", "AQID"), CaptureKind::Screenshot, &dir));
        assert!(persist(&inline("two", "BAUG"), CaptureKind::Screenshot, &dir));
        assert_eq!(fs::read(dir.join("screenshot_one.png"))?, vec![1, 2, 3]);
        assert_eq!(fs::read(dir.join("screenshot_two.png"))?, vec![4, 5, 6]);
        Ok(())
    }

    #[test]
    fn invalid_base64_writes_nothing() -> Result<()> {
        let temp = tempdir()?;
        let dir = temp.path().join("downloads");

        assert!(!persist(
            &inline("bad", "not base64!!"),
            CaptureKind::Screenshot,
            &dir
        ));
        assert!(!dir.exists());
        Ok(())
    }

    #[test]
    fn copy_strategy_copies_source() -> Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("server").join("recording_rec-1.mp4");
        fs::create_dir_all(source.parent().unwrap())?;
        fs::write(&source, b"\x00\x00\x00\x18ftypmp42")?;
        let dir = temp.path().join("downloads");

        let path = save_capture(&remote("rec-1", source.clone()), CaptureKind::Recording, &dir)?;

        assert_eq!(path, dir.join("recording_rec-1.mp4"));
        assert_eq!(fs::read(path)?, fs::read(source)?);
        Ok(())
    }

    #[test]
    fn copy_strategy_with_missing_source_writes_nothing() -> Result<()> {
        let temp = tempdir()?;
        let dir = temp.path().join("downloads");
        let data = remote("gone", temp.path().join("missing.png"));

        assert!(!persist(&data, CaptureKind::Screenshot, &dir));
        assert!(!dir.join("screenshot_gone.png").exists());

        let err = save_capture(&data, CaptureKind::Screenshot, &dir).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        Ok(())
    }
}
