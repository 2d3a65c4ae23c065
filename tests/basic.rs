use std::fs;
use std::path::Path;

use anyhow::Result;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use httpmock::prelude::*;
use screech_client::client::{CaptureClient, CaptureKind, CaptureOutcome};
use screech_client::config::{load_config, CliOverrides, ConfigBuilder};
use screech_client::output::save_capture;
use serde_json::json;
use tempfile::tempdir;

#[tokio::test]
async fn configured_client_captures_and_saves() -> Result<()> {
    let temp = tempdir()?;
    let base = temp.path();
    let server = MockServer::start_async().await;
    let original = b"not really a png, but bytes all the same";

    server
        .mock_async(|when, then| {
            when.method(POST).path("/screenshot").json_body(json!({
                "url": "https://example.com/page",
                "width": 1024,
                "height": 768
            }));
            then.status(200).json_body(json!({
                "success": true,
                "data": {
                    "id": "f00d",
                    "url": "https://example.com/page",
                    "timestamp": "2024-05-01T12:30:00Z",
                    "image_data": BASE64.encode(original)
                }
            }));
        })
        .await;

    write_file(
        base.join("screech.json"),
        r#"{
  "env": "capture.env",
  "viewport": {"width": 1024, "height": 768},
  "targetUrl": "https://example.com/page",
  "downloadDir": "media"
}
"#,
    )?;
    write_file(
        base.join("capture.env"),
        &format!("SCREECH_BASE_URL={}\n", server.base_url()),
    )?;

    let loaded = load_config(base)?.expect("config should load");
    let resolved =
        ConfigBuilder::new(base.to_path_buf(), Some(loaded), None, CliOverrides::default())
            .build()?;
    assert_eq!(resolved.client.base_url, server.base_url());

    let workflow = &resolved.workflow;
    let client = CaptureClient::new(resolved.client.clone())?;
    let result = client
        .capture_screenshot(&workflow.target_url, workflow.width, workflow.height)
        .await;

    let CaptureOutcome::Captured(data) = result.into_outcome() else {
        panic!("capture should succeed");
    };
    let path = save_capture(&data, CaptureKind::Screenshot, &workflow.download_dir)?;

    assert_eq!(path, base.join("media").join("screenshot_f00d.png"));
    assert_eq!(fs::read(path)?, original);
    Ok(())
}

#[tokio::test]
async fn rejected_capture_surfaces_server_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/recording");
            then.status(422).json_body(json!({
                "success": false,
                "error": "Recording failed: Duration must be between 1 and 300 seconds"
            }));
        })
        .await;

    let temp = tempdir()?;
    write_file(
        temp.path().join("screech.json"),
        &json!({ "baseUrl": server.base_url() }).to_string(),
    )?;
    let resolved = ConfigBuilder::new(
        temp.path().to_path_buf(),
        load_config(temp.path())?,
        None,
        CliOverrides::default(),
    )
    .build()?;

    let client = CaptureClient::new(resolved.client)?;
    let outcome = client
        .capture_recording("https://example.com", 0, 1920, 1080)
        .await
        .into_outcome();

    assert_eq!(
        outcome,
        CaptureOutcome::Failed(
            "Recording failed: Duration must be between 1 and 300 seconds".to_string()
        )
    );
    Ok(())
}

fn write_file(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    fs::write(path, contents)?;
    Ok(())
}
