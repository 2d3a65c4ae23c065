use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::{
    client::{CaptureClient, CaptureKind, CaptureOutcome, CaptureResult},
    config::WorkflowOptions,
    output::{describe, persist, print_banner, print_capture_received, print_completion, print_section},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub succeeded: bool,
    pub saved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowSummary {
    pub healthy: bool,
    pub screenshot: Option<StepReport>,
    pub recording: Option<StepReport>,
}

/// Health check, screenshot, optional recording, then the closing summary.
/// A failed health check ends the run before any capture request is sent.
pub async fn run_workflow(client: &CaptureClient, options: &WorkflowOptions) -> WorkflowSummary {
    let mut summary = WorkflowSummary::default();
    print_banner(options);

    if !client.check_health().await {
        println!(
            "{} API is not available at {}. Please ensure the Screech server is running.",
            "✗".red(),
            client.config().base_url
        );
        return summary;
    }
    summary.healthy = true;

    print_section("SCREENSHOT");
    println!("Taking screenshot of {}...", options.target_url.cyan());
    let progress = spinner("waiting for screenshot");
    let result = client
        .capture_screenshot(&options.target_url, options.width, options.height)
        .await;
    progress.finish_and_clear();
    summary.screenshot = Some(handle_result(result, CaptureKind::Screenshot, options));

    if options.record {
        print_section("RECORDING");
        println!(
            "Recording {} for {}s...",
            options.target_url.cyan(),
            options.duration_seconds
        );
        let progress = spinner("waiting for recording");
        let result = client
            .capture_recording(
                &options.target_url,
                options.duration_seconds,
                options.width,
                options.height,
            )
            .await;
        progress.finish_and_clear();
        summary.recording = Some(handle_result(result, CaptureKind::Recording, options));
    }

    print_completion(options);
    summary
}

fn handle_result(result: CaptureResult, kind: CaptureKind, options: &WorkflowOptions) -> StepReport {
    match result.into_outcome() {
        CaptureOutcome::Captured(data) => {
            info!(%kind, id = %data.id, "capture succeeded");
            print_capture_received(&data, kind);
            let saved = options.save && persist(&data, kind, &options.download_dir);
            println!();
            describe(&data, kind);
            StepReport {
                succeeded: true,
                saved,
            }
        }
        CaptureOutcome::Failed(message) => {
            println!("{} {}", "Error:".red().bold(), message);
            println!();
            StepReport::default()
        }
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({elapsed})") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
