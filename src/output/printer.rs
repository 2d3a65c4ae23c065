use std::path::Path;

use chrono::{DateTime, Local};
use colored::Colorize;
use url::Url;

use crate::{
    client::{CaptureData, CaptureKind, Payload},
    config::WorkflowOptions,
};

pub fn print_banner(options: &WorkflowOptions) {
    for line in banner_lines(options) {
        println!("{line}");
    }
    println!();
}

pub(crate) fn banner_lines(options: &WorkflowOptions) -> Vec<String> {
    let mut lines = vec![
        "Screech API client".bold().to_string(),
        "=".repeat(50),
        format!("{} {}", "Save to files:".bold(), options.save),
        format!("{} {}", "Target URL:".bold(), options.target_url.cyan()),
        format!("{} {}x{}", "Viewport:".bold(), options.width, options.height),
    ];
    if options.record {
        lines.push(format!("{} {}s", "Recording:".bold(), options.duration_seconds));
    }
    lines
}

pub fn print_section(title: &str) {
    println!("{}", title.bold());
    println!("{}", "-".repeat(30));
}

/// First lines printed right after a capture comes back.
pub fn print_capture_received(data: &CaptureData, kind: CaptureKind) {
    println!("{} {}", format!("{} ID:", kind).bold(), data.id);
    match &data.payload {
        Payload::Inline(encoded) => {
            println!("{} {} characters", "Image data size:".bold(), encoded.len())
        }
        Payload::RemotePath(path) => {
            println!("{} {}", "Server file:".bold(), path.display())
        }
    }
    println!("{} {}", "Timestamp:".bold(), data.timestamp);
}

/// Prints how the returned data can be used: identifiers, sizes and, for
/// recordings, the duration.
pub fn describe(data: &CaptureData, kind: CaptureKind) {
    for line in detail_lines(data, kind) {
        println!("{line}");
    }
    println!();
}

pub(crate) fn detail_lines(data: &CaptureData, kind: CaptureKind) -> Vec<String> {
    let mut lines = vec![
        format!("Capture details ({kind}):").bold().to_string(),
        format!("   {} {}", "ID:".bold(), data.id),
        format!("   {} {}", "URL:".bold(), data.url),
        format!("   {} {}", "Timestamp:".bold(), format_timestamp(&data.timestamp)),
    ];

    match &data.payload {
        Payload::Inline(encoded) => {
            lines.push(format!(
                "   {} {} characters (base64)",
                "Data size:".bold(),
                encoded.len()
            ));
            let binary = match decoded_size(encoded) {
                Some(size) => format!("{size} bytes"),
                None => format!("~{} bytes", encoded.len() * 3 / 4),
            };
            lines.push(format!("   {} {}", "Binary size:".bold(), binary));
        }
        Payload::RemotePath(path) => {
            lines.push(format!("   {} {}", "Server path:".bold(), path.display()));
        }
    }

    if kind == CaptureKind::Recording {
        if let Some(secs) = data.duration_seconds {
            lines.push(format!("   {} {}s", "Duration:".bold(), secs));
        }
    }

    lines
}

/// Byte length of a padded base64 string, computed from its length and
/// trailing `=` so large payloads are not decoded again.
fn decoded_size(encoded: &str) -> Option<usize> {
    let trimmed = encoded.trim();
    if trimmed.len() % 4 != 0 {
        return None;
    }
    let padding = trimmed.bytes().rev().take_while(|b| *b == b'=').count();
    if padding > 2 {
        return None;
    }
    Some(trimmed.len() / 4 * 3 - padding)
}

fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => format!(
            "{} (local {})",
            raw,
            parsed.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        ),
        Err(_) => raw.to_string(),
    }
}

pub fn print_completion(options: &WorkflowOptions) {
    println!("{} Examples completed!", "✓".green());
    println!();
    for line in completion_lines(options) {
        println!("{line}");
    }
}

pub(crate) fn completion_lines(options: &WorkflowOptions) -> Vec<String> {
    if options.save {
        let dir = options
            .download_dir
            .canonicalize()
            .unwrap_or_else(|_| options.download_dir.clone());
        vec![format!("Files saved to: {}", format_file_link(&dir))]
    } else {
        vec![
            "Files not saved (pass --save or set \"save\": true to keep them)".to_string(),
            "The API returns the capture data directly; it can be used without saving."
                .to_string(),
        ]
    }
}

pub(crate) fn format_file_link(path: &Path) -> String {
    let display = path.to_string_lossy();
    match Url::from_file_path(path) {
        Ok(url) => format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, display.cyan()),
        Err(_) => display.cyan().to_string(),
    }
}
