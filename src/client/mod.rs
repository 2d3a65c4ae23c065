mod error;
mod http;
mod models;

pub use error::CaptureError;
pub use http::CaptureClient;
pub use models::{CaptureData, CaptureKind, CaptureOutcome, CaptureRequest, CaptureResult, Payload};
