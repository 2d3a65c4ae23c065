use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("could not decode response (HTTP {status}): {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
}

impl CaptureError {
    pub(super) fn transport(endpoint: &str, source: reqwest::Error) -> Self {
        CaptureError::Transport {
            endpoint: endpoint.to_string(),
            source,
        }
    }

    pub(super) fn status(status: StatusCode, body: &[u8]) -> Self {
        CaptureError::Status {
            status,
            body: String::from_utf8_lossy(body).trim().to_string(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, CaptureError::Transport { source, .. } if source.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_trims_body() {
        let err = CaptureError::status(StatusCode::SERVICE_UNAVAILABLE, b"  down for maintenance\n");
        assert_eq!(
            err.to_string(),
            "server returned HTTP 503 Service Unavailable: down for maintenance"
        );
        assert!(!err.is_timeout());
    }

    #[test]
    fn decode_error_names_status() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = CaptureError::Decode {
            status: StatusCode::OK,
            source,
        };
        assert!(err.to_string().starts_with("could not decode response (HTTP 200 OK)"));
    }
}
