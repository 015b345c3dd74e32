//! REST API types for client integration.
//!
//! The upload response carries both the rendered output and the structured
//! report, so a client can switch output formats by re-rendering without
//! re-uploading or re-parsing the file.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::{DeviceReport, OutputFormat};
use crate::parser::ParsedReport;

/// Response sent to the client after a report upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Unique job identifier.
    pub job_id: String,

    /// Status: "ok" on success.
    pub status: String,

    /// The assembled report.
    pub report: DeviceReport,

    /// The report rendered in the requested format.
    pub output: String,

    /// Format of `output`.
    pub format: OutputFormat,

    /// Metadata about the upload.
    pub metadata: ResponseMetadata,
}

/// Metadata about an upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    /// Server/batch identifier from the header line.
    pub server_id: String,

    /// Number of device records.
    pub device_count: usize,

    /// Detected encoding of the uploaded bytes.
    pub encoding: String,

    /// Original file name, if the client sent one.
    pub file_name: Option<String>,
}

impl UploadResponse {
    /// Build a success response from a parsed report and its rendered output.
    pub fn new(
        parsed: ParsedReport,
        output: String,
        format: OutputFormat,
        file_name: Option<String>,
    ) -> Self {
        let ParsedReport { report, encoding } = parsed;

        Self {
            job_id: Uuid::new_v4().to_string(),
            status: "ok".to_string(),
            metadata: ResponseMetadata {
                server_id: report.server_id.clone(),
                device_count: report.record_count,
                encoding,
                file_name,
            },
            report,
            output,
            format,
        }
    }
}

/// Create an error response body.
///
/// The `error` field is the failure's message, surfaced verbatim.
pub fn error_response(error: &str) -> Value {
    json!({
        "jobId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_parsed() -> ParsedReport {
        ParsedReport {
            report: DeviceReport::new("SRV1".into(), Vec::new()),
            encoding: "utf-8".into(),
        }
    }

    #[test]
    fn test_upload_response_fields() {
        let response = UploadResponse::new(
            sample_parsed(),
            "{}".into(),
            OutputFormat::Json,
            Some("devices.txt".into()),
        );

        assert_eq!(response.status, "ok");
        assert_eq!(response.metadata.server_id, "SRV1");
        assert_eq!(response.metadata.device_count, 0);
        assert_eq!(response.metadata.file_name.as_deref(), Some("devices.txt"));
    }

    #[test]
    fn test_upload_response_serialization_keys() {
        let response =
            UploadResponse::new(sample_parsed(), "{}".into(), OutputFormat::Json, None);
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"jobId\""));
        assert!(json.contains("\"deviceCount\""));
        assert!(json.contains("\"format\":\"json\""));
    }

    #[test]
    fn test_error_response() {
        let body = error_response("No header record found");
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "No header record found");
    }
}
