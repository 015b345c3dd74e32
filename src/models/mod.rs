//! Domain models for the devreport parsing pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`ClassifiedLine`] - One validated line of the input file
//! - [`DeviceLine`] - A single device record
//! - [`DeviceReport`] - The assembled report for one file
//! - [`DeviceManagement`] - Serialization envelope wrapping one or more reports
//! - [`OutputFormat`] - Output format selector (JSON or XML)
//!
//! All of these are plain values: each pipeline stage owns the value it
//! returns and hands ownership to the next stage. Nothing is mutated after
//! construction.

use serde::{Deserialize, Serialize};

// =============================================================================
// Line Kinds
// =============================================================================

/// Kind of a line in the input file, as declared by its leading type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `H` - header line, one per file.
    Header,
    /// `R` - device record line, zero or more per file.
    Record,
    /// `T` - trailer line, one per file.
    Trailer,
}

impl LineKind {
    /// Exact number of `|`-separated parts a line of this kind must have,
    /// including the type tag itself.
    pub fn expected_parts(&self) -> usize {
        match self {
            LineKind::Header => 2,
            LineKind::Record => 5,
            LineKind::Trailer => 2,
        }
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineKind::Header => write!(f, "Header"),
            LineKind::Record => write!(f, "Record"),
            LineKind::Trailer => write!(f, "Trailer"),
        }
    }
}

// =============================================================================
// Classified Lines
// =============================================================================

/// One line of the input file after classification and validation.
///
/// Produced by [`crate::parser::classify`]; has no identity beyond its
/// position in the input sequence. Field values are taken verbatim from the
/// input (no trimming), except the trailer count which is parsed as an
/// integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLine {
    /// Header line declaring the server/batch identifier.
    Header { server_id: String },
    /// Record line describing a single device.
    Record {
        imei1: String,
        imei2: String,
        serial_number: String,
        device_name: String,
    },
    /// Trailer line declaring the expected record count.
    Trailer { count: i64 },
}

impl ClassifiedLine {
    /// Kind of this line.
    pub fn kind(&self) -> LineKind {
        match self {
            ClassifiedLine::Header { .. } => LineKind::Header,
            ClassifiedLine::Record { .. } => LineKind::Record,
            ClassifiedLine::Trailer { .. } => LineKind::Trailer,
        }
    }
}

// =============================================================================
// Device Line
// =============================================================================

/// A single device record, copied out of a [`ClassifiedLine::Record`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceLine {
    /// Primary IMEI.
    pub imei1: String,
    /// Secondary IMEI.
    pub imei2: String,
    /// Device serial number.
    pub serial_number: String,
    /// Human-readable device name.
    pub device_name: String,
}

// =============================================================================
// Device Report
// =============================================================================

/// The assembled report for one input file.
///
/// Invariant: `record_count == device_lines.len()`. [`DeviceReport::new`]
/// derives the count from the lines, so the invariant holds by construction;
/// the assembler additionally checks the trailer's declared count against the
/// actual line count before building one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceReport {
    /// Server/batch identifier from the header line.
    pub server_id: String,
    /// Device records in input order.
    pub device_lines: Vec<DeviceLine>,
    /// Number of device records.
    pub record_count: usize,
}

impl DeviceReport {
    /// Build a report from its header identifier and device lines.
    pub fn new(server_id: String, device_lines: Vec<DeviceLine>) -> Self {
        let record_count = device_lines.len();
        Self {
            server_id,
            device_lines,
            record_count,
        }
    }
}

// =============================================================================
// Serialization Envelope
// =============================================================================

/// Envelope wrapping one or more reports under a named collection field.
///
/// Used only at the serialization boundary to match the expected output
/// document shape; a single report is wrapped in a one-element list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceManagement {
    /// The wrapped reports.
    pub device_details: Vec<DeviceReport>,
}

impl DeviceManagement {
    /// Wrap a single report.
    pub fn single(report: DeviceReport) -> Self {
        Self {
            device_details: vec![report],
        }
    }
}

// =============================================================================
// Output Format
// =============================================================================

/// Output format selector for rendering an assembled report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Pretty-printed XML.
    Xml,
}

impl OutputFormat {
    /// Parse a format from its name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Xml => write!(f, "xml"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_kind_arity() {
        assert_eq!(LineKind::Header.expected_parts(), 2);
        assert_eq!(LineKind::Record.expected_parts(), 5);
        assert_eq!(LineKind::Trailer.expected_parts(), 2);
    }

    #[test]
    fn test_classified_line_kind() {
        let line = ClassifiedLine::Header {
            server_id: "SRV1".into(),
        };
        assert_eq!(line.kind(), LineKind::Header);
        assert_eq!(ClassifiedLine::Trailer { count: 0 }.kind(), LineKind::Trailer);
    }

    #[test]
    fn test_report_count_matches_lines() {
        let report = DeviceReport::new(
            "SRV1".into(),
            vec![DeviceLine {
                imei1: "111".into(),
                imei2: "222".into(),
                serial_number: "SN1".into(),
                device_name: "DevA".into(),
            }],
        );
        assert_eq!(report.record_count, report.device_lines.len());
    }

    #[test]
    fn test_report_serialization_keys() {
        let report = DeviceReport::new("SRV1".into(), Vec::new());
        let json = serde_json::to_string(&DeviceManagement::single(report)).unwrap();
        assert!(json.contains("\"deviceDetails\""));
        assert!(json.contains("\"serverId\""));
        assert!(json.contains("\"deviceLines\""));
        assert!(json.contains("\"recordCount\""));
    }

    #[test]
    fn test_device_line_serialization_keys() {
        let line = DeviceLine {
            imei1: "111".into(),
            imei2: "222".into(),
            serial_number: "SN1".into(),
            device_name: "DevA".into(),
        };
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"imei1\""));
        assert!(json.contains("\"serialNumber\""));
        assert!(json.contains("\"deviceName\""));
    }

    #[test]
    fn test_output_format_from_name() {
        assert_eq!(OutputFormat::from_name("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name("XML"), Some(OutputFormat::Xml));
        assert_eq!(OutputFormat::from_name(" Json "), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name("yaml"), None);
    }
}
