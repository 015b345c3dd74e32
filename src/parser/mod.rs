//! Line-oriented parser for pipe-delimited device provisioning files.
//!
//! The input is a text file of `|`-delimited lines, each starting with a
//! type tag:
//!
//! ```text
//! H|<serverId>                                  exactly one per file
//! R|<imei1>|<imei2>|<serialNumber>|<deviceName> zero or more per file
//! T|<count>                                     exactly one per file
//! ```
//!
//! [`classify`] validates a single line and [`assemble`] folds a whole file
//! into a [`DeviceReport`], enforcing the file-level invariants: exactly one
//! header, exactly one trailer, and a trailer count equal to the number of
//! record lines. Any violation aborts the parse with a [`ParseError`]; no
//! partial report is ever produced.
//!
//! Both functions are pure and synchronous. The [`parse_report_bytes`] and
//! [`parse_report_file`] entry points add the caller-side concerns: reading
//! the file and decoding its bytes with encoding auto-detection.

use std::path::Path;

use crate::error::{ParseError, ParseResult, ReportResult};
use crate::models::{ClassifiedLine, DeviceLine, DeviceReport, LineKind};

/// Field delimiter of the line format.
const FIELD_DELIMITER: char = '|';

// =============================================================================
// Line Classification
// =============================================================================

/// Classify and validate one non-blank line.
///
/// Splits the line on `|`, dispatches on the leading type tag and checks the
/// exact part count for that kind. Field values are taken verbatim - no
/// trimming, no coercion beyond the trailer's integer parse.
///
/// # Example
/// ```
/// use devreport::{classify, ClassifiedLine};
///
/// let line = classify("H|SRV1").unwrap();
/// assert_eq!(line, ClassifiedLine::Header { server_id: "SRV1".into() });
/// ```
pub fn classify(line: &str) -> ParseResult<ClassifiedLine> {
    let parts: Vec<&str> = line.split(FIELD_DELIMITER).collect();

    // split always yields at least one part, so parts[0] is safe
    match parts[0] {
        "H" => classify_header(&parts),
        "R" => classify_record(&parts),
        "T" => classify_trailer(&parts),
        other => Err(ParseError::UnknownRecordType(other.to_string())),
    }
}

fn check_parts(kind: LineKind, parts: &[&str]) -> ParseResult<()> {
    let expected = kind.expected_parts();
    if parts.len() != expected {
        return Err(ParseError::MalformedLine {
            kind,
            expected,
            found: parts.len(),
        });
    }
    Ok(())
}

fn classify_header(parts: &[&str]) -> ParseResult<ClassifiedLine> {
    check_parts(LineKind::Header, parts)?;
    Ok(ClassifiedLine::Header {
        server_id: parts[1].to_string(),
    })
}

fn classify_record(parts: &[&str]) -> ParseResult<ClassifiedLine> {
    check_parts(LineKind::Record, parts)?;
    Ok(ClassifiedLine::Record {
        imei1: parts[1].to_string(),
        imei2: parts[2].to_string(),
        serial_number: parts[3].to_string(),
        device_name: parts[4].to_string(),
    })
}

fn classify_trailer(parts: &[&str]) -> ParseResult<ClassifiedLine> {
    check_parts(LineKind::Trailer, parts)?;
    let count = parts[1]
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidCount(parts[1].to_string()))?;
    Ok(ClassifiedLine::Trailer { count })
}

// =============================================================================
// Report Assembly
// =============================================================================

/// Assemble the full content of one file into a [`DeviceReport`].
///
/// Blank and whitespace-only lines are skipped; every other line is
/// classified in a single forward pass. The trailer may appear anywhere in
/// the file - only the final count check matters.
///
/// # Example
/// ```
/// use devreport::assemble;
///
/// let report = assemble("H|SRV1\nR|111|222|SN1|DevA\nT|1").unwrap();
/// assert_eq!(report.server_id, "SRV1");
/// assert_eq!(report.record_count, 1);
/// ```
pub fn assemble(content: &str) -> ParseResult<DeviceReport> {
    let mut server_id: Option<String> = None;
    let mut device_lines: Vec<DeviceLine> = Vec::new();
    let mut record_count: Option<i64> = None;

    for line in content.lines().filter(|line| !line.trim().is_empty()) {
        match classify(line)? {
            ClassifiedLine::Header { server_id: id } => {
                if server_id.is_some() {
                    return Err(ParseError::DuplicateHeader);
                }
                server_id = Some(id);
            }
            ClassifiedLine::Record {
                imei1,
                imei2,
                serial_number,
                device_name,
            } => {
                device_lines.push(DeviceLine {
                    imei1,
                    imei2,
                    serial_number,
                    device_name,
                });
            }
            ClassifiedLine::Trailer { count } => {
                if record_count.is_some() {
                    return Err(ParseError::DuplicateTrailer);
                }
                record_count = Some(count);
            }
        }
    }

    let server_id = server_id.ok_or(ParseError::MissingHeader)?;
    let expected = record_count.ok_or(ParseError::MissingTrailer)?;

    if expected != device_lines.len() as i64 {
        return Err(ParseError::RecordCountMismatch {
            expected,
            found: device_lines.len(),
        });
    }

    Ok(DeviceReport::new(server_id, device_lines))
}

// =============================================================================
// Encoding Front-End
// =============================================================================

/// A parsed report together with the encoding its bytes were decoded from.
#[derive(Debug, Clone)]
pub struct ParsedReport {
    /// The assembled report.
    pub report: DeviceReport,
    /// Detected encoding of the input bytes.
    pub encoding: String,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _, _) = chardet::detect(bytes);

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the specified encoding.
///
/// Unknown encodings and invalid byte sequences fall back to lossy UTF-8, so
/// decoding never fails; a garbled field then surfaces as a parse error with
/// the offending value in its message.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.to_string(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        _ => String::from_utf8_lossy(bytes).to_string(),
    }
}

/// Parse raw file bytes with encoding auto-detection.
pub fn parse_report_bytes(bytes: &[u8]) -> ReportResult<ParsedReport> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let report = assemble(&content)?;

    Ok(ParsedReport { report, encoding })
}

/// Parse a report file with encoding auto-detection.
///
/// # Example
/// ```ignore
/// let parsed = parse_report_file("devices.txt")?;
/// println!("{} devices from {}", parsed.report.record_count, parsed.encoding);
/// ```
pub fn parse_report_file<P: AsRef<Path>>(path: P) -> ReportResult<ParsedReport> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_report_bytes(&bytes)
}

// =============================================================================
// Tests
// =============================================================================
