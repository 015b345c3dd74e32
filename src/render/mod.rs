//! Render an assembled report into its textual output format.
//!
//! The report is wrapped in a one-element [`DeviceManagement`] envelope and
//! serialized as pretty-printed JSON or XML. Rendering is a pure function of
//! `(report, format)`: switching the format re-renders the same report and
//! never re-invokes the parser.

pub mod xml;

use crate::error::RenderResult;
use crate::models::{DeviceManagement, DeviceReport, OutputFormat};

/// Render a report in the chosen output format.
///
/// # Example
/// ```
/// use devreport::{assemble, render, OutputFormat};
///
/// let report = assemble("H|SRV1\nT|0").unwrap();
/// let json = render(&report, OutputFormat::Json).unwrap();
/// assert!(json.contains("\"serverId\": \"SRV1\""));
/// ```
pub fn render(report: &DeviceReport, format: OutputFormat) -> RenderResult<String> {
    let envelope = DeviceManagement::single(report.clone());

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&envelope)?),
        OutputFormat::Xml => Ok(xml::to_string(&envelope)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeviceLine;

    fn sample_report() -> DeviceReport {
        DeviceReport::new(
            "SRV1".into(),
            vec![DeviceLine {
                imei1: "111".into(),
                imei2: "222".into(),
                serial_number: "SN1".into(),
                device_name: "DevA".into(),
            }],
        )
    }

    #[test]
    fn test_json_round_trip() {
        let report = sample_report();
        let json = render(&report, OutputFormat::Json).unwrap();

        let envelope: DeviceManagement = serde_json::from_str(&json).unwrap();
        assert_eq!(envelope.device_details, vec![report]);
    }

    #[test]
    fn test_json_is_pretty_printed() {
        let json = render(&sample_report(), OutputFormat::Json).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("  \"deviceDetails\""));
    }

    #[test]
    fn test_json_key_order() {
        let json = render(&sample_report(), OutputFormat::Json).unwrap();
        let server_id = json.find("\"serverId\"").unwrap();
        let device_lines = json.find("\"deviceLines\"").unwrap();
        let record_count = json.find("\"recordCount\"").unwrap();
        assert!(server_id < device_lines);
        assert!(device_lines < record_count);
    }

    #[test]
    fn test_render_is_idempotent() {
        let report = sample_report();
        assert_eq!(
            render(&report, OutputFormat::Json).unwrap(),
            render(&report, OutputFormat::Json).unwrap()
        );
        assert_eq!(
            render(&report, OutputFormat::Xml).unwrap(),
            render(&report, OutputFormat::Xml).unwrap()
        );
    }

    #[test]
    fn test_formats_render_same_report_independently() {
        // same report, both formats, no re-parsing involved
        let report = sample_report();
        let json = render(&report, OutputFormat::Json).unwrap();
        let xml = render(&report, OutputFormat::Xml).unwrap();
        assert!(json.contains("SRV1"));
        assert!(xml.contains("SRV1"));
        assert_ne!(json, xml);
    }
}
