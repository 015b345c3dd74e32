//! XML pretty-printer for the report envelope.
//!
//! Emits element-per-field XML with 4-space indentation. Element names match
//! the JSON key spelling, with one `<deviceReport>` child per report and one
//! `<deviceLine>` child per device.

use crate::models::{DeviceLine, DeviceManagement, DeviceReport};

/// One indentation level.
const INDENT: &str = "    ";

/// Serialize the envelope as pretty-printed XML.
pub fn to_string(envelope: &DeviceManagement) -> String {
    let mut out = String::new();

    out.push_str("<deviceManagement>\n");
    for report in &envelope.device_details {
        write_report(&mut out, report, 1);
    }
    out.push_str("</deviceManagement>");

    out
}

fn write_report(out: &mut String, report: &DeviceReport, depth: usize) {
    push_line(out, depth, "<deviceReport>");
    write_field(out, depth + 1, "serverId", &report.server_id);
    for line in &report.device_lines {
        write_device_line(out, line, depth + 1);
    }
    write_field(out, depth + 1, "recordCount", &report.record_count.to_string());
    push_line(out, depth, "</deviceReport>");
}

fn write_device_line(out: &mut String, line: &DeviceLine, depth: usize) {
    push_line(out, depth, "<deviceLine>");
    write_field(out, depth + 1, "imei1", &line.imei1);
    write_field(out, depth + 1, "imei2", &line.imei2);
    write_field(out, depth + 1, "serialNumber", &line.serial_number);
    write_field(out, depth + 1, "deviceName", &line.device_name);
    push_line(out, depth, "</deviceLine>");
}

fn write_field(out: &mut String, depth: usize, name: &str, value: &str) {
    push_line(
        out,
        depth,
        &format!("<{name}>{}</{name}>", escape_text(value)),
    );
}

fn push_line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}

/// Escape the five XML-significant characters in text content.
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeviceReport;

    #[test]
    fn test_xml_shape() {
        let report = DeviceReport::new(
            "SRV1".into(),
            vec![DeviceLine {
                imei1: "111".into(),
                imei2: "222".into(),
                serial_number: "SN1".into(),
                device_name: "DevA".into(),
            }],
        );
        let xml = to_string(&DeviceManagement::single(report));

        let expected = "\
<deviceManagement>
    <deviceReport>
        <serverId>SRV1</serverId>
        <deviceLine>
            <imei1>111</imei1>
            <imei2>222</imei2>
            <serialNumber>SN1</serialNumber>
            <deviceName>DevA</deviceName>
        </deviceLine>
        <recordCount>1</recordCount>
    </deviceReport>
</deviceManagement>";
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_xml_empty_report() {
        let report = DeviceReport::new("SRV1".into(), Vec::new());
        let xml = to_string(&DeviceManagement::single(report));

        assert!(xml.contains("<serverId>SRV1</serverId>"));
        assert!(xml.contains("<recordCount>0</recordCount>"));
        assert!(!xml.contains("<deviceLine>"));
    }

    #[test]
    fn test_xml_escapes_text() {
        let report = DeviceReport::new(
            "A&B".into(),
            vec![DeviceLine {
                imei1: "1<2".into(),
                imei2: "3>4".into(),
                serial_number: "\"SN\"".into(),
                device_name: "Dev's".into(),
            }],
        );
        let xml = to_string(&DeviceManagement::single(report));

        assert!(xml.contains("<serverId>A&amp;B</serverId>"));
        assert!(xml.contains("<imei1>1&lt;2</imei1>"));
        assert!(xml.contains("<imei2>3&gt;4</imei2>"));
        assert!(xml.contains("<serialNumber>&quot;SN&quot;</serialNumber>"));
        assert!(xml.contains("<deviceName>Dev&apos;s</deviceName>"));
    }
}
