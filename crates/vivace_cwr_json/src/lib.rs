//! JSON rendering of parsed CWR transmissions.

use std::io::Write;

use vivace_cwr::{CwrError, CwrParseReport};

/// Serializes a parse report as pretty-printed JSON.
pub fn report_to_json(report: &CwrParseReport) -> Result<String, CwrError> {
    serde_json::to_string_pretty(report)
        .map_err(|e| CwrError::BadFormat(format!("JSON serialization failed: {}", e)))
}

/// Writes a parse report as JSON to any sink.
pub fn write_report_json<W: Write>(report: &CwrParseReport, mut writer: W) -> Result<(), CwrError> {
    let json = report_to_json(report)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vivace_cwr::test_utils::{grh, grt, hdr, line, trl};
    use vivace_cwr::{parse_cwr, LookupManager, ParseOptions};

    fn sample_report() -> CwrParseReport {
        let input = [
            hdr("02.10"),
            grh("NWR", 1, "02.10"),
            line("WRK", &[("transaction_sequence", "0"), ("record_sequence", "0"), ("work_title", "SONG")]),
            grt(1, 1, 3),
            trl(1, 1, 5),
        ]
        .join("\n");
        parse_cwr(&input, &LookupManager::new(), &ParseOptions::default())
    }

    #[test]
    fn test_report_serializes_with_expected_shape() {
        let json = report_to_json(&sample_report()).expect("serialization should succeed");
        let value: serde_json::Value = serde_json::from_str(&json).expect("output should be valid JSON");
        assert_eq!(value["is_valid"], serde_json::Value::Bool(true));
        assert!(value["groups"].as_array().is_some());
        assert!(value["diagnostics"].as_array().expect("diagnostics array").is_empty());
        assert_eq!(value["groups"][0]["transactions"][0]["header"]["record_type"], "WRK");
    }

    #[test]
    fn test_write_report_json_ends_with_newline() {
        let mut out = Vec::new();
        write_report_json(&sample_report(), &mut out).expect("write should succeed");
        assert_eq!(out.last(), Some(&b'\n'));
    }
}
