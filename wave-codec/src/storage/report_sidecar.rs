use std::fs;
use std::path::{Path, PathBuf};

use crate::models::error::WaveError;
use crate::models::report::HeaderReport;

/// Path of the JSON sidecar for a recording: `{recording}.header.json`.
pub fn sidecar_path(recording_path: &Path) -> PathBuf {
    recording_path.with_extension("header.json")
}

/// Pretty-printed JSON form of a header report.
pub fn to_json(report: &HeaderReport) -> Result<String, WaveError> {
    serde_json::to_string_pretty(report).map_err(|e| WaveError::ReportFailed(format!("failed to serialize report: {}", e)))
}

/// Write a header report as a JSON sidecar file next to the recording.
pub fn write_report(report: &HeaderReport, recording_path: &Path) -> Result<PathBuf, WaveError> {
    let report_path = sidecar_path(recording_path);
    let json = to_json(report)?;
    fs::write(&report_path, json).map_err(|e| WaveError::ReportFailed(format!("failed to write report: {}", e)))?;
    Ok(report_path)
}

/// Read a header report back from its JSON sidecar file.
pub fn read_report(recording_path: &Path) -> Result<HeaderReport, WaveError> {
    let report_path = sidecar_path(recording_path);
    let json = fs::read_to_string(&report_path)
        .map_err(|e| WaveError::ReportFailed(format!("failed to read report: {}", e)))?;
    let report: HeaderReport =
        serde_json::from_str(&json).map_err(|e| WaveError::ReportFailed(format!("failed to parse report: {}", e)))?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::WaveConfig;
    use crate::models::header::WaveHeader;
    use crate::processing::header_writer;

    #[test]
    fn sidecar_sits_next_to_recording() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/take1.wav")),
            PathBuf::from("/tmp/take1.header.json")
        );
    }

    #[test]
    fn report_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let recording = dir.path().join("tone.wav");

        let mut header = WaveHeader::default();
        header_writer::flush::<i16>(&mut header, &WaveConfig::new(44100, 2, 2), 441).unwrap();
        let report = HeaderReport::from_header(&header);

        let written = write_report(&report, &recording).unwrap();
        assert!(written.exists());
        assert_eq!(read_report(&recording).unwrap(), report);
    }

    #[test]
    fn missing_sidecar_is_report_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_report(&dir.path().join("absent.wav")).unwrap_err();
        assert!(matches!(err, WaveError::ReportFailed(_)));
    }
}
