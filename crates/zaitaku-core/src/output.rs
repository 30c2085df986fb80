use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::models::{JobRecord, RunOutput};

/// Write the retained records as a pretty-printed JSON document.
///
/// Non-ASCII text is written as-is. Returns the path that was written.
pub fn write_output(path: &Path, jobs: Vec<JobRecord>) -> Result<PathBuf, AppError> {
    let output = RunOutput::new(jobs);

    // Encode fully before touching the file so I/O failures map to SerializeError.
    let mut bytes = serde_json::to_vec_pretty(&output)?;
    bytes.push(b'\n');
    std::fs::write(path, &bytes).map_err(|source| AppError::SerializeError {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        total_jobs = output.metadata.total_jobs,
        "Saved output"
    );
    Ok(path.to_path_buf())
}

/// Read an output document back.
pub fn read_output(path: &Path) -> Result<RunOutput, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|source| AppError::SerializeError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::sample_jobs;
    use crate::models::Source;
    use crate::testutil::make_test_record;

    #[test]
    fn round_trip_preserves_jobs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");
        let mut jobs = vec![make_test_record("在宅 Rust エンジニア", true, true)];
        jobs.extend(sample_jobs());

        let written = write_output(&path, jobs.clone()).unwrap();
        assert_eq!(written, path);

        let back = read_output(&path).unwrap();
        assert_eq!(back.jobs, jobs);
        assert_eq!(back.metadata.total_jobs, back.jobs.len());
        assert_eq!(back.metadata.scraper_version, "1.0.0");
        assert_eq!(
            back.metadata.source_sites,
            vec![Source::Reworker, Source::SampleData]
        );
    }

    #[test]
    fn non_ascii_is_not_escaped_and_output_is_indented() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");
        write_output(&path, sample_jobs()).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("フルリモート Webエンジニア募集"));
        assert!(!raw.contains("\\u"));
        assert!(raw.contains("\n  \"metadata\": {"));
        assert!(raw.contains("\"jobs\": ["));
    }

    #[test]
    fn empty_job_list_still_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        write_output(&path, vec![]).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["metadata"]["total_jobs"], 0);
        assert_eq!(value["jobs"], serde_json::json!([]));
    }

    #[test]
    fn unwritable_path_is_serialize_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("jobs.json");
        let err = write_output(&path, sample_jobs()).unwrap_err();
        assert!(matches!(err, AppError::SerializeError { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn full_device_on_large_document_is_serialize_error() {
        let path = Path::new("/dev/full");
        let jobs: Vec<JobRecord> = (0..30)
            .map(|i| JobRecord {
                description: "在".repeat(200),
                ..make_test_record(&format!("在宅 job {i}"), true, true)
            })
            .collect();

        let err = write_output(path, jobs).unwrap_err();
        match err {
            AppError::SerializeError { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected SerializeError, got {other:?}"),
        }
    }
}
