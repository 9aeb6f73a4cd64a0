// pixmill/src/processors/report.rs
use crate::core::{Result, RunReport};
use std::path::{Path, PathBuf};

pub const SUCCESSES_FILE: &str = "successes.json";
pub const FAILURES_FILE: &str = "failures.json";

/// Serializes the run's outcome sequences to two JSON documents.
///
/// One write per document; a serialization or write failure here is fatal to
/// the run and propagates to the operator instead of being folded back into
/// the report data.
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the paths of the written success and failure documents.
    pub fn write(&self, report: &RunReport) -> Result<(PathBuf, PathBuf)> {
        let successes_path = self.dir.join(SUCCESSES_FILE);
        let failures_path = self.dir.join(FAILURES_FILE);

        self.write_document(&successes_path, serde_json::to_vec_pretty(&report.successes)?)?;
        self.write_document(&failures_path, serde_json::to_vec_pretty(&report.failures)?)?;

        Ok((successes_path, failures_path))
    }

    fn write_document(&self, path: &Path, data: Vec<u8>) -> Result<()> {
        std::fs::write(path, data)?;
        log::debug!("wrote report: {}", path.display());
        Ok(())
    }
}
