// pixmill/src/core/mod.rs
mod transform;

pub use transform::{FileTransform, BUDGET_JPEG_QUALITY};

use serde::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Target dimensions shared read-only across every transform in a run.
///
/// A zero width or height means "preserve that axis's original extent",
/// never a zero-size output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeParams {
    pub width: u32,
    pub height: u32,
}

impl ResizeParams {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Run-scoped size ceiling driving the recompression decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBudget {
    pub ceiling_kb: u64,
}

impl SizeBudget {
    pub fn new(ceiling_kb: u64) -> Self {
        Self { ceiling_kb }
    }

    /// Compress only when the pre-resize source size exceeds the ceiling.
    /// Pure function of the two integers; a source exactly at the ceiling
    /// passes through untouched.
    pub fn should_compress(&self, pre_resize_kb: u64) -> bool {
        pre_resize_kb > self.ceiling_kb
    }
}

/// Record of one file's transform attempt.
///
/// Exactly one of success (`error` absent, `output_path` set) or failure
/// (`error` set, `file_size_kb` absent) holds; the constructors are the only
/// way to build one and values are never mutated afterwards.
///
/// Serializes to the persisted report shape: `file_path` plus either
/// `file_size_kb` or `error`, empty fields omitted.
#[derive(Debug, Clone, Serialize)]
pub struct TransformOutcome {
    pub file_path: String,
    #[serde(skip)]
    pub output_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size_kb: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransformOutcome {
    /// `file_size_kb` is only carried on budget runs; `None` otherwise.
    pub fn success(source: &Path, output: PathBuf, file_size_kb: Option<u64>) -> Self {
        Self {
            file_path: source.display().to_string(),
            output_path: Some(output),
            file_size_kb,
            error: None,
        }
    }

    pub fn failure(source: &Path, error: impl Display) -> Self {
        Self {
            file_path: source.display().to_string(),
            output_path: None,
            file_size_kb: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Ordered outcome sequences accumulated over one directory run.
///
/// Insertion order within each sequence equals traversal order, including
/// pre-decode failures such as unreadable files and walk errors.
#[derive(Debug, Default)]
pub struct RunReport {
    pub successes: Vec<TransformOutcome>,
    pub failures: Vec<TransformOutcome>,
}

impl RunReport {
    pub fn record(&mut self, outcome: TransformOutcome) {
        if outcome.is_success() {
            self.successes.push(outcome);
        } else {
            self.failures.push(outcome);
        }
    }

    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }
}

#[derive(Error, Debug)]
pub enum PixmillError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("report serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, PixmillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_decision_is_strictly_greater_than() {
        let budget = SizeBudget::new(700);
        assert!(!budget.should_compress(699));
        assert!(!budget.should_compress(700));
        assert!(budget.should_compress(701));
    }

    #[test]
    fn outcome_constructors_hold_the_success_xor_failure_invariant() {
        let ok = TransformOutcome::success(Path::new("a.jpg"), PathBuf::from("out/a.jpg"), Some(12));
        assert!(ok.is_success());
        assert!(ok.error.is_none());
        assert_eq!(ok.output_path.as_deref(), Some(Path::new("out/a.jpg")));

        let failed = TransformOutcome::failure(Path::new("b.txt"), "not an image");
        assert!(!failed.is_success());
        assert!(failed.file_size_kb.is_none());
        assert_eq!(failed.error.as_deref(), Some("not an image"));
    }

    #[test]
    fn report_routes_outcomes_by_error_presence() {
        let mut report = RunReport::default();
        report.record(TransformOutcome::success(
            Path::new("a.jpg"),
            PathBuf::from("a.jpg"),
            None,
        ));
        report.record(TransformOutcome::failure(Path::new("b.txt"), "bad bytes"));
        assert_eq!(report.successes.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.total(), 2);
    }

    #[test]
    fn success_record_serializes_without_error_field() {
        let ok = TransformOutcome::success(Path::new("a.jpg"), PathBuf::from("a.jpg"), Some(42));
        let json = serde_json::to_string(&ok).unwrap();
        assert_eq!(json, r#"{"file_path":"a.jpg","file_size_kb":42}"#);

        let failed = TransformOutcome::failure(Path::new("b.txt"), "bad bytes");
        let json = serde_json::to_string(&failed).unwrap();
        assert_eq!(json, r#"{"file_path":"b.txt","error":"bad bytes"}"#);
    }
}
