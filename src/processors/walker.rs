// pixmill/src/processors/walker.rs
use crate::core::{FileTransform, RunReport, TransformOutcome};
use crate::processors::{Codec, ResizeFilter};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use walkdir::WalkDir;

/// Drives the file transform over a directory tree and aggregates outcomes.
///
/// Traversal is depth-first with lexical order inside each directory, one
/// file at a time; outcome order within each report sequence equals
/// traversal order. Nothing aborts the walk: traversal errors and per-file
/// failures are recorded and the run moves on.
pub struct DirectoryWalker<C, R> {
    transform: FileTransform<C, R>,
}

impl<C: Codec, R: ResizeFilter> DirectoryWalker<C, R> {
    pub fn new(transform: FileTransform<C, R>) -> Self {
        Self { transform }
    }

    pub fn run(&self, root: &Path) -> RunReport {
        let mut report = RunReport::default();
        let pb = self.create_progress_bar();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // Permission denied, dangling links, missing root: one
                    // failed outcome each, never fatal to the run.
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.to_path_buf());
                    log::warn!("traversal error at {}: {}", path.display(), e);
                    report.record(TransformOutcome::failure(&path, e));
                    pb.inc(1);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let outcome = self.transform.apply(entry.path());
            match &outcome.error {
                None => log::info!("processed image successfully: {}", entry.path().display()),
                Some(err) => {
                    log::warn!("failed to process image {}: {}", entry.path().display(), err)
                }
            }
            report.record(outcome);

            pb.inc(1);
            pb.set_message(format!(
                "{} ok, {} failed",
                report.successes.len(),
                report.failures.len()
            ));
        }

        pb.finish_with_message(format!(
            "{} ok, {} failed",
            report.successes.len(),
            report.failures.len()
        ));

        report
    }

    fn create_progress_bar(&self) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {pos} files ({msg})")
                .unwrap(),
        );
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ResizeParams;
    use crate::processors::{ImageCodec, LanczosResizer};

    fn walker() -> DirectoryWalker<ImageCodec, LanczosResizer> {
        DirectoryWalker::new(FileTransform::new(
            ImageCodec::new(),
            LanczosResizer::new(),
            ResizeParams::new(4, 4),
        ))
    }

    #[test]
    fn missing_root_is_one_failed_outcome_not_a_crash() {
        let report = walker().run(Path::new("no/such/root"));
        assert!(report.successes.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].error.is_some());
    }

    #[test]
    fn empty_root_yields_an_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = walker().run(dir.path());
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn outcome_order_matches_lexical_traversal_order() {
        let dir = tempfile::tempdir().unwrap();
        let img = image::DynamicImage::new_rgb8(2, 2);
        img.save(dir.path().join("b.png")).unwrap();
        img.save(dir.path().join("a.png")).unwrap();
        std::fs::create_dir(dir.path().join("z")).unwrap();
        img.save(dir.path().join("z/c.png")).unwrap();

        let report = walker().run(dir.path());
        let order: Vec<_> = report
            .successes
            .iter()
            .map(|o| o.file_path.clone())
            .collect();
        assert_eq!(report.failures.len(), 0);
        assert!(order[0].ends_with("a.png"));
        assert!(order[1].ends_with("b.png"));
        assert!(order[2].ends_with("c.png"));
    }
}
