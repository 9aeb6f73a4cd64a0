// pixmill/src/core/transform.rs
use super::{PixmillError, ResizeParams, Result, SizeBudget, TransformOutcome};
use crate::processors::{Codec, ResizeFilter};
use crate::utils::{format_file_size, size_kb};
use image::ImageFormat;
use std::path::{Path, PathBuf};

/// Quality used whenever budget compression triggers. Reduced relative to
/// the JPEG encoder default; not configurable per call.
pub const BUDGET_JPEG_QUALITY: u8 = 50;

/// Single-file pipeline: read, decode, resize, encode, write.
///
/// Owns nothing but the run configuration; the codec and resize filter are
/// injected so the pipeline can be driven with fakes in tests.
pub struct FileTransform<C, R> {
    codec: C,
    resizer: R,
    params: ResizeParams,
    budget: Option<SizeBudget>,
    output_dir: Option<PathBuf>,
}

impl<C: Codec, R: ResizeFilter> FileTransform<C, R> {
    pub fn new(codec: C, resizer: R, params: ResizeParams) -> Self {
        Self {
            codec,
            resizer,
            params,
            budget: None,
            output_dir: None,
        }
    }

    pub fn with_budget(mut self, budget: Option<SizeBudget>) -> Self {
        self.budget = budget;
        self
    }

    /// Target directory for results. `None` overwrites each source in place.
    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// Runs the pipeline for one path, converting every error into a failed
    /// outcome. Never panics, never drops a result.
    pub fn apply(&self, path: &Path) -> TransformOutcome {
        match self.run(path) {
            Ok(outcome) => outcome,
            Err(e) => TransformOutcome::failure(path, e),
        }
    }

    fn run(&self, path: &Path) -> Result<TransformOutcome> {
        let bytes = std::fs::read(path)?;
        let pre_resize_kb = size_kb(bytes.len() as u64);

        let (image, format) = self.codec.decode(&bytes)?;
        let resized = self.resizer.resize(&image, self.params);

        // On a budget run, sources over the ceiling are re-encoded as
        // reduced-quality JPEG regardless of their original format and report
        // the recompressed size; sources at or under the ceiling keep their
        // decoded format and report the pre-resize size.
        let (encoded, reported_kb) = match self.budget {
            Some(budget) if budget.should_compress(pre_resize_kb) => {
                log::debug!(
                    "{}: {} KB over {} KB ceiling, recompressing",
                    path.display(),
                    pre_resize_kb,
                    budget.ceiling_kb
                );
                let encoded = self
                    .codec
                    .encode(&resized, ImageFormat::Jpeg, Some(BUDGET_JPEG_QUALITY))?;
                let kb = size_kb(encoded.len() as u64);
                (encoded, Some(kb))
            }
            Some(_) => {
                let encoded = self.codec.encode(&resized, format, None)?;
                (encoded, Some(pre_resize_kb))
            }
            None => (self.codec.encode(&resized, format, None)?, None),
        };

        // Encode fully in memory before the single write, so an encode
        // failure never truncates an in-place target.
        let target = self.target_path(path)?;
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, &encoded)?;

        log::debug!(
            "wrote {} ({})",
            target.display(),
            format_file_size(encoded.len() as u64)
        );

        Ok(TransformOutcome::success(path, target, reported_kb))
    }

    fn target_path(&self, source: &Path) -> Result<PathBuf> {
        match &self.output_dir {
            Some(dir) => {
                let name = source.file_name().ok_or_else(|| {
                    PixmillError::InvalidParameter(format!(
                        "invalid file name: {}",
                        source.display()
                    ))
                })?;
                Ok(dir.join(name))
            }
            None => Ok(source.to_path_buf()),
        }
    }
}
