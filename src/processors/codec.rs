// pixmill/src/processors/codec.rs
use crate::core::{PixmillError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use oxipng::{optimize_from_memory, Options};
use std::io::Cursor;

/// Decode/encode capability keyed by detected format.
///
/// Injected into call sites as a trait so the pipeline can run against fakes;
/// implementations are stateless and read-only at call time.
pub trait Codec {
    /// Fails with [`PixmillError::Decode`] when the bytes are not a
    /// recognized image encoding.
    fn decode(&self, bytes: &[u8]) -> Result<(DynamicImage, ImageFormat)>;

    /// Encodes to an in-memory buffer. `quality` (1-100) is honored by JPEG
    /// only; `None` uses the encoder default. Fails with
    /// [`PixmillError::UnsupportedFormat`] for formats outside the
    /// recognized set.
    fn encode(
        &self,
        image: &DynamicImage,
        format: ImageFormat,
        quality: Option<u8>,
    ) -> Result<Vec<u8>>;
}

/// Production codec over the `image` crate. Recognizes JPEG, PNG and GIF.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec {
    optimize_png: bool,
}

impl ImageCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run PNG output through a lossless oxipng pass.
    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }
}

impl Codec for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<(DynamicImage, ImageFormat)> {
        let format = image::guess_format(bytes)
            .map_err(|e| PixmillError::Decode(format!("unrecognized image data: {}", e)))?;

        let image = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| PixmillError::Decode(format!("failed to decode image: {}", e)))?;

        log::debug!(
            "decoded {:?} image: {}x{}",
            format,
            image.width(),
            image.height()
        );

        Ok((image, format))
    }

    fn encode(
        &self,
        image: &DynamicImage,
        format: ImageFormat,
        quality: Option<u8>,
    ) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());

        match format {
            ImageFormat::Jpeg => {
                let encoder = match quality {
                    Some(q) => JpegEncoder::new_with_quality(&mut buffer, q.clamp(1, 100)),
                    None => JpegEncoder::new(&mut buffer),
                };
                image.write_with_encoder(encoder)?;
            }
            ImageFormat::Png => {
                image.write_to(&mut buffer, ImageFormat::Png)?;
                if self.optimize_png {
                    return optimize_from_memory(buffer.get_ref(), &Options::default()).map_err(
                        |e| PixmillError::Processing(format!("PNG optimization failed: {}", e)),
                    );
                }
            }
            ImageFormat::Gif => {
                image.write_to(&mut buffer, ImageFormat::Gif)?;
            }
            other => {
                return Err(PixmillError::UnsupportedFormat(format!("{:?}", other)));
            }
        }

        Ok(buffer.into_inner())
    }
}
