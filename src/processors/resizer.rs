// pixmill/src/processors/resizer.rs
use crate::core::ResizeParams;
use image::{imageops::FilterType, DynamicImage};

/// Resize capability applied to every decoded image.
///
/// Deterministic: the same input image and params produce pixel-identical
/// output.
pub trait ResizeFilter {
    fn resize(&self, image: &DynamicImage, params: ResizeParams) -> DynamicImage;
}

/// Fixed Lanczos3 filter at exact target dimensions.
///
/// A zero width or height substitutes the source extent for that axis, so
/// `0x0` returns the image unchanged rather than a degenerate empty image.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanczosResizer;

impl LanczosResizer {
    pub fn new() -> Self {
        Self
    }

    fn target_extents(image: &DynamicImage, params: ResizeParams) -> (u32, u32) {
        let width = if params.width == 0 {
            image.width()
        } else {
            params.width
        };
        let height = if params.height == 0 {
            image.height()
        } else {
            params.height
        };
        (width, height)
    }
}

impl ResizeFilter for LanczosResizer {
    fn resize(&self, image: &DynamicImage, params: ResizeParams) -> DynamicImage {
        let (width, height) = Self::target_extents(image, params);

        if width == image.width() && height == image.height() {
            log::debug!("image dimensions unchanged, skipping resize");
            return image.clone();
        }

        log::debug!(
            "resizing image from {}x{} to {}x{}",
            image.width(),
            image.height(),
            width,
            height
        );

        image.resize_exact(width, height, FilterType::Lanczos3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_of(width: u32, height: u32) -> DynamicImage {
        DynamicImage::new_rgb8(width, height)
    }

    #[test]
    fn nonzero_params_yield_exact_extents() {
        let resizer = LanczosResizer::new();

        let resized = resizer.resize(&image_of(100, 100), ResizeParams::new(50, 50));
        assert_eq!((resized.width(), resized.height()), (50, 50));

        let resized = resizer.resize(&image_of(1000, 1000), ResizeParams::new(500, 800));
        assert_eq!((resized.width(), resized.height()), (500, 800));
    }

    #[test]
    fn zero_params_keep_the_image_as_is() {
        let resizer = LanczosResizer::new();
        let resized = resizer.resize(&image_of(1000, 1000), ResizeParams::new(0, 0));
        assert_eq!((resized.width(), resized.height()), (1000, 1000));
    }

    #[test]
    fn zero_axis_preserves_that_axis_only() {
        let resizer = LanczosResizer::new();

        let resized = resizer.resize(&image_of(640, 480), ResizeParams::new(0, 240));
        assert_eq!((resized.width(), resized.height()), (640, 240));

        let resized = resizer.resize(&image_of(640, 480), ResizeParams::new(320, 0));
        assert_eq!((resized.width(), resized.height()), (320, 480));
    }

    #[test]
    fn upscaling_is_supported() {
        let resizer = LanczosResizer::new();
        let resized = resizer.resize(&image_of(10, 10), ResizeParams::new(40, 30));
        assert_eq!((resized.width(), resized.height()), (40, 30));
    }
}
