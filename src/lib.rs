pub mod cli;
pub mod core;
pub mod processors;
pub mod server;
pub mod utils;

pub use crate::core::{
    FileTransform, PixmillError, ResizeParams, Result, RunReport, SizeBudget, TransformOutcome,
};
pub use crate::processors::{
    Codec, DirectoryWalker, ImageCodec, LanczosResizer, ReportWriter, ResizeFilter,
};
pub use crate::utils::{format_file_size, size_kb};

pub mod prelude {
    pub use crate::{
        Codec, DirectoryWalker, FileTransform, ImageCodec, LanczosResizer, ReportWriter,
        ResizeFilter, ResizeParams, RunReport, SizeBudget, TransformOutcome,
    };
}

// Re-export commonly used types
pub use image::DynamicImage;
