// pixmill/src/processors/mod.rs
mod codec;
mod report;
mod resizer;
mod walker;

pub use codec::{Codec, ImageCodec};
pub use report::{ReportWriter, FAILURES_FILE, SUCCESSES_FILE};
pub use resizer::{LanczosResizer, ResizeFilter};
pub use walker::DirectoryWalker;
