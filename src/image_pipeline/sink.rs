//! Display sink module
//!
//! A one-way interface to an external consumer of raster bytes (a display or
//! GPU texture), plus a tolerance-based comparison of what the consumer holds
//! against a buffer produced by the pipeline.

mod compare;


pub use compare::{compare_with_sink, upload_image, SinkComparison, DEFAULT_SINK_TOLERANCE};

use crate::image_pipeline::common::error::Result;

/// Consumer of row-major raster bytes in the layout of [`Pix::to_bytes`].
///
/// [`Pix::to_bytes`]: crate::image_pipeline::raster::Pix::to_bytes
pub trait PixelSink {
    fn upload(&mut self, bytes: &[u8]) -> Result<()>;
    fn read(&self) -> Result<Vec<u8>>;
}

/// Sink that keeps the last upload in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    data: Vec<u8>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PixelSink for MemorySink {
    fn upload(&mut self, bytes: &[u8]) -> Result<()> {
        self.data.clear();
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    fn read(&self) -> Result<Vec<u8>> {
        Ok(self.data.clone())
    }
}
