//! TIFF input/output module
//!
//! Decoding of source images into raster buffers and encoding of normalized
//! buffers back to TIFF, each behind a trait so the file pipeline can be
//! driven by other collaborators.

mod reader;
mod writer;
mod standard_tiff_reader;
mod standard_tiff_writer;
pub mod types;

#[cfg(test)]
mod tests;

pub use reader::ImageReader;
pub use writer::ImageWriter;
pub use standard_tiff_reader::StandardTiffReader;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{ConversionConfig, ConversionConfigBuilder, TiffCompression, TiffOutput, DEFAULT_MAX_DIMENSION};
