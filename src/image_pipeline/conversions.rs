//! Pipeline conversions module
//!
//! Orchestration of decode, normalize and encode over in-memory buffers or files.

mod tiff_normalize;


pub use tiff_normalize::NormalizePipeline;
