//! Image processing pipeline module
//!
//! Adaptive background normalization of scanned document images: raster
//! buffers, binary morphology, tile-based background estimation, the
//! normalization orchestrator, TIFF input/output and file conversion.

pub mod common;
pub mod raster;
pub mod morphology;
pub mod background;
pub mod normalize;
pub mod tiff_io;
pub mod conversions;
pub mod sink;

pub use common::{
    NormError,
    Result,
};

pub use raster::{
    Depth,
    Pix,
};

pub use background::{
    FillPolicy,
    SmoothingMode,
};

pub use normalize::{
    background_norm,
    background_norm_simple,
    BackgroundNormalizer,
    NormConfig,
    NormConfigBuilder,
    PipelineTimings,
};

pub use tiff_io::{
    TiffCompression,
    TiffOutput,
    ConversionConfig,
    ConversionConfigBuilder,
    ImageReader,
    ImageWriter,
    StandardTiffReader,
    StandardTiffWriter,
};

pub use conversions::{
    NormalizePipeline,
};

pub use sink::{
    compare_with_sink,
    MemorySink,
    PixelSink,
};
