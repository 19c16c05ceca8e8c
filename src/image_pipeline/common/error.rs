use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormError {
    #[error("{stage}: unsupported bit depth {actual} (expected {expected})")]
    InvalidDepth {
        stage: &'static str,
        expected: &'static str,
        actual: u32,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Sample buffer holds {actual} values, expected {expected}")]
    SampleCount { expected: usize, actual: usize },

    #[error("No tile column has enough background samples to seed the map")]
    InsufficientData,

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode TIFF image: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NormError>;
