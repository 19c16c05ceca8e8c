//! Options of the TIFF file pipeline

use tiff::encoder::Compression;
use tiff::encoder::compression::DeflateLevel;
use tiff::tags::Predictor;

use crate::image_pipeline::normalize::NormConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    #[default]
    None,
    Lzw,
    DeflateFast,
    DeflateBalanced,
    DeflateBest,
}

impl TiffCompression {
    pub(crate) fn codec(self) -> Compression {
        match self {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        }
    }
}

/// How a normalized page is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TiffOutput {
    pub compression: TiffCompression,
    /// Horizontal differencing before compression; ignored when uncompressed
    pub horizontal_predictor: bool,
}

impl TiffOutput {
    pub(crate) fn predictor(&self) -> Predictor {
        if self.horizontal_predictor && self.compression != TiffCompression::None {
            Predictor::Horizontal
        } else {
            Predictor::None
        }
    }
}

/// Everything a file-to-file normalization run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionConfig {
    pub normalization: NormConfig,
    pub output: TiffOutput,
    /// Pages wider or taller than this are refused before normalizing; `None` accepts any size
    pub max_dimension: Option<usize>,
}

pub const DEFAULT_MAX_DIMENSION: usize = 50_000;

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            normalization: NormConfig::default(),
            output: TiffOutput::default(),
            max_dimension: Some(DEFAULT_MAX_DIMENSION),
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: ConversionConfig::default(),
        }
    }
}

/// Builder for ConversionConfig, starting from the defaults
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn normalization(mut self, normalization: NormConfig) -> Self {
        self.config.normalization = normalization;
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.config.output.compression = compression;
        self
    }

    pub fn horizontal_predictor(mut self, enabled: bool) -> Self {
        self.config.output.horizontal_predictor = enabled;
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.config.max_dimension = max;
        self
    }

    pub fn build(self) -> ConversionConfig {
        self.config
    }
}
