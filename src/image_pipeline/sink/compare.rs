use tracing::debug;

use crate::image_pipeline::common::error::{NormError, Result};
use crate::image_pipeline::raster::{Depth, Pix};
use crate::image_pipeline::sink::PixelSink;

/// Largest per-sample difference, in normalized [0, 1] units, still counted as a match.
pub const DEFAULT_SINK_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct SinkComparison {
    pub samples: usize,
    /// Samples whose normalized difference exceeds the tolerance
    pub mismatched: usize,
    pub max_difference: f64,
    /// Every sample is bit-for-bit equal
    pub identical: bool,
}

impl SinkComparison {
    pub fn within_tolerance(&self) -> bool {
        self.mismatched == 0
    }
}

pub fn upload_image(sink: &mut dyn PixelSink, image: &Pix) -> Result<()> {
    sink.upload(&image.to_bytes())
}

/// Compares the sink's bytes against `image`, sample by sample.
///
/// Samples are scaled to [0, 1] by the largest value of the image depth
/// (bits for 1 bpp, 255 for gray and RGBA channels, 65535 for map words).
pub fn compare_with_sink(image: &Pix, sink: &dyn PixelSink, tolerance: f64) -> Result<SinkComparison> {
    if !(0.0..=1.0).contains(&tolerance) {
        return Err(NormError::InvalidParameter(format!(
            "sink tolerance {tolerance} not in [0, 1]"
        )));
    }

    let expected_bytes = image.to_bytes();
    let actual_bytes = sink.read()?;
    if expected_bytes.len() != actual_bytes.len() {
        return Err(NormError::SampleCount {
            expected: expected_bytes.len(),
            actual: actual_bytes.len(),
        });
    }

    let expected = normalized_samples(image, &expected_bytes);
    let actual = normalized_samples(image, &actual_bytes);

    let mut mismatched = 0;
    let mut max_difference = 0.0f64;
    for (e, a) in expected.iter().zip(&actual) {
        let diff = (e - a).abs();
        max_difference = max_difference.max(diff);
        if diff > tolerance {
            mismatched += 1;
        }
    }

    let comparison = SinkComparison {
        samples: expected.len(),
        mismatched,
        max_difference,
        identical: expected_bytes == actual_bytes,
    };
    debug!(
        samples = comparison.samples,
        mismatched = comparison.mismatched,
        max_difference = comparison.max_difference,
        "Compared image against sink"
    );
    Ok(comparison)
}

fn normalized_samples(image: &Pix, bytes: &[u8]) -> Vec<f64> {
    match image.depth() {
        Depth::Binary => {
            let pixels = image.width() * image.height();
            (0..pixels)
                .map(|i| f64::from((bytes[i / 8] >> (7 - i % 8)) & 1))
                .collect()
        }
        Depth::Gray | Depth::Rgb => bytes.iter().map(|&b| f64::from(b) / 255.0).collect(),
        Depth::Map => bytes
            .chunks_exact(2)
            .map(|w| f64::from(u16::from_le_bytes([w[0], w[1]])) / 65535.0)
            .collect(),
    }
}
