use std::io::Write;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::image_pipeline::{
    common::error::{NormError, Result},
    normalize::{BackgroundNormalizer, PipelineTimings, Timer},
    raster::Pix,
    tiff_io::{ConversionConfig, ImageReader, ImageWriter, StandardTiffReader, StandardTiffWriter},
};

/// Decodes an image, normalizes its background and encodes the result.
pub struct NormalizePipeline<R: ImageReader, W: ImageWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl NormalizePipeline<StandardTiffReader, StandardTiffWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: StandardTiffReader,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<R: ImageReader, W: ImageWriter> NormalizePipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(NormError::InvalidDimensions(width, height));
        }

        match self.config.max_dimension {
            Some(max) if width > max || height > max => {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                Err(NormError::InvalidDimensions(width, height))
            }
            _ => Ok(()),
        }
    }

    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        self.convert_with_timings(input_data, output).map(|_| ())
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert_with_timings(&self, input_data: &[u8], output: &mut dyn Write) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        info!("Starting background normalization");

        let image = timings.time("decode_tiff", || self.reader.read_image(input_data))?;
        timings.time("validate_dimensions", || {
            self.validate_dimensions(image.width(), image.height())
        })?;

        let normalized = self.normalize(&image, &mut timings)?;

        timings.time("encode_tiff", || self.writer.write_image(&normalized, output, &self.config.output))?;

        info!(
            "Normalization complete: {}x{} in {:.3}ms",
            image.width(),
            image.height(),
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok(timings)
    }

    fn normalize(&self, image: &Pix, timings: &mut PipelineTimings) -> Result<Pix> {
        let normalizer = BackgroundNormalizer::new(self.config.normalization.clone());
        let (normalized, stage_timings) = normalizer.normalize_with_timings(image)?;
        timings.extend(stage_timings);
        Ok(normalized)
    }

    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, input_path: P, output_path: Q) -> Result<()> {
        self.convert_file_with_timings(input_path, output_path).map(|_| ())
    }

    pub fn convert_file_with_timings<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            "Converting file: {} -> {}",
            input_path.display(),
            output_path.display()
        );

        let timer = Timer::start("read_input_file");
        let input_data = std::fs::read(input_path)
            .map_err(|e| NormError::InputReadError(format!("{}: {}", input_path.display(), e)))?;
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        // A failed run leaves no output file.
        let mut encoded: Vec<u8> = Vec::new();
        let conversion_timings = self.convert_with_timings(&input_data, &mut encoded)?;
        timings.extend(conversion_timings);

        let timer = Timer::start("write_output_file");
        std::fs::write(output_path, &encoded)
            .map_err(|e| NormError::OutputWriteError(format!("{}: {}", output_path.display(), e)))?;
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        Ok(timings)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
