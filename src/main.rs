use bgnorm_rs::image_pipeline::{ConversionConfig, NormalizePipeline};
use bgnorm_rs::logger;

use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    logger::init();

    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "input.tif".to_string());
    let output = args.next().unwrap_or_else(|| "output.tif".to_string());

    info!("Starting bgnorm...");

    let pipeline = NormalizePipeline::new(ConversionConfig::default());
    let norm = &pipeline.config().normalization;

    info!("Background normalization pipeline initialized");
    info!("Compression: {:?}", pipeline.config().output.compression);
    info!(
        "Tiles: {}x{}, threshold: {}, min count: {}, target background: {}",
        norm.tile_width, norm.tile_height, norm.threshold, norm.min_count, norm.bg_value
    );

    match pipeline.convert_file_with_timings(&input, &output) {
        Ok(timings) => {
            info!("Normalization successful!");
            println!("{}", timings.summary());
            Ok(())
        }
        Err(e) => {
            error!("Normalization failed: {}", e);
            Err(anyhow::Error::new(e).context(format!("normalizing {input} into {output}")))
        }
    }
}
