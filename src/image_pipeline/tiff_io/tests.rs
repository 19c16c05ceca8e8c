use std::io::Cursor;

use tiff::encoder::{colortype, Rational, TiffEncoder};
use tiff::tags::ResolutionUnit;

use crate::image_pipeline::common::error::NormError;
use crate::image_pipeline::normalize::NormConfig;
use crate::image_pipeline::raster::{Depth, Pix};
use crate::image_pipeline::tiff_io::{
    ConversionConfig, ImageReader, ImageWriter, StandardTiffReader, StandardTiffWriter, TiffCompression,
    TiffOutput, DEFAULT_MAX_DIMENSION,
};

fn gradient_gray(width: usize, height: usize) -> Pix {
    let samples: Vec<u8> = (0..width * height).map(|i| (i % 251) as u8).collect();
    Pix::from_gray_samples(width, height, &samples).unwrap()
}

fn encode(image: &Pix, options: &TiffOutput) -> Vec<u8> {
    let mut output: Vec<u8> = Vec::new();
    StandardTiffWriter.write_image(image, &mut output, options).unwrap();
    output
}

#[test]
fn test_config_builder() {
    let norm = NormConfig::builder().bg_value(180).build();
    let config = ConversionConfig::builder()
        .compression(TiffCompression::DeflateFast)
        .horizontal_predictor(true)
        .max_dimension(None)
        .normalization(norm.clone())
        .build();

    assert_eq!(config.output.compression, TiffCompression::DeflateFast);
    assert!(config.output.horizontal_predictor);
    assert_eq!(config.max_dimension, None);
    assert_eq!(config.normalization, norm);
}

#[test]
fn test_default_config() {
    let config = ConversionConfig::default();
    assert_eq!(config.output, TiffOutput::default());
    assert_eq!(config.output.compression, TiffCompression::None);
    assert!(!config.output.horizontal_predictor);
    assert_eq!(config.max_dimension, Some(DEFAULT_MAX_DIMENSION));
    assert_eq!(config.normalization, NormConfig::default());
    assert_eq!(ConversionConfig::builder().build(), config);
}

#[test]
fn test_gray_roundtrip_keeps_resolution() {
    let mut image = gradient_gray(37, 21);
    image.set_resolution(300, 300);

    let decoded = StandardTiffReader
        .read_image(&encode(&image, &TiffOutput::default()))
        .unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn test_rgb_written_without_alpha() {
    let samples: Vec<u8> = (0..12 * 5 * 3).map(|i| (i * 7 % 256) as u8).collect();
    let image = Pix::from_rgb_samples(12, 5, &samples).unwrap();

    let decoded = StandardTiffReader
        .read_image(&encode(&image, &TiffOutput::default()))
        .unwrap();
    assert_eq!(decoded.depth(), Depth::Rgb);
    assert_eq!(decoded.get_rgb(4, 2), image.get_rgb(4, 2));
    assert_eq!(decoded.get_alpha(4, 2), 255);
    assert_eq!(decoded.resolution(), (0, 0));
}

#[test]
fn test_compressed_output_decodes() {
    let image = gradient_gray(64, 48);
    for compression in [
        TiffCompression::Lzw,
        TiffCompression::DeflateFast,
        TiffCompression::DeflateBalanced,
        TiffCompression::DeflateBest,
    ] {
        let options = TiffOutput {
            compression,
            horizontal_predictor: true,
        };
        let decoded = StandardTiffReader.read_image(&encode(&image, &options)).unwrap();
        assert_eq!(decoded, image, "{compression:?}");
    }
}

#[test]
fn test_sixteen_bit_gray_keeps_high_byte() {
    let mut buffer: Vec<u8> = Vec::new();
    TiffEncoder::new(Cursor::new(&mut buffer))
        .unwrap()
        .write_image::<colortype::Gray16>(2, 1, &[0xAB12, 0x01FF])
        .unwrap();

    let decoded = StandardTiffReader.read_image(&buffer).unwrap();
    assert_eq!(decoded.depth(), Depth::Gray);
    assert_eq!(decoded.gray_samples().unwrap(), &[0xAB, 0x01]);
}

#[test]
fn test_rgba_input_alpha_discarded() {
    let mut buffer: Vec<u8> = Vec::new();
    TiffEncoder::new(Cursor::new(&mut buffer))
        .unwrap()
        .write_image::<colortype::RGBA8>(1, 1, &[10, 20, 30, 0])
        .unwrap();

    let decoded = StandardTiffReader.read_image(&buffer).unwrap();
    assert_eq!(decoded.get_rgb(0, 0), [10, 20, 30]);
    assert_eq!(decoded.get_alpha(0, 0), 255);
}

#[test]
fn test_binary_and_map_images_not_encodable() {
    for depth in [Depth::Binary, Depth::Map] {
        let image = Pix::new(4, 4, depth).unwrap();
        let mut output: Vec<u8> = Vec::new();
        let err = StandardTiffWriter
            .write_image(&image, &mut output, &TiffOutput::default())
            .unwrap_err();
        assert!(matches!(err, NormError::UnsupportedFormat(_)));
        assert!(output.is_empty());
    }
}

#[test]
fn test_garbage_input_fails_to_decode() {
    let err = StandardTiffReader.read_image(b"not a tiff file").unwrap_err();
    assert!(matches!(err, NormError::DecodeError(_)));
}

#[test]
fn test_unitless_resolution_reads_as_unknown() {
    let mut buffer: Vec<u8> = Vec::new();
    TiffEncoder::new(Cursor::new(&mut buffer))
        .unwrap()
        .write_image::<colortype::Gray8>(2, 2, &[1, 2, 3, 4])
        .unwrap();

    let decoded = StandardTiffReader.read_image(&buffer).unwrap();
    assert_eq!(decoded.resolution(), (0, 0));

    let rewritten = StandardTiffReader
        .read_image(&encode(&decoded, &TiffOutput::default()))
        .unwrap();
    assert_eq!(rewritten.resolution(), (0, 0));
}

#[test]
fn test_centimeter_resolution_converted_to_inches() {
    let mut buffer: Vec<u8> = Vec::new();
    {
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer)).unwrap();
        let mut image = encoder.new_image::<colortype::Gray8>(2, 1).unwrap();
        image.resolution_unit(ResolutionUnit::Centimeter);
        image.x_resolution(Rational { n: 118, d: 1 });
        image.y_resolution(Rational { n: 59, d: 1 });
        image.write_data(&[10, 20]).unwrap();
    }

    let decoded = StandardTiffReader.read_image(&buffer).unwrap();
    assert_eq!(decoded.resolution(), (300, 150));
}
