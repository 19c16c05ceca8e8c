use crate::image_pipeline::background::{FillPolicy, SmoothingMode};
use crate::image_pipeline::common::error::NormError;
use crate::image_pipeline::normalize::{background_norm, background_norm_simple, BackgroundNormalizer, NormConfig};
use crate::image_pipeline::raster::{Depth, Pix};

/// 40x60 page at 220 with a 10x10 block of ink (30) at the origin.
fn page_with_ink_block() -> Pix {
    let mut pix = Pix::from_gray_samples(40, 60, &[220u8; 40 * 60]).unwrap();
    for y in 0..10 {
        for x in 0..10 {
            pix.set_pixel(x, y, 30);
        }
    }
    pix
}

fn explicit_config() -> NormConfig {
    NormConfig::builder()
        .tile_size(10, 15)
        .threshold(60)
        .min_count(40)
        .bg_value(200)
        .build()
}

fn margin(background: u32, foreground: u32) -> f64 {
    (background as f64 - foreground as f64) / background as f64
}

#[test]
fn test_config_builder() {
    let config = NormConfig::builder()
        .tile_size(12, 20)
        .threshold(80)
        .bg_value(180)
        .smoothing(1, 1)
        .smoothing_mode(SmoothingMode::Box)
        .fill_policy(FillPolicy::ColumnsAndRows)
        .build();

    assert_eq!((config.tile_width, config.tile_height), (12, 20));
    assert_eq!(config.threshold, 80);
    assert_eq!(config.min_count, 40);
    assert_eq!(config.bg_value, 180);
    assert_eq!(config.smoothing.mode, SmoothingMode::Box);
    assert_eq!(config.fill_policy, FillPolicy::ColumnsAndRows);
    assert_eq!(NormConfig::builder().build(), NormConfig::default());
}

#[test]
fn test_default_parameters() {
    let config = NormConfig::default();
    assert_eq!((config.tile_width, config.tile_height), (10, 15));
    assert_eq!(config.threshold, 60);
    assert_eq!(config.min_count, 40);
    assert_eq!(config.bg_value, 200);
    assert_eq!((config.smoothing.half_width, config.smoothing.half_height), (2, 1));
    assert_eq!(config.smoothing.mode, SmoothingMode::Off);
}

#[test]
fn test_gray_page_normalized_to_target() {
    let src = page_with_ink_block();
    let out = background_norm(&src, &explicit_config()).unwrap();
    assert_eq!(out.depth(), Depth::Gray);
    assert_eq!((out.width(), out.height()), (40, 60));

    // Tile (0, 0) is skipped: under FillPolicy::Columns an unset tile inside a
    // column that has data keeps unit scale, so its paper stays near 219.
    // FillPolicy::ColumnsAndRows brings it to target; see the test below.
    for y in 0..60 {
        for x in 0..40 {
            if x < 10 && y < 15 {
                continue;
            }
            let v = out.get_pixel(x, y);
            assert!((199..=201).contains(&v), "({x}, {y}) = {v}");
        }
    }

    // The ink tile had too few background samples; its column still has data,
    // so the tile keeps the unit scale.
    let ink = out.get_pixel(5, 5);
    let paper = out.get_pixel(5, 14);
    assert_eq!((ink, paper), (29, 219));
    assert!(margin(paper, ink) >= margin(220, 30));
}

#[test]
fn test_rows_fill_policy_normalizes_ink_tile() {
    let config = NormConfig::builder().fill_policy(FillPolicy::ColumnsAndRows).build();
    let src = page_with_ink_block();
    let out = background_norm(&src, &config).unwrap();

    for y in 0..60 {
        for x in 0..40 {
            if src.get_pixel(x, y) == 220 {
                let v = out.get_pixel(x, y);
                assert!((199..=201).contains(&v), "({x}, {y}) = {v}");
            }
        }
    }
    assert_eq!(out.get_pixel(5, 14), 199);
    assert_eq!(out.get_pixel(5, 5), 27);
    assert!(margin(199, 27) >= margin(220, 30));
}

#[test]
fn test_rgb_page_normalized_per_channel() {
    let src = Pix::from_rgb_samples(40, 60, &[220u8, 210, 200].repeat(40 * 60)).unwrap();
    let out = background_norm_simple(&src).unwrap();
    assert_eq!(out.depth(), Depth::Rgb);
    for (x, y) in [(0, 0), (39, 59), (17, 33)] {
        assert_eq!(out.get_rgb(x, y), [199, 199, 199]);
        assert_eq!(out.get_alpha(x, y), 255);
    }
}

#[test]
fn test_resolution_copied_to_output() {
    let mut src = page_with_ink_block();
    src.set_resolution(300, 150);
    let out = background_norm_simple(&src).unwrap();
    assert_eq!(out.resolution(), (300, 150));
}

#[test]
fn test_output_is_deterministic() {
    let src = page_with_ink_block();
    let normalizer = BackgroundNormalizer::default();
    assert_eq!(normalizer.normalize(&src).unwrap(), normalizer.normalize(&src).unwrap());
}

#[test]
fn test_timings_cover_every_stage() {
    let (_, timings) = BackgroundNormalizer::default()
        .normalize_with_timings(&page_with_ink_block())
        .unwrap();
    let names: Vec<&str> = timings.steps().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["background_map", "fill_holes", "inverse_map", "apply_map"]);
    assert!(timings.get_step("apply_map").is_some());
    assert!(timings.summary().contains("Total"));
}

#[test]
fn test_unsupported_depth_rejected() {
    for depth in [Depth::Binary, Depth::Map] {
        let src = Pix::new(40, 60, depth).unwrap();
        let err = background_norm_simple(&src).unwrap_err();
        assert!(matches!(err, NormError::InvalidDepth { stage: "normalize", .. }));
    }
}

#[test]
fn test_small_tiles_rejected() {
    let config = NormConfig::builder().tile_size(3, 15).build();
    let err = background_norm(&page_with_ink_block(), &config).unwrap_err();
    assert!(matches!(err, NormError::InvalidParameter(_)));
}

#[test]
fn test_tiles_larger_than_image_rejected() {
    let src = Pix::from_gray_samples(8, 60, &[220u8; 8 * 60]).unwrap();
    let err = background_norm_simple(&src).unwrap_err();
    assert!(matches!(err, NormError::InvalidParameter(_)));
}

#[test]
fn test_all_foreground_image_fails() {
    let src = Pix::from_gray_samples(40, 60, &[30u8; 40 * 60]).unwrap();
    let err = background_norm_simple(&src).unwrap_err();
    assert!(matches!(err, NormError::InsufficientData));
}

#[test]
fn test_all_foreground_rgb_image_fails() {
    let src = Pix::from_rgb_samples(40, 60, &[200u8, 30, 200].repeat(40 * 60)).unwrap();
    let err = background_norm_simple(&src).unwrap_err();
    assert!(matches!(err, NormError::InsufficientData));
}

#[test]
fn test_oversized_min_count_is_clamped() {
    let config = NormConfig::builder().min_count(10_000).build();
    assert_eq!(config.effective_min_count(), 50);
    let out = background_norm(&page_with_ink_block(), &config).unwrap();
    assert_eq!(out.get_pixel(39, 59), 199);
}
