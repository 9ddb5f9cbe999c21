//! End-to-end behavioral properties of the quantize → remap/dither pipeline.

use palquant::{AverageSpace, QuantizeConfig, SplitStrategy};

#[test]
fn two_by_two_black_white_is_lossless() {
    // 2×2 RGBA image, two black and two white pixels, two requested colors:
    // the palette must reproduce both colors exactly and remapping must be
    // the identity.
    let source = [
        0u8, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    ];

    for strategy in [SplitStrategy::BoundingBox, SplitStrategy::FarthestPair] {
        for space in [AverageSpace::Raw, AverageSpace::Linear] {
            let config = QuantizeConfig::new()
                .split_strategy(strategy)
                .average_space(space);
            let palette = palquant::quantize(&source, 2, 4, &config).unwrap();

            assert_eq!(palette.len(), 2, "{strategy:?}/{space:?}");
            let mut entries: Vec<Vec<u8>> = palette.entries().map(|e| e.to_vec()).collect();
            entries.sort();
            assert_eq!(entries[0], vec![0, 0, 0, 255]);
            assert_eq!(entries[1], vec![255, 255, 255, 255]);

            let mut data = source;
            palette.process(&mut data);
            assert_eq!(data, source, "{strategy:?}/{space:?}");
        }
    }
}

#[test]
fn single_color_image_yields_one_entry() {
    // One distinct color: the first selection sees metric 0 and the loop
    // ends with a single group regardless of the requested count.
    let pixels: Vec<u8> = std::iter::repeat([42u8, 77, 200])
        .take(50)
        .flatten()
        .collect();

    for strategy in [SplitStrategy::BoundingBox, SplitStrategy::FarthestPair] {
        let config = QuantizeConfig::new().split_strategy(strategy);
        let palette = palquant::quantize(&pixels, 8, 3, &config).unwrap();
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.entry(0), &[42, 77, 200]);
    }
}

#[test]
fn color_count_one_gives_whole_image_centroid() {
    // Raw policy: plain weighted byte mean, truncated.
    let pixels = [0u8, 0, 0, 0, 0, 0, 0, 0, 0, 100, 100, 100];
    let config = QuantizeConfig::new().average_space(AverageSpace::Raw);
    let palette = palquant::quantize(&pixels, 1, 3, &config).unwrap();
    assert_eq!(palette.entry(0), &[25, 25, 25]);

    // Linear policy: black/white mean lands well above the raw midpoint.
    let pixels = [0u8, 255, 0, 255];
    let config = QuantizeConfig::new().average_space(AverageSpace::Linear);
    let palette = palquant::quantize(&pixels, 1, 1, &config).unwrap();
    assert!(palette.entry(0)[0] > 180, "got {}", palette.entry(0)[0]);
}

#[test]
fn process_is_idempotent_for_any_palette() {
    let pixels: Vec<u8> = (0..300u32)
        .flat_map(|i| [(i % 256) as u8, (i * 7 % 256) as u8, (i * 13 % 256) as u8])
        .collect();
    let palette = palquant::quantize(&pixels, 12, 3, &QuantizeConfig::default()).unwrap();

    let mut once = pixels.clone();
    palette.process(&mut once);
    let mut twice = once.clone();
    palette.process(&mut twice);
    assert_eq!(once, twice);
}

#[test]
fn dither_never_interpolates() {
    let width = 20;
    let height = 15;
    let pixels: Vec<u8> = (0..width * height)
        .flat_map(|i| {
            let x = i % width;
            let y = i / width;
            [
                (x * 255 / width) as u8,
                (y * 255 / height) as u8,
                ((x + y) * 255 / (width + height)) as u8,
            ]
        })
        .collect();

    let palette = palquant::quantize(&pixels, 6, 3, &QuantizeConfig::default()).unwrap();
    let mut data = pixels.clone();
    palette.dither_process(&mut data, width);

    for px in data.chunks_exact(3) {
        assert!(
            palette.entries().any(|e| e == px),
            "dither emitted non-palette pixel {px:?}"
        );
    }
}

#[test]
fn grayscale_single_channel_pipeline() {
    let width = 16;
    let pixels: Vec<u8> = (0..width * 16).map(|i| (i * 255 / (width * 16)) as u8).collect();
    let palette = palquant::quantize(&pixels, 4, 1, &QuantizeConfig::default()).unwrap();
    assert!((1..=4).contains(&palette.len()));

    let mut data = pixels.clone();
    palette.dither_process(&mut data, width);
    for &v in &data {
        assert!(palette.entries().any(|e| e == [v]));
    }
}

#[test]
fn deterministic_across_runs() {
    let pixels: Vec<u8> = (0..600u32).map(|i| (i * 31 % 256) as u8).collect();
    let config = QuantizeConfig::default();
    let a = palquant::quantize(&pixels, 10, 2, &config).unwrap();
    let b = palquant::quantize(&pixels, 10, 2, &config).unwrap();
    let ea: Vec<&[u8]> = a.entries().collect();
    let eb: Vec<&[u8]> = b.entries().collect();
    assert_eq!(ea, eb);
}
