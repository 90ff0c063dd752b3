// tests/feature_tests.rs
//! Tests for raster feature extraction

use glyph_pla::prelude::*;

fn block(height: usize, width: usize, rows: std::ops::Range<usize>, cols: std::ops::Range<usize>) -> Raster {
    let mut raster = Raster::blank(height, width);
    raster.fill_rect(rows, cols, 0).unwrap();
    raster
}

#[test]
fn test_known_aspect_ratio() {
    // Pixel centres span 5 units vertically and 10 horizontally
    let raster = block(10, 20, 0..6, 0..11);
    let features = FeatureExtractor::new().features(&raster).unwrap();

    assert!((features.aspect_ratio - 0.5).abs() < 1e-12);
}

#[test]
fn test_aspect_ratio_measures_between_pixel_coordinates() {
    // A 5x10 pixel block spans 4 units by 9 units
    let raster = block(10, 20, 0..5, 0..10);
    let bbox = BoundingBox::of(&raster).unwrap();

    assert_eq!(bbox, BoundingBox { xmin: 0, xmax: 9, ymin: 6, ymax: 10 });

    let features = FeatureExtractor::new().features(&raster).unwrap();
    assert!((features.aspect_ratio - 4.0 / 9.0).abs() < 1e-12);
}

#[test]
fn test_known_right_heaviness_and_density() {
    // Ten inked columns, midpoint at x = 4.5, five columns strictly right of it
    let raster = block(10, 20, 2..5, 0..10);
    let features = FeatureExtractor::new().features(&raster).unwrap();

    assert!((features.right_heaviness - 0.5).abs() < 1e-12);
    assert!((features.ink_density - 30.0 / 200.0).abs() < 1e-12);
}

#[test]
fn test_right_heaviness_weights_by_ink() {
    let mut raster = Raster::blank(3, 4);
    raster.fill_rect(0..3, 0..1, 0).unwrap();
    raster.fill_rect(0..3, 1..2, 200).unwrap();

    let features = FeatureExtractor::new().features(&raster).unwrap();

    // Left column carries 255 ink per pixel, right column 55
    assert!((features.right_heaviness - 55.0 / 310.0).abs() < 1e-12);
    assert!((features.ink_density - 3.0 * 310.0 / (255.0 * 12.0)).abs() < 1e-12);
}

#[test]
fn test_midpoint_column_is_not_right() {
    // Columns 2..=6, midpoint 4.0 lands on a column that counts as left
    let raster = block(4, 8, 1..3, 2..7);
    let features = FeatureExtractor::new().features(&raster).unwrap();

    assert!((features.right_heaviness - 0.4).abs() < 1e-12);
}

#[test]
fn test_vector_layout() {
    let raster = block(10, 20, 2..5, 0..10);
    let vector = FeatureExtractor::new().extract(&raster).unwrap();

    assert_eq!(vector.len(), FEATURE_DIM);
    assert_eq!(vector[3], BIAS);
    assert!((vector[1] - 2.0 / 9.0).abs() < 1e-12);
}

#[test]
fn test_extraction_is_deterministic() {
    let mut raster = Raster::blank(16, 16);
    raster.fill_rect(3..12, 2..9, 40).unwrap();
    raster.fill_rect(5..7, 9..14, 130).unwrap();

    let extractor = FeatureExtractor::new();
    let first = extractor.extract(&raster).unwrap();
    let second = FeatureExtractor::default().extract(&raster.clone()).unwrap();

    let bits = |v: &ndarray::Array1<f64>| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&first), bits(&second));
}

#[test]
fn test_empty_glyph() {
    let extractor = FeatureExtractor::new();

    assert_eq!(
        extractor.extract(&Raster::blank(8, 6)),
        Err(PlaError::EmptyGlyph { height: 8, width: 6 })
    );
    assert_eq!(
        extractor.extract(&Raster::blank(0, 0)),
        Err(PlaError::EmptyGlyph { height: 0, width: 0 })
    );
}

#[test]
fn test_degenerate_bounding_box() {
    let raster = block(10, 10, 1..9, 7..8);

    assert_eq!(
        FeatureExtractor::new().extract(&raster),
        Err(PlaError::DegenerateBoundingBox { column: 7 })
    );
}

#[test]
fn test_flat_stroke_has_zero_aspect() {
    let raster = block(10, 10, 4..5, 1..9);
    let features = FeatureExtractor::new().features(&raster).unwrap();

    assert_eq!(features.aspect_ratio, 0.0);
}

#[test]
fn test_batch_keeps_order_and_errors() {
    let rasters = vec![
        block(10, 20, 2..5, 0..10),
        Raster::blank(4, 4),
        block(10, 20, 0..6, 0..11),
    ];

    let results = FeatureExtractor::new().extract_batch(&rasters);

    assert_eq!(results.len(), 3);
    assert!((results[0].as_ref().unwrap()[2] - 0.5).abs() < 1e-12);
    assert_eq!(results[1], Err(PlaError::EmptyGlyph { height: 4, width: 4 }));
    assert!((results[2].as_ref().unwrap()[1] - 0.5).abs() < 1e-12);
}
