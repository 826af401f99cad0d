// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ink density — how much of the content box is visibly filled.

use image::RgbaImage;
use logosoup_core::{BackgroundColor, BoundingBox};
use tracing::{debug, instrument};

use super::classify::ContentClassifier;
use super::for_each_pixel_in;

/// Density reported for a box with no pixels.
pub const NEUTRAL_DENSITY: f64 = 0.5;

/// Score in roughly `0..=1`: coverage ratio times average opacity of the
/// content pixels within `region` (the whole image when `None`).
///
/// Thin wordmarks score low, solid badges score high.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn pixel_density(
    image: &RgbaImage,
    region: Option<&BoundingBox>,
    background: BackgroundColor,
    threshold: i32,
) -> f64 {
    let region = region
        .copied()
        .unwrap_or_else(|| BoundingBox::full(image.width(), image.height()));

    let total_pixels = region.area();
    if total_pixels == 0 {
        debug!("Zero-area region; using neutral density");
        return NEUTRAL_DENSITY;
    }

    let classifier = ContentClassifier::new(background, threshold);
    let mut filled_pixels = 0u64;
    let mut opacity_sum = 0.0f64;

    for_each_pixel_in(image, &region, |_, _, pixel| {
        if classifier.is_content(pixel) {
            filled_pixels += 1;
            opacity_sum += pixel.0[3] as f64 / 255.0;
        }
    });

    let coverage_ratio = filled_pixels as f64 / total_pixels as f64;
    let average_opacity = if filled_pixels > 0 {
        opacity_sum / filled_pixels as f64
    } else {
        0.0
    };
    let density = coverage_ratio * average_opacity;

    debug!(filled_pixels, total_pixels, density, "Pixel density measured");
    density
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: BackgroundColor = BackgroundColor::WHITE;

    fn canvas(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn solid_opaque_block_has_full_density() {
        let img = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        let d = pixel_density(&img, None, WHITE, 10);
        assert!((d - 1.0).abs() < 1e-12);
    }

    #[test]
    fn half_filled_box_has_half_density() {
        let mut img = canvas(10, 10);
        for y in 0..10 {
            for x in 0..5 {
                img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
        let d = pixel_density(&img, Some(&BoundingBox::full(10, 10)), WHITE, 10);
        assert!((d - 0.5).abs() < 1e-12);
    }

    #[test]
    fn translucent_ink_lowers_density() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 102]));
        let d = pixel_density(&img, None, WHITE, 10);
        assert!((d - 0.4).abs() < 1e-9);
    }

    #[test]
    fn blank_region_has_zero_density() {
        let img = canvas(8, 8);
        assert_eq!(pixel_density(&img, None, WHITE, 10), 0.0);
    }

    #[test]
    fn zero_area_region_is_neutral() {
        let img = canvas(8, 8);
        let empty = BoundingBox::new(2, 2, 0, 5);
        assert_eq!(pixel_density(&img, Some(&empty), WHITE, 10), NEUTRAL_DENSITY);
        assert_eq!(pixel_density(&RgbaImage::new(0, 0), None, WHITE, 10), NEUTRAL_DENSITY);
    }

    #[test]
    fn region_restricts_the_scan() {
        let mut img = canvas(20, 20);
        for y in 0..4 {
            for x in 0..4 {
                img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
        let inside = pixel_density(&img, Some(&BoundingBox::new(0, 0, 4, 4)), WHITE, 10);
        let whole = pixel_density(&img, None, WHITE, 10);
        assert!((inside - 1.0).abs() < 1e-12);
        assert!((whole - 16.0 / 400.0).abs() < 1e-12);
    }
}
