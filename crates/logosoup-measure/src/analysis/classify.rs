// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content/background pixel classification.

use image::Rgba;
use logosoup_core::BackgroundColor;

/// Whether a pixel counts as logo content.
///
/// A pixel is content when its alpha exceeds `threshold` **and** at least one
/// colour channel differs from `background` by more than `threshold`. A
/// threshold of zero or below admits nearly every visible pixel.
pub fn is_content_pixel(r: u8, g: u8, b: u8, a: u8, background: BackgroundColor, threshold: i32) -> bool {
    let has_alpha = a as i32 > threshold;
    let has_contrast = (r as i32 - background.r as i32).abs() > threshold
        || (g as i32 - background.g as i32).abs() > threshold
        || (b as i32 - background.b as i32).abs() > threshold;

    has_alpha && has_contrast
}

/// Classifier bound to one background and threshold, shared by every scan
/// over a single image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentClassifier {
    pub background: BackgroundColor,
    pub threshold: i32,
}

impl ContentClassifier {
    pub fn new(background: BackgroundColor, threshold: i32) -> Self {
        Self {
            background,
            threshold,
        }
    }

    pub fn is_content(&self, pixel: &Rgba<u8>) -> bool {
        let Rgba([r, g, b, a]) = *pixel;
        is_content_pixel(r, g, b, a, self.background, self.threshold)
    }

    /// Perceptual ink weight: `sqrt(rgb distance from background) * opacity`.
    ///
    /// The square root damps large low-contrast fills relative to small
    /// high-contrast strokes.
    pub fn ink_weight(&self, pixel: &Rgba<u8>) -> f64 {
        let Rgba([r, g, b, a]) = *pixel;
        let dr = r as f64 - self.background.r as f64;
        let dg = g as f64 - self.background.g as f64;
        let db = b as f64 - self.background.b as f64;
        let color_distance = (dr * dr + dg * dg + db * db).sqrt();

        color_distance.sqrt() * (a as f64 / 255.0)
    }
}
