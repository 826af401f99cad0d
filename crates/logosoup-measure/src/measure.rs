// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Measurement — runs the analysis passes over one decoded image and collects
// the results into a `MeasurementResult`.

use image::RgbaImage;
use logosoup_core::config::DEFAULT_CONTRAST_THRESHOLD;
use logosoup_core::{BackgroundColor, LogoSoupConfig, MeasurementResult};
use tracing::{debug, instrument};

use crate::analysis::bounds::detect_content_box;
use crate::analysis::center::visual_center;
use crate::analysis::density::pixel_density;

/// Inputs to the analysis passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureOptions {
    pub contrast_threshold: i32,
    pub background: BackgroundColor,
    /// Run the density pass.
    pub include_density: bool,
}

impl Default for MeasureOptions {
    fn default() -> Self {
        Self {
            contrast_threshold: DEFAULT_CONTRAST_THRESHOLD,
            background: BackgroundColor::WHITE,
            include_density: false,
        }
    }
}

impl From<&LogoSoupConfig> for MeasureOptions {
    fn from(config: &LogoSoupConfig) -> Self {
        Self {
            contrast_threshold: config.contrast_threshold,
            background: config.background,
            include_density: config.density_aware,
        }
    }
}

/// Original dimensions only, no pixel analysis.
pub fn measure_image(image: &RgbaImage) -> MeasurementResult {
    MeasurementResult::from_dimensions(image.width(), image.height())
}

/// Full measurement: content box, visual centre, and (optionally) density.
///
/// Never fails: degenerate images resolve to the full-extent box, a centred
/// visual centre, and a neutral or zero density.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn measure_with_content_detection(image: &RgbaImage, options: &MeasureOptions) -> MeasurementResult {
    let threshold = options.contrast_threshold;
    let background = options.background;

    let content_box = detect_content_box(image, background, threshold);
    let center = visual_center(image, &content_box, background, threshold);
    let density = options
        .include_density
        .then(|| pixel_density(image, Some(&content_box), background, threshold));

    debug!(
        box_w = content_box.width,
        box_h = content_box.height,
        offset_x = center.offset_x,
        offset_y = center.offset_y,
        density = ?density,
        "Image measured"
    );

    MeasurementResult {
        content_box: Some(content_box),
        visual_center: Some(center),
        pixel_density: density,
        ..measure_image(image)
    }
}
