// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Size normalization — turns a measurement into display dimensions that
// balance visual footprint across logos of very different shapes.

use tracing::debug;

use crate::types::{Dimensions, LogoSource, MeasurementResult, NormalizedLogo};

/// Density of a "typical" logo; denser marks shrink, sparser marks grow.
pub const REFERENCE_DENSITY: f64 = 0.35;

/// Bounds on the density compensation multiplier.
pub const MIN_DENSITY_SCALE: f64 = 0.5;
pub const MAX_DENSITY_SCALE: f64 = 2.0;

/// Compute display dimensions for one measured logo.
///
/// The width is `aspect_ratio ^ scale_factor * base_size` and the height
/// follows from the aspect ratio, so `scale_factor = 0` gives every logo the
/// same width, `1` the same height, and values in between interpolate.
///
/// When `density_factor > 0` and the measurement carries a density, both
/// dimensions are multiplied by `(REFERENCE_DENSITY / density) ^ (density_factor / 2)`,
/// clamped to `[0.5, 2.0]`.
///
/// A zero-width or zero-height content area yields a `base_size` square.
pub fn normalized_dimensions(
    measurement: &MeasurementResult,
    base_size: u32,
    scale_factor: f64,
    density_factor: f64,
) -> Dimensions {
    let (content_width, content_height) = measurement.content_dimensions();

    if content_width == 0 || content_height == 0 {
        return Dimensions {
            width: base_size,
            height: base_size,
        };
    }

    let aspect_ratio = content_width as f64 / content_height as f64;
    let mut width = aspect_ratio.powf(scale_factor) * base_size as f64;
    let mut height = width / aspect_ratio;

    if density_factor > 0.0
        && let Some(density) = measurement.pixel_density
    {
        let scale = density_scale(density, density_factor);
        debug!(density, density_factor, scale, "Applying density compensation");
        width *= scale;
        height *= scale;
    }

    Dimensions {
        width: width.round() as u32,
        height: height.round() as u32,
    }
}

/// Multiplier that equalizes perceived weight. A density of zero divides to
/// infinity and lands on the upper clamp.
fn density_scale(density: f64, density_factor: f64) -> f64 {
    let density_ratio = density / REFERENCE_DENSITY;
    (1.0 / density_ratio)
        .powf(density_factor * 0.5)
        .clamp(MIN_DENSITY_SCALE, MAX_DENSITY_SCALE)
}

impl NormalizedLogo {
    /// Assemble the output record for one logo.
    pub fn from_measurement(
        source: LogoSource,
        measurement: MeasurementResult,
        base_size: u32,
        scale_factor: f64,
        density_factor: f64,
    ) -> Self {
        let dimensions =
            normalized_dimensions(&measurement, base_size, scale_factor, density_factor);

        let (content_width, content_height) = measurement.content_dimensions();
        let aspect_ratio = if content_height > 0 {
            content_width as f64 / content_height as f64
        } else {
            1.0
        };

        Self {
            src: source.src,
            alt: source.alt,
            original_width: measurement.width,
            original_height: measurement.height,
            content_box: measurement.content_box,
            normalized_width: dimensions.width,
            normalized_height: dimensions.height,
            aspect_ratio,
            pixel_density: measurement.pixel_density,
            visual_center: measurement.visual_center,
            cropped_src: None,
        }
    }
}
