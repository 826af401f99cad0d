// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// logosoup-measure — Pixel analysis for the LogoSoup engine.
//
// Operates on decoded RGBA buffers (`image::RgbaImage`): content/background
// classification, tight content bounding box, perceptual visual centre, ink
// density, and cropping a logo down to its content box.

pub mod analysis;
pub mod crop;
pub mod measure;

// Re-export the primary entry points so callers can use `logosoup_measure::measure_with_content_detection` etc.
pub use analysis::bounds::detect_content_box;
pub use analysis::center::visual_center;
pub use analysis::classify::{ContentClassifier, is_content_pixel};
pub use analysis::density::pixel_density;
pub use crop::{Cropper, DataUrlCropper};
pub use measure::{MeasureOptions, measure_image, measure_with_content_detection};
