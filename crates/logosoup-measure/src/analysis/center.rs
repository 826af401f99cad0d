// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Visual centre estimation — contrast- and opacity-weighted centroid of the
// content pixels inside the content box.

use image::RgbaImage;
use logosoup_core::{BackgroundColor, BoundingBox, VisualCenter};
use tracing::{debug, instrument};

use super::classify::ContentClassifier;
use super::for_each_pixel_in;

/// Compute where the eye perceives the centre of a logo's ink.
///
/// Each content pixel inside `content_box` contributes its pixel centre
/// `(x + 0.5, y + 0.5)` weighted by [`ContentClassifier::ink_weight`]. The
/// offset is measured from the box's geometric centre. With zero total
/// weight the geometric centre is returned with a zero offset.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn visual_center(
    image: &RgbaImage,
    content_box: &BoundingBox,
    background: BackgroundColor,
    threshold: i32,
) -> VisualCenter {
    let classifier = ContentClassifier::new(background, threshold);

    let mut total_weight = 0.0f64;
    let mut weighted_x = 0.0f64;
    let mut weighted_y = 0.0f64;

    for_each_pixel_in(image, content_box, |x, y, pixel| {
        if !classifier.is_content(pixel) {
            return;
        }
        let weight = classifier.ink_weight(pixel);
        total_weight += weight;
        weighted_x += (x as f64 + 0.5) * weight;
        weighted_y += (y as f64 + 0.5) * weight;
    });

    if total_weight == 0.0 {
        debug!("Zero ink weight; using geometric centre");
        return VisualCenter::centered(content_box);
    }

    let local_x = weighted_x / total_weight;
    let local_y = weighted_y / total_weight;

    let center = VisualCenter {
        x: content_box.x as f64 + local_x,
        y: content_box.y as f64 + local_y,
        offset_x: local_x - content_box.width as f64 / 2.0,
        offset_y: local_y - content_box.height as f64 / 2.0,
    };
    debug!(
        offset_x = center.offset_x,
        offset_y = center.offset_y,
        "Visual centre computed"
    );
    center
}
