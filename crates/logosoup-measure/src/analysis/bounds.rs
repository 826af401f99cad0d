// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content bounding box detection.

use image::RgbaImage;
use logosoup_core::{BackgroundColor, BoundingBox};
use tracing::{debug, instrument};

use super::classify::ContentClassifier;

/// Find the tightest box enclosing every content pixel.
///
/// Single pass over the whole buffer. Width and height count pixels, so a
/// single content pixel yields a 1x1 box. An image with no content pixels
/// is treated as all content and gets the full-extent box.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn detect_content_box(image: &RgbaImage, background: BackgroundColor, threshold: i32) -> BoundingBox {
    let classifier = ContentClassifier::new(background, threshold);
    let (width, height) = image.dimensions();

    let mut extent: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in image.enumerate_pixels() {
        if !classifier.is_content(pixel) {
            continue;
        }
        extent = Some(match extent {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }

    let content_box = match extent {
        Some((min_x, min_y, max_x, max_y)) => {
            BoundingBox::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
        }
        None => {
            debug!("No content pixels found; using full image extent");
            BoundingBox::full(width, height)
        }
    };

    debug!(
        x = content_box.x,
        y = content_box.y,
        w = content_box.width,
        h = content_box.height,
        "Content box detected"
    );
    content_box
}
