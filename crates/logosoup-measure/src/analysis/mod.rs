// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Analysis module — pixel classification, content bounds, visual centre,
// and density.

pub mod bounds;
pub mod center;
pub mod classify;
pub mod density;

use image::{Rgba, RgbaImage};
use logosoup_core::BoundingBox;

/// Visit every pixel of `region` that lies inside `image`, passing
/// box-local coordinates. Parts of the region outside the buffer are
/// skipped; they behave like fully transparent pixels.
pub(crate) fn for_each_pixel_in<F>(image: &RgbaImage, region: &BoundingBox, mut visit: F)
where
    F: FnMut(u32, u32, &Rgba<u8>),
{
    let x_end = region.x.saturating_add(region.width).min(image.width());
    let y_end = region.y.saturating_add(region.height).min(image.height());

    for y in region.y..y_end {
        for x in region.x..x_end {
            visit(x - region.x, y - region.y, image.get_pixel(x, y));
        }
    }
}
