// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Render-time alignment — maps a logo's visual-centre offset from source
// pixels into a display-pixel translation.

use crate::types::{AlignmentMode, NormalizedLogo, Translation};

/// Offsets at or below this magnitude (display pixels) are not worth a
/// transform.
pub const MIN_VISIBLE_OFFSET: f64 = 0.5;

/// Translation that moves a rendered logo so its visual centre, rather than
/// its bounding box, sits in the middle of its slot.
///
/// Returns `None` for [`AlignmentMode::Bounds`], for logos without a visual
/// centre, and when both components are sub-pixel.
pub fn visual_center_transform(logo: &NormalizedLogo, mode: AlignmentMode) -> Option<Translation> {
    if mode == AlignmentMode::Bounds {
        return None;
    }
    let center = logo.visual_center.as_ref()?;

    let source_width = logo
        .content_box
        .map(|b| b.width)
        .filter(|&w| w > 0)
        .unwrap_or(logo.original_width);
    let source_height = logo
        .content_box
        .map(|b| b.height)
        .filter(|&h| h > 0)
        .unwrap_or(logo.original_height);

    let x = if mode.applies_x() {
        -center.offset_x * display_scale(logo.normalized_width, source_width)
    } else {
        0.0
    };
    let y = if mode.applies_y() {
        -center.offset_y * display_scale(logo.normalized_height, source_height)
    } else {
        0.0
    };

    if x.abs() > MIN_VISIBLE_OFFSET || y.abs() > MIN_VISIBLE_OFFSET {
        Some(Translation { x, y })
    } else {
        None
    }
}

/// Display pixels per source pixel; zero when the source extent is unknown.
fn display_scale(display: u32, source: u32) -> f64 {
    if source == 0 {
        0.0
    } else {
        display as f64 / source as f64
    }
}
