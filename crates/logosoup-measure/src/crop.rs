// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Crop-to-content — cut a logo down to its content box and hand back an
// image reference a renderer can display in place of the original.

use base64::Engine as _;
use image::{DynamicImage, ImageFormat, RgbaImage};
use logosoup_core::BoundingBox;
use logosoup_core::error::{LogoSoupError, Result};
use tracing::{debug, instrument};

/// Produces a displayable reference to the `content_box` region of `image`.
///
/// An error means no cropped reference could be produced; callers fall back
/// to the original source.
pub trait Cropper {
    fn crop(&self, image: &RgbaImage, content_box: &BoundingBox) -> Result<String>;
}

/// Crops in memory and encodes the result as a `data:image/png;base64,...`
/// URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrlCropper;

impl Cropper for DataUrlCropper {
    #[instrument(skip(self, image), fields(x = content_box.x, y = content_box.y, w = content_box.width, h = content_box.height))]
    fn crop(&self, image: &RgbaImage, content_box: &BoundingBox) -> Result<String> {
        let cropped = crop_to_box(image, content_box);
        if cropped.width() == 0 || cropped.height() == 0 {
            return Err(LogoSoupError::ImageError(
                "content box does not overlap the image".into(),
            ));
        }

        let png = encode_png(&cropped)?;
        debug!(png_bytes = png.len(), "Cropped logo encoded");

        Ok(format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png)
        ))
    }
}

/// Copy the region of `image` covered by `content_box`. The box is clamped
/// to the image bounds.
pub fn crop_to_box(image: &RgbaImage, content_box: &BoundingBox) -> RgbaImage {
    let (img_w, img_h) = image.dimensions();

    let safe_x = content_box.x.min(img_w);
    let safe_y = content_box.y.min(img_h);
    let safe_w = content_box.width.min(img_w - safe_x);
    let safe_h = content_box.height.min(img_h - safe_y);

    image::imageops::crop_imm(image, safe_x, safe_y, safe_w, safe_h).to_image()
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    DynamicImage::ImageRgba8(image.clone())
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|err| LogoSoupError::ImageError(format!("PNG encoding failed: {}", err)))?;
    Ok(buffer)
}
