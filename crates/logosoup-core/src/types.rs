// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the LogoSoup normalization engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogoSoupError;

/// Reference background colour that pixels are compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackgroundColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BackgroundColor {
    /// Opaque white, the assumed canvas behind every logo.
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Axis-aligned rectangle in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box covering an entire `width` x `height` image.
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Number of pixels enclosed by the box.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Geometric centre in absolute source coordinates.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

/// Perceptual centre of a logo's ink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualCenter {
    /// Absolute x position in source pixels.
    pub x: f64,
    /// Absolute y position in source pixels.
    pub y: f64,
    /// Displacement from the content box's geometric centre.
    pub offset_x: f64,
    pub offset_y: f64,
}

impl VisualCenter {
    /// The geometric centre of `content_box` with no offset.
    pub fn centered(content_box: &BoundingBox) -> Self {
        let (x, y) = content_box.center();
        Self {
            x,
            y,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Everything measured from one decoded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Original image width in pixels.
    pub width: u32,
    /// Original image height in pixels.
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_box: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_center: Option<VisualCenter>,
    /// Coverage ratio x average opacity inside the content box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_density: Option<f64>,
}

impl MeasurementResult {
    /// A bare measurement carrying only the original dimensions.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            content_box: None,
            visual_center: None,
            pixel_density: None,
        }
    }

    /// Dimensions used for sizing: the content box if present, else the
    /// original image.
    pub fn content_dimensions(&self) -> (u32, u32) {
        match &self.content_box {
            Some(content_box) => (content_box.width, content_box.height),
            None => (self.width, self.height),
        }
    }
}

/// Identity of one logo. Carried through the pipeline untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogoSource {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

impl LogoSource {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

impl From<&str> for LogoSource {
    fn from(src: &str) -> Self {
        Self::new(src, "")
    }
}

impl From<String> for LogoSource {
    fn from(src: String) -> Self {
        Self::new(src, "")
    }
}

/// Integer display size produced by the size normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A measured, sized logo ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLogo {
    pub src: String,
    pub alt: String,
    pub original_width: u32,
    pub original_height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_box: Option<BoundingBox>,
    pub normalized_width: u32,
    pub normalized_height: u32,
    pub aspect_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_center: Option<VisualCenter>,
    /// Reference to an image cropped to the content box, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cropped_src: Option<String>,
}

impl NormalizedLogo {
    /// The image reference a renderer should display.
    pub fn display_src(&self) -> &str {
        self.cropped_src.as_deref().unwrap_or(&self.src)
    }
}

/// Which axes of the visual-centre offset are applied at render time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignmentMode {
    /// Align by the content bounding box; no translation.
    #[default]
    Bounds,
    /// Shift on both axes towards the visual centre.
    VisualCenter,
    /// Shift horizontally only.
    VisualCenterX,
    /// Shift vertically only.
    VisualCenterY,
}

impl AlignmentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bounds => "bounds",
            Self::VisualCenter => "visual-center",
            Self::VisualCenterX => "visual-center-x",
            Self::VisualCenterY => "visual-center-y",
        }
    }

    pub fn applies_x(&self) -> bool {
        matches!(self, Self::VisualCenter | Self::VisualCenterX)
    }

    pub fn applies_y(&self) -> bool {
        matches!(self, Self::VisualCenter | Self::VisualCenterY)
    }
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlignmentMode {
    type Err = LogoSoupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bounds" => Ok(Self::Bounds),
            "visual-center" => Ok(Self::VisualCenter),
            "visual-center-x" => Ok(Self::VisualCenterX),
            "visual-center-y" => Ok(Self::VisualCenterY),
            other => Err(LogoSoupError::InvalidConfig(format!(
                "unknown alignment mode: {other}"
            ))),
        }
    }
}

/// 2D offset in display pixels applied to a rendered logo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub x: f64,
    pub y: f64,
}

impl Translation {
    /// CSS `transform` value, e.g. `translate(-1.5px, 0.0px)`.
    pub fn to_css(&self) -> String {
        format!("translate({:.1}px, {:.1}px)", self.x, self.y)
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
