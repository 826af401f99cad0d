// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Normalization configuration.

use serde::{Deserialize, Serialize};

use crate::error::{LogoSoupError, Result};
use crate::types::{AlignmentMode, BackgroundColor};

pub const DEFAULT_BASE_SIZE: u32 = 48;
pub const DEFAULT_SCALE_FACTOR: f64 = 0.5;
pub const DEFAULT_CONTRAST_THRESHOLD: i32 = 10;
pub const DEFAULT_DENSITY_FACTOR: f64 = 0.5;
pub const DEFAULT_ALIGN_BY: AlignmentMode = AlignmentMode::Bounds;

/// What a batch does when one of its images fails to load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// The first load failure aborts the batch; no partial list is returned.
    #[default]
    FailFast,
    /// Failed images are reported and skipped; the rest are still normalized.
    Isolate,
}

/// Options recognised by the normalization pipeline.
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoSoupConfig {
    /// Reference linear size in display pixels.
    pub base_size: u32,
    /// 0 = uniform widths, 1 = uniform heights, ~0.5 = balanced areas.
    pub scale_factor: f64,
    /// Per-channel and alpha cutoff on the 0-255 scale.
    pub contrast_threshold: i32,
    /// Measure pixel density and feed it into sizing.
    pub density_aware: bool,
    /// Weight of the density compensation (0 disables it).
    pub density_factor: f64,
    /// Produce a cropped image reference for each logo.
    pub crop_to_content: bool,
    /// Alignment mode handed to renderers.
    pub align_by: AlignmentMode,
    /// Assumed background behind every logo.
    pub background: BackgroundColor,
    /// Batch behaviour on load failure.
    pub failure_policy: FailurePolicy,
}

impl Default for LogoSoupConfig {
    fn default() -> Self {
        Self {
            base_size: DEFAULT_BASE_SIZE,
            scale_factor: DEFAULT_SCALE_FACTOR,
            contrast_threshold: DEFAULT_CONTRAST_THRESHOLD,
            density_aware: true,
            density_factor: DEFAULT_DENSITY_FACTOR,
            crop_to_content: false,
            align_by: DEFAULT_ALIGN_BY,
            background: BackgroundColor::WHITE,
            failure_policy: FailurePolicy::FailFast,
        }
    }
}

impl LogoSoupConfig {
    /// Parse a JSON config document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Density factor actually applied by the size normalizer.
    pub fn effective_density_factor(&self) -> f64 {
        if self.density_aware {
            self.density_factor
        } else {
            0.0
        }
    }

    /// Check value ranges. The pipeline itself tolerates any input; this is
    /// for configs arriving from outside.
    pub fn validate(&self) -> Result<()> {
        if self.base_size == 0 {
            return Err(LogoSoupError::InvalidConfig(
                "base_size must be greater than zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.scale_factor) {
            return Err(LogoSoupError::InvalidConfig(format!(
                "scale_factor must be within [0, 1], got {}",
                self.scale_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.density_factor) {
            return Err(LogoSoupError::InvalidConfig(format!(
                "density_factor must be within [0, 1], got {}",
                self.density_factor
            )));
        }
        if !(-255..=255).contains(&self.contrast_threshold) {
            return Err(LogoSoupError::InvalidConfig(format!(
                "contrast_threshold must be within [-255, 255], got {}",
                self.contrast_threshold
            )));
        }
        Ok(())
    }
}
