// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// LogoSoup — Core types, configuration, errors, and the pure numeric stages
// (size normalization and visual-center alignment) shared across all crates.

pub mod alignment;
pub mod config;
pub mod error;
pub mod normalize;
pub mod types;

pub use alignment::visual_center_transform;
pub use config::{FailurePolicy, LogoSoupConfig};
pub use error::LogoSoupError;
pub use normalize::normalized_dimensions;
pub use types::*;
