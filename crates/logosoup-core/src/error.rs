// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for LogoSoup.

use thiserror::Error;

/// Top-level error type for all LogoSoup operations.
///
/// Degenerate images (no content pixels, zero-area boxes) never produce an
/// error; they resolve to fallback measurements.
#[derive(Debug, Error)]
pub enum LogoSoupError {
    // -- Loading --
    #[error("failed to load image #{index} ({src}): {reason}")]
    LoadFailure {
        index: usize,
        src: String,
        reason: String,
    },

    #[error("no decoded image available for {0}")]
    ImageNotFound(String),

    // -- Image output --
    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LogoSoupError>;
