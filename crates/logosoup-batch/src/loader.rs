// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image loader seam. Fetching and decoding happen outside the engine; the
// orchestrator only ever sees a fully decoded RGBA buffer or an error.

use std::collections::HashMap;
use std::future::Future;

use image::RgbaImage;
use logosoup_core::error::{LogoSoupError, Result};
use tracing::debug;

/// Resolves a logo source string (URI, path, embedded data...) to a decoded
/// pixel buffer.
///
/// This is the only suspension point of a batch. Timeouts belong to the
/// implementation.
pub trait ImageLoader {
    fn load(&self, src: &str) -> impl Future<Output = Result<RgbaImage>> + Send;
}

/// Serves buffers that were decoded ahead of time, keyed by source string.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    images: HashMap<String, RgbaImage>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the buffer served for `src`.
    pub fn insert(&mut self, src: impl Into<String>, image: RgbaImage) {
        self.images.insert(src.into(), image);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_image(mut self, src: impl Into<String>, image: RgbaImage) -> Self {
        self.insert(src, image);
        self
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageLoader for MemoryLoader {
    fn load(&self, src: &str) -> impl Future<Output = Result<RgbaImage>> + Send {
        let found = self.images.get(src).cloned();
        let src = src.to_string();
        async move {
            match found {
                Some(image) => {
                    debug!(%src, width = image.width(), height = image.height(), "Image served from memory");
                    Ok(image)
                }
                None => Err(LogoSoupError::ImageNotFound(src)),
            }
        }
    }
}
