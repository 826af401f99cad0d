// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Latest-wins normalization session.
//
// Callers re-run normalization whenever their inputs change. Each call
// supersedes the previous one; a superseded batch reports `Cancelled` and
// never overwrites the published results of a newer batch.

use std::sync::Mutex;

use logosoup_core::error::Result;
use logosoup_core::{LogoSoupConfig, LogoSource};
use logosoup_measure::{Cropper, DataUrlCropper};
use tracing::{debug, instrument};

use crate::cancel::BatchTracker;
use crate::loader::ImageLoader;
use crate::orchestrator::{BatchOutcome, BatchReport, process_logos};

/// Owns a loader and cropper and publishes the report of the most recent
/// completed batch.
pub struct LogoSoup<L, C = DataUrlCropper> {
    loader: L,
    cropper: C,
    tracker: BatchTracker,
    latest: Mutex<Option<BatchReport>>,
}

impl<L: ImageLoader> LogoSoup<L> {
    /// Session using the default data-URL cropper.
    pub fn new(loader: L) -> Self {
        Self::with_cropper(loader, DataUrlCropper)
    }
}

impl<L: ImageLoader, C: Cropper> LogoSoup<L, C> {
    pub fn with_cropper(loader: L, cropper: C) -> Self {
        Self {
            loader,
            cropper,
            tracker: BatchTracker::new(),
            latest: Mutex::new(None),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Normalize `sources`, superseding any batch still in flight.
    ///
    /// Returns `Cancelled` if another call (or [`cancel`](Self::cancel))
    /// superseded this one before it finished, including when its load
    /// failed after it was superseded. A load failure under the fail-fast
    /// policy is returned as an error and leaves the published report
    /// untouched.
    #[instrument(skip_all, fields(count = sources.len()))]
    pub async fn normalize(&self, sources: &[LogoSource], config: &LogoSoupConfig) -> Result<BatchOutcome> {
        let token = self.tracker.start();
        let outcome = match process_logos(&self.loader, &self.cropper, sources, config, &token).await {
            Ok(outcome) => outcome,
            Err(err) if !self.tracker.is_current(token.id()) => {
                debug!(batch_id = %token.id(), error = %err, "Discarding error of superseded batch");
                return Ok(BatchOutcome::Cancelled(token.id()));
            }
            Err(err) => return Err(err),
        };

        let BatchOutcome::Completed(report) = outcome else {
            return Ok(outcome);
        };

        let mut latest = self.latest.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // Checked under the lock so a newer batch cannot publish in between.
        if !self.tracker.is_current(report.batch_id) {
            debug!(batch_id = %report.batch_id, "Discarding results of superseded batch");
            return Ok(BatchOutcome::Cancelled(report.batch_id));
        }
        *latest = Some(report.clone());
        Ok(BatchOutcome::Completed(report))
    }

    /// Abandon the batch in flight, if any.
    pub fn cancel(&self) {
        self.tracker.cancel_current();
    }

    /// Report of the most recent batch that completed while still current.
    pub fn latest(&self) -> Option<BatchReport> {
        self.latest
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
