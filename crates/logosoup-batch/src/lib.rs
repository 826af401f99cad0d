// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// logosoup-batch — Async orchestration for the LogoSoup engine.
//
// Loads every logo of a batch through an `ImageLoader`, runs measurement and
// normalization, optionally crops to content, and honours per-batch
// cancellation so only the latest request publishes results.

pub mod cancel;
pub mod loader;
pub mod orchestrator;
pub mod session;

pub use cancel::{BatchId, BatchToken, BatchTracker};
pub use loader::{ImageLoader, MemoryLoader};
pub use orchestrator::{BatchOutcome, BatchReport, LogoFailure, process_logos};
pub use session::LogoSoup;
