// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch orchestrator — loads, measures, sizes, and optionally crops each
// logo in input order.
//
// Images are processed strictly one at a time. The only await point is the
// loader; everything after it is synchronous CPU work on a buffer that is
// dropped before the next image is requested.

use logosoup_core::error::{LogoSoupError, Result};
use logosoup_core::{FailurePolicy, LogoSoupConfig, LogoSource, NormalizedLogo};
use logosoup_measure::{Cropper, MeasureOptions, measure_with_content_detection};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::cancel::{BatchId, BatchToken};
use crate::loader::ImageLoader;

/// An image that could not be loaded in an isolating batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoFailure {
    /// Position of the source in the batch input.
    pub index: usize,
    pub src: String,
    pub reason: String,
}

/// Results of a batch that ran to completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub batch_id: BatchId,
    /// Normalized logos in input order (failed images omitted).
    pub logos: Vec<NormalizedLogo>,
    /// Always empty under [`FailurePolicy::FailFast`].
    pub failures: Vec<LogoFailure>,
}

/// How a batch ended, short of a hard failure.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Completed(BatchReport),
    /// The batch was abandoned; nothing it computed may be used.
    Cancelled(BatchId),
}

impl BatchOutcome {
    pub fn batch_id(&self) -> BatchId {
        match self {
            Self::Completed(report) => report.batch_id,
            Self::Cancelled(id) => *id,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// The completed report, if the batch was not cancelled.
    pub fn into_report(self) -> Option<BatchReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Cancelled(_) => None,
        }
    }
}

/// Normalize a batch of logos.
///
/// Under [`FailurePolicy::FailFast`] the first load failure is returned as
/// [`LogoSoupError::LoadFailure`] and everything computed so far is dropped.
/// Under [`FailurePolicy::Isolate`] failures are collected in the report.
///
/// Cancellation is checked before each load, raced against each load, and
/// checked once more before the report is returned.
#[instrument(skip_all, fields(batch_id = %token.id(), count = sources.len()))]
pub async fn process_logos<L, C>(
    loader: &L,
    cropper: &C,
    sources: &[LogoSource],
    config: &LogoSoupConfig,
    token: &BatchToken,
) -> Result<BatchOutcome>
where
    L: ImageLoader,
    C: Cropper + ?Sized,
{
    let batch_id = token.id();
    info!(
        base_size = config.base_size,
        scale_factor = config.scale_factor,
        density_aware = config.density_aware,
        crop = config.crop_to_content,
        "Starting logo batch"
    );

    let options = MeasureOptions::from(config);
    let density_factor = config.effective_density_factor();
    let mut logos = Vec::with_capacity(sources.len());
    let mut failures = Vec::new();

    for (index, source) in sources.iter().enumerate() {
        if token.is_cancelled() {
            warn!(index, "Batch cancelled before load");
            return Ok(BatchOutcome::Cancelled(batch_id));
        }

        let loaded = tokio::select! {
            biased;
            _ = token.cancelled() => {
                warn!(index, src = %source.src, "Batch cancelled during load");
                return Ok(BatchOutcome::Cancelled(batch_id));
            }
            loaded = loader.load(&source.src) => loaded,
        };

        let image = match loaded {
            Ok(image) => image,
            Err(err) if token.is_cancelled() => {
                warn!(index, src = %source.src, error = %err, "Load failed in a cancelled batch; discarding");
                return Ok(BatchOutcome::Cancelled(batch_id));
            }
            Err(err) => {
                let failure = LogoFailure {
                    index,
                    src: source.src.clone(),
                    reason: err.to_string(),
                };
                match config.failure_policy {
                    FailurePolicy::FailFast => {
                        warn!(index, src = %source.src, error = %err, "Image failed to load; aborting batch");
                        return Err(LogoSoupError::LoadFailure {
                            index: failure.index,
                            src: failure.src,
                            reason: failure.reason,
                        });
                    }
                    FailurePolicy::Isolate => {
                        warn!(index, src = %source.src, error = %err, "Image failed to load; skipping");
                        failures.push(failure);
                        continue;
                    }
                }
            }
        };

        let measurement = measure_with_content_detection(&image, &options);
        let content_box = measurement.content_box;

        let mut logo = NormalizedLogo::from_measurement(
            source.clone(),
            measurement,
            config.base_size,
            config.scale_factor,
            density_factor,
        );

        if config.crop_to_content
            && let Some(content_box) = content_box
        {
            match cropper.crop(&image, &content_box) {
                Ok(cropped) => logo.cropped_src = Some(cropped),
                Err(err) => {
                    warn!(index, src = %source.src, error = %err, "Crop failed; keeping original image");
                }
            }
        }

        debug!(
            index,
            width = logo.normalized_width,
            height = logo.normalized_height,
            aspect_ratio = logo.aspect_ratio,
            "Logo normalized"
        );
        logos.push(logo);
    }

    if token.is_cancelled() {
        warn!("Batch cancelled after processing; discarding results");
        return Ok(BatchOutcome::Cancelled(batch_id));
    }

    info!(normalized = logos.len(), failed = failures.len(), "Logo batch complete");
    Ok(BatchOutcome::Completed(BatchReport {
        batch_id,
        logos,
        failures,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MemoryLoader;
    use image::{Rgba, RgbaImage};
    use logosoup_core::{AlignmentMode, BoundingBox, visual_center_transform};
    use logosoup_measure::DataUrlCropper;

    fn solid(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([10, 60, 200, 255]))
    }

    fn padded(width: u32, height: u32, content: BoundingBox) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
        for y in content.y..content.y + content.height {
            for x in content.x..content.x + content.width {
                img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
        img
    }

    fn sources(srcs: &[&str]) -> Vec<LogoSource> {
        srcs.iter().map(|s| LogoSource::from(*s)).collect()
    }

    async fn run(loader: &MemoryLoader, srcs: &[LogoSource], config: &LogoSoupConfig) -> Result<BatchOutcome> {
        process_logos(loader, &DataUrlCropper, srcs, config, &BatchToken::new()).await
    }

    #[tokio::test]
    async fn empty_batch_completes_empty() {
        let outcome = run(&MemoryLoader::new(), &[], &LogoSoupConfig::default()).await.unwrap();
        let report = outcome.into_report().unwrap();
        assert!(report.logos.is_empty());
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn wide_and_tall_logos_balance_around_base_size() {
        let loader = MemoryLoader::new()
            .with_image("wide.png", solid(200, 100))
            .with_image("tall.png", solid(100, 200));
        let config = LogoSoupConfig {
            density_aware: false,
            ..Default::default()
        };

        let report = run(&loader, &sources(&["wide.png", "tall.png"]), &config)
            .await
            .unwrap()
            .into_report()
            .unwrap();

        assert_eq!(report.logos.len(), 2);
        let (wide, tall) = (&report.logos[0], &report.logos[1]);
        assert_eq!(wide.src, "wide.png");
        assert_eq!(tall.src, "tall.png");
        assert_eq!(wide.aspect_ratio, 2.0);
        assert_eq!(tall.aspect_ratio, 0.5);
        assert!(wide.normalized_width > 48);
        assert!(tall.normalized_width < 48);
        assert!(wide.pixel_density.is_none());
    }

    #[tokio::test]
    async fn square_logo_with_defaults_is_base_size() {
        let loader = MemoryLoader::new().with_image("square.png", solid(100, 100));
        let config = LogoSoupConfig {
            density_aware: false,
            ..Default::default()
        };
        let report = run(&loader, &sources(&["square.png"]), &config)
            .await
            .unwrap()
            .into_report()
            .unwrap();
        assert_eq!(report.logos[0].normalized_width, 48);
        assert_eq!(report.logos[0].normalized_height, 48);
        assert_eq!(report.logos[0].original_width, 100);
    }

    #[tokio::test]
    async fn content_box_drives_sizing_not_padding() {
        // 40x20 mark centred in a 200x200 transparent canvas.
        let loader = MemoryLoader::new().with_image("padded.png", padded(200, 200, BoundingBox::new(80, 90, 40, 20)));
        let config = LogoSoupConfig {
            density_aware: false,
            ..Default::default()
        };
        let report = run(&loader, &sources(&["padded.png"]), &config)
            .await
            .unwrap()
            .into_report()
            .unwrap();
        let logo = &report.logos[0];
        assert_eq!(logo.content_box, Some(BoundingBox::new(80, 90, 40, 20)));
        assert_eq!(logo.aspect_ratio, 2.0);
        assert_eq!(logo.normalized_width, 68);
    }

    #[tokio::test]
    async fn density_is_measured_when_density_aware() {
        let loader = MemoryLoader::new().with_image("solid.png", solid(100, 100));
        let report = run(&loader, &sources(&["solid.png"]), &LogoSoupConfig::default())
            .await
            .unwrap()
            .into_report()
            .unwrap();
        let logo = &report.logos[0];
        assert_eq!(logo.pixel_density, Some(1.0));
        // Dense mark shrinks: (0.35 / 1.0) ^ 0.25 * 48 = 36.9
        assert_eq!(logo.normalized_width, 37);
    }

    #[tokio::test]
    async fn alt_text_is_carried_through() {
        let loader = MemoryLoader::new().with_image("a.png", solid(10, 10));
        let srcs = vec![LogoSource::new("a.png", "Test Logo")];
        let report = run(&loader, &srcs, &LogoSoupConfig::default())
            .await
            .unwrap()
            .into_report()
            .unwrap();
        assert_eq!(report.logos[0].alt, "Test Logo");
    }

    #[tokio::test]
    async fn fail_fast_aborts_on_first_load_failure() {
        let loader = MemoryLoader::new()
            .with_image("a.png", solid(10, 10))
            .with_image("c.png", solid(10, 10));
        let err = run(&loader, &sources(&["a.png", "broken.png", "c.png"]), &LogoSoupConfig::default())
            .await
            .unwrap_err();
        match err {
            LogoSoupError::LoadFailure { index, src, .. } => {
                assert_eq!(index, 1);
                assert_eq!(src, "broken.png");
            }
            other => panic!("expected LoadFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn isolate_policy_skips_failed_images() {
        let loader = MemoryLoader::new()
            .with_image("a.png", solid(10, 10))
            .with_image("c.png", solid(20, 10));
        let config = LogoSoupConfig {
            failure_policy: FailurePolicy::Isolate,
            ..Default::default()
        };
        let report = run(&loader, &sources(&["a.png", "broken.png", "c.png"]), &config)
            .await
            .unwrap()
            .into_report()
            .unwrap();
        let srcs: Vec<_> = report.logos.iter().map(|l| l.src.as_str()).collect();
        assert_eq!(srcs, ["a.png", "c.png"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 1);
        assert_eq!(report.failures[0].src, "broken.png");
    }

    #[tokio::test]
    async fn crop_to_content_attaches_data_url() {
        let loader = MemoryLoader::new().with_image("padded.png", padded(64, 64, BoundingBox::new(8, 8, 16, 32)));
        let config = LogoSoupConfig {
            crop_to_content: true,
            ..Default::default()
        };
        let report = run(&loader, &sources(&["padded.png"]), &config)
            .await
            .unwrap()
            .into_report()
            .unwrap();
        let logo = &report.logos[0];
        let cropped = logo.cropped_src.as_deref().unwrap();
        assert!(cropped.starts_with("data:image/png;base64,"));
        assert_eq!(logo.display_src(), cropped);
    }

    struct BrokenCropper;

    impl Cropper for BrokenCropper {
        fn crop(&self, _image: &RgbaImage, _content_box: &BoundingBox) -> Result<String> {
            Err(LogoSoupError::ImageError("no drawing surface".into()))
        }
    }

    #[tokio::test]
    async fn crop_failure_falls_back_to_original_source() {
        let loader = MemoryLoader::new().with_image("a.png", solid(10, 10));
        let config = LogoSoupConfig {
            crop_to_content: true,
            ..Default::default()
        };
        let outcome = process_logos(&loader, &BrokenCropper, &sources(&["a.png"]), &config, &BatchToken::new())
            .await
            .unwrap();
        let logo = &outcome.into_report().unwrap().logos[0];
        assert!(logo.cropped_src.is_none());
        assert_eq!(logo.display_src(), "a.png");
    }

    #[tokio::test]
    async fn cancelled_token_yields_no_results() {
        let loader = MemoryLoader::new().with_image("a.png", solid(10, 10));
        let token = BatchToken::new();
        token.cancel();
        let outcome = process_logos(&loader, &DataUrlCropper, &sources(&["a.png"]), &LogoSoupConfig::default(), &token)
            .await
            .unwrap();
        assert_eq!(outcome, BatchOutcome::Cancelled(token.id()));
    }

    /// Cancels the batch from inside the load, then fails it.
    struct CancelThenFail {
        token: BatchToken,
    }

    impl ImageLoader for CancelThenFail {
        fn load(&self, src: &str) -> impl std::future::Future<Output = Result<RgbaImage>> + Send {
            let token = self.token.clone();
            let src = src.to_string();
            async move {
                token.cancel();
                Err(LogoSoupError::ImageNotFound(src))
            }
        }
    }

    #[tokio::test]
    async fn load_failure_after_cancellation_is_discarded() {
        let token = BatchToken::new();
        let loader = CancelThenFail { token: token.clone() };
        let outcome = process_logos(&loader, &DataUrlCropper, &sources(&["x.png"]), &LogoSoupConfig::default(), &token)
            .await
            .unwrap();
        assert_eq!(outcome, BatchOutcome::Cancelled(token.id()));
    }

    #[tokio::test]
    async fn pipeline_is_idempotent() {
        let mut mark = padded(90, 60, BoundingBox::new(5, 10, 70, 30));
        mark.put_pixel(70, 12, Rgba([255, 0, 0, 128]));
        let loader = MemoryLoader::new().with_image("mark.png", mark);
        let config = LogoSoupConfig {
            crop_to_content: true,
            ..Default::default()
        };
        let first = run(&loader, &sources(&["mark.png"]), &config).await.unwrap().into_report().unwrap();
        let second = run(&loader, &sources(&["mark.png"]), &config).await.unwrap().into_report().unwrap();
        assert_eq!(first.logos, second.logos);
    }

    #[tokio::test]
    async fn off_centre_mark_gets_a_visual_centre_transform() {
        // Heavy block on the left, thin stroke on the right, sharing one box.
        let mut img = RgbaImage::from_pixel(100, 40, Rgba([255, 255, 255, 255]));
        for y in 0..40 {
            for x in 0..30 {
                img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
            img.put_pixel(99, y, Rgba([0, 0, 0, 255]));
        }
        let loader = MemoryLoader::new().with_image("mark.png", img);
        let config = LogoSoupConfig {
            density_aware: false,
            ..Default::default()
        };
        let report = run(&loader, &sources(&["mark.png"]), &config).await.unwrap().into_report().unwrap();
        let logo = &report.logos[0];

        assert_eq!(visual_center_transform(logo, AlignmentMode::Bounds), None);
        let t = visual_center_transform(logo, AlignmentMode::VisualCenterX).unwrap();
        // Centroid is left of centre, so the logo is pushed right.
        assert!(t.x > 0.5);
        assert_eq!(t.y, 0.0);
    }

    #[test]
    fn report_serializes_for_renderers() {
        let report = BatchReport {
            batch_id: BatchId::new(),
            logos: Vec::new(),
            failures: vec![LogoFailure {
                index: 0,
                src: "x.png".into(),
                reason: "not found".into(),
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["failures"][0]["src"], "x.png");
    }
}
