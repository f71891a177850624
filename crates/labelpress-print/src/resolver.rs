// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job-attribute resolution.
//
// Turns a label job into the exact, ordered attribute list sent with the
// Print-Job request:
//
//   1. configured job options, verbatim and in order
//   2. copies
//   3. media (nothing / auto-detected / explicit token)
//   4. FeedWhere + FeedDist when a post-job feed is configured
//
// Job options win over resolved values: when an option already names one of
// copies, media, FeedWhere or FeedDist, the resolver leaves that key alone.
// Resolution is all-or-nothing; any failure returns no attributes.

use labelpress_core::attributes::{AttributeSet, keys};
use labelpress_core::error::{LabelpressError, Result};
use labelpress_core::types::{LabelJob, MediaMode, MediaSize};
use labelpress_document::MediaSizeDetector;
use tracing::debug;

use crate::feed::FeedQuantizer;

/// Resolves label jobs into job attributes. Holds no per-job state.
#[derive(Debug, Default)]
pub struct AttributeResolver {
    detector: MediaSizeDetector,
    quantizer: FeedQuantizer,
}

impl AttributeResolver {
    pub fn new(detector: MediaSizeDetector, quantizer: FeedQuantizer) -> Self {
        Self {
            detector,
            quantizer,
        }
    }

    /// Build the attribute list for `job`.
    pub fn resolve(&self, job: &LabelJob) -> Result<AttributeSet> {
        let settings = &job.settings;
        let options = &settings.job_options;

        if job.copies < 1 {
            return Err(LabelpressError::InvalidJobParameter(format!(
                "copies must be at least 1, got {}",
                job.copies
            )));
        }

        let mut attributes = AttributeSet::new();
        for (key, value) in options.iter() {
            attributes.push(key, value);
        }

        if !options.contains_key(keys::COPIES) {
            attributes.push(keys::COPIES, job.copies.to_string());
        }

        if !options.contains_key(keys::MEDIA)
            && let Some(media) = self.resolve_media(&settings.default_media, &job.document)?
        {
            attributes.push(keys::MEDIA, media.as_str());
        }

        let feed_mm = settings.feed_after_mm();
        if feed_mm > 0 {
            let feed = self.quantizer.quantize(i64::from(feed_mm));
            if !options.contains_key(keys::FEED_WHERE) {
                attributes.push(keys::FEED_WHERE, feed.feed_where.as_str());
            }
            if !options.contains_key(keys::FEED_DIST) {
                attributes.push(keys::FEED_DIST, feed.feed_dist_mm.to_string());
            }
        }

        debug!(
            count = attributes.len(),
            copies = job.copies,
            feed_after_mm = feed_mm,
            "job attributes resolved"
        );
        Ok(attributes)
    }

    /// Media token for the configured mode, `None` for the queue default.
    fn resolve_media(&self, mode: &MediaMode, document: &[u8]) -> Result<Option<MediaSize>> {
        match mode {
            MediaMode::Blank => Ok(None),
            MediaMode::Auto => self.detector.detect(document).map(Some),
            MediaMode::Explicit(token) if token.trim().is_empty() => Err(
                LabelpressError::InvalidConfiguration("explicit media token is empty".into()),
            ),
            MediaMode::Explicit(token) => Ok(Some(MediaSize::explicit(token.as_str()))),
        }
    }
}
