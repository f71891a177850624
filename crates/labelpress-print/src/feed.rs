// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Post-job feed quantization.
//
// The label queue's PPD exposes feed distance as discrete steps. A requested
// distance is rounded to the nearest step (exact midpoints go up to the larger
// step) and clamped into the range the device accepts.

use labelpress_core::attributes::{AttributeSet, keys};
use labelpress_core::types::MAX_FEED_AFTER_MM;

/// Feed step size of the DevTerm queue, in millimetres.
pub const DEFAULT_FEED_STEP_MM: u32 = 3;

/// `FeedWhere` value for a feed after the whole job.
pub const FEED_AFTER_JOB: &str = "AfterJob";

/// A quantized feed-control attribute pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedControl {
    /// `FeedWhere` value.
    pub feed_where: String,
    /// `FeedDist` value in millimetres.
    pub feed_dist_mm: u32,
}

impl FeedControl {
    /// Append `FeedWhere` then `FeedDist`.
    pub fn append_to(&self, attributes: &mut AttributeSet) {
        attributes.push(keys::FEED_WHERE, self.feed_where.as_str());
        attributes.push(keys::FEED_DIST, self.feed_dist_mm.to_string());
    }
}

/// Maps a requested feed distance onto the device's feed steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuantizer {
    step_mm: u32,
    feed_where: String,
}

impl FeedQuantizer {
    /// Quantizer with the given step. A zero step is treated as 1 mm.
    pub fn new(step_mm: u32, feed_where: impl Into<String>) -> Self {
        Self {
            step_mm: step_mm.max(1),
            feed_where: feed_where.into(),
        }
    }

    pub fn step_mm(&self) -> u32 {
        self.step_mm
    }

    /// Largest feed the device accepts: the last whole step within range.
    pub fn max_feed_mm(&self) -> u32 {
        u32::from(MAX_FEED_AFTER_MM) / self.step_mm * self.step_mm
    }

    /// Round `requested_mm` to the nearest step and clamp it into range.
    ///
    /// Never fails: feed is physical tuning, so out-of-range requests are
    /// clamped rather than rejected.
    pub fn quantize(&self, requested_mm: i64) -> FeedControl {
        let step = i64::from(self.step_mm);
        let max = i64::from(self.max_feed_mm());
        // Anything past one step beyond the maximum clamps the same way, and
        // bounding it first keeps the rounding below from overflowing.
        let requested_mm = requested_mm.clamp(0, max + step);
        let remainder = requested_mm.rem_euclid(step);
        let lower = requested_mm - remainder;
        // Ties (2 * remainder == step) go to the larger step.
        let nearest = if 2 * remainder >= step { lower + step } else { lower };

        let feed_dist_mm = nearest.clamp(0, max) as u32;

        FeedControl {
            feed_where: self.feed_where.clone(),
            feed_dist_mm,
        }
    }
}

impl Default for FeedQuantizer {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_STEP_MM, FEED_AFTER_JOB)
    }
}
