// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Labelpress job pipeline.

use serde::{Deserialize, Serialize};

use crate::job_options::JobOptions;

/// Largest post-job feed the queue's PPD accepts, in millimetres.
pub const MAX_FEED_AFTER_MM: u8 = 45;

/// Job name used when the caller supplies no title.
pub const DEFAULT_JOB_TITLE: &str = "label";

/// Millimetres per PDF point (1 pt = 1/72 in).
pub const MM_PER_POINT: f64 = 25.4 / 72.0;

/// How the `media` job attribute is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaMode {
    /// Send no `media` attribute; the queue default applies.
    Blank,
    /// Derive the media size from the document's first page.
    Auto,
    /// Send this media token verbatim (e.g. `Custom.48x30mm`).
    Explicit(String),
}

impl MediaMode {
    /// Interpret a configuration value.
    ///
    /// Empty input and `blank` select [`MediaMode::Blank`], `auto` selects
    /// [`MediaMode::Auto`] (both case-insensitive); anything else is an
    /// explicit token, trimmed but otherwise untouched.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("blank") {
            Self::Blank
        } else if value.eq_ignore_ascii_case("auto") {
            Self::Auto
        } else {
            Self::Explicit(value.to_owned())
        }
    }
}

impl std::fmt::Display for MediaMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => f.write_str("blank"),
            Self::Auto => f.write_str("auto"),
            Self::Explicit(token) => f.write_str(token),
        }
    }
}

/// A media token ready to be sent as the `media` job attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaSize(String);

impl MediaSize {
    /// Build a `Custom.<W>x<H>mm` token from a page size in PDF points.
    pub fn from_points(width_pt: f64, height_pt: f64) -> Self {
        Self::from_millimetres(width_pt * MM_PER_POINT, height_pt * MM_PER_POINT)
    }

    /// Build a `Custom.<W>x<H>mm` token, rounding each side half away from
    /// zero to whole millimetres.
    pub fn from_millimetres(width_mm: f64, height_mm: f64) -> Self {
        let width = width_mm.abs().round() as u64;
        let height = height_mm.abs().round() as u64;
        Self(format!("Custom.{width}x{height}mm"))
    }

    /// Wrap an explicitly configured token.
    pub fn explicit(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MediaSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable snapshot of the label printer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintSettings {
    /// CUPS server hostname.
    pub cups_host: String,
    /// Filtered CUPS queue name.
    pub cups_queue: String,
    /// CUPS server port.
    pub cups_port: u16,
    /// Media selection policy.
    pub default_media: MediaMode,
    /// Extra feed after the job, always within `0..=MAX_FEED_AFTER_MM`.
    #[serde(deserialize_with = "deserialize_feed_mm")]
    default_feed_after_mm: u8,
    /// Job options sent ahead of every resolved attribute.
    pub job_options: JobOptions,
}

impl PrintSettings {
    pub fn new(
        cups_host: impl Into<String>,
        cups_queue: impl Into<String>,
        cups_port: u16,
    ) -> Self {
        Self {
            cups_host: cups_host.into(),
            cups_queue: cups_queue.into(),
            cups_port,
            ..Self::default()
        }
    }

    /// Post-job feed in millimetres.
    pub fn feed_after_mm(&self) -> u8 {
        self.default_feed_after_mm
    }

    /// Set the post-job feed, clamping into `0..=MAX_FEED_AFTER_MM`.
    pub fn with_feed_after_mm(mut self, feed_mm: i64) -> Self {
        self.default_feed_after_mm = clamp_feed_mm(feed_mm);
        self
    }

    pub fn with_media(mut self, media: MediaMode) -> Self {
        self.default_media = media;
        self
    }

    pub fn with_job_options(mut self, job_options: JobOptions) -> Self {
        self.job_options = job_options;
        self
    }

    /// Layer per-job overrides on top of this snapshot.
    ///
    /// Each field present in `overrides` replaces the stored value outright;
    /// job options are never merged.
    pub fn with_overrides(&self, overrides: &JobOverrides) -> Self {
        let mut settings = self.clone();
        if let Some(media) = &overrides.media {
            settings.default_media = media.clone();
        }
        if let Some(feed_mm) = overrides.feed_after_mm {
            settings.default_feed_after_mm = clamp_feed_mm(feed_mm);
        }
        if let Some(job_options) = &overrides.job_options {
            settings.job_options = job_options.clone();
        }
        settings
    }

    /// IPP URI of the configured queue.
    pub fn printer_uri(&self) -> String {
        printer_uri(&self.cups_host, self.cups_port, &self.cups_queue)
    }
}

/// `ipp://<host>:<port>/printers/<queue>`
pub fn printer_uri(host: &str, port: u16, queue: &str) -> String {
    format!("ipp://{host}:{port}/printers/{queue}")
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            cups_host: crate::config::DEFAULT_CUPS_HOST.into(),
            cups_queue: crate::config::DEFAULT_CUPS_QUEUE.into(),
            cups_port: crate::config::DEFAULT_CUPS_PORT,
            default_media: MediaMode::Auto,
            default_feed_after_mm: 0,
            job_options: JobOptions::label_defaults(),
        }
    }
}

/// Clamp a requested feed distance into the supported range.
pub fn clamp_feed_mm(feed_mm: i64) -> u8 {
    feed_mm.clamp(0, i64::from(MAX_FEED_AFTER_MM)) as u8
}

fn deserialize_feed_mm<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    i64::deserialize(deserializer).map(clamp_feed_mm)
}

/// Per-job overrides supplied by the host alongside a print event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOverrides {
    pub media: Option<MediaMode>,
    pub feed_after_mm: Option<i64>,
    pub job_options: Option<JobOptions>,
}

/// One label print request.
#[derive(Debug, Clone)]
pub struct LabelJob {
    /// Rendered document (PDF).
    pub document: Vec<u8>,
    /// Requested copies; must be at least 1.
    pub copies: i32,
    /// Human-readable job name shown in the queue.
    pub title: Option<String>,
    /// Settings snapshot with any per-job overrides already applied.
    pub settings: PrintSettings,
}

impl LabelJob {
    pub fn new(document: Vec<u8>, copies: i32, settings: PrintSettings) -> Self {
        Self {
            document,
            copies,
            title: None,
            settings,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The `job-name` to submit: the title when non-blank, else the default.
    pub fn job_name(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or(DEFAULT_JOB_TITLE)
    }
}
