// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Configuration surface.
//
// Settings arrive as plain strings (environment, JSON file) under the same
// upper-case keys the host stores them with. `RawSettings` holds them as-is;
// `PrintSettings::from_raw` validates them into the typed snapshot.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{LabelpressError, Result};
use crate::job_options::JobOptions;
use crate::types::{MAX_FEED_AFTER_MM, MediaMode, PrintSettings, clamp_feed_mm};

pub const DEFAULT_CUPS_HOST: &str = "portterm";
pub const DEFAULT_CUPS_QUEUE: &str = "devterm_printer";
pub const DEFAULT_CUPS_PORT: u16 = 631;

/// Unvalidated settings, keyed exactly as the host stores them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSettings {
    #[serde(rename = "CUPS_HOST", default, skip_serializing_if = "Option::is_none")]
    pub cups_host: Option<String>,
    #[serde(rename = "CUPS_QUEUE", default, skip_serializing_if = "Option::is_none")]
    pub cups_queue: Option<String>,
    #[serde(rename = "CUPS_PORT", default, skip_serializing_if = "Option::is_none")]
    pub cups_port: Option<String>,
    #[serde(rename = "DEFAULT_MEDIA", default, skip_serializing_if = "Option::is_none")]
    pub default_media: Option<String>,
    #[serde(
        rename = "DEFAULT_FEED_AFTER_MM",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_feed_after_mm: Option<String>,
    #[serde(rename = "JOB_OPTIONS", default, skip_serializing_if = "Option::is_none")]
    pub job_options: Option<String>,
}

impl RawSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            cups_host: lookup("CUPS_HOST"),
            cups_queue: lookup("CUPS_QUEUE"),
            cups_port: lookup("CUPS_PORT"),
            default_media: lookup("DEFAULT_MEDIA"),
            default_feed_after_mm: lookup("DEFAULT_FEED_AFTER_MM"),
            job_options: lookup("JOB_OPTIONS"),
        }
    }

    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let raw: Self = serde_json::from_str(&text)?;
        debug!(path = %path.display(), "settings file loaded");
        Ok(raw)
    }

    /// Layer `other` over `self`; every value present in `other` wins.
    pub fn merge(self, other: RawSettings) -> Self {
        Self {
            cups_host: other.cups_host.or(self.cups_host),
            cups_queue: other.cups_queue.or(self.cups_queue),
            cups_port: other.cups_port.or(self.cups_port),
            default_media: other.default_media.or(self.default_media),
            default_feed_after_mm: other.default_feed_after_mm.or(self.default_feed_after_mm),
            job_options: other.job_options.or(self.job_options),
        }
    }
}

impl PrintSettings {
    /// Validate raw settings into a snapshot.
    ///
    /// Missing or blank values take the queue defaults.
    pub fn from_raw(raw: &RawSettings) -> Result<Self> {
        let defaults = PrintSettings::default();

        let cups_port = match non_blank(&raw.cups_port) {
            Some(port) => parse_port(port)?,
            None => defaults.cups_port,
        };

        let default_media = match raw.default_media.as_deref() {
            Some(media) => MediaMode::parse(media),
            None => defaults.default_media.clone(),
        };

        let feed_after_mm = match non_blank(&raw.default_feed_after_mm) {
            Some(feed) => parse_feed_mm(feed)?,
            None => i64::from(defaults.feed_after_mm()),
        };

        let job_options = match raw.job_options.as_deref() {
            Some(text) => JobOptions::parse(text)?,
            None => defaults.job_options.clone(),
        };

        let settings = PrintSettings::new(
            non_blank(&raw.cups_host).unwrap_or(DEFAULT_CUPS_HOST),
            non_blank(&raw.cups_queue).unwrap_or(DEFAULT_CUPS_QUEUE),
            cups_port,
        )
        .with_media(default_media)
        .with_feed_after_mm(feed_after_mm)
        .with_job_options(job_options);

        debug!(
            uri = %settings.printer_uri(),
            media = %settings.default_media,
            feed_after_mm = settings.feed_after_mm(),
            job_options = settings.job_options.len(),
            "settings resolved"
        );
        Ok(settings)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_port(value: &str) -> Result<u16> {
    match value.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(LabelpressError::InvalidConfiguration(format!(
            "CUPS_PORT '{value}' is not a port number (1-65535)"
        ))),
    }
}

fn parse_feed_mm(value: &str) -> Result<i64> {
    let feed = value.parse::<i64>().map_err(|_| {
        LabelpressError::InvalidConfiguration(format!(
            "DEFAULT_FEED_AFTER_MM '{value}' is not a whole number of millimetres"
        ))
    })?;

    if i64::from(clamp_feed_mm(feed)) != feed {
        warn!(
            requested = feed,
            max = MAX_FEED_AFTER_MM,
            "feed after job out of range, clamping"
        );
    }
    Ok(feed)
}
