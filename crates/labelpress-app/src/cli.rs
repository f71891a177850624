// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line surface.
//
// Stored settings come from the environment, optionally overlaid by a JSON
// settings file. Flags given for this run are per-job overrides on top.

use std::path::PathBuf;

use clap::Parser;

use labelpress_core::config::RawSettings;
use labelpress_core::error::Result;
use labelpress_core::job_options::JobOptions;
use labelpress_core::types::{JobOverrides, LabelJob, MediaMode, PrintSettings};

/// Send a rendered PDF label to a CUPS queue over IPP.
#[derive(Debug, Parser)]
#[command(name = "labelpress", version)]
pub struct Cli {
    /// Rendered label document (PDF).
    pub file: PathBuf,

    /// Number of copies.
    #[arg(short = 'n', long, default_value_t = 1, allow_negative_numbers = true)]
    pub copies: i32,

    /// Media for this job: `blank`, `auto`, or an explicit token such as `Custom.48x30mm`.
    #[arg(long)]
    pub media: Option<String>,

    /// Extra feed after the job in millimetres (0 disables, max 45).
    #[arg(long, allow_negative_numbers = true)]
    pub feed_after_mm: Option<i64>,

    /// Job options for this job, `key=value` separated by commas or newlines.
    #[arg(long)]
    pub job_options: Option<String>,

    /// Job name shown in the queue.
    #[arg(long)]
    pub title: Option<String>,

    /// JSON settings file using the CUPS_HOST, CUPS_QUEUE, ... keys.
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Print the resolved job attributes instead of submitting.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Stored settings: environment, then the settings file if given.
    pub fn raw_settings(&self) -> Result<RawSettings> {
        let env = RawSettings::from_env();
        match &self.settings {
            Some(path) => Ok(env.merge(RawSettings::load(path)?)),
            None => Ok(env),
        }
    }

    /// Per-job overrides from the command line.
    pub fn overrides(&self) -> Result<JobOverrides> {
        Ok(JobOverrides {
            media: self.media.as_deref().map(MediaMode::parse),
            feed_after_mm: self.feed_after_mm,
            job_options: self
                .job_options
                .as_deref()
                .map(JobOptions::parse)
                .transpose()?,
        })
    }

    /// Build the job for `document` on top of the stored settings.
    pub fn label_job(&self, stored: &PrintSettings, document: Vec<u8>) -> Result<LabelJob> {
        let settings = stored.with_overrides(&self.overrides()?);
        let job = LabelJob::new(document, self.copies, settings);

        let title = self.title.clone().or_else(|| {
            self.file
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        });
        Ok(match title {
            Some(title) => job.with_title(title),
            None => job,
        })
    }
}
