// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Labelpress — Core types, configuration, and error definitions shared across
// all crates.

pub mod attributes;
pub mod config;
pub mod error;
pub mod job_options;
pub mod types;

pub use attributes::AttributeSet;
pub use config::RawSettings;
pub use error::LabelpressError;
pub use job_options::JobOptions;
pub use types::*;
