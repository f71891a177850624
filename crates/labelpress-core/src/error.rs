// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Labelpress.

use thiserror::Error;

/// Top-level error type for all Labelpress operations.
///
/// Every variant is fatal for the job it was raised for: nothing inside the
/// workspace retries, and nothing is submitted once resolution has failed.
#[derive(Debug, Error)]
pub enum LabelpressError {
    // -- Resolution errors --
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid job parameter: {0}")]
    InvalidJobParameter(String),

    #[error("media size detection failed: {0}")]
    MediaDetection(String),

    // -- Submission --
    #[error("print submission failed: {0}")]
    Transport(String),

    // -- Settings sources --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LabelpressError>;
