// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// labelpress-document — Document inspection for the Labelpress job pipeline.
//
// Reads the page geometry of rendered label PDFs and turns it into a media
// token for auto media selection.

pub mod detect;
pub mod pdf;

// Re-export the primary structs so callers can use `labelpress_document::MediaSizeDetector` etc.
pub use detect::{MediaBoxScan, MediaSizeDetector, MediaStrategy, PageSize, StructuredPdf};
pub use pdf::reader::PdfReader;
