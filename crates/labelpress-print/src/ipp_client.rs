// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Async IPP client for submitting label jobs to a CUPS queue.
//
// Uses the `ipp` crate's async API to send a Print-Job (RFC 8011 §4.2.1)
// carrying the resolved job attributes. Nothing else is sent: no status
// polling, no cancellation.

use std::io::Cursor;

use ipp::prelude::*;
use tracing::{debug, error, info, instrument};

use labelpress_core::attributes::{AttributeSet, keys};
use labelpress_core::error::{LabelpressError, Result};

/// MIME type of rendered labels.
pub const PDF_DOCUMENT_FORMAT: &str = "application/pdf";

/// Async IPP client wrapping the `ipp` crate.
///
/// Each instance is bound to a single printer URI. All methods are async and
/// require a Tokio runtime.
pub struct IppClient {
    /// The target printer URI (ipp:// or ipps://).
    uri: Uri,
}

impl IppClient {
    /// Create a new client targeting the given printer URI.
    pub fn new(uri: &str) -> Result<Self> {
        let parsed: Uri = uri
            .parse()
            .map_err(|e| LabelpressError::Transport(format!("invalid URI '{uri}': {e}")))?;
        Ok(Self { uri: parsed })
    }

    /// Return the printer URI this client is targeting.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Submit a PDF as a Print-Job with the given job attributes.
    ///
    /// Returns the job-id assigned by the server on success.
    #[instrument(skip(self, document_bytes, attributes), fields(uri = %self.uri, job_name = %job_name))]
    pub async fn print_job(
        &self,
        document_bytes: Vec<u8>,
        job_name: &str,
        attributes: &AttributeSet,
    ) -> Result<i32> {
        let payload = IppPayload::new(Cursor::new(document_bytes));

        let operation = IppOperationBuilder::print_job(self.uri.clone(), payload)
            .job_title(job_name)
            .document_format(PDF_DOCUMENT_FORMAT)
            .attributes(attributes.iter().map(|(key, value)| job_attribute(key, value)))
            .build();

        let client = AsyncIppClient::new(self.uri.clone());

        info!(attributes = attributes.len(), "sending Print-Job");
        let response = client
            .send(operation)
            .await
            .map_err(|e| LabelpressError::Transport(format!("Print-Job: {e}")))?;

        if !response.header().status_code().is_success() {
            let code = response.header().status_code();
            error!(status = ?code, "Print-Job failed");
            return Err(LabelpressError::Transport(format!(
                "Print-Job returned status {code:?}"
            )));
        }

        // The job-id is in the Job Attributes group.
        let job_id = extract_job_id(response.attributes()).ok_or_else(|| {
            LabelpressError::Transport("Print-Job response missing job-id attribute".into())
        })?;

        info!(job_id, "print job accepted by queue");
        Ok(job_id)
    }
}

// ---------------------------------------------------------------------------
// Attribute encoding
// ---------------------------------------------------------------------------

/// Encode one resolved attribute with the IPP value type the queue expects.
///
/// `copies` is an integer and `orientation-requested` an enum when numeric.
/// `BlankSpace` is the PPD's boolean option. Media, scaling and the PPD's
/// `TrimMode`/`FeedWhere`/`FeedDist` choices are keywords. Any other option
/// is typed from its text: `true`/`false`, then integer, then keyword.
pub fn job_attribute(key: &str, value: &str) -> IppAttribute {
    let ipp_value = match key {
        keys::COPIES => integer(value)
            .map(IppValue::Integer)
            .unwrap_or_else(|| keyword(value)),
        keys::ORIENTATION_REQUESTED => integer(value)
            .map(IppValue::Enum)
            .unwrap_or_else(|| keyword(value)),
        keys::BLANK_SPACE => boolean(value)
            .map(IppValue::Boolean)
            .unwrap_or_else(|| keyword(value)),
        keys::MEDIA | keys::PRINT_SCALING | keys::TRIM_MODE | keys::FEED_WHERE | keys::FEED_DIST => {
            keyword(value)
        }
        _ => boolean(value)
            .map(IppValue::Boolean)
            .or_else(|| integer(value).map(IppValue::Integer))
            .unwrap_or_else(|| keyword(value)),
    };

    debug!(key, value = %ipp_value, "encoded job attribute");
    IppAttribute::new(key, ipp_value)
}

fn keyword(value: &str) -> IppValue {
    IppValue::Keyword(value.to_owned())
}

fn boolean(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Optional minus sign followed by decimal digits, within `i32`.
fn integer(value: &str) -> Option<i32> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Extract the `job-id` integer from a response's Job Attributes group.
fn extract_job_id(attrs: &IppAttributes) -> Option<i32> {
    for group in attrs.groups_of(DelimiterTag::JobAttributes) {
        if let Some(attr) = group.attributes().get("job-id")
            && let IppValue::Integer(id) = attr.value()
        {
            return Some(*id);
        }
    }
    None
}
