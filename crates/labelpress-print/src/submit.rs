// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job submission seam.
//
// The print pipeline only needs "send this document with these attributes to
// that queue". `JobSubmitter` is that contract; `IppSubmitter` fulfils it over
// IPP. Errors are reported as `LabelpressError::Transport` and are not retried.

use std::future::Future;

use labelpress_core::attributes::AttributeSet;
use labelpress_core::error::Result;
use labelpress_core::types::{PrintSettings, printer_uri};
use tracing::instrument;

use crate::ipp_client::IppClient;

/// Where a job is sent, taken straight from the settings snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueTarget {
    pub host: String,
    pub port: u16,
    pub queue: String,
}

impl QueueTarget {
    pub fn from_settings(settings: &PrintSettings) -> Self {
        Self {
            host: settings.cups_host.clone(),
            port: settings.cups_port,
            queue: settings.cups_queue.clone(),
        }
    }

    /// `ipp://<host>:<port>/printers/<queue>`
    pub fn uri(&self) -> String {
        printer_uri(&self.host, self.port, &self.queue)
    }
}

/// Submits one resolved job to a print queue.
pub trait JobSubmitter: Send + Sync {
    /// Send `document` with `attributes`, returning the queue's job id.
    fn submit(
        &self,
        target: &QueueTarget,
        job_name: &str,
        attributes: &AttributeSet,
        document: &[u8],
    ) -> impl Future<Output = Result<i32>> + Send;
}

/// Submits jobs with an IPP Print-Job request.
#[derive(Debug, Clone, Copy, Default)]
pub struct IppSubmitter;

impl JobSubmitter for IppSubmitter {
    #[instrument(skip_all, fields(uri = %target.uri(), bytes_len = document.len()))]
    async fn submit(
        &self,
        target: &QueueTarget,
        job_name: &str,
        attributes: &AttributeSet,
        document: &[u8],
    ) -> Result<i32> {
        let client = IppClient::new(&target.uri())?;
        client.print_job(document.to_vec(), job_name, attributes).await
    }
}
