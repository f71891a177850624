// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label print pipeline: resolve attributes, then submit once.
//
// Every resolution error surfaces before the queue is contacted. Submission
// errors come back exactly as the submitter reported them.

use labelpress_core::attributes::AttributeSet;
use labelpress_core::error::Result;
use labelpress_core::types::LabelJob;
use tracing::{error, info, instrument};

use crate::resolver::AttributeResolver;
use crate::submit::{IppSubmitter, JobSubmitter, QueueTarget};

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedJob {
    /// Job id assigned by the queue.
    pub job_id: i32,
    /// Queue the job went to.
    pub printer_uri: String,
    /// Attributes sent with the job.
    pub attributes: AttributeSet,
}

/// Resolves and submits label jobs.
pub struct LabelPrinter<S = IppSubmitter> {
    resolver: AttributeResolver,
    submitter: S,
}

impl LabelPrinter<IppSubmitter> {
    /// Printer that submits over IPP with the stock resolver.
    pub fn ipp() -> Self {
        Self::new(AttributeResolver::default(), IppSubmitter)
    }
}

impl<S: JobSubmitter> LabelPrinter<S> {
    pub fn new(resolver: AttributeResolver, submitter: S) -> Self {
        Self {
            resolver,
            submitter,
        }
    }

    pub fn resolver(&self) -> &AttributeResolver {
        &self.resolver
    }

    /// Resolve the job's attributes without submitting anything.
    pub fn preview(&self, job: &LabelJob) -> Result<AttributeSet> {
        self.resolver.resolve(job)
    }

    /// Resolve and submit `job`.
    #[instrument(skip_all, fields(uri = %job.settings.printer_uri(), copies = job.copies))]
    pub async fn print(&self, job: &LabelJob) -> Result<SubmittedJob> {
        let target = QueueTarget::from_settings(&job.settings);

        info!(
            media = %job.settings.default_media,
            feed_after_mm = job.settings.feed_after_mm(),
            job_name = job.job_name(),
            bytes_len = job.document.len(),
            "printing label"
        );

        let attributes = self.resolver.resolve(job)?;

        let job_id = self
            .submitter
            .submit(&target, job.job_name(), &attributes, &job.document)
            .await
            .inspect_err(|err| error!(%err, "label submission failed"))?;

        info!(job_id, "label submitted");
        Ok(SubmittedJob {
            job_id,
            printer_uri: target.uri(),
            attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use labelpress_core::error::LabelpressError;
    use labelpress_core::types::{MediaMode, PrintSettings};

    const LABEL_DOC: &[u8] = b"%PDF-1.4\n1 0 obj << /Type /Page /MediaBox [0 0 136 85] >>";

    #[derive(Default)]
    struct RecordingSubmitter {
        calls: Mutex<Vec<(QueueTarget, String, AttributeSet, usize)>>,
    }

    impl JobSubmitter for RecordingSubmitter {
        async fn submit(
            &self,
            target: &QueueTarget,
            job_name: &str,
            attributes: &AttributeSet,
            document: &[u8],
        ) -> Result<i32> {
            let mut calls = self.calls.lock().unwrap();
            calls.push((
                target.clone(),
                job_name.to_owned(),
                attributes.clone(),
                document.len(),
            ));
            Ok(calls.len() as i32 + 40)
        }
    }

    struct RefusingSubmitter;

    impl JobSubmitter for RefusingSubmitter {
        async fn submit(
            &self,
            _target: &QueueTarget,
            _job_name: &str,
            _attributes: &AttributeSet,
            _document: &[u8],
        ) -> Result<i32> {
            Err(LabelpressError::Transport("connection refused".into()))
        }
    }

    fn printer() -> LabelPrinter<RecordingSubmitter> {
        LabelPrinter::new(AttributeResolver::default(), RecordingSubmitter::default())
    }

    #[tokio::test]
    async fn submits_resolved_attributes_to_configured_queue() {
        let printer = printer();
        let settings = PrintSettings::new("portterm", "devterm_printer", 631).with_feed_after_mm(10);
        let job = LabelJob::new(LABEL_DOC.to_vec(), 2, settings).with_title("Bin A-12");

        let submitted = printer.print(&job).await.unwrap();
        assert_eq!(submitted.job_id, 41);
        assert_eq!(submitted.printer_uri, "ipp://portterm:631/printers/devterm_printer");
        assert_eq!(submitted.attributes.get("media"), Some("Custom.48x30mm"));
        assert_eq!(submitted.attributes.get("FeedDist"), Some("9"));

        let calls = printer.submitter.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (target, job_name, attributes, bytes) = &calls[0];
        assert_eq!(target.queue, "devterm_printer");
        assert_eq!(job_name, "Bin A-12");
        assert_eq!(attributes, &submitted.attributes);
        assert_eq!(*bytes, LABEL_DOC.len());
    }

    #[tokio::test]
    async fn resolution_failure_submits_nothing() {
        let printer = printer();
        let settings = PrintSettings::default().with_media(MediaMode::Auto);
        let job = LabelJob::new(b"no geometry here".to_vec(), 1, settings);

        let err = printer.print(&job).await.unwrap_err();
        assert!(matches!(err, LabelpressError::MediaDetection(_)));
        assert!(printer.submitter.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_copies_submit_nothing() {
        let printer = printer();
        let job = LabelJob::new(LABEL_DOC.to_vec(), 0, PrintSettings::default());

        let err = printer.print(&job).await.unwrap_err();
        assert!(matches!(err, LabelpressError::InvalidJobParameter(_)));
        assert!(printer.submitter.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn transport_errors_pass_through_unchanged() {
        let printer = LabelPrinter::new(AttributeResolver::default(), RefusingSubmitter);
        let job = LabelJob::new(LABEL_DOC.to_vec(), 1, PrintSettings::default());

        let err = printer.print(&job).await.unwrap_err();
        match err {
            LabelpressError::Transport(detail) => assert_eq!(detail, "connection refused"),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn preview_resolves_without_submitting() {
        let printer = printer();
        let settings = PrintSettings::default().with_media(MediaMode::Blank);
        let attrs = printer
            .preview(&LabelJob::new(Vec::new(), 1, settings))
            .unwrap();
        assert!(!attrs.contains_key("media"));
        assert!(printer.submitter.calls.lock().unwrap().is_empty());
    }
}
