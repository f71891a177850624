// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Media-size auto-detection.
//
// Strategies are tried in order and the first page size found wins:
//   1. StructuredPdf: parse the PDF and read the first page's MediaBox
//   2. MediaBoxScan: regex over the raw bytes for a `/MediaBox [...]`
//
// When every strategy comes back empty the job fails. A wrong media size
// miscuts the label, so there is no silent default.

use std::sync::LazyLock;

use labelpress_core::error::{LabelpressError, Result};
use labelpress_core::types::MediaSize;
use regex::bytes::Regex;
use tracing::{debug, instrument, warn};

use crate::pdf::reader::PdfReader;

static MEDIA_BOX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"/MediaBox\s*\[\s*(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)\s*\]",
    )
    .expect("BUG: invalid MEDIA_BOX_RE regex literal")
});

/// Physical page size in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_pt: f64,
    pub height_pt: f64,
}

impl PageSize {
    /// Size of a `[llx, lly, urx, ury]` rectangle. Returns `None` for boxes
    /// with no area, which cannot describe real media.
    pub fn from_rect(rect: [f64; 4]) -> Option<Self> {
        let [x1, y1, x2, y2] = rect;
        let width_pt = (x2 - x1).abs();
        let height_pt = (y2 - y1).abs();
        (width_pt > 0.0 && height_pt > 0.0).then_some(Self {
            width_pt,
            height_pt,
        })
    }

    pub fn media_size(&self) -> MediaSize {
        MediaSize::from_points(self.width_pt, self.height_pt)
    }
}

/// One way of finding the page size of a document.
pub trait MediaStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Page size of the first page, or `None` if this strategy cannot tell.
    fn detect(&self, document: &[u8]) -> Option<PageSize>;
}

/// Parse the document as a PDF and read the first page's MediaBox.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredPdf;

impl MediaStrategy for StructuredPdf {
    fn name(&self) -> &'static str {
        "structured-pdf"
    }

    fn detect(&self, document: &[u8]) -> Option<PageSize> {
        let rect = PdfReader::from_bytes(document)
            .and_then(|reader| reader.first_page_media_box())
            .map_err(|err| debug!(%err, "structured PDF parse failed"))
            .ok()?;
        PageSize::from_rect(rect)
    }
}

/// Scan the raw bytes for the first `/MediaBox [x1 y1 x2 y2]` declaration.
///
/// Handles truncated or otherwise unparseable PDFs that still carry a
/// readable page dictionary.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaBoxScan;

impl MediaStrategy for MediaBoxScan {
    fn name(&self) -> &'static str {
        "mediabox-scan"
    }

    fn detect(&self, document: &[u8]) -> Option<PageSize> {
        let captures = MEDIA_BOX_RE.captures(document)?;

        let mut rect = [0.0; 4];
        for (index, slot) in rect.iter_mut().enumerate() {
            let raw = captures.get(index + 1)?.as_bytes();
            *slot = std::str::from_utf8(raw).ok()?.parse().ok()?;
        }
        PageSize::from_rect(rect)
    }
}

/// Derives a media token from a rendered document.
pub struct MediaSizeDetector {
    strategies: Vec<Box<dyn MediaStrategy>>,
}

impl MediaSizeDetector {
    /// Detector with an explicit strategy order.
    pub fn with_strategies(strategies: Vec<Box<dyn MediaStrategy>>) -> Self {
        Self { strategies }
    }

    /// Names of the configured strategies, in the order they run.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Detect the media size of the document's first page.
    ///
    /// Fails with [`LabelpressError::MediaDetection`] when no strategy finds
    /// a usable page size.
    #[instrument(skip_all, fields(bytes_len = document.len()))]
    pub fn detect(&self, document: &[u8]) -> Result<MediaSize> {
        for strategy in &self.strategies {
            match strategy.detect(document) {
                Some(page) => {
                    let media = page.media_size();
                    debug!(
                        strategy = strategy.name(),
                        width_pt = page.width_pt,
                        height_pt = page.height_pt,
                        media = %media,
                        "media size detected"
                    );
                    return Ok(media);
                }
                None => debug!(strategy = strategy.name(), "no page size found, trying next"),
            }
        }

        warn!(
            strategies = ?self.strategy_names(),
            "could not establish a page size for auto media"
        );
        Err(LabelpressError::MediaDetection(format!(
            "no page size found in {} byte document",
            document.len()
        )))
    }
}

impl Default for MediaSizeDetector {
    fn default() -> Self {
        Self::with_strategies(vec![Box::new(StructuredPdf), Box::new(MediaBoxScan)])
    }
}

impl std::fmt::Debug for MediaSizeDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaSizeDetector")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::fixtures::single_page_pdf;

    #[test]
    fn detects_custom_size_from_pdf() {
        let pdf = single_page_pdf([0, 0, 576, 360], false);
        let media = MediaSizeDetector::default().detect(&pdf).unwrap();
        assert_eq!(media.as_str(), "Custom.203x127mm");
    }

    #[test]
    fn structured_path_handles_inherited_box_and_offset_origin() {
        let pdf = single_page_pdf([10, 20, 146, 105], true);
        let page = StructuredPdf.detect(&pdf).unwrap();
        assert_eq!(page, PageSize { width_pt: 136.0, height_pt: 85.0 });
        assert_eq!(page.media_size().as_str(), "Custom.48x30mm");
    }

    #[test]
    fn scan_is_used_when_pdf_is_unparseable() {
        let truncated = b"%PDF-1.4\n3 0 obj << /Type /Page /MediaBox [ 0 0 283.46 141.73 ] >>";
        assert!(StructuredPdf.detect(truncated).is_none());

        let media = MediaSizeDetector::default().detect(truncated).unwrap();
        assert_eq!(media.as_str(), "Custom.100x50mm");
    }

    #[test]
    fn scan_takes_absolute_extent_of_reversed_box() {
        let page = MediaBoxScan.detect(b"/MediaBox[576 360 0 0]").unwrap();
        assert_eq!(page.width_pt, 576.0);
        assert_eq!(page.height_pt, 360.0);
    }

    #[test]
    fn zero_area_box_is_not_a_page_size() {
        assert!(MediaBoxScan.detect(b"/MediaBox [0 0 0 360]").is_none());
    }

    #[test]
    fn undetectable_document_is_an_error() {
        let err = MediaSizeDetector::default().detect(b"plain text label").unwrap_err();
        assert!(matches!(err, LabelpressError::MediaDetection(_)));
    }

    #[test]
    fn strategies_run_in_configured_order() {
        struct Fixed(&'static str, Option<PageSize>);
        impl MediaStrategy for Fixed {
            fn name(&self) -> &'static str {
                self.0
            }
            fn detect(&self, _document: &[u8]) -> Option<PageSize> {
                self.1
            }
        }

        let detector = MediaSizeDetector::with_strategies(vec![
            Box::new(Fixed("empty", None)),
            Box::new(Fixed("first", PageSize::from_rect([0.0, 0.0, 72.0, 72.0]))),
            Box::new(Fixed("second", PageSize::from_rect([0.0, 0.0, 144.0, 144.0]))),
        ]);

        assert_eq!(detector.strategy_names(), vec!["empty", "first", "second"]);
        assert_eq!(detector.detect(b"").unwrap().as_str(), "Custom.25x25mm");
    }

    #[test]
    fn empty_strategy_list_always_fails() {
        let detector = MediaSizeDetector::with_strategies(Vec::new());
        assert!(detector.detect(b"/MediaBox [0 0 72 72]").is_err());
    }
}
