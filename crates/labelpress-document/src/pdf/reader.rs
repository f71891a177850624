// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open an in-memory PDF and inspect its page geometry using the
// `lopdf` crate.

use labelpress_core::error::LabelpressError;
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, instrument};

/// Page-tree depth after which a missing MediaBox is treated as absent.
/// Guards against malformed documents whose /Parent chain loops.
const MAX_PAGE_TREE_DEPTH: usize = 32;

/// Reads page geometry from an existing PDF.
///
/// Wraps `lopdf::Document`. Rectangles are returned in PDF points as
/// `[llx, lly, urx, ury]`, exactly as stored.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, LabelpressError> {
        let document = Document::load_mem(data).map_err(|err| {
            LabelpressError::MediaDetection(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// MediaBox of a page (1-indexed), following /Parent for inherited boxes.
    pub fn media_box(&self, page_number: u32) -> Result<[f64; 4], LabelpressError> {
        let pages = self.document.get_pages();
        let page_id = *pages.get(&page_number).ok_or_else(|| {
            LabelpressError::MediaDetection(format!(
                "page {} not found (document has {} pages)",
                page_number,
                pages.len()
            ))
        })?;

        self.inherited_media_box(page_id)
    }

    /// MediaBox of the first page.
    pub fn first_page_media_box(&self) -> Result<[f64; 4], LabelpressError> {
        self.media_box(1)
    }

    // -- Helpers --------------------------------------------------------------

    fn inherited_media_box(&self, page_id: ObjectId) -> Result<[f64; 4], LabelpressError> {
        let mut node_id = page_id;

        for _ in 0..MAX_PAGE_TREE_DEPTH {
            let node = self.document.get_dictionary(node_id).map_err(|err| {
                LabelpressError::MediaDetection(format!(
                    "cannot read page tree node {:?}: {}",
                    node_id, err
                ))
            })?;

            if let Ok(media_box) = node.get(b"MediaBox") {
                return self.rectangle(media_box);
            }

            node_id = node
                .get(b"Parent")
                .and_then(Object::as_reference)
                .map_err(|_| {
                    LabelpressError::MediaDetection(
                        "no MediaBox on the page or any ancestor".to_string(),
                    )
                })?;
        }

        Err(LabelpressError::MediaDetection(format!(
            "page tree deeper than {} levels",
            MAX_PAGE_TREE_DEPTH
        )))
    }

    /// Read a four-number rectangle, resolving indirect references.
    fn rectangle(&self, object: &Object) -> Result<[f64; 4], LabelpressError> {
        let values = self.resolve(object).as_array().map_err(|err| {
            LabelpressError::MediaDetection(format!("MediaBox is not an array: {}", err))
        })?;

        if values.len() != 4 {
            return Err(LabelpressError::MediaDetection(format!(
                "MediaBox has {} entries, expected 4",
                values.len()
            )));
        }

        let mut rect = [0.0; 4];
        for (slot, value) in rect.iter_mut().zip(values) {
            *slot = number(self.resolve(value)).ok_or_else(|| {
                LabelpressError::MediaDetection(format!(
                    "MediaBox entry {:?} is not a number",
                    value
                ))
            })?;
        }
        Ok(rect)
    }

    fn resolve<'a>(&'a self, object: &'a Object) -> &'a Object {
        match object {
            Object::Reference(id) => self.document.get_object(*id).unwrap_or(object),
            other => other,
        }
    }
}

fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(f64::from(*value)),
        _ => None,
    }
}

/// In-memory PDFs for tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use lopdf::{Document, Object, dictionary};

    /// A single-page PDF. With `inherit`, the MediaBox sits on the /Pages
    /// node instead of the page.
    pub(crate) fn single_page_pdf(media_box: [i64; 4], inherit: bool) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let rect: Vec<Object> = media_box.iter().map(|v| Object::Integer(*v)).collect();

        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        };
        let mut pages = dictionary! {
            "Type" => "Pages",
            "Count" => 1,
        };
        if inherit {
            pages.set("MediaBox", rect);
        } else {
            page.set("MediaBox", rect);
        }

        let page_id = doc.add_object(page);
        pages.set("Kids", vec![Object::Reference(page_id)]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut output = Vec::new();
        doc.save_to(&mut output).unwrap();
        output
    }
}
