// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for media-size detection on a structured PDF and on
// bytes that only the MediaBox scan can read.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use labelpress_document::{MediaBoxScan, MediaSizeDetector, MediaStrategy, StructuredPdf};
use lopdf::{Document, Object, dictionary};

/// A single 576x360 pt page, the size of a 203x127 mm label.
fn label_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 576.into(), 360.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut output = Vec::new();
    doc.save_to(&mut output).expect("serialise benchmark PDF");
    output
}

fn bench_detection(c: &mut Criterion) {
    let pdf = label_pdf();
    let truncated = b"%PDF-1.4\n3 0 obj << /Type /Page /MediaBox [ 0 0 283.46 141.73 ] >>".to_vec();
    let detector = MediaSizeDetector::default();

    c.bench_function("structured_pdf_first_page", |b| {
        b.iter(|| StructuredPdf.detect(black_box(&pdf)))
    });

    c.bench_function("mediabox_scan_truncated", |b| {
        b.iter(|| MediaBoxScan.detect(black_box(&truncated)))
    });

    c.bench_function("detector_with_fallback", |b| {
        b.iter(|| detector.detect(black_box(&truncated)))
    });
}

criterion_group!(benches, bench_detection);
criterion_main!(benches);
