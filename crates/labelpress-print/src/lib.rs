// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Labelpress Print — job-attribute resolution, feed quantization, and IPP
// submission. This crate bridges between the core domain types defined in
// `labelpress-core` and the CUPS queue that prints the label.

pub mod feed;
pub mod ipp_client;
pub mod printer;
pub mod resolver;
pub mod submit;

pub use feed::{FeedControl, FeedQuantizer};
pub use ipp_client::IppClient;
pub use printer::{LabelPrinter, SubmittedJob};
pub use resolver::AttributeResolver;
pub use submit::{IppSubmitter, JobSubmitter, QueueTarget};
