// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — rebuilding existing PDFs and assembling new ones from page images.

pub mod editor;
pub mod writer;

pub use editor::{PageScope, PdfEditor};
pub use writer::RasterPdfWriter;
