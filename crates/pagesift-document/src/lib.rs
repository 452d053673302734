// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pagesift-document — Page rendering, blank page detection, and PDF page tools.
//
// Provides the renderer seam (`PageSource` / `RenderPage`) with PDF and
// page-image adapters, the blank page pipeline (score, classify, cache,
// plan, session), preview thumbnails, PDF rebuilding (copy, delete,
// reverse, strip annotations and metadata), and format conversion.

pub mod blank;
pub mod convert;
pub mod pdf;
pub mod preview;
pub mod render;

// Re-export the primary items so callers can use `pagesift_document::PdfEditor` etc.
pub use blank::cache::{AnalysisCache, PageAnalysis, analyze};
pub use blank::classifier::is_blank;
pub use blank::planner::{AnalysisSummary, blank_page_numbers, compute_keep_indices};
pub use blank::scorer::BlanknessScorer;
pub use blank::session::{BlankPageSession, SessionState};
pub use convert::{PageImage, PageImageFormat, greyscale_pdf, images_to_pdf, render_page_images};
pub use pdf::editor::{PageScope, PdfEditor};
pub use pdf::writer::RasterPdfWriter;
pub use preview::{Thumbnail, render_thumbnails};
pub use render::pdf::{PdfPage, PdfPages};
pub use render::raster::{RasterPage, RasterPages};
pub use render::{PageSource, RenderPage};
