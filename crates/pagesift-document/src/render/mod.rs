// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Renderer seam — the document and page handles the blank page pipeline
// consumes, plus adapters for PDF files and page-image sequences.
//
// Rendering is the only slow step of an analysis and the only place it
// suspends. The futures are not required to be `Send`: every render of one
// analysis is polled on the caller's task.

pub mod pdf;
pub mod raster;

use std::future::Future;

use pagesift_core::PixelBuffer;
use pagesift_core::error::Result;

/// An opened, read-only document whose pages can be rasterised.
pub trait PageSource {
    /// Handle for a single page, kept alongside its analysis result so the
    /// page can be rendered again (e.g. for thumbnails).
    type Page: RenderPage;

    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Fetch the page with the given 1-based number.
    fn page(&self, page_number: u32) -> impl Future<Output = Result<Self::Page>>;
}

/// A single renderable page.
pub trait RenderPage {
    /// Rasterise the page at `scale` times its natural size.
    fn render(&self, scale: f32) -> impl Future<Output = Result<PixelBuffer>>;
}

/// Target size of a page of `width` x `height` rendered at `scale`, never
/// smaller than one pixel in either direction.
pub(crate) fn scaled_dimensions(width: u32, height: u32, scale: f32) -> (u32, u32) {
    let scale_axis = |value: u32| ((value as f32 * scale).round() as u32).max(1);
    (scale_axis(width), scale_axis(height))
}

pub(crate) fn check_scale(page_number: u32, scale: f32) -> Result<()> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(pagesift_core::PageSiftError::RenderFailure {
            page: page_number,
            reason: format!("render scale must be positive, got {scale}"),
        })
    }
}
