// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF adapter — rasterises PDF pages with the pure-Rust `hayro` renderer.

use std::path::Path;
use std::sync::Arc;

use hayro::{Pdf, RenderSettings, render};
use hayro_interpret::InterpreterSettings;
use pagesift_core::PixelBuffer;
use pagesift_core::error::{PageSiftError, Result};
use tracing::{debug, info, instrument};

use super::{PageSource, RenderPage, check_scale};

/// A PDF opened for rendering.
///
/// Read-only: pages are rasterised, never modified. Rebuilding a document is
/// the job of [`crate::PdfEditor`].
pub struct PdfPages {
    pdf: Arc<Pdf>,
    page_count: u32,
}

impl std::fmt::Debug for PdfPages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfPages")
            .field("page_count", &self.page_count)
            .finish_non_exhaustive()
    }
}

impl PdfPages {
    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    /// Parse a PDF already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let pdf = Pdf::new(Arc::new(data))
            .map_err(|err| PageSiftError::Load(format!("failed to parse PDF: {:?}", err)))?;
        let page_count = pdf.pages().iter().count() as u32;

        info!(page_count, "PDF opened for rendering");
        Ok(Self {
            pdf: Arc::new(pdf),
            page_count,
        })
    }
}

impl PageSource for PdfPages {
    type Page = PdfPage;

    fn page_count(&self) -> u32 {
        self.page_count
    }

    async fn page(&self, page_number: u32) -> Result<PdfPage> {
        if page_number == 0 || page_number > self.page_count {
            return Err(PageSiftError::RenderFailure {
                page: page_number,
                reason: format!("page out of range ({} pages)", self.page_count),
            });
        }
        Ok(PdfPage {
            pdf: Arc::clone(&self.pdf),
            page_number,
        })
    }
}

/// Handle to one page of a [`PdfPages`] document.
#[derive(Clone)]
pub struct PdfPage {
    pdf: Arc<Pdf>,
    page_number: u32,
}

impl std::fmt::Debug for PdfPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfPage")
            .field("page_number", &self.page_number)
            .finish_non_exhaustive()
    }
}

impl RenderPage for PdfPage {
    async fn render(&self, scale: f32) -> Result<PixelBuffer> {
        check_scale(self.page_number, scale)?;

        let pages = self.pdf.pages();
        let page = pages
            .iter()
            .nth((self.page_number as usize).saturating_sub(1))
            .ok_or_else(|| PageSiftError::RenderFailure {
                page: self.page_number,
                reason: "page missing from page tree".into(),
            })?;

        let interpreter_settings = InterpreterSettings::default();
        let render_settings = RenderSettings {
            x_scale: scale,
            y_scale: scale,
            ..Default::default()
        };
        let pixmap = render(page, &interpreter_settings, &render_settings);
        let (width, height) = (u32::from(pixmap.width()), u32::from(pixmap.height()));

        debug!(page = self.page_number, width, height, "PDF page rendered");

        // The page is filled white before its content is drawn, so every
        // pixel is opaque and the premultiplied samples are plain RGBA.
        PixelBuffer::new(width, height, pixmap.take_u8())
            .map_err(|err| PageSiftError::render(self.page_number, err))
    }
}
