// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster PDF writer — assemble page images into a new PDF using `printpdf` 0.8.
//
// Each image becomes one page sized to the image at the configured DPI, so
// the page shows the image at its native resolution with no margins.

use std::path::Path;

use image::{Rgba, RgbaImage};
use pagesift_core::error::{PageSiftError, Result};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

/// Default placement resolution for page images.
pub const DEFAULT_RASTER_DPI: f32 = 150.0;

const MM_PER_INCH: f32 = 25.4;

/// Creates PDF documents from page images.
#[derive(Debug, Clone)]
pub struct RasterPdfWriter {
    /// Pixels per inch used to size each page.
    dpi: f32,
    /// Title metadata embedded in the PDF.
    title: String,
}

impl Default for RasterPdfWriter {
    fn default() -> Self {
        Self::new(DEFAULT_RASTER_DPI)
    }
}

impl RasterPdfWriter {
    /// Create a writer placing images at `dpi`. Non-positive or non-finite
    /// values fall back to [`DEFAULT_RASTER_DPI`].
    pub fn new(dpi: f32) -> Self {
        let dpi = if dpi.is_finite() && dpi > 0.0 {
            dpi
        } else {
            warn!(dpi, "Invalid raster DPI, using default");
            DEFAULT_RASTER_DPI
        };
        Self {
            dpi,
            title: "Pagesift Document".into(),
        }
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Page size in millimetres for an image of `width` x `height` pixels.
    pub fn page_size_mm(&self, width: u32, height: u32) -> (f32, f32) {
        (
            width as f32 / self.dpi * MM_PER_INCH,
            height as f32 / self.dpi * MM_PER_INCH,
        )
    }

    /// Create a PDF with one page per image, in the order given.
    #[instrument(skip(self, pages), fields(pages = pages.len(), dpi = self.dpi))]
    pub fn create_from_pages(&self, pages: &[&RgbaImage]) -> Result<Vec<u8>> {
        if pages.is_empty() {
            return Err(PageSiftError::ExportFailure(
                "refusing to write a document without pages".into(),
            ));
        }

        info!(title = %self.title, "Creating PDF from page images");

        let mut doc = PdfDocument::new(&self.title);
        let mut pdf_pages = Vec::with_capacity(pages.len());

        for (index, image) in pages.iter().enumerate() {
            let (width, height) = image.dimensions();
            if width == 0 || height == 0 {
                return Err(PageSiftError::ExportFailure(format!(
                    "page image {} is empty",
                    index + 1
                )));
            }

            let raw = RawImage {
                pixels: RawImageData::U8(rgb_onto_white(image)),
                width: width as usize,
                height: height as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(0.0)),
                    translate_y: Some(Pt(0.0)),
                    scale_x: Some(1.0),
                    scale_y: Some(1.0),
                    dpi: Some(self.dpi),
                    rotate: None,
                },
            }];

            let (page_w, page_h) = self.page_size_mm(width, height);
            debug!(page = index + 1, width, height, page_w, page_h, "Page image placed");
            pdf_pages.push(PdfPage::new(Mm(page_w), Mm(page_h), ops));
        }

        doc.with_pages(pdf_pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "printpdf reported warnings");
        }

        info!(output_bytes = output.len(), "Page images written to PDF");
        Ok(output)
    }

    /// Create the PDF and write it directly to a file.
    pub fn write_to_file(&self, pages: &[&RgbaImage], path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.create_from_pages(pages)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote PDF to {}", path.as_ref().display());
        Ok(())
    }
}

/// RGB8 samples of `image` composited over a white background.
fn rgb_onto_white(image: &RgbaImage) -> Vec<u8> {
    let mut samples = Vec::with_capacity(image.width() as usize * image.height() as usize * 3);
    for &Rgba([r, g, b, a]) in image.pixels() {
        let alpha = u16::from(a);
        for channel in [r, g, b] {
            let blended = (u16::from(channel) * alpha + 255 * (255 - alpha)) / 255;
            samples.push(blended as u8);
        }
    }
    samples
}
