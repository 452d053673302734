// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Format conversion — page images to PDF, PDF pages to JPEG/PNG, and
// greyscale re-rendering.
//
// Every conversion goes through the renderer seam, so a PDF and a set of
// scanned page images convert the same way. Greyscale output is a raster
// PDF: the original page content is not preserved.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use pagesift_core::error::{PageSiftError, Result};
use tracing::{debug, info, instrument};

use crate::pdf::writer::RasterPdfWriter;
use crate::render::raster::{RasterPages, image_from_pixels};
use crate::render::{PageSource, RenderPage};

/// Render scale used when exporting pages as images.
pub const IMAGE_EXPORT_SCALE: f32 = 2.0;

/// Render scale used for greyscale conversion.
pub const GREYSCALE_SCALE: f32 = 1.5;

/// JPEG quality (1-100) for exported pages.
pub const JPEG_QUALITY: u8 = 90;

/// PDF user space units per inch; a page rendered at scale 1 has this DPI.
const POINTS_PER_INCH: f32 = 72.0;

/// Image encoding for exported pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageImageFormat {
    #[default]
    Jpeg,
    Png,
}

impl PageImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    /// Encode one page. JPEG has no alpha, so the page is flattened to RGB.
    pub fn encode(self, image: RgbaImage) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        match self {
            Self::Jpeg => {
                let rgb = DynamicImage::ImageRgba8(image).to_rgb8();
                JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY)
                    .encode_image(&rgb)
                    .map_err(|err| PageSiftError::Image(format!("JPEG encoding failed: {}", err)))?;
            }
            Self::Png => {
                image
                    .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
                    .map_err(|err| PageSiftError::Image(format!("PNG encoding failed: {}", err)))?;
            }
        }
        Ok(buffer)
    }
}

/// One page rendered and encoded as an image file.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub page_number: u32,
    pub width: u32,
    pub height: u32,
    pub format: PageImageFormat,
    pub bytes: Vec<u8>,
}

impl PageImage {
    /// `page-003.jpg` style file name.
    pub fn file_name(&self) -> String {
        format!("page-{:03}.{}", self.page_number, self.format.extension())
    }

    /// Write the encoded image into `dir`, returning the path written.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.file_name());
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Assemble page images (one file per page, in the order given) into a PDF.
#[instrument(skip_all, fields(pages = paths.len()))]
pub fn images_to_pdf<P: AsRef<Path>>(paths: &[P], writer: &RasterPdfWriter) -> Result<Vec<u8>> {
    if paths.is_empty() {
        return Err(PageSiftError::Load("no page images given".into()));
    }
    let pages = RasterPages::open(paths)?;
    let images: Vec<&RgbaImage> = pages.images().collect();
    writer.create_from_pages(&images)
}

/// Render every page at `scale` and encode it in `format`.
///
/// Pages are rendered one after another; the first failure aborts.
#[instrument(skip(source), fields(pages = source.page_count()))]
pub async fn render_page_images<S: PageSource>(
    source: &S,
    scale: f32,
    format: PageImageFormat,
) -> Result<Vec<PageImage>> {
    let mut exported = Vec::with_capacity(source.page_count() as usize);

    for page_number in 1..=source.page_count() {
        let image = render_rgba(source, page_number, scale).await?;
        let (width, height) = image.dimensions();
        let bytes = format.encode(image)?;

        debug!(page_number, width, height, bytes = bytes.len(), "Page exported");
        exported.push(PageImage {
            page_number,
            width,
            height,
            format,
            bytes,
        });
    }

    info!(count = exported.len(), format = format.extension(), "Pages exported as images");
    Ok(exported)
}

/// Re-render every page at `scale` in greyscale and rebuild a raster PDF.
///
/// Pages keep their original size: the images are placed at `72 * scale`
/// DPI.
#[instrument(skip(source), fields(pages = source.page_count()))]
pub async fn greyscale_pdf<S: PageSource>(source: &S, scale: f32) -> Result<Vec<u8>> {
    let mut pages = Vec::with_capacity(source.page_count() as usize);
    for page_number in 1..=source.page_count() {
        let mut image = render_rgba(source, page_number, scale).await?;
        to_greyscale(&mut image);
        pages.push(image);
    }

    let mut writer = RasterPdfWriter::new(POINTS_PER_INCH * scale);
    writer.set_title("Greyscale Document");
    let refs: Vec<&RgbaImage> = pages.iter().collect();
    writer.create_from_pages(&refs)
}

/// Replace each pixel's colour with the mean of its channels. Alpha is kept.
pub fn to_greyscale(image: &mut RgbaImage) {
    for Rgba([r, g, b, _]) in image.pixels_mut() {
        let mean = ((u16::from(*r) + u16::from(*g) + u16::from(*b)) / 3) as u8;
        (*r, *g, *b) = (mean, mean, mean);
    }
}

async fn render_rgba<S: PageSource>(source: &S, page_number: u32, scale: f32) -> Result<RgbaImage> {
    let page = source.page(page_number).await?;
    let pixels = page
        .render(scale)
        .await
        .map_err(|err| PageSiftError::render(page_number, err))?;
    image_from_pixels(pixels)
}
