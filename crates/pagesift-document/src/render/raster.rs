// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page-image adapter — treats a sequence of already-rasterised page images
// (typically scanner output) as a document. Rendering at a scale is a resize.

use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;
use image::imageops::{self, FilterType};
use pagesift_core::PixelBuffer;
use pagesift_core::error::{PageSiftError, Result};
use tracing::{debug, info, instrument};

use super::{PageSource, RenderPage, check_scale, scaled_dimensions};

/// A document made of one image per page, in page order.
#[derive(Debug, Clone)]
pub struct RasterPages {
    pages: Vec<Arc<RgbaImage>>,
}

impl RasterPages {
    /// Load every path as one page, in the order given.
    #[instrument(skip_all, fields(pages = paths.len()))]
    pub fn open<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut pages = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let image = image::open(path).map_err(|err| {
                PageSiftError::Load(format!("failed to open {}: {}", path.display(), err))
            })?;
            debug!(
                path = %path.display(),
                width = image.width(),
                height = image.height(),
                "Page image loaded"
            );
            pages.push(Arc::new(image.to_rgba8()));
        }
        info!(pages = pages.len(), "Page images loaded");
        Ok(Self { pages })
    }

    /// Wrap already-decoded page images.
    pub fn from_images(images: Vec<RgbaImage>) -> Self {
        Self {
            pages: images.into_iter().map(Arc::new).collect(),
        }
    }

    /// Borrow the full-resolution images, in page order.
    pub fn images(&self) -> impl Iterator<Item = &RgbaImage> {
        self.pages.iter().map(|image| &**image)
    }

    /// Full-resolution images for the given zero-based indices, in the
    /// order given.
    pub fn select(&self, indices: &[usize]) -> Result<Vec<&RgbaImage>> {
        indices
            .iter()
            .map(|&index| {
                self.pages.get(index).map(|image| &**image).ok_or_else(|| {
                    PageSiftError::ExportFailure(format!(
                        "page index {} out of range ({} pages)",
                        index,
                        self.pages.len()
                    ))
                })
            })
            .collect()
    }
}

impl PageSource for RasterPages {
    type Page = RasterPage;

    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    async fn page(&self, page_number: u32) -> Result<RasterPage> {
        let index = page_number.checked_sub(1).map(|n| n as usize);
        let image = index
            .and_then(|index| self.pages.get(index))
            .ok_or_else(|| PageSiftError::RenderFailure {
                page: page_number,
                reason: format!("page out of range ({} pages)", self.pages.len()),
            })?;
        Ok(RasterPage {
            page_number,
            image: Arc::clone(image),
        })
    }
}

/// One page of a [`RasterPages`] document.
#[derive(Debug, Clone)]
pub struct RasterPage {
    page_number: u32,
    image: Arc<RgbaImage>,
}

impl RenderPage for RasterPage {
    async fn render(&self, scale: f32) -> Result<PixelBuffer> {
        check_scale(self.page_number, scale)?;
        let (width, height) = scaled_dimensions(self.image.width(), self.image.height(), scale);

        let scaled = if (width, height) == self.image.dimensions() {
            (*self.image).clone()
        } else {
            imageops::resize(&*self.image, width, height, FilterType::Triangle)
        };
        pixels_from_image(scaled)
    }
}

/// Convert a decoded RGBA image into a pixel buffer.
pub fn pixels_from_image(image: RgbaImage) -> Result<PixelBuffer> {
    let (width, height) = image.dimensions();
    PixelBuffer::new(width, height, image.into_raw())
}

/// Convert a pixel buffer back into an RGBA image (for encoding).
pub fn image_from_pixels(pixels: PixelBuffer) -> Result<RgbaImage> {
    let (width, height) = (pixels.width(), pixels.height());
    RgbaImage::from_raw(width, height, pixels.into_samples()).ok_or_else(|| {
        PageSiftError::Image(format!("{width}x{height} buffer does not match its samples"))
    })
}
