// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Removed-page preview — small PNG thumbnails of the pages about to be
// dropped. Display only; classification always uses the cached scores.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use pagesift_core::error::{PageSiftError, Result};
use tracing::{debug, info, instrument};

use crate::blank::cache::AnalysisCache;
use crate::render::RenderPage;
use crate::render::raster::image_from_pixels;

/// A rendered, PNG-encoded page thumbnail.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub page_number: u32,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl Thumbnail {
    /// Caption shown under the thumbnail.
    pub fn title(&self) -> String {
        format!("Page {}", self.page_number)
    }

    /// File name used when thumbnails are written to disk.
    pub fn file_name(&self) -> String {
        format!("page-{:03}.png", self.page_number)
    }

    /// Write the PNG into `dir`, returning the path written.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.file_name());
        std::fs::write(&path, &self.png)?;
        Ok(path)
    }
}

/// Re-render each listed page at `scale` and encode it as PNG.
///
/// Pages are rendered one after another in the order given. A page number
/// missing from the cache is skipped.
#[instrument(skip(cache), fields(pages = page_numbers.len()))]
pub async fn render_thumbnails<P: RenderPage>(
    cache: &AnalysisCache<P>,
    page_numbers: &[u32],
    scale: f32,
) -> Result<Vec<Thumbnail>> {
    let mut thumbnails = Vec::with_capacity(page_numbers.len());

    for &page_number in page_numbers {
        let Some(entry) = cache.get(page_number) else {
            debug!(page_number, "no cached page for thumbnail");
            continue;
        };

        let pixels = entry
            .page()
            .render(scale)
            .await
            .map_err(|err| PageSiftError::render(page_number, err))?;
        let (width, height) = (pixels.width(), pixels.height());
        let png = encode_png(image_from_pixels(pixels)?)?;

        debug!(page_number, width, height, bytes = png.len(), "Thumbnail rendered");
        thumbnails.push(Thumbnail {
            page_number,
            width,
            height,
            png,
        });
    }

    info!(count = thumbnails.len(), "Thumbnails ready");
    Ok(thumbnails)
}

fn encode_png(image: image::RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|err| PageSiftError::Image(format!("PNG encoding failed: {}", err)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use pagesift_core::Generation;
    use pagesift_core::config::AnalysisConfig;

    use super::*;
    use crate::blank::cache::analyze;
    use crate::render::raster::RasterPages;

    #[tokio::test]
    async fn thumbnails_are_small_pngs_of_requested_pages() {
        let document = RasterPages::from_images(vec![
            RgbaImage::from_pixel(200, 280, Rgba([255, 255, 255, 255])),
            RgbaImage::from_pixel(200, 280, Rgba([0, 0, 0, 255])),
            RgbaImage::from_pixel(200, 280, Rgba([255, 255, 255, 255])),
        ]);
        let cache = analyze(&document, Generation::default(), &AnalysisConfig::default())
            .await
            .unwrap();

        let thumbnails = render_thumbnails(&cache, &[1, 3, 9], 0.1).await.unwrap();

        let numbers: Vec<u32> = thumbnails.iter().map(|t| t.page_number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!((thumbnails[0].width, thumbnails[0].height), (20, 28));
        assert_eq!(&thumbnails[0].png[1..4], b"PNG");
        assert_eq!(thumbnails[1].title(), "Page 3");
    }

    #[tokio::test]
    async fn thumbnails_are_written_with_stable_names() {
        let document =
            RasterPages::from_images(vec![RgbaImage::from_pixel(50, 50, Rgba([255, 255, 255, 255]))]);
        let cache = analyze(&document, Generation::default(), &AnalysisConfig::default())
            .await
            .unwrap();
        let thumbnails = render_thumbnails(&cache, &[1], 0.1).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = thumbnails[0].write_to_dir(dir.path()).unwrap();
        assert!(path.ends_with("page-001.png"));
        assert!(image::open(&path).is_ok());
    }
}
