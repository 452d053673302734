// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Pagesift.

use serde::{Deserialize, Serialize};

use crate::error::{PageSiftError, Result};

/// A rasterised page: dense row-major RGBA samples, 4 bytes per pixel.
///
/// Produced by a renderer at a given scale and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA samples, checking that their length matches the
    /// dimensions.
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if samples.len() != expected {
            return Err(PageSiftError::InvalidPixelBuffer(format!(
                "{}x{} RGBA needs {} bytes, got {}",
                width,
                height,
                expected,
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// A buffer where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        let mut samples = Vec::with_capacity(pixels * 4);
        for _ in 0..pixels {
            samples.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            samples,
        }
    }

    /// A zero-sized buffer, as produced for a degenerate page.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            samples: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (not bytes).
    pub fn pixel_count(&self) -> usize {
        self.samples.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Raw RGBA samples.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Iterate pixels as `[r, g, b, a]`.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.samples.chunks_exact(4)
    }

    /// Consume the buffer and return its samples.
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }
}

/// Minimum blankness (as a percentage) a page needs to count as blank.
///
/// Always within `0..=100`; use [`Sensitivity::new`] to validate user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Sensitivity(u8);

impl Sensitivity {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    /// Validate a percentage coming from user input.
    pub fn new(percent: i64) -> Result<Self> {
        if (0..=100).contains(&percent) {
            Ok(Self(percent as u8))
        } else {
            Err(PageSiftError::InvalidSensitivity(percent))
        }
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// The blankness score a page must reach, in `[0, 1]`.
    pub fn threshold(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self(99)
    }
}

impl TryFrom<u8> for Sensitivity {
    type Error = PageSiftError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(i64::from(value))
    }
}

impl From<Sensitivity> for u8 {
    fn from(value: Sensitivity) -> Self {
        value.0
    }
}

impl std::fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Document-load counter used to tell current analysis results from stale
/// ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of input a tool was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    Pdf,
    /// One raster image per page (scanned pages).
    PageImages,
}

impl InputKind {
    /// Infer the input kind from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "png" | "jpg" | "jpeg" | "tif" | "tiff" | "bmp" | "webp" => Some(Self::PageImages),
            _ => None,
        }
    }
}
