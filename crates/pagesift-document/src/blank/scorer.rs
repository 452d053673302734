// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blankness scoring — the fraction of near-white pixels in a rendered page.

use pagesift_core::PixelBuffer;

/// Scores a rendered page by how much of it is near-white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlanknessScorer {
    /// Any of R, G, B below this marks the pixel as ink.
    white_cutoff: u8,
}

impl BlanknessScorer {
    pub const DEFAULT_WHITE_CUTOFF: u8 = 245;

    pub fn new(white_cutoff: u8) -> Self {
        Self { white_cutoff }
    }

    pub fn white_cutoff(&self) -> u8 {
        self.white_cutoff
    }

    /// Blankness in `[0, 1]`: `1 - non_white / total`.
    ///
    /// Alpha is ignored. An empty buffer scores 1.0.
    pub fn score(&self, pixels: &PixelBuffer) -> f64 {
        let total = pixels.pixel_count();
        if total == 0 {
            return 1.0;
        }

        let cutoff = self.white_cutoff;
        let non_white = pixels
            .pixels()
            .filter(|px| px[0] < cutoff || px[1] < cutoff || px[2] < cutoff)
            .count();

        1.0 - non_white as f64 / total as f64
    }
}

impl Default for BlanknessScorer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WHITE_CUTOFF)
    }
}
