// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blank/non-blank classification of a blankness score.

use pagesift_core::Sensitivity;

/// A page is blank when its blankness reaches `sensitivity / 100`.
///
/// Higher sensitivity is stricter: at 100 only a page without a single
/// non-white pixel qualifies, at 0 every page does.
pub fn is_blank(blankness: f64, sensitivity: Sensitivity) -> bool {
    blankness >= sensitivity.threshold()
}
