// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Selection planning — which pages survive blank page removal.

use pagesift_core::Sensitivity;
use pagesift_core::error::{PageSiftError, Result};
use tracing::{debug, info, warn};

use super::cache::PageAnalysis;

/// Zero-based indices of the pages to keep, in original order.
///
/// Fails with [`PageSiftError::AllPagesBlank`] when nothing would be kept and
/// with [`PageSiftError::NoPagesRemoved`] when nothing would be dropped; in
/// both cases no output document should be written.
pub fn compute_keep_indices<P>(
    analysis: &[PageAnalysis<P>],
    sensitivity: Sensitivity,
    total_page_count: usize,
) -> Result<Vec<usize>> {
    let keep: Vec<usize> = analysis
        .iter()
        .filter(|entry| !entry.is_blank(sensitivity))
        .filter_map(|entry| {
            let index = entry.index();
            if index.is_none() {
                warn!(page_number = entry.page_number(), "ignoring page with no index");
            }
            index
        })
        .collect();

    if keep.is_empty() {
        info!(%sensitivity, total_page_count, "every page classified blank");
        return Err(PageSiftError::AllPagesBlank);
    }
    if keep.len() == total_page_count {
        info!(%sensitivity, total_page_count, "no page classified blank");
        return Err(PageSiftError::NoPagesRemoved);
    }

    debug!(kept = keep.len(), total_page_count, "keep-set planned");
    Ok(keep)
}

/// 1-based numbers of the pages classified blank, ascending.
pub fn blank_page_numbers<P>(analysis: &[PageAnalysis<P>], sensitivity: Sensitivity) -> Vec<u32> {
    analysis
        .iter()
        .filter(|entry| entry.is_blank(sensitivity))
        .map(PageAnalysis::page_number)
        .collect()
}

/// What the analysis found at one sensitivity, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub sensitivity: Sensitivity,
    pub total_pages: usize,
    pub blank_pages: Vec<u32>,
}

impl AnalysisSummary {
    pub fn new<P>(analysis: &[PageAnalysis<P>], sensitivity: Sensitivity) -> Self {
        Self {
            sensitivity,
            total_pages: analysis.len(),
            blank_pages: blank_page_numbers(analysis, sensitivity),
        }
    }
}

impl std::fmt::Display for AnalysisSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.blank_pages.is_empty() {
            return write!(f, "No blank pages detected at the current sensitivity.");
        }
        let pages: Vec<String> = self.blank_pages.iter().map(u32::to_string).collect();
        let noun = if self.blank_pages.len() == 1 { "page" } else { "pages" };
        write!(
            f,
            "Detected {} blank {}: {}",
            self.blank_pages.len(),
            noun,
            pages.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(scores: &[f64]) -> Vec<PageAnalysis<()>> {
        scores
            .iter()
            .enumerate()
            .map(|(index, &score)| PageAnalysis::new(index as u32 + 1, score, ()))
            .collect()
    }

    fn sensitivity(percent: i64) -> Sensitivity {
        Sensitivity::new(percent).unwrap()
    }

    #[test]
    fn blank_pages_are_dropped_in_order() {
        let pages = analysis(&[0.6, 1.0, 0.6, 1.0, 0.6]);
        let keep = compute_keep_indices(&pages, sensitivity(100), 5).unwrap();
        assert_eq!(keep, vec![0, 2, 4]);
    }

    #[test]
    fn all_blank_is_reported() {
        let pages = analysis(&[1.0; 5]);
        assert!(matches!(
            compute_keep_indices(&pages, sensitivity(100), 5),
            Err(PageSiftError::AllPagesBlank)
        ));
    }

    #[test]
    fn nothing_blank_is_reported() {
        let pages = analysis(&[0.3; 5]);
        assert!(matches!(
            compute_keep_indices(&pages, sensitivity(100), 5),
            Err(PageSiftError::NoPagesRemoved)
        ));
    }

    #[test]
    fn zero_sensitivity_blanks_everything() {
        let pages = analysis(&[0.0, 0.2, 0.7, 0.99, 1.0]);
        assert!(matches!(
            compute_keep_indices(&pages, sensitivity(0), 5),
            Err(PageSiftError::AllPagesBlank)
        ));
    }

    #[test]
    fn all_blank_wins_over_no_pages_removed_for_empty_analysis() {
        let pages = analysis(&[]);
        assert!(matches!(
            compute_keep_indices(&pages, sensitivity(99), 0),
            Err(PageSiftError::AllPagesBlank)
        ));
    }

    #[test]
    fn page_number_zero_does_not_underflow() {
        let pages = vec![
            PageAnalysis::new(0, 0.1, ()),
            PageAnalysis::new(1, 0.1, ()),
            PageAnalysis::new(2, 1.0, ()),
        ];
        let keep = compute_keep_indices(&pages, sensitivity(100), 3).unwrap();
        assert_eq!(keep, vec![0]);
    }

    #[test]
    fn planning_is_idempotent() {
        let pages = analysis(&[0.95, 0.2, 1.0, 0.5]);
        let first = compute_keep_indices(&pages, sensitivity(90), 4).unwrap();
        let second = compute_keep_indices(&pages, sensitivity(90), 4).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec![1, 3]);
    }

    #[test]
    fn blank_page_numbers_are_one_based() {
        let pages = analysis(&[0.6, 1.0, 0.6, 1.0]);
        assert_eq!(blank_page_numbers(&pages, sensitivity(100)), vec![2, 4]);
    }

    #[test]
    fn summary_text() {
        let pages = analysis(&[0.6, 1.0, 0.6, 1.0]);
        let summary = AnalysisSummary::new(&pages, sensitivity(100));
        assert_eq!(summary.to_string(), "Detected 2 blank pages: 2, 4");

        let single = AnalysisSummary::new(&analysis(&[1.0, 0.1]), sensitivity(100));
        assert_eq!(single.to_string(), "Detected 1 blank page: 1");

        let none = AnalysisSummary::new(&analysis(&[0.1]), sensitivity(100));
        assert_eq!(
            none.to_string(),
            "No blank pages detected at the current sensitivity."
        );
    }
}
