// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-document analysis cache — one blankness score per page, computed once
// per document load so the sensitivity can be changed without re-rendering.

use futures::stream::{FuturesUnordered, StreamExt};
use pagesift_core::config::AnalysisConfig;
use pagesift_core::error::{PageSiftError, Result};
use pagesift_core::{Generation, Sensitivity};
use tracing::{debug, info, instrument};

use super::classifier::is_blank;
use super::scorer::BlanknessScorer;
use crate::render::{PageSource, RenderPage};

/// Analysis result for one page.
///
/// `blankness` was measured at the analysis render scale. `page` is kept so
/// the page can be rendered again for display.
#[derive(Debug, Clone)]
pub struct PageAnalysis<P> {
    page_number: u32,
    blankness: f64,
    page: P,
}

impl<P> PageAnalysis<P> {
    pub fn new(page_number: u32, blankness: f64, page: P) -> Self {
        Self {
            page_number,
            blankness,
            page,
        }
    }

    /// 1-based page number.
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Zero-based page index, or `None` for the invalid page number 0.
    pub fn index(&self) -> Option<usize> {
        (self.page_number as usize).checked_sub(1)
    }

    pub fn blankness(&self) -> f64 {
        self.blankness
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn is_blank(&self, sensitivity: Sensitivity) -> bool {
        is_blank(self.blankness, sensitivity)
    }
}

/// Every page's analysis for one document load, ordered by page number.
#[derive(Debug, Clone)]
pub struct AnalysisCache<P> {
    generation: Generation,
    entries: Vec<PageAnalysis<P>>,
}

impl<P> AnalysisCache<P> {
    /// Build a cache from results in any order; entries are sorted by page
    /// number so `entries()[n - 1]` is page `n`.
    pub fn from_unordered(generation: Generation, mut entries: Vec<PageAnalysis<P>>) -> Self {
        entries.sort_by_key(PageAnalysis::page_number);
        Self {
            generation,
            entries,
        }
    }

    /// The document load this cache belongs to.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn entries(&self) -> &[PageAnalysis<P>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a page by its 1-based number.
    pub fn get(&self, page_number: u32) -> Option<&PageAnalysis<P>> {
        let index = page_number.checked_sub(1)? as usize;
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageAnalysis<P>> {
        self.entries.iter()
    }
}

impl<'a, P> IntoIterator for &'a AnalysisCache<P> {
    type Item = &'a PageAnalysis<P>;
    type IntoIter = std::slice::Iter<'a, PageAnalysis<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Render and score every page of `source`.
///
/// All page renders are started together and polled on the current task;
/// the cache is built only after every one of them has finished. The first
/// failing page aborts the remaining renders and fails the whole analysis.
#[instrument(skip_all, fields(generation = %generation, pages = source.page_count()))]
pub async fn analyze<S: PageSource>(
    source: &S,
    generation: Generation,
    config: &AnalysisConfig,
) -> Result<AnalysisCache<S::Page>> {
    let page_count = source.page_count();
    let scorer = BlanknessScorer::new(config.white_cutoff);
    let scale = config.render_scale;

    info!(page_count, scale, "Analysing pages for blankness");

    let mut in_flight: FuturesUnordered<_> = (1..=page_count)
        .map(|page_number| async move {
            let page = source
                .page(page_number)
                .await
                .map_err(|err| PageSiftError::render(page_number, err))?;
            let pixels = page
                .render(scale)
                .await
                .map_err(|err| PageSiftError::render(page_number, err))?;
            let blankness = scorer.score(&pixels);
            debug!(page_number, blankness, "Page scored");
            Ok::<_, PageSiftError>(PageAnalysis::new(page_number, blankness, page))
        })
        .collect();

    let mut entries = Vec::with_capacity(page_count as usize);
    while let Some(result) = in_flight.next().await {
        entries.push(result?);
    }

    let cache = AnalysisCache::from_unordered(generation, entries);
    info!(pages = cache.len(), "Analysis complete");
    Ok(cache)
}
