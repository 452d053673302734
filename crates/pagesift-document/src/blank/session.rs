// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blank page tool session — owns the analysis cache for the currently loaded
// document and walks the tool through analyse, reclassify, and export.
//
// Every load bumps the session generation. An analysis that finishes after
// a newer load started is dropped whole instead of being merged.

use pagesift_core::config::AnalysisConfig;
use pagesift_core::error::{PageSiftError, Result};
use pagesift_core::{Generation, Sensitivity};
use tracing::{info, instrument, warn};

use super::cache::{AnalysisCache, analyze};
use super::planner::{AnalysisSummary, compute_keep_indices};
use crate::render::PageSource;

/// Lifecycle states of the blank page tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No document loaded.
    Idle,
    /// Rendering and scoring pages.
    Analyzing,
    /// Cache populated; classification reflects the last sensitivity.
    Ready,
    /// Re-applying a sensitivity to the cached scores.
    Reclassifying,
    /// Planning the keep-set and rebuilding the document.
    Exporting,
    /// Output document produced.
    Done,
    /// Every page was blank; nothing written.
    AllPagesBlank,
    /// No page was blank; nothing written.
    NoPagesRemoved,
    /// Analysis or export failed.
    Failed,
}

/// The blank page tool for one user session.
#[derive(Debug)]
pub struct BlankPageSession<P> {
    config: AnalysisConfig,
    generation: Generation,
    state: SessionState,
    cache: Option<AnalysisCache<P>>,
}

impl<P> BlankPageSession<P> {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            generation: Generation::default(),
            state: SessionState::Idle,
            cache: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The cache for the current document, once its analysis has finished.
    pub fn cache(&self) -> Option<&AnalysisCache<P>> {
        self.cache.as_ref()
    }

    // -- Loading --------------------------------------------------------------

    /// Start loading a new document: discard the old cache and return the
    /// generation the new analysis must be tagged with.
    pub fn begin_load(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.cache = None;
        self.state = SessionState::Analyzing;
        info!(generation = %self.generation, "Document load started");
        self.generation
    }

    /// Hand back the outcome of the analysis started for `generation`.
    ///
    /// A result for any generation other than the current one is dropped and
    /// reported as [`PageSiftError::StaleAnalysis`]; the session is left
    /// untouched.
    pub fn finish_load(
        &mut self,
        generation: Generation,
        result: Result<AnalysisCache<P>>,
    ) -> Result<()> {
        if generation != self.generation {
            warn!(
                produced = %generation,
                current = %self.generation,
                "Dropping analysis from a superseded document load"
            );
            return Err(PageSiftError::StaleAnalysis {
                produced: generation.value(),
                current: self.generation.value(),
            });
        }

        match result {
            Ok(cache) if cache.generation() == generation => {
                info!(pages = cache.len(), generation = %generation, "Analysis cached");
                self.cache = Some(cache);
                self.state = SessionState::Ready;
                Ok(())
            }
            Ok(cache) => {
                warn!(
                    produced = %cache.generation(),
                    current = %generation,
                    "Cache generation does not match its load"
                );
                self.cache = None;
                self.state = SessionState::Failed;
                Err(PageSiftError::StaleAnalysis {
                    produced: cache.generation().value(),
                    current: generation.value(),
                })
            }
            Err(err) => {
                warn!(error = %err, "Analysis failed");
                self.cache = None;
                self.state = SessionState::Failed;
                Err(err)
            }
        }
    }

    /// Load and analyse `source` as the session's new document.
    #[instrument(skip_all)]
    pub async fn load<S>(&mut self, source: &S) -> Result<()>
    where
        S: PageSource<Page = P>,
    {
        let generation = self.begin_load();
        let result = analyze(source, generation, &self.config).await;
        self.finish_load(generation, result)
    }

    // -- Classification -------------------------------------------------------

    /// Re-apply `sensitivity` to the cached scores. No page is re-rendered.
    pub fn reclassify(&mut self, sensitivity: Sensitivity) -> Result<AnalysisSummary> {
        let cache = self.cache.as_ref().ok_or(PageSiftError::NotAnalyzed)?;
        self.state = SessionState::Reclassifying;
        let summary = AnalysisSummary::new(cache.entries(), sensitivity);
        self.state = SessionState::Ready;
        Ok(summary)
    }

    // -- Export ---------------------------------------------------------------

    /// Plan the keep-set for `sensitivity` and enter `Exporting`.
    ///
    /// The benign outcomes move the session to their terminal state and are
    /// returned as errors so the caller writes nothing.
    pub fn plan_export(&mut self, sensitivity: Sensitivity) -> Result<Vec<usize>> {
        let cache = self.cache.as_ref().ok_or(PageSiftError::NotAnalyzed)?;
        self.state = SessionState::Exporting;

        match compute_keep_indices(cache.entries(), sensitivity, cache.len()) {
            Ok(keep) => Ok(keep),
            Err(err) => {
                self.state = match err {
                    PageSiftError::AllPagesBlank => SessionState::AllPagesBlank,
                    PageSiftError::NoPagesRemoved => SessionState::NoPagesRemoved,
                    _ => SessionState::Failed,
                };
                Err(err)
            }
        }
    }

    /// Record how the document rebuild ended and pass its result through.
    pub fn complete_export<T>(&mut self, result: Result<T>) -> Result<T> {
        self.state = match &result {
            Ok(_) => SessionState::Done,
            Err(err) => {
                warn!(error = %err, "Export failed");
                SessionState::Failed
            }
        };
        result
    }
}
