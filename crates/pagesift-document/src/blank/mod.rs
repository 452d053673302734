// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blank page detection — score rendered pages by whitespace, classify them
// against a sensitivity, cache the scores per document load, and plan which
// pages to keep.

pub mod cache;
pub mod classifier;
pub mod planner;
pub mod scorer;
pub mod session;

pub use cache::{AnalysisCache, PageAnalysis, analyze};
pub use classifier::is_blank;
pub use planner::{AnalysisSummary, blank_page_numbers, compute_keep_indices};
pub use scorer::BlanknessScorer;
pub use session::{BlankPageSession, SessionState};
