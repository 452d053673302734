// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pagesift.

use thiserror::Error;

/// Top-level error type for all Pagesift operations.
///
/// `AllPagesBlank` and `NoPagesRemoved` are benign outcomes rather than
/// faults, but they travel the same path so a tool boundary can turn every
/// result into exactly one notification.
#[derive(Debug, Error)]
pub enum PageSiftError {
    // -- Analysis --
    #[error("failed to render page {page}: {reason}")]
    RenderFailure { page: u32, reason: String },

    #[error("every page was classified as blank")]
    AllPagesBlank,

    #[error("no page was classified as blank")]
    NoPagesRemoved,

    #[error("document has not been analysed")]
    NotAnalyzed,

    #[error("analysis result belongs to generation {produced}, current is {current}")]
    StaleAnalysis { produced: u64, current: u64 },

    #[error("sensitivity must be between 0 and 100, got {0}")]
    InvalidSensitivity(i64),

    #[error("invalid pixel buffer: {0}")]
    InvalidPixelBuffer(String),

    // -- Page selection --
    #[error("no valid pages selected")]
    NoPagesSelected,

    #[error("cannot delete every page of the document")]
    CannotDeleteAllPages,

    #[error("no annotation types selected")]
    NoAnnotationTypesSelected,

    // -- Documents --
    #[error("failed to load document: {0}")]
    Load(String),

    #[error("export failed: {0}")]
    ExportFailure(String),

    #[error("image processing failed: {0}")]
    Image(String),

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PageSiftError {
    /// Wrap any failure that happened while producing a page raster.
    ///
    /// A `RenderFailure` raised by the renderer itself passes through untouched.
    pub fn render(page: u32, err: impl Into<PageSiftError>) -> Self {
        match err.into() {
            failure @ Self::RenderFailure { .. } => failure,
            other => Self::RenderFailure {
                page,
                reason: other.to_string(),
            },
        }
    }

    /// Outcomes that end a tool run without producing a file and without
    /// anything having gone wrong.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::AllPagesBlank | Self::NoPagesRemoved)
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PageSiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_wraps_foreign_errors_with_page() {
        let err = PageSiftError::render(3, PageSiftError::Image("truncated".into()));
        match err {
            PageSiftError::RenderFailure { page, reason } => {
                assert_eq!(page, 3);
                assert!(reason.contains("truncated"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn render_keeps_existing_failure() {
        let inner = PageSiftError::RenderFailure {
            page: 7,
            reason: "corrupt stream".into(),
        };
        let err = PageSiftError::render(2, inner);
        assert!(matches!(err, PageSiftError::RenderFailure { page: 7, .. }));
    }

    #[test]
    fn benign_outcomes() {
        assert!(PageSiftError::AllPagesBlank.is_benign());
        assert!(PageSiftError::NoPagesRemoved.is_benign());
        assert!(!PageSiftError::ExportFailure("disk full".into()).is_benign());
    }
}
