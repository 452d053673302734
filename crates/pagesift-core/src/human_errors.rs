// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable messages for every outcome a tool run can end in.
//
// Each tool catches its error at the boundary and shows exactly one of these.
// Nothing here retries: the user re-triggers the operation.

use crate::error::PageSiftError;

/// How a message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Nothing went wrong, but no file was produced.
    Info,
    /// The user must change the input or a setting.
    ActionRequired,
    /// The operation failed.
    Failure,
}

/// A human-readable message with an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    pub severity: Severity,
}

impl HumanError {
    fn new(message: &str, suggestion: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
            severity,
        }
    }
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.message, self.suggestion)
    }
}

/// Convert a `PageSiftError` into the single message shown to the user.
pub fn humanize_error(err: &PageSiftError) -> HumanError {
    match err {
        // -- Blank page outcomes --
        PageSiftError::AllPagesBlank => HumanError::new(
            "No file was created.",
            "Every page counts as blank at the current sensitivity. Lower the sensitivity and try again.",
            Severity::Info,
        ),

        PageSiftError::NoPagesRemoved => HumanError::new(
            "No pages were removed.",
            "No blank pages were detected at the current sensitivity.",
            Severity::Info,
        ),

        PageSiftError::RenderFailure { page, .. } => HumanError::new(
            "The document could not be analysed.",
            format!("Page {page} could not be rendered. The file may be damaged or use unsupported content."),
            Severity::Failure,
        ),

        PageSiftError::NotAnalyzed | PageSiftError::StaleAnalysis { .. } => HumanError::new(
            "The document has not been analysed yet.",
            "Load the document again and wait for the analysis to finish.",
            Severity::ActionRequired,
        ),

        PageSiftError::InvalidSensitivity(value) => HumanError::new(
            "That sensitivity is out of range.",
            format!("Choose a value between 0 and 100 (got {value})."),
            Severity::ActionRequired,
        ),

        PageSiftError::InvalidPixelBuffer(_) | PageSiftError::Image(_) => HumanError::new(
            "There's a problem with a page image.",
            "The image may be damaged or in an unusual format. Try saving it as PNG or JPEG first.",
            Severity::Failure,
        ),

        // -- Page selection --
        PageSiftError::NoPagesSelected => HumanError::new(
            "Invalid input.",
            "No valid pages were selected. Enter page numbers such as 1, 3-5.",
            Severity::ActionRequired,
        ),

        PageSiftError::CannotDeleteAllPages => HumanError::new(
            "Invalid input.",
            "You cannot delete every page of the document.",
            Severity::ActionRequired,
        ),

        PageSiftError::NoAnnotationTypesSelected => HumanError::new(
            "Invalid input.",
            "Select at least one annotation type to remove.",
            Severity::ActionRequired,
        ),

        // -- Documents --
        PageSiftError::Load(_) => HumanError::new(
            "There's a problem with this file.",
            "The file may be damaged or not a PDF. Try opening it in another viewer first.",
            Severity::Failure,
        ),

        PageSiftError::ExportFailure(_) => HumanError::new(
            "The new document could not be created.",
            "Try again. If this keeps happening, try a different file.",
            Severity::Failure,
        ),

        // -- Configuration / storage --
        PageSiftError::Config(detail) => HumanError::new(
            "The configuration is not valid.",
            format!("Fix the configuration file and try again. ({detail})"),
            Severity::ActionRequired,
        ),

        PageSiftError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError::new(
                "The file couldn't be found.",
                "It may have been moved or deleted. Check the path and try again.",
                Severity::ActionRequired,
            ),
            std::io::ErrorKind::PermissionDenied => HumanError::new(
                "Permission denied.",
                "Check the file permissions, or choose a different location.",
                Severity::ActionRequired,
            ),
            _ => HumanError::new(
                "There was a problem reading or writing a file.",
                "Try again. If this keeps happening, the disk may be full.",
                Severity::Failure,
            ),
        },

        PageSiftError::Serialization(_) => HumanError::new(
            "A settings or report file could not be read or written.",
            "Check that the file is valid JSON.",
            Severity::Failure,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_outcomes_are_info() {
        assert_eq!(humanize_error(&PageSiftError::AllPagesBlank).severity, Severity::Info);
        assert_eq!(humanize_error(&PageSiftError::NoPagesRemoved).severity, Severity::Info);
    }

    #[test]
    fn render_failure_names_the_page() {
        let err = PageSiftError::RenderFailure {
            page: 4,
            reason: "bad xref".into(),
        };
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Failure);
        assert!(human.suggestion.contains("Page 4"));
    }

    #[test]
    fn bad_selection_is_action_required() {
        assert_eq!(
            humanize_error(&PageSiftError::CannotDeleteAllPages).severity,
            Severity::ActionRequired
        );
        assert_eq!(
            humanize_error(&PageSiftError::NoPagesSelected).severity,
            Severity::ActionRequired
        );
    }

    #[test]
    fn missing_file_is_action_required() {
        let err = PageSiftError::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(humanize_error(&err).severity, Severity::ActionRequired);
    }
}
