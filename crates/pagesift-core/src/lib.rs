// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagesift — Core types, errors, configuration, and the page-range contract
// shared by every page tool.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod range;
pub mod types;

pub use config::AppConfig;
pub use error::PageSiftError;
pub use range::parse_page_ranges;
pub use types::*;
