// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page-range text parsing shared by every tool that takes a page selection.
//
// Input is a comma-separated list of page numbers ("3") and inclusive ranges
// ("2-5"), 1-based. Tokens that do not parse, fall outside the document, or
// run backwards are skipped rather than rejected.

use std::collections::BTreeSet;

use tracing::debug;

/// Parse page-range text into a set of zero-based page indices.
///
/// Whitespace around tokens is ignored. An empty or all-invalid input yields
/// an empty set; whether that is an error is up to the caller.
pub fn parse_page_ranges(input: &str, total_pages: usize) -> BTreeSet<usize> {
    let mut indices = BTreeSet::new();

    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        match parse_token(token, total_pages) {
            Some((start, end)) => indices.extend(start - 1..end),
            None => debug!(token, total_pages, "skipping invalid page token"),
        }
    }

    indices
}

/// Resolve one token to an inclusive 1-based `(start, end)` pair.
///
/// A token with a dash is a range made of its first two dash-separated
/// parts; anything after a second dash is ignored.
fn parse_token(token: &str, total_pages: usize) -> Option<(usize, usize)> {
    let (start, end) = if token.contains('-') {
        let mut parts = token.split('-');
        let start = parse_number(parts.next()?)?;
        let end = parse_number(parts.next()?)?;
        (start, end)
    } else {
        let page = parse_number(token)?;
        (page, page)
    };

    if start < 1 || end > total_pages || start > end {
        return None;
    }
    Some((start, end))
}

/// A page number: a non-negative integer, also written in decimal form
/// ("2.0"). Fractional values are rejected.
fn parse_number(text: &str) -> Option<usize> {
    let text = text.trim();
    if let Ok(number) = text.parse::<usize>() {
        return Some(number);
    }
    let value: f64 = text.parse().ok()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0).then_some(value as usize)
}
