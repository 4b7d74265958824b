// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the lanegate CLI.
//!
//! Masks as binary strings, care flags as a per-lane strip, verdict badges,
//! and a light box-drawing frame for `inspect` and `demo`. Respects
//! `NO_COLOR` and falls back to plain text when stdout is not a TTY.

use lanegate::CandidateMask;

/// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

pub use colors::*;

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply styles if TTY, otherwise return plain text
pub fn styled(styles: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", styles.join(""), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", styled(&[BOLD, CYAN], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!("┌{}{}┐", label_part, "─".repeat(remaining));
}

/// Print a content line: │ content          │
pub fn row(content: &str) {
    println!("│ {}│", pad_right(content, BOX_WIDTH - 1));
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("└{}┘", "─".repeat(BOX_WIDTH));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Mask as `0b` followed by exactly `candidates` binary digits.
pub fn format_mask(mask: CandidateMask, candidates: usize) -> String {
    format!("0b{:0width$b}", mask, width = candidates)
}

/// Care flags as one character per candidate, candidate 0 first: `#` cares, `.` ignores.
pub fn care_strip(cares: impl IntoIterator<Item = bool>) -> String {
    cares.into_iter().map(|c| if c { '#' } else { '.' }).collect()
}

/// Byte as a character when printable, else as hex.
pub fn byte_label(byte: u8) -> String {
    if (0x20..=0x7E).contains(&byte) {
        format!("'{}'", byte as char)
    } else {
        format!("{:#04x}", byte)
    }
}

/// Color-coded verdict: one match, no match, or several survivors.
pub fn verdict_badge(mask: CandidateMask) -> String {
    match mask.count_ones() {
        0 => styled(&[GRAY], "[NONE]"),
        1 => styled(&[BOLD, GREEN], "[MATCH]"),
        _ => styled(&[YELLOW], "[AMBIGUOUS]"),
    }
}

/// Pass/fail marker for golden comparisons.
pub fn pass_fail(ok: bool) -> String {
    if ok {
        styled(&[GREEN], "ok")
    } else {
        styled(&[BOLD, RED], "MISMATCH")
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
