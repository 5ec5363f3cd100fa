// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for `search` and `inspect`.
//!
//! Both commands print one box: a titled top border, labelled sections, and
//! fixed-width rows. A `Panel` collects the box into a `String` so layout can
//! be tested without a terminal. Color is ANSI true color on the OneDark
//! palette, switched off by `NO_COLOR` or when stdout is not a terminal.

/// Columns between the left and right border.
pub const INNER_WIDTH: usize = 80;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// What a piece of text means, which decides how it is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Box title and section labels.
    Heading,
    /// Borders, file names, counters.
    Muted,
    /// The query being searched.
    Accent,
    /// Scores, banded against the best score of the result set.
    Best,
    Good,
    Fair,
    Weak,
    Pass,
    Fail,
}

impl Tone {
    fn rgb(self) -> (u8, u8, u8) {
        match self {
            Tone::Heading => (86, 182, 194),
            Tone::Muted | Tone::Weak => (92, 99, 112),
            Tone::Accent => (102, 217, 239),
            Tone::Best => (166, 226, 46),
            Tone::Good | Tone::Pass => (152, 195, 121),
            Tone::Fair => (229, 192, 123),
            Tone::Fail => (224, 108, 117),
        }
    }

    fn bold(self) -> bool {
        matches!(self, Tone::Heading | Tone::Accent | Tone::Pass | Tone::Fail)
    }

    /// Band for `score` relative to `best`. BM25 scores are unbounded, so
    /// only the ratio is meaningful.
    pub fn for_score(score: f64, best: f64) -> Tone {
        let ratio = if best > 0.0 { score / best } else { 0.0 };
        if ratio >= 0.75 {
            Tone::Best
        } else if ratio >= 0.4 {
            Tone::Good
        } else if ratio >= 0.15 {
            Tone::Fair
        } else {
            Tone::Weak
        }
    }
}

/// Whether output gets escape codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    /// Color unless `NO_COLOR` is set or stdout is redirected.
    pub fn detect() -> Self {
        Style {
            color: std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout),
        }
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        let (r, g, b) = tone.rgb();
        let weight = if tone.bold() { BOLD } else { "" };
        format!("{}\x1b[38;2;{};{};{}m{}{}", weight, r, g, b, text, RESET)
    }

    pub fn mark(&self, ok: bool) -> String {
        if ok {
            self.paint(Tone::Pass, "✓")
        } else {
            self.paint(Tone::Fail, "✗")
        }
    }
}

/// Printed width of `s`: characters outside `ESC [ ... m` sequences.
pub fn display_width(s: &str) -> usize {
    let mut chars = s.chars();
    let mut width = 0;
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for end in chars.by_ref() {
                if end == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

/// `text` cut to `max` characters, ending in `…` when cut.
pub fn fit(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// `text` cut to its last `max` characters, starting with `…` when cut.
/// Refs and paths differ at the end, so that is the part kept.
pub fn fit_tail(text: &str, max: usize) -> String {
    let count = text.chars().count();
    if count <= max {
        return text.to_string();
    }
    let tail: String = text.chars().skip(count + 1 - max.max(1)).collect();
    format!("…{}", tail)
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(text)));
    if right_align {
        format!("{}{}", fill, text)
    } else {
        format!("{}{}", text, fill)
    }
}

pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KB * KB {
        format!("{:.1} MB", b / KB / KB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// A box under construction.
///
/// ```text
/// ┌─ SEARCH ──────────┐
/// │ query   rust      │
/// ├─ RESULTS ─────────┤
/// │   1    4.210 ...  │
/// └───────────────────┘
/// ```
pub struct Panel {
    style: Style,
    out: String,
}

impl Panel {
    pub fn new(style: Style, title: &str) -> Self {
        let mut panel = Panel {
            style,
            out: String::new(),
        };
        panel.rule('┌', Some(title), '┐');
        panel
    }

    fn rule(&mut self, left: char, label: Option<&str>, right: char) {
        let label = match label {
            Some(text) => format!("─ {} ", self.style.paint(Tone::Heading, text)),
            None => String::new(),
        };
        let run = "─".repeat(INNER_WIDTH.saturating_sub(display_width(&label)));
        let open = self.style.paint(Tone::Muted, &left.to_string());
        let close = self.style.paint(Tone::Muted, &format!("{}{}", run, right));
        self.out.push_str(&format!("{}{}{}\n", open, label, close));
    }

    /// Start a new labelled section.
    pub fn section(&mut self, label: &str) {
        self.rule('├', Some(label), '┤');
    }

    /// One row, padded to the box width. Overlong rows push the border out.
    pub fn line(&mut self, content: &str) {
        let bar = self.style.paint(Tone::Muted, "│");
        self.out
            .push_str(&format!("{}{}{}\n", bar, pad(content, INNER_WIDTH, false), bar));
    }

    /// ` key       value`
    pub fn field(&mut self, key: &str, value: &str) {
        self.line(&format!(" {} {}", pad(key, 9, false), value));
    }

    /// One search hit: rank, banded score, title, and the tail of its ref.
    pub fn ranked(&mut self, rank: usize, score: f64, best: f64, title: &str, reference: &str) {
        let score_cell = self
            .style
            .paint(Tone::for_score(score, best), &format!("{:>8.3}", score));
        let reference = self.style.paint(Tone::Muted, &fit_tail(reference, 30));
        self.line(&format!(
            " {} {} {} {}",
            pad(&rank.to_string(), 3, true),
            score_cell,
            pad(&fit(title, 34), 34, false),
            reference
        ));
    }

    /// Coverage of one record field across the store.
    pub fn field_stats(&mut self, name: &str, filled: usize, chars: usize) {
        self.line(&format!(
            " {} {} filled │ {} chars",
            pad(name, 11, false),
            pad(&filled.to_string(), 6, true),
            pad(&chars.to_string(), 9, true)
        ));
    }

    /// A ref and its title.
    pub fn record(&mut self, reference: &str, title: &str) {
        self.line(&format!(
            " {} {}",
            pad(&fit_tail(reference, 36), 36, false),
            fit(title, 40)
        ));
    }

    /// Marker for rows left out.
    pub fn more(&mut self, hidden: usize) {
        let text = self.style.paint(Tone::Muted, &format!("… {} more", hidden));
        self.line(&format!(" {}", text));
    }

    pub fn finish(mut self) -> String {
        self.rule('└', None, '┘');
        self.out
    }
}
