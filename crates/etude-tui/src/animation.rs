//! Screen-transition animation engine.
//!
//! A `Transition` is a pure function of elapsed time. The reducer creates one
//! on every navigation, advances it on each tick, and discards it once
//! complete. `apply` shapes already-rendered lines; it never gates input
//! handling and never touches state.

use std::time::{Duration, Instant};

use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Duration of slide transitions between screens.
pub const SLIDE_DURATION: Duration = Duration::from_millis(150);

/// Duration of the fade-in used on startup and problem advancement.
pub const FADE_DURATION: Duration = Duration::from_millis(250);

/// Visual style of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// No visual effect; content passes through unchanged.
    None,
    /// Content slides in from the left edge (used for back navigation).
    SlideLeft,
    /// Content slides in from the right edge (used for forward navigation).
    SlideRight,
    /// Content is revealed line by line from the top.
    FadeIn,
}

/// One in-flight screen transition.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub kind: TransitionKind,
    started_at: Instant,
    duration: Duration,
    progress: f64,
    complete: bool,
}

impl Transition {
    pub fn new(kind: TransitionKind, duration: Duration, now: Instant) -> Self {
        Self {
            kind,
            started_at: now,
            duration,
            progress: 0.0,
            complete: duration.is_zero(),
        }
    }

    /// Recomputes progress from elapsed time. Progress is monotonically
    /// non-decreasing, clamps at 1.0, and further calls after completion
    /// are no-ops.
    pub fn update(&mut self, now: Instant) {
        if self.complete {
            return;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        let ratio = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        if ratio > self.progress {
            self.progress = ratio;
        }
        if self.progress >= 1.0 {
            self.progress = 1.0;
            self.complete = true;
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Shapes rendered content for the current progress.
    ///
    /// SlideRight left-pads each line, SlideLeft clips leading columns, and
    /// FadeIn reveals the first ceil(progress * n) lines. Complete or `None`
    /// transitions pass content through unchanged.
    pub fn apply(&self, lines: Vec<Line<'static>>, width: u16) -> Vec<Line<'static>> {
        if self.complete || self.kind == TransitionKind::None {
            return lines;
        }
        let offset = ((1.0 - self.progress) * f64::from(width)).round() as usize;
        match self.kind {
            TransitionKind::None => lines,
            TransitionKind::SlideRight => lines
                .into_iter()
                .map(|line| pad_line(line, offset))
                .collect(),
            TransitionKind::SlideLeft => lines
                .into_iter()
                .map(|line| clip_line(line, offset))
                .collect(),
            TransitionKind::FadeIn => {
                let visible = (self.progress * lines.len() as f64).ceil() as usize;
                lines.into_iter().take(visible).collect()
            }
        }
    }
}

/// Prepends `pad` columns of whitespace to a line.
fn pad_line(line: Line<'static>, pad: usize) -> Line<'static> {
    if pad == 0 {
        return line;
    }
    let mut spans = Vec::with_capacity(line.spans.len() + 1);
    spans.push(Span::raw(" ".repeat(pad)));
    spans.extend(line.spans);
    Line { spans, ..line }
}

/// Removes the first `clip` display columns from a line.
///
/// Span styles are preserved. A wide character straddling the cut is dropped
/// and replaced with padding so the remaining columns stay aligned.
fn clip_line(line: Line<'static>, clip: usize) -> Line<'static> {
    if clip == 0 {
        return line;
    }
    let mut remaining = clip;
    let mut spans = Vec::with_capacity(line.spans.len());
    for span in line.spans {
        if remaining == 0 {
            spans.push(span);
            continue;
        }
        let span_width = UnicodeWidthStr::width(span.content.as_ref());
        if span_width <= remaining {
            remaining -= span_width;
            continue;
        }
        // The cut lands inside this span.
        let mut pad = 0;
        let mut chars = span.content.chars();
        while remaining > 0 {
            let Some(c) = chars.next() else { break };
            let w = UnicodeWidthChar::width(c).unwrap_or(0);
            if w > remaining {
                pad = w - remaining;
                remaining = 0;
            } else {
                remaining -= w;
            }
        }
        let kept: String = chars.collect();
        if pad > 0 {
            spans.push(Span::raw(" ".repeat(pad)));
        }
        if !kept.is_empty() {
            spans.push(Span::styled(kept, span.style));
        }
    }
    Line { spans, ..line }
}
