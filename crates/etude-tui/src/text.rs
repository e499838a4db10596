//! Text utilities for TUI rendering.
//!
//! Views pre-wrap their own prose so the transition engine and scroll
//! clamping can work on final display lines.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wraps prose to fit within `width` display columns.
///
/// Word-wraps on whitespace, falling back to character breaks for words
/// wider than the line. Widths are unicode display widths, so CJK and
/// other wide characters count as two columns. Blank input yields one
/// empty line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if !current.is_empty() {
            if current_width + 1 + word_width <= width {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
                continue;
            }
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if word_width > width {
            let mut parts = break_chars(word, width);
            if let Some(last) = parts.pop() {
                lines.extend(parts);
                current_width = last.width();
                current = last;
            }
        } else {
            current = word.to_string();
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Wraps a multi-paragraph block, preserving blank lines between
/// paragraphs.
pub fn wrap_block(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrap_text(paragraph, width));
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Breaks a string at character boundaries so each part fits in `width`
/// columns. Zero-width characters attach to the current part.
fn break_chars(text: &str, width: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if ch_width > 0 && current_width + ch_width > width && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Truncates a string with an ellipsis if it exceeds `max_width` columns
/// (unicode-aware).
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
        used += ch_width;
    }
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_text_short_line_is_untouched() {
        assert_eq!(wrap_text("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn wrap_text_breaks_on_word_boundaries() {
        assert_eq!(
            wrap_text("find the pair of numbers", 9),
            vec!["find the", "pair of", "numbers"]
        );
    }

    #[test]
    fn wrap_text_hard_breaks_long_words() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_text_counts_wide_chars_as_two_columns() {
        // Each CJK char is two columns, so only two fit per line at width 4.
        assert_eq!(wrap_text("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn wrap_text_empty_input_yields_one_blank_line() {
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn wrap_block_preserves_blank_lines() {
        assert_eq!(
            wrap_block("first paragraph\n\nsecond", 40),
            vec!["first paragraph", "", "second"]
        );
    }

    #[test]
    fn truncate_fits() {
        assert_eq!(truncate_with_ellipsis("hello", 5), "hello");
    }

    #[test]
    fn truncate_cuts_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("hello world", 8), "hello w…");
    }

    #[test]
    fn truncate_wide_chars() {
        assert_eq!(truncate_with_ellipsis("中文test", 6), "中文t…");
    }
}
