//! Greedy word wrapping with a fixed average glyph width.
//!
//! There is no font shaping here: a line holds at most
//! `floor(max_width / (font_size * 0.6))` characters.

use super::defaults::CHAR_WIDTH_RATIO;

/// Characters per line for a box `max_width` wide. Never less than one.
pub fn char_budget(max_width: f64, font_size: f64) -> usize {
    let budget = (max_width / (font_size * CHAR_WIDTH_RATIO)).floor();
    if budget.is_finite() && budget >= 1.0 {
        budget as usize
    } else {
        1
    }
}

/// Wrap `text` into lines of at most [`char_budget`] characters.
///
/// Words are separated by whitespace and re-joined with single spaces. A word
/// longer than the budget is flushed onto lines of its own in fixed-size
/// chunks.
pub fn wrap_text(text: &str, max_width: f64, font_size: f64) -> Vec<String> {
    let budget = char_budget(max_width, font_size);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > budget {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            lines.extend(chars.chunks(budget).map(|chunk| chunk.iter().collect::<String>()));
            continue;
        }

        if line.is_empty() {
            line.push_str(word);
            line_len = word_len;
        } else if line_len + word_len + 1 <= budget {
            line.push(' ');
            line.push_str(word);
            line_len += word_len + 1;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
            line_len = word_len;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
