//! Input text normalization and display-width helpers.

use unicode_width::UnicodeWidthChar;

/// Code points removed before rendering: ZWSP, ZWNJ, ZWJ and BOM.
const ZERO_WIDTH_CHARS: &[char] = &['\u{200b}', '\u{200c}', '\u{200d}', '\u{feff}'];

/// Tabs have no glyph, so each one is expanded to this many spaces.
const TAB_REPLACEMENT: &str = "  ";

/// Number of terminal cells a character occupies (0, 1 or 2).
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Display width of a line, summing [`char_width`] per character.
///
/// Summed per character so that it always agrees with the renderer's cursor
/// advance.
pub fn display_width(line: &str) -> usize {
    line.chars().map(char_width).sum()
}

/// Remove zero-width characters that would otherwise render as tofu.
pub fn remove_zero_width_characters(s: &str) -> String {
    s.chars().filter(|c| !ZERO_WIDTH_CHARS.contains(c)).collect()
}

/// Prepare input lines for rendering: expand tabs and strip zero-width characters.
pub fn normalize_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| remove_zero_width_characters(&line.replace('\t', TAB_REPLACEMENT)))
        .collect()
}

/// Split raw arguments into lines, splitting each argument on `\n`.
pub fn split_lines<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.as_ref().split('\n'))
        .map(str::to_string)
        .collect()
}

/// `true` when every line is empty (or there are no lines at all).
pub fn is_blank_input(lines: &[String]) -> bool {
    lines.iter().all(String::is_empty)
}
