//! Slide-window transform for scrolling animations.
//!
//! Expands the input lines into consecutive `line_count`-line windows, each
//! starting `slide_width` lines after the previous one. Rendered with
//! `line_count` lines per frame, the windows scroll the text upward.

/// Parameters of the slide transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideWindow {
    /// Lines per window (one animation frame).
    pub line_count: usize,
    /// Lines advanced between windows.
    pub slide_width: usize,
    /// Wrap around to the first lines instead of stopping at the end.
    pub forever: bool,
}

impl SlideWindow {
    pub fn new(line_count: usize, slide_width: usize, forever: bool) -> Self {
        Self {
            line_count,
            slide_width,
            forever,
        }
    }

    /// Apply the transform to `lines`.
    pub fn apply(&self, lines: &[String]) -> Vec<String> {
        slide(lines, self.line_count, self.slide_width, self.forever)
    }
}

/// Build the slide-window line sequence.
///
/// Without `forever`, a `slide_width` above 1 first pads the input with
/// empty lines so the last window can be filled. Windows are then emitted
/// every `slide_width` lines until one no longer fits, or, with `forever`,
/// by wrapping around to the start of the input.
///
/// A `slide_width` of 0 is treated as 1.
pub fn slide<S: AsRef<str>>(
    lines: &[S],
    line_count: usize,
    slide_width: usize,
    forever: bool,
) -> Vec<String> {
    let slide_width = slide_width.max(1);
    let mut src: Vec<String> = lines.iter().map(|s| s.as_ref().to_string()).collect();

    if slide_width > 1 && !forever {
        let loop_count = src.len().div_ceil(slide_width);
        let shortfall = (loop_count * slide_width + 1).saturating_sub(src.len());
        // The padding target moves as lines are appended, so only half of
        // the shortfall (rounded up) is ever added.
        let padding = shortfall.div_ceil(2);
        src.extend(std::iter::repeat(String::new()).take(padding));
    }

    let len = src.len();
    let mut out = Vec::new();
    if len == 0 {
        return out;
    }

    for start in (0..len).step_by(slide_width) {
        let end = start + line_count;
        if end > len {
            if !forever {
                break;
            }
            out.extend((start..end).map(|j| src[j % len].clone()));
            continue;
        }
        out.extend_from_slice(&src[start..end]);
    }

    out
}
