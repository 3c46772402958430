use crate::units::Pt;

const TABSIZE: usize = 4;

/// Greedy word wrapping against a column width.
///
/// Lines break at the last whitespace that keeps them within the width. A word wider than
/// the column is placed alone on its line rather than split. Explicit newlines always end
/// a line, and an empty source line yields an empty output line. Runs of whitespace
/// collapse to single spaces.
///
/// The first output line may have a different width from the rest: bullets, numbered
/// items and label/value pairs start further right (or later) than their continuation
/// lines.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineWrap {
    /// Room on the very first output line
    pub first_width: Pt,
    /// Room on every following line
    pub width: Pt,
    /// When the first word doesn't fit `first_width`, leave the first line empty and
    /// start on the second one instead of overflowing
    pub may_defer_first: bool,
}

impl LineWrap {
    /// Every line gets the same width
    pub fn column(width: Pt) -> LineWrap {
        LineWrap {
            first_width: width,
            width,
            may_defer_first: false,
        }
    }

    /// The first line is shorter (or longer) than the rest
    pub fn hanging(first_width: Pt, width: Pt) -> LineWrap {
        LineWrap {
            first_width,
            width,
            may_defer_first: false,
        }
    }

    pub fn deferring_first(self) -> LineWrap {
        LineWrap {
            may_defer_first: true,
            ..self
        }
    }

    /// Wrap `text`, measuring candidate lines with `measure`
    pub fn wrap<F>(&self, text: &str, measure: F) -> Vec<String>
    where
        F: Fn(&str) -> Pt,
    {
        let text = normalise(text);
        let mut lines: Vec<String> = Vec::new();

        for source_line in text.split('\n') {
            let mut current = String::new();
            for word in source_line.split_whitespace() {
                let room = if lines.is_empty() {
                    self.first_width
                } else {
                    self.width
                };

                if current.is_empty() {
                    if lines.is_empty() && self.may_defer_first && measure(word) > room {
                        lines.push(String::new());
                    }
                    current.push_str(word);
                    continue;
                }

                let candidate_width = measure(&current) + measure(" ") + measure(word);
                if candidate_width <= room {
                    current.push(' ');
                    current.push_str(word);
                } else {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(word);
                }
            }
            lines.push(current);
        }

        log::trace!("wrapped {} chars into {} lines", text.len(), lines.len());
        lines
    }
}

/// Expand tabs and normalise line endings
fn normalise(text: &str) -> String {
    text.replace('\t', &" ".repeat(TABSIZE))
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}
