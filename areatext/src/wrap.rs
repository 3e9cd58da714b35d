//! Greedy word wrapping against a measurement oracle.
//!
//! Content is split into paragraphs on explicit line breaks, each paragraph
//! into words on single spaces. Words are appended to the current line while
//! the measured line (with its trailing separator space) fits the width; the
//! first word of a line is always accepted, so a word wider than the box sits
//! alone on its own line. Words are never split.
//!
//! Lines inside a paragraph keep the separator space they were built with.
//! The paragraph's last line drops the one separator appended after its final
//! word, so concatenating a paragraph's lines gives back the paragraph.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\n|\r").expect("valid paragraph break pattern"));

/// Output of one wrap pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLayout {
    pub lines: Vec<String>,
    /// Widest first word of any line, trailing space included.
    pub min_width: f32,
    /// Number of explicit paragraphs in the source content.
    pub paragraphs: usize,
}

impl TextLayout {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Split `content` into paragraphs on `\r\n`, `\n` or `\r`.
pub fn paragraphs(content: &str) -> impl Iterator<Item = &str> {
    PARAGRAPH_BREAK.split(content)
}

/// Break `content` into lines no wider than `width` where words allow.
///
/// `measure` returns the advance width of a string. Any measurement error
/// aborts the whole pass; no partial layout is returned.
pub fn wrap<M>(content: &str, width: f32, mut measure: M) -> Result<TextLayout>
where
    M: FnMut(&str) -> Result<f32>,
{
    let mut layout = TextLayout::default();

    for paragraph in paragraphs(content) {
        layout.paragraphs += 1;
        let mut line = String::new();
        let mut words_on_line = 0usize;

        for word in paragraph.split(' ') {
            let candidate = format!("{line}{word} ");
            let candidate_width = measure(&candidate)?;

            if candidate_width > width && words_on_line > 0 {
                layout.lines.push(std::mem::take(&mut line));
                line.push_str(word);
                line.push(' ');
                words_on_line = 1;
                layout.min_width = layout.min_width.max(measure(&line)?);
            } else {
                if words_on_line == 0 {
                    layout.min_width = layout.min_width.max(candidate_width);
                }
                line = candidate;
                words_on_line += 1;
            }
        }

        // `split` always yields at least one word, so the separator is there.
        line.pop();
        layout.lines.push(line);
    }

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TextError;

    /// 10 units per char.
    fn mono(text: &str) -> Result<f32> {
        Ok(text.chars().count() as f32 * 10.0)
    }

    fn lines(content: &str, width: f32) -> Vec<String> {
        wrap(content, width, mono).unwrap().lines
    }

    #[test]
    fn breaks_between_words() {
        // "The quick " = 100, "The quick brown " = 160
        assert_eq!(lines("The quick brown fox", 120.0), vec!["The quick ", "brown fox"]);
    }

    #[test]
    fn everything_fits_on_one_line() {
        assert_eq!(lines("The quick brown fox", 1000.0), vec!["The quick brown fox"]);
    }

    #[test]
    fn explicit_breaks_always_separate() {
        assert_eq!(lines("A\nB", 1000.0), vec!["A", "B"]);
        assert_eq!(lines("A\r\nB\rC", 1000.0), vec!["A", "B", "C"]);
        assert_eq!(lines("A\n\nB", 1000.0), vec!["A", "", "B"]);
    }

    #[test]
    fn empty_content_is_one_empty_line() {
        let layout = wrap("", 100.0, mono).unwrap();
        assert_eq!(layout.lines, vec![""]);
        assert_eq!(layout.paragraphs, 1);
        // " " is the first candidate
        assert_eq!(layout.min_width, 10.0);
    }

    #[test]
    fn overlong_word_sits_alone() {
        assert_eq!(
            lines("a incomprehensibilities b", 50.0),
            vec!["a ", "incomprehensibilities ", "b"]
        );
    }

    #[test]
    fn zero_width_puts_each_word_on_its_own_line() {
        assert_eq!(lines("one two three", 0.0), vec!["one ", "two ", "three"]);
        assert_eq!(lines("one two three", -5.0), vec!["one ", "two ", "three"]);
    }

    #[test]
    fn min_width_is_widest_first_word() {
        let layout = wrap("aa bbbbbb c", 70.0, mono).unwrap();
        assert_eq!(layout.lines, vec!["aa ", "bbbbbb ", "c"]);
        // "bbbbbb " = 70
        assert_eq!(layout.min_width, 70.0);
    }

    #[test]
    fn repeated_spaces_are_kept() {
        assert_eq!(lines("a  b", 1000.0), vec!["a  b"]);
        assert_eq!(lines("trailing ", 1000.0), vec!["trailing "]);
    }

    #[test]
    fn measurement_failure_aborts() {
        let mut calls = 0;
        let result = wrap("one two three", 100.0, |text| {
            calls += 1;
            if calls == 2 {
                Err(TextError::Measure("no font".into()))
            } else {
                mono(text)
            }
        });
        assert!(matches!(result, Err(TextError::Measure(_))));
        assert_eq!(calls, 2);
    }

    #[test]
    fn same_inputs_same_layout() {
        let content = "lorem ipsum dolor\nsit amet consectetur adipiscing";
        assert_eq!(wrap(content, 90.0, mono).unwrap(), wrap(content, 90.0, mono).unwrap());
    }
}
