use super::metrics::{advance_units, grapheme_count, FontMetrics, Measure};
use crate::units::Pt;
use unicode_segmentation::UnicodeSegmentation;

/// One line of wrapped text, measured at the size it was wrapped with
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    /// Width of the line including character spacing between its graphemes
    pub width: Pt,
    /// The line ends at an explicit line break or the end of the text, rather than because
    /// the next segment did not fit in the box
    pub hard_break: bool,
}

impl Line {
    /// Text to hand to a drawing backend. Some PDF viewers complain about entirely empty text
    /// draws, so an empty line is drawn as a single space.
    pub fn drawable_text(&self) -> &str {
        if self.text.is_empty() {
            " "
        } else {
            &self.text
        }
    }
}

/// Split text into paragraphs on explicit line breaks: `\r\n`, `\r`, `\n`, form feed and
/// vertical tab. Always yields at least one (possibly empty) paragraph.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut paragraphs = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '\r' => {
                paragraphs.push(&text[start..i]);
                if let Some(&(_, '\n')) = chars.peek() {
                    chars.next();
                    start = i + 2;
                } else {
                    start = i + 1;
                }
            }
            '\n' | '\u{000C}' | '\u{000B}' => {
                paragraphs.push(&text[start..i]);
                start = i + ch.len_utf8();
            }
            _ => {}
        }
    }
    paragraphs.push(&text[start..]);
    paragraphs
}

/// Break a paragraph into the segments lines are packed from: words, runs of whitespace and
/// other word-boundary segments. Trailing punctuation is glued to the word before it so a
/// comma or full stop never starts a line on its own.
fn segments(paragraph: &str) -> Vec<&str> {
    let is_punctuation = |s: &str| s.chars().all(|c| !c.is_alphanumeric() && !c.is_whitespace());

    let mut out: Vec<&str> = Vec::new();
    let mut chunk: Option<(usize, usize)> = None;
    for (start, segment) in paragraph.split_word_bound_indices() {
        let end = start + segment.len();
        match chunk {
            Some((chunk_start, chunk_end))
                if is_punctuation(segment)
                    && !paragraph[chunk_start..chunk_end].trim().is_empty() =>
            {
                chunk = Some((chunk_start, end));
            }
            _ => {
                if let Some((chunk_start, chunk_end)) = chunk {
                    out.push(&paragraph[chunk_start..chunk_end]);
                }
                chunk = Some((start, end));
            }
        }
    }
    if let Some((chunk_start, chunk_end)) = chunk {
        out.push(&paragraph[chunk_start..chunk_end]);
    }
    out
}

/// The line currently being filled. Advances are kept in integer design units so the width
/// compared while packing is exactly the width [Measure::width] reports for the final text.
#[derive(Default)]
struct LineBuilder {
    text: String,
    units: u32,
    graphemes: usize,
}

impl LineBuilder {
    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn width_with<M: FontMetrics + ?Sized>(
        &self,
        measure: &Measure<'_, M>,
        units: u32,
        graphemes: usize,
    ) -> Pt {
        measure.width_of_units(self.units + units, self.graphemes + graphemes)
    }

    fn push(&mut self, segment: &str, units: u32, graphemes: usize) {
        self.text.push_str(segment);
        self.units += units;
        self.graphemes += graphemes;
    }

    /// Finish a line that was broken because it ran out of width. Trailing whitespace would
    /// only push the visible text away from right/centre alignment, so it is dropped.
    fn finish_soft<M: FontMetrics + ?Sized>(&mut self, measure: &Measure<'_, M>) -> Line {
        let text = std::mem::take(self).text;
        let text = text.trim_end().to_string();
        Line {
            width: measure.width(&text),
            text,
            hard_break: false,
        }
    }

    fn finish_hard<M: FontMetrics + ?Sized>(self, measure: &Measure<'_, M>) -> Line {
        Line {
            width: measure.width_of_units(self.units, self.graphemes),
            text: self.text,
            hard_break: true,
        }
    }
}

/// Greedily wrap a single paragraph (text without explicit line breaks) into lines no wider
/// than `box_width`. Words that are wider than the box on their own are broken between
/// graphemes; a single grapheme wider than the box gets a line to itself.
pub fn wrap_paragraph<M: FontMetrics + ?Sized>(
    paragraph: &str,
    measure: &Measure<'_, M>,
    box_width: Pt,
) -> Vec<Line> {
    if paragraph.trim().is_empty() {
        return vec![Line {
            text: String::new(),
            width: Pt(0.0),
            hard_break: true,
        }];
    }

    let mut lines = Vec::new();
    let mut current = LineBuilder::default();

    for segment in segments(paragraph.trim_end()) {
        let units = advance_units(segment, measure.metrics);
        let graphemes = grapheme_count(segment);

        if current.width_with(measure, units, graphemes) <= box_width {
            current.push(segment, units, graphemes);
        } else if segment.trim().is_empty() {
            // whitespace that doesn't fit ends the line and is swallowed by the break
            if !current.is_empty() {
                lines.push(current.finish_soft(measure));
            }
        } else if measure.width_of_units(units, graphemes) <= box_width {
            if !current.is_empty() {
                lines.push(current.finish_soft(measure));
            }
            current.push(segment, units, graphemes);
        } else {
            // the segment can't fit on any line, break it between graphemes
            for grapheme in segment.graphemes(true) {
                let units = advance_units(grapheme, measure.metrics);
                if !current.is_empty() && current.width_with(measure, units, 1) > box_width {
                    lines.push(current.finish_soft(measure));
                }
                current.push(grapheme, units, 1);
            }
        }
    }

    lines.push(current.finish_hard(measure));
    lines
}

/// Wrap `text` into lines that fit `box_width` at the measure's font size, honouring explicit
/// line breaks. Never returns an empty list: empty text yields one empty line.
pub fn split_text_to_size<M: FontMetrics + ?Sized>(
    text: &str,
    measure: &Measure<'_, M>,
    box_width: Pt,
) -> Vec<Line> {
    split_paragraphs(text)
        .into_iter()
        .flat_map(|paragraph| wrap_paragraph(paragraph, measure, box_width))
        .collect()
}

/// Character spacing to draw `line` with so that it spans exactly `box_width` when justified.
/// Lines that end at an explicit break keep their natural spacing, as do lines with a single
/// grapheme. The slack is shared between grapheme gaps, so multi-codepoint graphemes are
/// not stretched internally.
pub fn justify_spacing(line: &Line, box_width: Pt, character_spacing: Pt) -> Pt {
    if line.hard_break {
        return character_spacing;
    }
    let gaps = grapheme_count(&line.text).saturating_sub(1);
    if gaps == 0 {
        return character_spacing;
    }
    character_spacing + (box_width - line.width) / gaps as f32
}
