use crate::units::Pt;
use unicode_segmentation::UnicodeSegmentation;

/// Character drawn in the editing surface in place of glyphs the font cannot render
pub const UNSUPPORTED_CHAR: char = '〿';

/// Glyph metrics needed to measure and position text. Implemented by [crate::Font] for real
/// TrueType / OpenType faces, and by [MonospaceMetrics] for deterministic measurement when
/// no font has been loaded.
pub trait FontMetrics {
    /// Design units per em square
    fn units_per_em(&self) -> u16;

    /// Distance from the baseline to the top of the font, in design units
    fn ascender(&self) -> i16;

    /// Distance from the baseline to the bottom of the font, in design units. Usually negative.
    fn descender(&self) -> i16;

    /// Horizontal advance of the glyph for `ch`, or [None] if the font has no glyph for it
    fn glyph_advance(&self, ch: char) -> Option<u16>;

    /// Horizontal advance of the glyph drawn in place of unsupported characters
    fn replacement_advance(&self) -> u16;

    fn has_glyph(&self, ch: char) -> bool {
        self.glyph_advance(ch).is_some()
    }
}

impl<M: FontMetrics + ?Sized> FontMetrics for &M {
    fn units_per_em(&self) -> u16 {
        (**self).units_per_em()
    }

    fn ascender(&self) -> i16 {
        (**self).ascender()
    }

    fn descender(&self) -> i16 {
        (**self).descender()
    }

    fn glyph_advance(&self, ch: char) -> Option<u16> {
        (**self).glyph_advance(ch)
    }

    fn replacement_advance(&self) -> u16 {
        (**self).replacement_advance()
    }
}

/// Deterministic metrics where every supported glyph has the same advance.
#[derive(Debug, Clone)]
pub struct MonospaceMetrics {
    pub units_per_em: u16,
    pub advance: u16,
    pub ascender: i16,
    pub descender: i16,
    /// Which characters the pretend font has glyphs for
    pub supports: fn(char) -> bool,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        MonospaceMetrics {
            units_per_em: 1000,
            advance: 500,
            ascender: 800,
            descender: -200,
            supports: |_| true,
        }
    }
}

impl FontMetrics for MonospaceMetrics {
    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn ascender(&self) -> i16 {
        self.ascender
    }

    fn descender(&self) -> i16 {
        self.descender
    }

    fn glyph_advance(&self, ch: char) -> Option<u16> {
        (self.supports)(ch).then_some(self.advance)
    }

    fn replacement_advance(&self) -> u16 {
        self.advance
    }
}

/// Convert a length in design units to points at the given font size
pub fn scaled<M: FontMetrics + ?Sized>(metrics: &M, units: f32, size: Pt) -> Pt {
    Pt(units * *size / metrics.units_per_em().max(1) as f32)
}

/// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
pub fn font_ascent<M: FontMetrics + ?Sized>(metrics: &M, size: Pt) -> Pt {
    scaled(metrics, metrics.ascender() as f32, size)
}

/// Calculate the descent (distance from the baseline to the bottom of the font) for the given
/// font size. Note: this is usually negative
pub fn font_descent<M: FontMetrics + ?Sized>(metrics: &M, size: Pt) -> Pt {
    scaled(metrics, metrics.descender() as f32, size)
}

/// Height of the first line of text above its baseline: the full font box less the part that
/// hangs below the baseline
pub fn font_height<M: FontMetrics + ?Sized>(metrics: &M, size: Pt) -> Pt {
    let ascent = font_ascent(metrics, size);
    let descent = font_descent(metrics, size);
    (ascent - descent) - descent.abs()
}

/// Sum of the horizontal advances of `text` in design units. Unsupported characters count
/// as the replacement glyph.
pub fn advance_units<M: FontMetrics + ?Sized>(text: &str, metrics: &M) -> u32 {
    text.chars()
        .map(|ch| {
            metrics
                .glyph_advance(ch)
                .unwrap_or_else(|| metrics.replacement_advance()) as u32
        })
        .sum()
}

/// Width of the glyphs of `text` alone, without any character spacing
pub fn advance_of_text<M: FontMetrics + ?Sized>(text: &str, metrics: &M, size: Pt) -> Pt {
    scaled(metrics, advance_units(text, metrics) as f32, size)
}

/// Number of user-perceived characters in `text`
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Calculate the width of a line of text given the font, font size and the spacing inserted
/// between each pair of graphemes
pub fn width_of_text<M: FontMetrics + ?Sized>(
    text: &str,
    metrics: &M,
    size: Pt,
    character_spacing: Pt,
) -> Pt {
    Measure::new(metrics, size, character_spacing).width(text)
}

/// A font at a resolved size and character spacing. Every width the layout engine compares
/// against a box goes through the same [Measure], so wrapping, fitting and drawing agree on
/// the numbers.
pub struct Measure<'a, M: ?Sized> {
    pub metrics: &'a M,
    pub size: Pt,
    pub character_spacing: Pt,
}

impl<M: ?Sized> Clone for Measure<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for Measure<'_, M> {}

impl<'a, M: FontMetrics + ?Sized> Measure<'a, M> {
    pub fn new(metrics: &'a M, size: Pt, character_spacing: Pt) -> Self {
        Measure {
            metrics,
            size,
            character_spacing,
        }
    }

    /// Width of a run made of `units` design units of advance spread over `graphemes` graphemes
    pub fn width_of_units(&self, units: u32, graphemes: usize) -> Pt {
        scaled(self.metrics, units as f32, self.size)
            + self.character_spacing * graphemes.saturating_sub(1) as f32
    }

    pub fn width(&self, text: &str) -> Pt {
        self.width_of_units(advance_units(text, self.metrics), grapheme_count(text))
    }
}

/// Replace every character the font has no glyph for with [UNSUPPORTED_CHAR]. Whitespace,
/// line breaks and control characters are kept as they are.
pub fn replace_unsupported_chars<M: FontMetrics + ?Sized>(text: &str, metrics: &M) -> String {
    text.chars()
        .map(|ch| {
            if ch.is_whitespace() || ch.is_control() || metrics.has_glyph(ch) {
                ch
            } else {
                UNSUPPORTED_CHAR
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_applies_between_graphemes_only() {
        let m = MonospaceMetrics::default();
        assert_eq!(width_of_text("abc", &m, Pt(10.0), Pt(0.0)), Pt(15.0));
        assert_eq!(width_of_text("abc", &m, Pt(10.0), Pt(1.0)), Pt(17.0));
        assert_eq!(width_of_text("", &m, Pt(10.0), Pt(1.0)), Pt(0.0));
    }

    #[test]
    fn combining_marks_do_not_add_spacing() {
        let m = MonospaceMetrics::default();
        // "e" + combining acute is one grapheme made of two chars
        let text = "e\u{301}x";
        assert_eq!(grapheme_count(text), 2);
        let plain = advance_of_text(text, &m, Pt(10.0));
        assert_eq!(width_of_text(text, &m, Pt(10.0), Pt(2.0)), plain + Pt(2.0));
    }

    #[test]
    fn first_line_height_is_the_ascent() {
        let m = MonospaceMetrics::default();
        assert_eq!(font_height(&m, Pt(10.0)), Pt(8.0));
        assert_eq!(font_descent(&m, Pt(10.0)), Pt(-2.0));
    }

    #[test]
    fn unsupported_chars_are_replaced() {
        let m = MonospaceMetrics {
            supports: |c| c.is_ascii(),
            ..Default::default()
        };
        assert_eq!(replace_unsupported_chars("añ b\nc", &m), "a〿 b\nc");
    }
}
