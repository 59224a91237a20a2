use super::metrics::{font_descent, font_height, FontMetrics};
use crate::units::{Pt, Px};
use serde::{Deserialize, Serialize};

/// Horizontal alignment of each line within its box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    /// Lines wrapped by width are stretched to the full box width
    Justify,
}

impl Alignment {
    /// The CSS `text-align` value
    pub fn as_css(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }
}

/// Vertical placement of the block of lines within its box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl VerticalAlignment {
    /// The flexbox `justify-content` value that places a column the same way
    pub fn as_flex(&self) -> &'static str {
        match self {
            VerticalAlignment::Top => "flex-start",
            VerticalAlignment::Middle => "center",
            VerticalAlignment::Bottom => "flex-end",
        }
    }
}

/// Offset from the left edge of the box to the start of a line
pub fn horizontal_offset(alignment: Alignment, box_width: Pt, line_width: Pt) -> Pt {
    match alignment {
        Alignment::Left | Alignment::Justify => Pt(0.0),
        Alignment::Center => (box_width - line_width) / 2.0,
        Alignment::Right => box_width - line_width,
    }
}

/// Extra space above the first line when the line height is not 1, so that text sits in the
/// middle of its line like it does in a browser
fn half_leading(size: Pt, line_height: f32) -> Pt {
    if line_height == 0.0 {
        Pt(0.0)
    } else {
        size * ((line_height - 1.0) / 2.0)
    }
}

/// Distance from the top of the box down to the baseline of the first line.
///
/// Each following line's baseline sits `size * line_height` below the previous one. Bottom
/// and middle alignment account for the font's descent so the last line's descenders stay
/// inside the box.
pub fn vertical_offset<M: FontMetrics + ?Sized>(
    metrics: &M,
    size: Pt,
    line_height: f32,
    line_count: usize,
    box_height: Pt,
    alignment: VerticalAlignment,
) -> Pt {
    let first_line = font_height(metrics, size);
    let descent = font_descent(metrics, size);
    let other_lines = size * (line_height * line_count.saturating_sub(1) as f32);

    match alignment {
        VerticalAlignment::Top => first_line + half_leading(size, line_height),
        VerticalAlignment::Bottom => {
            box_height - other_lines + descent - half_leading(size, line_height)
        }
        VerticalAlignment::Middle => {
            (box_height - other_lines - first_line + descent) / 2.0 + first_line
        }
    }
}

/// Padding and margin the editing surface applies to its text block so text rendered by a
/// browser lines up with the text drawn in the PDF.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BrowserAdjustments {
    /// Applied as `padding-top`
    pub top: Px,
    /// Applied as `margin-bottom`
    pub bottom: Px,
}

/// Browsers centre glyphs within the font's own line box (ascender to descender), which is
/// taller than the font size. Top aligned text is pushed down by half the difference; bottom
/// and middle aligned text is lifted when the line height is tighter than the font's line box,
/// since a browser lets those descenders hang outside a `div`.
pub fn browser_vertical_adjustments<M: FontMetrics + ?Sized>(
    metrics: &M,
    size: Pt,
    line_height: f32,
    alignment: VerticalAlignment,
) -> BrowserAdjustments {
    let base_line_height =
        (metrics.ascender() as f32 - metrics.descender() as f32) / metrics.units_per_em() as f32;

    if alignment == VerticalAlignment::Top {
        let top = (size * base_line_height - size) / 2.0;
        return BrowserAdjustments {
            top: top.into(),
            bottom: Px(0.0),
        };
    }

    let bottom = if line_height < base_line_height {
        size * ((base_line_height - line_height) / 2.0)
    } else {
        Pt(0.0)
    };
    BrowserAdjustments {
        top: Px(0.0),
        bottom: bottom.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::metrics::{font_ascent, MonospaceMetrics};

    #[test]
    fn top_aligned_baseline_is_one_ascent_down() {
        let m = MonospaceMetrics::default();
        let y = vertical_offset(&m, Pt(10.0), 1.0, 3, Pt(100.0), VerticalAlignment::Top);
        assert_eq!(y, Pt(8.0));

        // a 1.5 line height adds half of the extra leading above the first line
        let y = vertical_offset(&m, Pt(10.0), 1.5, 3, Pt(100.0), VerticalAlignment::Top);
        assert_eq!(y, Pt(10.5));
    }

    #[test]
    fn bottom_aligned_last_line_keeps_its_descenders_inside() {
        let m = MonospaceMetrics::default();
        let first = vertical_offset(&m, Pt(10.0), 1.0, 3, Pt(100.0), VerticalAlignment::Bottom);
        let last_baseline = first + Pt(10.0) * 2.0;
        // last baseline plus the descent lands exactly on the bottom edge
        assert_eq!(last_baseline - font_descent(&m, Pt(10.0)), Pt(100.0));
    }

    #[test]
    fn middle_centres_a_single_line() {
        let m = MonospaceMetrics::default();
        for (size, height) in [(10.0, 50.0), (13.0, 20.0), (7.5, 33.3)] {
            let size = Pt(size);
            let height = Pt(height);
            let baseline = vertical_offset(&m, size, 1.0, 1, height, VerticalAlignment::Middle);
            let above = baseline - font_ascent(&m, size);
            let below = height - (baseline - font_descent(&m, size));
            assert!((*above - *below).abs() <= *size * 0.5, "{above} vs {below}");
            assert!((*above - *below).abs() < 1e-4);
        }
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(
            horizontal_offset(Alignment::Left, Pt(100.0), Pt(40.0)),
            Pt(0.0)
        );
        assert_eq!(
            horizontal_offset(Alignment::Center, Pt(100.0), Pt(40.0)),
            Pt(30.0)
        );
        assert_eq!(
            horizontal_offset(Alignment::Right, Pt(100.0), Pt(40.0)),
            Pt(60.0)
        );
        assert_eq!(
            horizontal_offset(Alignment::Justify, Pt(100.0), Pt(40.0)),
            Pt(0.0)
        );
    }

    #[test]
    fn browser_adjustments_depend_on_alignment() {
        // line box is 1.0 em here, so nothing to adjust at line height 1
        let m = MonospaceMetrics::default();
        let top = browser_vertical_adjustments(&m, Pt(12.0), 1.0, VerticalAlignment::Top);
        assert_eq!(top, BrowserAdjustments::default());

        let tall = MonospaceMetrics {
            ascender: 900,
            descender: -300,
            ..Default::default()
        };
        let top = browser_vertical_adjustments(&tall, Pt(12.0), 1.0, VerticalAlignment::Top);
        assert!(*top.top > 0.0);
        assert_eq!(top.bottom, Px(0.0));

        let bottom = browser_vertical_adjustments(&tall, Pt(12.0), 1.0, VerticalAlignment::Bottom);
        assert_eq!(bottom.top, Px(0.0));
        assert!(*bottom.bottom > 0.0);

        let loose = browser_vertical_adjustments(&tall, Pt(12.0), 2.0, VerticalAlignment::Middle);
        assert_eq!(loose, BrowserAdjustments::default());
    }
}
