use super::metrics::{font_height, FontMetrics, Measure};
use super::wrap::{split_paragraphs, wrap_paragraph};
use crate::units::Pt;
use serde::{Deserialize, Serialize};

/// Step between candidate font sizes when searching for a dynamic font size
pub const FONT_SIZE_ADJUSTMENT: f32 = 0.25;

/// Which dimension of the box a dynamic font size is fitted against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Each paragraph is measured unwrapped and must fit the box width
    Horizontal,
    /// Text wraps at the box width and the wrapped block must fit the box height
    #[default]
    Vertical,
}

/// Range a dynamic font size may take
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynamicFontSize {
    pub min: f32,
    pub max: f32,
    #[serde(default)]
    pub fit: FitMode,
}

/// The box text is laid out in, plus the line height multiplier used to stack lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub width: Pt,
    pub height: Pt,
    pub line_height: f32,
}

/// Width and height of laid out text, as compared against a [TextBox]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: Pt,
    pub height: Pt,
}

/// Measure how much room `text` needs at `size`. The first line counts with the font's height
/// above the baseline, every further line with `size * line_height`.
pub fn text_extent<M: FontMetrics + ?Sized>(
    text: &str,
    measure: &Measure<'_, M>,
    fit: FitMode,
    text_box: &TextBox,
) -> TextExtent {
    let first_line = font_height(measure.metrics, measure.size) * text_box.line_height;
    let other_lines = measure.size * text_box.line_height;

    let mut width = Pt(0.0);
    let mut height = Pt(0.0);
    let mut line_count = 0usize;

    for paragraph in split_paragraphs(text) {
        let lines = wrap_paragraph(paragraph, measure, text_box.width);
        for line in lines.iter() {
            if fit == FitMode::Vertical {
                width = width.max(line.width);
            }
            height += if line_count == 0 {
                first_line
            } else {
                other_lines
            };
            line_count += 1;
        }
        if fit == FitMode::Horizontal {
            width = width.max(measure.width(paragraph));
        }
    }

    TextExtent { width, height }
}

fn fits<M: FontMetrics + ?Sized>(
    text: &str,
    metrics: &M,
    size: Pt,
    character_spacing: Pt,
    fit: FitMode,
    text_box: &TextBox,
) -> bool {
    let measure = Measure::new(metrics, size, character_spacing);
    let extent = text_extent(text, &measure, fit, text_box);
    extent.width <= text_box.width && extent.height <= text_box.height
}

/// Find the largest font size within `range` at which `text` fits `text_box`.
///
/// Candidate sizes lie on a [FONT_SIZE_ADJUSTMENT] grid starting at `range.min` (plus
/// `range.max` itself). `starting_size` only decides where the search starts; since text
/// that fits at one size also fits at every smaller size, the answer is the same whatever
/// the hint, which keeps interactive resizing stable. If nothing fits, `range.min` is
/// returned. An inverted range leaves `starting_size` untouched.
pub fn calculate_dynamic_font_size<M: FontMetrics + ?Sized>(
    text: &str,
    metrics: &M,
    range: &DynamicFontSize,
    character_spacing: Pt,
    text_box: &TextBox,
    starting_size: Pt,
) -> Pt {
    if range.max < range.min {
        return starting_size;
    }

    let steps = ((range.max - range.min) / FONT_SIZE_ADJUSTMENT).floor() as usize;
    let candidate = |k: usize| -> Pt {
        if k <= steps {
            Pt(range.min + k as f32 * FONT_SIZE_ADJUSTMENT)
        } else {
            Pt(range.max)
        }
    };
    let top = if range.max - *candidate(steps) > 1e-4 {
        steps + 1
    } else {
        steps
    };
    let fits_at = |k: usize| {
        fits(
            text,
            metrics,
            candidate(k),
            character_spacing,
            range.fit,
            text_box,
        )
    };

    let hint = ((*starting_size - range.min) / FONT_SIZE_ADJUSTMENT).round();
    let mut k = if hint.is_finite() && hint > 0.0 {
        (hint as usize).min(top)
    } else {
        0
    };

    if fits_at(k) {
        while k < top && fits_at(k + 1) {
            k += 1;
        }
    } else {
        while k > 0 {
            k -= 1;
            if fits_at(k) {
                break;
            }
        }
    }

    let size = candidate(k);
    log::debug!(
        "dynamic font size for {} chars resolved to {} (hint {}, range {}..={})",
        text.len(),
        size,
        starting_size,
        range.min,
        range.max
    );
    size
}
