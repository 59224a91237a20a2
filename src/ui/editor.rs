use super::{ChangePatch, Element};
use crate::fonts::FontSet;
use crate::layout::{
    browser_vertical_adjustments, calculate_dynamic_font_size, BrowserAdjustments, TextBox,
};
use crate::schema::TextStyle;
use crate::schemas::{percentage, percentage_label};
use crate::units::Pt;

/// New typography for an edited text block after its dynamic font size was recomputed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizeUpdate {
    pub font_size: Pt,
    pub adjustments: BrowserAdjustments,
}

impl FontSizeUpdate {
    pub fn apply_to(&self, text_block: &mut Element) {
        text_block.set_style("font-size", format!("{}pt", self.font_size));
        text_block.set_style("padding-top", format!("{}px", self.adjustments.top));
        text_block.set_style("margin-bottom", format!("{}px", self.adjustments.bottom));
    }
}

/// State behind an editable text block
#[derive(Debug, Clone)]
pub struct TextEditor {
    /// Id of the text block element being edited
    pub element_id: String,
    style: TextStyle,
    text_box: TextBox,
    dynamic_font_size: Option<Pt>,
}

impl TextEditor {
    pub fn new(element_id: String, style: &TextStyle, text_box: TextBox) -> TextEditor {
        TextEditor {
            element_id,
            style: style.clone(),
            text_box,
            dynamic_font_size: None,
        }
    }

    /// Start from a size computed when the block was first rendered
    pub fn with_font_size(mut self, size: Option<Pt>) -> TextEditor {
        self.dynamic_font_size = size;
        self
    }

    /// The size the block is currently shown at
    pub fn font_size(&self) -> Pt {
        self.dynamic_font_size
            .unwrap_or(Pt(self.style.font_size))
    }

    /// Recompute the dynamic font size after a key was released. The previous size is the
    /// starting point of the search. Returns [None] when the schema has no dynamic size or
    /// the block is empty.
    pub fn on_keyup(&mut self, fonts: &FontSet, text: &str) -> Option<FontSizeUpdate> {
        let range = self.style.dynamic_font_size.as_ref()?;
        if text.is_empty() {
            return None;
        }

        let (_, font) = fonts.resolve(self.style.font_name.as_deref());
        let size = calculate_dynamic_font_size(
            text,
            font,
            range,
            Pt(self.style.character_spacing),
            &self.text_box,
            self.font_size(),
        );
        self.dynamic_font_size = Some(size);

        Some(FontSizeUpdate {
            font_size: size,
            adjustments: browser_vertical_adjustments(
                font,
                size,
                self.style.line_height,
                self.style.vertical_alignment,
            ),
        })
    }

    /// The block lost focus: report its text as the new content
    pub fn commit(&self, text: &str) -> ChangePatch {
        ChangePatch::content(text)
    }
}

/// A slider moved on a progress bar
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// CSS width of the filled bar
    pub bar_width: String,
    /// New label, when the bar shows one
    pub label: Option<String>,
    pub patch: ChangePatch,
}

/// State behind an editable progress bar
#[derive(Debug, Clone)]
pub struct ProgressEditor {
    /// Id of the filled bar element
    pub bar_id: String,
    /// Id of the label element
    pub label_id: String,
    show_percentage: bool,
}

impl ProgressEditor {
    pub fn new(bar_id: String, label_id: String, show_percentage: bool) -> ProgressEditor {
        ProgressEditor {
            bar_id,
            label_id,
            show_percentage,
        }
    }

    /// The range input reported `value`. The bar and label show it clamped to `0..=100`,
    /// the same as a rendered page would.
    pub fn on_input(&mut self, value: &str) -> ProgressUpdate {
        let percentage = percentage(value);
        ProgressUpdate {
            bar_width: format!("{percentage}%"),
            label: self.show_percentage.then(|| percentage_label(percentage)),
            patch: ChangePatch::content(value),
        }
    }

    /// Reflect an update in the bar's element tree
    pub fn apply(&self, update: &ProgressUpdate, root: &mut Element) {
        if let Some(bar) = root.find_mut(&self.bar_id) {
            bar.set_style("width", &update.bar_width);
        }
        if let (Some(label), Some(element)) = (&update.label, root.find_mut(&self.label_id)) {
            element.text = Some(label.clone());
        }
    }
}
