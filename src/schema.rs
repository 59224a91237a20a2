//! Declarative schema configuration, as found in template JSON.

use crate::layout::{Alignment, DynamicFontSize, VerticalAlignment};
use crate::rect::Rect;
use crate::units::{Mm, Pt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_FONT_SIZE: f32 = 13.0;
pub const DEFAULT_LINE_HEIGHT: f32 = 1.0;
pub const DEFAULT_CHARACTER_SPACING: f32 = 0.0;
pub const DEFAULT_FONT_COLOR: &str = "#000000";
pub const PLACEHOLDER_FONT_COLOR: &str = "#A0A0A0";
pub const DEFAULT_OPACITY: f32 = 1.0;

pub const BCP_POSITIVE_BACKGROUND_COLOR: &str = "#C6EFCE";
pub const BCP_NEGATIVE_BACKGROUND_COLOR: &str = "#FFC7CE";
pub const DEFAULT_THRESHOLD_BACKGROUND_COLOR: &str = "#FFC7CE";

pub const DEFAULT_BAR_COLOR: &str = "#4CAF50";
pub const DEFAULT_BAR_BACKGROUND_COLOR: &str = "#E0E0E0";
pub const DEFAULT_BAR_TEXT_COLOR: &str = "#000000";

/// One input record: field values (and other variables) by name
pub type Variables = HashMap<String, String>;

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

fn default_line_height() -> f32 {
    DEFAULT_LINE_HEIGHT
}

fn default_font_color() -> String {
    DEFAULT_FONT_COLOR.to_string()
}

fn default_opacity() -> f32 {
    DEFAULT_OPACITY
}

fn default_true() -> bool {
    true
}

fn default_bar_color() -> String {
    DEFAULT_BAR_COLOR.to_string()
}

fn default_bar_background_color() -> String {
    DEFAULT_BAR_BACKGROUND_COLOR.to_string()
}

fn default_bar_text_color() -> String {
    DEFAULT_BAR_TEXT_COLOR.to_string()
}

fn default_threshold_background_color() -> String {
    DEFAULT_THRESHOLD_BACKGROUND_COLOR.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: Mm,
    pub y: Mm,
}

/// Fields every schema kind carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The input field this schema reads its value from
    #[serde(default)]
    pub name: String,
    /// The value used when the input record has no entry for this schema
    #[serde(default)]
    pub content: String,
    /// Top left corner, measured from the top left of the page
    pub position: Position,
    pub width: Mm,
    pub height: Mm,
    /// Clockwise rotation in degrees about the centre of the box
    #[serde(default)]
    pub rotate: f32,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub read_only: bool,
}

impl BaseSchema {
    /// The schema's box in PDF coordinates, with the origin in the bottom left of a page
    /// `page_height` tall
    pub fn pdf_rect(&self, page_height: Pt) -> Rect {
        let width: Pt = self.width.into();
        let height: Pt = self.height.into();
        let x: Pt = self.position.x.into();
        let top: Pt = self.position.y.into();
        Rect::from_origin(x, page_height - top - height, width, height)
    }

    /// Identifier used for the schema's element on the editing surface
    pub fn element_id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// The value of this field in `variables`, falling back to the schema's own content
    pub fn value_in<'a>(&'a self, variables: &'a Variables) -> &'a str {
        variables
            .get(&self.name)
            .map(String::as_str)
            .unwrap_or(&self.content)
    }
}

/// Typography shared by every text-bearing schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_line_height")]
    pub line_height: f32,
    #[serde(default)]
    pub character_spacing: f32,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub vertical_alignment: VerticalAlignment,
    #[serde(default = "default_font_color")]
    pub font_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_font_size: Option<DynamicFontSize>,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            font_name: None,
            font_size: DEFAULT_FONT_SIZE,
            line_height: DEFAULT_LINE_HEIGHT,
            character_spacing: DEFAULT_CHARACTER_SPACING,
            alignment: Alignment::default(),
            vertical_alignment: VerticalAlignment::default(),
            font_color: DEFAULT_FONT_COLOR.to_string(),
            dynamic_font_size: None,
            strikethrough: false,
            underline: false,
        }
    }
}

impl TextStyle {
    /// The font colour, or the default colour when none is set
    pub fn font_color_or_default(&self) -> &str {
        if self.font_color.is_empty() {
            DEFAULT_FONT_COLOR
        } else {
            &self.font_color
        }
    }
}

/// A text badge coloured by whether its count is positive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumOfBcpsSchema {
    #[serde(flatten)]
    pub base: BaseSchema,
    #[serde(flatten)]
    pub text: TextStyle,
    /// Variable holding the count; the schema's own value is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bcp_field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressBarSchema {
    #[serde(flatten)]
    pub base: BaseSchema,
    #[serde(default = "default_bar_color")]
    pub bar_color: String,
    #[serde(default = "default_bar_background_color")]
    pub background_color: String,
    #[serde(default = "default_true")]
    pub show_percentage: bool,
    #[serde(default = "default_bar_text_color")]
    pub text_color: String,
    /// Corner radius in px, applied on the editing surface only
    #[serde(default)]
    pub border_radius: f32,
}

/// Text whose background changes when a value drops below a threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextThresholdSchema {
    #[serde(flatten)]
    pub base: BaseSchema,
    #[serde(flatten)]
    pub text: TextStyle,
    /// Background when not below the threshold; empty for none
    #[serde(default)]
    pub background_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,
    #[serde(default = "default_threshold_background_color")]
    pub threshold_background_color: String,
    /// Variable compared against the threshold; the schema's own value is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_field: Option<String>,
}

/// Any schema a template can contain, tagged by its `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Schema {
    NumOfBcps(NumOfBcpsSchema),
    ProgressBar(ProgressBarSchema),
    TextThreshold(TextThresholdSchema),
}

impl Schema {
    pub fn base(&self) -> &BaseSchema {
        match self {
            Schema::NumOfBcps(s) => &s.base,
            Schema::ProgressBar(s) => &s.base,
            Schema::TextThreshold(s) => &s.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut BaseSchema {
        match self {
            Schema::NumOfBcps(s) => &mut s.base,
            Schema::ProgressBar(s) => &mut s.base,
            Schema::TextThreshold(s) => &mut s.base,
        }
    }
}

/// Parse the leading number of `text` the way a browser's `parseFloat` does: leading
/// whitespace is skipped and anything after the number is ignored. Returns [None] when the
/// text doesn't start with a number.
pub fn parse_float_lenient(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        return text[..end + "Infinity".len()].parse::<f64>().ok();
    }

    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let integer = digits(end);
    end += integer;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits(end + 1);
        if integer > 0 || fraction > 0 {
            end += 1 + fraction;
        }
    }
    if integer == 0 && fraction == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exponent = digits(exp_end);
        if exponent > 0 {
            end = exp_end + exponent;
        }
    }

    text[..end].parse::<f64>().ok()
}
