//! The text path shared by every text-bearing schema.

use crate::colour::Colour;
use crate::font::Font;
use crate::layout::{
    browser_vertical_adjustments, calculate_dynamic_font_size, font_height, horizontal_offset,
    justify_spacing, replace_unsupported_chars, split_text_to_size, vertical_offset, Alignment,
    FontMetrics, Measure, TextBox,
};
use crate::page::{LineLayout, PageContents, SpanFont, SpanLayout};
use crate::rect::Rect;
use crate::schema::{BaseSchema, TextStyle, PLACEHOLDER_FONT_COLOR};
use crate::ui::{is_editable, Editor, Element, EventHandler, Mode, TextEditor, UiRender, UiRenderContext};
use crate::units::Pt;
use id_arena::Id;
use unicode_segmentation::UnicodeSegmentation;

pub(crate) fn text_box(style: &TextStyle, width: Pt, height: Pt) -> TextBox {
    TextBox {
        width,
        height,
        line_height: style.line_height,
    }
}

/// The static font size, or the dynamic size that fits `text` into the box
pub(crate) fn resolve_font_size<M: FontMetrics + ?Sized>(
    style: &TextStyle,
    metrics: &M,
    text: &str,
    text_box: &TextBox,
) -> Pt {
    match &style.dynamic_font_size {
        Some(range) => calculate_dynamic_font_size(
            text,
            metrics,
            range,
            Pt(style.character_spacing),
            text_box,
            Pt(style.font_size),
        ),
        None => Pt(style.font_size),
    }
}

/// Lay out `text` inside `rect` and produce the spans and decoration lines that draw it
pub(crate) fn layout_text(
    text: &str,
    style: &TextStyle,
    rect: Rect,
    font_id: Id<Font>,
    font: &Font,
    colour: Colour,
) -> Vec<PageContents> {
    let width = rect.width();
    let tb = text_box(style, width, rect.height());
    let size = resolve_font_size(style, font, text, &tb);
    let character_spacing = Pt(style.character_spacing);
    let measure = Measure::new(font, size, character_spacing);

    let lines = split_text_to_size(text, &measure, width);
    let y_offset = vertical_offset(
        font,
        size,
        style.line_height,
        lines.len(),
        rect.height(),
        style.vertical_alignment,
    );
    let text_height = font_height(font, size);
    let thickness = size / 12.0;

    let mut contents = Vec::new();
    let mut spans = Vec::with_capacity(lines.len());

    for (row, line) in lines.iter().enumerate() {
        let x = rect.x1 + horizontal_offset(style.alignment, width, line.width);
        let y = rect.y2 - y_offset - size * (style.line_height * row as f32);

        let spacing = if style.alignment == Alignment::Justify {
            justify_spacing(line, width, character_spacing)
        } else {
            character_spacing
        };
        let drawn_width = if spacing == character_spacing {
            line.width
        } else {
            width
        };

        if drawn_width > Pt(0.0) {
            let end = x + drawn_width + Pt(1.0);
            let mut decorate = |y: Pt| {
                contents.push(PageContents::Line(LineLayout {
                    start: (x, y),
                    end: (end, y),
                    thickness,
                    colour,
                }))
            };
            if style.strikethrough {
                decorate(y + text_height / 3.0);
            }
            if style.underline {
                decorate(y - text_height / 12.0);
            }
        }

        spans.push(SpanLayout {
            text: line.drawable_text().to_string(),
            font: SpanFont { id: font_id, size },
            colour,
            coords: (x, y),
            character_spacing: spacing,
        });
    }

    contents.push(PageContents::Text(spans));
    contents
}

/// How the box around a text block is painted on the editing surface
pub(crate) struct TextFrame<'a> {
    pub background: Option<&'a str>,
    pub border: Option<&'a str>,
}

/// Render a text block onto the editing surface: a flex column container holding the text
/// block, which is plain-text editable when the mode allows it
pub(crate) fn render_text_ui(
    ctx: &UiRenderContext<'_>,
    base: &BaseSchema,
    style: &TextStyle,
    display: &str,
    frame: TextFrame<'_>,
) -> UiRender {
    let (_, font) = ctx.fonts.resolve(style.font_name.as_deref());
    let tb = text_box(style, base.width.into(), base.height.into());

    let dynamic_size = match style.dynamic_font_size {
        Some(_) if !display.is_empty() => Some(resolve_font_size(style, font, display, &tb)),
        _ => None,
    };
    let size = dynamic_size.unwrap_or(Pt(style.font_size));
    let adjustments =
        browser_vertical_adjustments(font, size, style.line_height, style.vertical_alignment);
    let editable = is_editable(ctx.mode, base.read_only);

    let mut container = Element::new("div")
        .style("padding", 0)
        .style("resize", "none")
        .style("background-color", frame.background.unwrap_or("transparent"));
    if let Some(border) = frame.border {
        container = container.style("border", border);
    }
    let container = container
        .style("display", "flex")
        .style("flex-direction", "column")
        .style("justify-content", style.vertical_alignment.as_flex())
        .style("width", "100%")
        .style("height", "100%")
        .style("cursor", if editable { "text" } else { "default" });

    let mut decorations = Vec::new();
    if style.strikethrough {
        decorations.push("line-through");
    }
    if style.underline {
        decorations.push("underline");
    }

    let colour = if display.is_empty() && ctx.mode == Mode::Designer {
        PLACEHOLDER_FONT_COLOR
    } else {
        style.font_color_or_default()
    };
    let font_family = match &style.font_name {
        Some(name) => format!("'{name}'"),
        None => "inherit".to_string(),
    };

    let block_id = format!("text-{}", base.element_id());
    let block = Element::new("div")
        .with_id(&block_id)
        .style("font-family", font_family)
        .style("color", colour)
        .style("font-size", format!("{size}pt"))
        .style("letter-spacing", format!("{}pt", style.character_spacing))
        .style("line-height", format!("{}em", style.line_height))
        .style("text-align", style.alignment.as_css())
        .style("white-space", "pre-wrap")
        .style("word-break", "break-word")
        .style("resize", "none")
        .style("border", "none")
        .style("outline", "none")
        .style("margin-bottom", format!("{}px", adjustments.bottom))
        .style("padding-top", format!("{}px", adjustments.top))
        .style("background-color", "transparent")
        .style("text-decoration", decorations.join(" "));

    let processed = replace_unsupported_chars(display, font);

    if !editable {
        let graphemes: Vec<&str> = processed.graphemes(true).collect();
        let last = graphemes.len().saturating_sub(1);
        let block = graphemes
            .iter()
            .enumerate()
            .fold(block, |block, (i, grapheme)| {
                block.child(
                    Element::new("span")
                        .style("letter-spacing", if i == last { "0" } else { "inherit" })
                        .text(*grapheme),
                )
            });
        return UiRender {
            root: container.child(block),
            editor: None,
        };
    }

    let mut block = ctx
        .capabilities
        .make_plain_text_editable(block)
        .attr("tabindex", ctx.tab_index.unwrap_or(0))
        .text(if ctx.mode == Mode::Designer {
            display.to_string()
        } else {
            processed
        })
        .on("blur", EventHandler::CommitContent);
    if style.dynamic_font_size.is_some() {
        block = block.on("keyup", EventHandler::RecomputeFontSize);
    }
    if ctx.mode == Mode::Designer {
        block = block.on("mount", EventHandler::FocusAtEnd);
    }

    let editor = TextEditor::new(block_id, style, tb).with_font_size(dynamic_size);
    UiRender {
        root: container.child(block),
        editor: Some(Editor::Text(editor)),
    }
}
