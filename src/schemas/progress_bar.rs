use super::{numeric_value, Plugin, PdfRenderContext};
use crate::layout::width_of_text;
use crate::page::{PageContents, RectLayout, SpanFont, SpanLayout};
use crate::rect::Rect;
use crate::schema::{
    BaseSchema, Position, ProgressBarSchema, DEFAULT_BAR_BACKGROUND_COLOR, DEFAULT_BAR_COLOR,
    DEFAULT_BAR_TEXT_COLOR,
};
use crate::ui::{is_editable, Editor, Element, EventHandler, ProgressEditor, UiRender, UiRenderContext};
use crate::units::{Mm, Pt};
use crate::RenderError;

/// Label size as a share of the bar's height
const LABEL_SIZE_RATIO: f32 = 0.7;

/// A horizontal bar filled in proportion to a percentage
pub struct ProgressBar;

/// The percentage a value stands for: its leading number, or 0, clamped to `0..=100`
pub fn percentage(value: &str) -> f64 {
    numeric_value(value, "progress")
        .filter(|p| !p.is_nan())
        .unwrap_or(0.0)
        .clamp(0.0, 100.0)
}

/// The label drawn on a bar, e.g. `42%`
pub fn percentage_label(percentage: f64) -> String {
    format!("{}%", percentage.round())
}

fn or_default<'a>(colour: &'a str, default: &'a str) -> &'a str {
    if colour.is_empty() {
        default
    } else {
        colour
    }
}

impl Plugin for ProgressBar {
    type Schema = ProgressBarSchema;

    fn pdf_render(
        &self,
        ctx: &mut PdfRenderContext<'_>,
        schema: &ProgressBarSchema,
        value: &str,
    ) -> Result<(), RenderError> {
        let percentage = percentage(value);
        let rect = schema.base.pdf_rect(ctx.page_height()?);
        let width = rect.width();
        let height = rect.height();

        let mut contents = vec![PageContents::Rectangle(RectLayout {
            rect,
            fill: ctx.colour(or_default(
                &schema.background_color,
                DEFAULT_BAR_BACKGROUND_COLOR,
            ))?,
        })];

        if percentage > 0.0 {
            contents.push(PageContents::Rectangle(RectLayout {
                rect: Rect::from_origin(rect.x1, rect.y1, width * (percentage as f32 / 100.0), height),
                fill: ctx.colour(or_default(&schema.bar_color, DEFAULT_BAR_COLOR))?,
            }));
        }

        if schema.show_percentage {
            let (font_id, font) = ctx.fallback_font()?;
            let size = height * LABEL_SIZE_RATIO;
            let text = percentage_label(percentage);
            let text_width = width_of_text(&text, font, size, Pt(0.0));
            contents.push(PageContents::Text(vec![SpanLayout {
                text,
                font: SpanFont { id: font_id, size },
                colour: ctx.colour(or_default(&schema.text_color, DEFAULT_BAR_TEXT_COLOR))?,
                coords: (
                    rect.x1 + (width - text_width) / 2.0,
                    rect.y1 + height / 2.0 - size / 3.0,
                ),
                character_spacing: Pt(0.0),
            }]));
        }

        ctx.draw(&schema.base, contents)
    }

    fn ui_render(
        &self,
        ctx: &UiRenderContext<'_>,
        schema: &ProgressBarSchema,
        value: &str,
    ) -> Result<UiRender, RenderError> {
        let percentage = percentage(value);
        let id = schema.base.element_id();
        let bar_id = format!("progress-bar-{id}");
        let label_id = format!("progress-label-{id}");

        let mut container = Element::new("div")
            .style("width", "100%")
            .style("height", "100%")
            .style("position", "relative")
            .style(
                "background-color",
                or_default(&schema.background_color, DEFAULT_BAR_BACKGROUND_COLOR),
            )
            .style("border-radius", format!("{}px", schema.border_radius))
            .style("overflow", "hidden")
            .child(
                Element::new("div")
                    .with_id(&bar_id)
                    .style("width", format!("{percentage}%"))
                    .style("height", "100%")
                    .style("background-color", or_default(&schema.bar_color, DEFAULT_BAR_COLOR))
                    .style("position", "absolute")
                    .style("left", 0)
                    .style("top", 0)
                    .style("transition", "width 0.3s ease"),
            );

        if schema.show_percentage {
            // the label is sized from the box's millimetre dimensions, as plain pixels
            let font_size = (*schema.base.height * LABEL_SIZE_RATIO).min(*schema.base.width / 5.0);
            container = container.child(
                Element::new("div")
                    .with_id(&label_id)
                    .text(percentage_label(percentage))
                    .style("position", "absolute")
                    .style("left", 0)
                    .style("top", 0)
                    .style("width", "100%")
                    .style("height", "100%")
                    .style("display", "flex")
                    .style("align-items", "center")
                    .style("justify-content", "center")
                    .style("color", or_default(&schema.text_color, DEFAULT_BAR_TEXT_COLOR))
                    .style("font-weight", "bold")
                    .style("font-size", format!("{font_size}px")),
            );
        }

        if !is_editable(ctx.mode, schema.base.read_only) {
            return Ok(UiRender {
                root: container,
                editor: None,
            });
        }

        container = container.child(
            Element::new("input")
                .attr("type", "range")
                .attr("min", 0)
                .attr("max", 100)
                .attr("value", percentage)
                .style("position", "absolute")
                .style("width", "100%")
                .style("height", "100%")
                .style("opacity", 0)
                .style("cursor", "pointer")
                .on("input", EventHandler::UpdateProgress),
        );

        Ok(UiRender {
            root: container,
            editor: Some(Editor::Progress(ProgressEditor::new(
                bar_id,
                label_id,
                schema.show_percentage,
            ))),
        })
    }

    fn default_schema(&self) -> ProgressBarSchema {
        ProgressBarSchema {
            base: BaseSchema {
                id: None,
                name: String::new(),
                content: "50".to_string(),
                position: Position::default(),
                width: Mm(150.0),
                height: Mm(20.0),
                rotate: 0.0,
                opacity: 1.0,
                read_only: false,
            },
            bar_color: DEFAULT_BAR_COLOR.to_string(),
            background_color: DEFAULT_BAR_BACKGROUND_COLOR.to_string(),
            show_percentage: true,
            text_color: DEFAULT_BAR_TEXT_COLOR.to_string(),
            border_radius: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_clamped_percentages() {
        assert_eq!(percentage("42"), 42.0);
        assert_eq!(percentage("42.5%"), 42.5);
        assert_eq!(percentage("150"), 100.0);
        assert_eq!(percentage("-10"), 0.0);
        assert_eq!(percentage("lots"), 0.0);
        assert_eq!(percentage(""), 0.0);
        assert_eq!(percentage("Infinity"), 100.0);
    }

    #[test]
    fn labels_round_to_whole_percentages() {
        assert_eq!(percentage_label(42.4), "42%");
        assert_eq!(percentage_label(42.5), "43%");
        assert_eq!(percentage_label(100.0), "100%");
        assert_eq!(percentage_label(0.0), "0%");
    }

    #[test]
    fn default_is_half_full() {
        let schema = ProgressBar.default_schema();
        assert_eq!(schema.base.content, "50");
        assert_eq!(schema.base.width, Mm(150.0));
        assert_eq!(schema.base.height, Mm(20.0));
        assert!(schema.show_percentage);
    }
}
