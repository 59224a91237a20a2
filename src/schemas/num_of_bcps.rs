use super::text::{layout_text, render_text_ui, TextFrame};
use super::{numeric_value, Plugin, PdfRenderContext};
use crate::colour::colours;
use crate::layout::{Alignment, VerticalAlignment};
use crate::page::{LineLayout, PageContents, RectLayout};
use crate::schema::{
    BaseSchema, NumOfBcpsSchema, Position, TextStyle, Variables, BCP_NEGATIVE_BACKGROUND_COLOR,
    BCP_POSITIVE_BACKGROUND_COLOR,
};
use crate::ui::{UiRender, UiRenderContext};
use crate::units::{Mm, Pt};
use crate::RenderError;

const BORDER_THICKNESS: Pt = Pt(2.0);
const BORDER_CSS: &str = "2px solid #000000";

/// A badge showing a count, green when the count is positive and red otherwise
pub struct NumOfBcps;

/// The value a badge shows and compares: the `bcp_field` variable when the record has it,
/// otherwise the field's own value
pub fn bcp_value<'a>(value: &'a str, variables: &'a Variables, bcp_field: Option<&str>) -> &'a str {
    bcp_field
        .and_then(|field| variables.get(field))
        .map(String::as_str)
        .unwrap_or(value)
}

/// Text shown on the badge: the trimmed value, or `0` when there is none
pub fn format_bcp_text(value: &str) -> String {
    match value.trim() {
        "" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// Whether the value counts as having any BCPs
pub fn has_bcps(value: &str) -> bool {
    numeric_value(value, "bcp count").is_some_and(|count| count > 0.0)
}

fn background(value: &str) -> &'static str {
    if has_bcps(value) {
        BCP_POSITIVE_BACKGROUND_COLOR
    } else {
        BCP_NEGATIVE_BACKGROUND_COLOR
    }
}

impl Plugin for NumOfBcps {
    type Schema = NumOfBcpsSchema;

    fn pdf_render(
        &self,
        ctx: &mut PdfRenderContext<'_>,
        schema: &NumOfBcpsSchema,
        value: &str,
    ) -> Result<(), RenderError> {
        let value = bcp_value(value, ctx.variables, schema.bcp_field.as_deref());
        let display = format_bcp_text(value);

        let rect = schema.base.pdf_rect(ctx.page_height()?);
        let (font_id, font) = ctx.font(schema.text.font_name.as_deref())?;
        let border = ctx.colour("#000000").unwrap_or(colours::BLACK);

        let mut contents = vec![PageContents::Rectangle(RectLayout {
            rect,
            fill: ctx.colour(background(value))?,
        })];

        let corners = [
            (rect.x1, rect.y1),
            (rect.x2, rect.y1),
            (rect.x2, rect.y2),
            (rect.x1, rect.y2),
        ];
        for (i, start) in corners.iter().enumerate() {
            contents.push(PageContents::Line(LineLayout {
                start: *start,
                end: corners[(i + 1) % corners.len()],
                thickness: BORDER_THICKNESS,
                colour: border,
            }));
        }

        contents.extend(layout_text(
            &display,
            &schema.text,
            rect,
            font_id,
            font,
            ctx.colour(schema.text.font_color_or_default())?,
        ));

        ctx.draw(&schema.base, contents)
    }

    fn ui_render(
        &self,
        ctx: &UiRenderContext<'_>,
        schema: &NumOfBcpsSchema,
        value: &str,
    ) -> Result<UiRender, RenderError> {
        let value = bcp_value(value, ctx.variables, schema.bcp_field.as_deref());
        let display = format_bcp_text(value);

        Ok(render_text_ui(
            ctx,
            &schema.base,
            &schema.text,
            &display,
            TextFrame {
                background: Some(background(value)),
                border: Some(BORDER_CSS),
            },
        ))
    }

    fn default_schema(&self) -> NumOfBcpsSchema {
        NumOfBcpsSchema {
            base: BaseSchema {
                id: None,
                name: String::new(),
                content: "0".to_string(),
                position: Position::default(),
                width: Mm(45.0),
                height: Mm(10.0),
                rotate: 0.0,
                opacity: 1.0,
                read_only: false,
            },
            text: TextStyle {
                alignment: Alignment::Center,
                vertical_alignment: VerticalAlignment::Middle,
                ..Default::default()
            },
            bcp_field: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_the_named_variable() {
        let mut variables = Variables::new();
        variables.insert("count".into(), " 3 ".into());
        assert_eq!(bcp_value("0", &variables, Some("count")), " 3 ");
        assert_eq!(bcp_value("0", &variables, Some("other")), "0");
        assert_eq!(bcp_value("5", &variables, None), "5");
    }

    #[test]
    fn formats_blank_values_as_zero() {
        assert_eq!(format_bcp_text(" 3 "), "3");
        assert_eq!(format_bcp_text("   "), "0");
        assert_eq!(format_bcp_text(""), "0");
        assert_eq!(format_bcp_text("n/a"), "n/a");
    }

    #[test]
    fn positive_counts_have_bcps() {
        assert!(has_bcps("1"));
        assert!(has_bcps(" 0.5"));
        assert!(!has_bcps("0"));
        assert!(!has_bcps("-2"));
        assert!(!has_bcps(""));
        assert!(!has_bcps("none"));
        assert_eq!(background("2"), BCP_POSITIVE_BACKGROUND_COLOR);
        assert_eq!(background("0"), BCP_NEGATIVE_BACKGROUND_COLOR);
    }
}
