use super::text::{layout_text, render_text_ui, TextFrame};
use super::{numeric_value, Plugin, PdfRenderContext};
use crate::page::{PageContents, RectLayout};
use crate::schema::{
    BaseSchema, Position, TextStyle, TextThresholdSchema, Variables,
    DEFAULT_THRESHOLD_BACKGROUND_COLOR,
};
use crate::ui::{UiRender, UiRenderContext};
use crate::units::Mm;
use crate::RenderError;

/// Text whose background flags values that fall below a threshold
pub struct TextThreshold;

/// Whether the compared value (the `threshold_field` variable when the record has it,
/// otherwise the field's own value) is a number strictly below the threshold
pub fn is_below_threshold(schema: &TextThresholdSchema, value: &str, variables: &Variables) -> bool {
    let Some(threshold) = schema.threshold else {
        return false;
    };
    let compared = schema
        .threshold_field
        .as_deref()
        .and_then(|field| variables.get(field))
        .map(String::as_str)
        .unwrap_or(value);
    numeric_value(compared, &schema.base.name).is_some_and(|n| n < threshold as f64)
}

/// The background to paint behind the text, if any
pub fn threshold_background<'a>(
    schema: &'a TextThresholdSchema,
    value: &str,
    variables: &Variables,
) -> Option<&'a str> {
    if is_below_threshold(schema, value, variables) {
        Some(&schema.threshold_background_color)
    } else if schema.background_color.is_empty() {
        None
    } else {
        Some(&schema.background_color)
    }
}

impl Plugin for TextThreshold {
    type Schema = TextThresholdSchema;

    fn pdf_render(
        &self,
        ctx: &mut PdfRenderContext<'_>,
        schema: &TextThresholdSchema,
        value: &str,
    ) -> Result<(), RenderError> {
        let rect = schema.base.pdf_rect(ctx.page_height()?);
        let (font_id, font) = ctx.font(schema.text.font_name.as_deref())?;

        let mut contents = Vec::new();
        if let Some(background) = threshold_background(schema, value, ctx.variables) {
            contents.push(PageContents::Rectangle(RectLayout {
                rect,
                fill: ctx.colour(background)?,
            }));
        }
        contents.extend(layout_text(
            value,
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
        schema: &TextThresholdSchema,
        value: &str,
    ) -> Result<UiRender, RenderError> {
        Ok(render_text_ui(
            ctx,
            &schema.base,
            &schema.text,
            value,
            TextFrame {
                background: threshold_background(schema, value, ctx.variables),
                border: None,
            },
        ))
    }

    fn default_schema(&self) -> TextThresholdSchema {
        TextThresholdSchema {
            base: BaseSchema {
                id: None,
                name: String::new(),
                content: "Type Something...".to_string(),
                position: Position::default(),
                width: Mm(45.0),
                height: Mm(10.0),
                rotate: 0.0,
                opacity: 1.0,
                read_only: false,
            },
            text: TextStyle::default(),
            background_color: String::new(),
            threshold: Some(0.0),
            threshold_background_color: DEFAULT_THRESHOLD_BACKGROUND_COLOR.to_string(),
            threshold_field: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(threshold: Option<f32>, field: Option<&str>, background: &str) -> TextThresholdSchema {
        TextThresholdSchema {
            threshold,
            threshold_field: field.map(String::from),
            threshold_background_color: "#ff0000".into(),
            background_color: background.into(),
            ..TextThreshold.default_schema()
        }
    }

    #[test]
    fn below_threshold_uses_the_threshold_colour() {
        let variables = Variables::new();
        let s = schema(Some(10.0), None, "#00ff00");
        assert_eq!(threshold_background(&s, "9.5", &variables), Some("#ff0000"));
        assert_eq!(threshold_background(&s, "10", &variables), Some("#00ff00"));
        assert_eq!(threshold_background(&s, "abc", &variables), Some("#00ff00"));
    }

    #[test]
    fn no_background_when_none_is_configured() {
        let variables = Variables::new();
        let s = schema(Some(10.0), None, "");
        assert_eq!(threshold_background(&s, "50", &variables), None);
        let s = schema(None, None, "");
        assert_eq!(threshold_background(&s, "-50", &variables), None);
    }

    #[test]
    fn compares_the_named_variable() {
        let mut variables = Variables::new();
        variables.insert("total".into(), "3".into());
        let s = schema(Some(5.0), Some("total"), "");
        assert!(is_below_threshold(&s, "100", &variables));

        variables.insert("total".into(), "7".into());
        assert!(!is_below_threshold(&s, "1", &variables));

        // a missing variable falls back to the field's own value
        let s = schema(Some(5.0), Some("missing"), "");
        assert!(is_below_threshold(&s, "1", &variables));
    }
}
