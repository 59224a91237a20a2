//! Renderers for each schema kind, onto PDF pages and onto the editing surface.

mod num_of_bcps;
mod progress_bar;
mod text;
mod text_threshold;

pub use num_of_bcps::*;
pub use progress_bar::*;
pub use text_threshold::*;

use crate::colour::{Colour, ColourType};
use crate::document::Document;
use crate::font::Font;
use crate::fonts::{FontCache, FontSet};
use crate::page::{Page, PageContents};
use crate::schema::{parse_float_lenient, BaseSchema, Schema, Variables};
use crate::transform::Transform;
use crate::ui::{UiRender, UiRenderContext};
use crate::units::Pt;
use crate::RenderError;
use id_arena::Id;

/// A schema kind: how it draws onto a PDF page, how it renders onto the editing surface, and
/// the schema the designer starts a new instance from
pub trait Plugin {
    type Schema;

    fn pdf_render(
        &self,
        ctx: &mut PdfRenderContext<'_>,
        schema: &Self::Schema,
        value: &str,
    ) -> Result<(), RenderError>;

    fn ui_render(
        &self,
        ctx: &UiRenderContext<'_>,
        schema: &Self::Schema,
        value: &str,
    ) -> Result<UiRender, RenderError>;

    fn default_schema(&self) -> Self::Schema;
}

/// Parse a field value as a number, warning when a non-empty value isn't one
pub(crate) fn numeric_value(value: &str, field: &str) -> Option<f64> {
    let parsed = parse_float_lenient(value);
    if parsed.is_none() && !value.trim().is_empty() {
        log::warn!("value `{value}` of `{field}` is not a number");
    }
    parsed
}

/// Everything a schema needs to draw onto one page of a document
pub struct PdfRenderContext<'a> {
    pub document: &'a mut Document,
    pub page: Id<Page>,
    pub fonts: &'a FontSet,
    pub cache: &'a mut FontCache,
    pub colour_type: ColourType,
    /// The input record being rendered
    pub variables: &'a Variables,
}

impl<'a> PdfRenderContext<'a> {
    pub fn page_height(&self) -> Result<Pt, RenderError> {
        self.document
            .pages
            .get(self.page)
            .map(Page::height)
            .ok_or(RenderError::PageMissing)
    }

    /// Parse a hex colour into the document's colour space
    pub fn colour(&self, hex: &str) -> Result<Colour, RenderError> {
        Colour::from_hex_for(hex, self.colour_type)
    }

    /// The font named `name` (or the fallback font), with its ID in the document
    pub fn font(&mut self, name: Option<&str>) -> Result<(Id<Font>, &'a Font), RenderError> {
        let fonts: &'a FontSet = self.fonts;
        let id = self.cache.font_id(self.document, fonts, name)?;
        Ok((id, fonts.resolve(name).1))
    }

    /// The fallback font, with its ID in the document
    pub fn fallback_font(&mut self) -> Result<(Id<Font>, &'a Font), RenderError> {
        let fonts: &'a FontSet = self.fonts;
        let name = fonts.fallback_name().to_string();
        let id = self.cache.font_id(self.document, fonts, Some(&name))?;
        Ok((id, fonts.fallback()))
    }

    /// Draw a schema's contents, given in unrotated page coordinates, rotated about the centre
    /// of its box and at its opacity
    pub fn draw(&mut self, base: &BaseSchema, contents: Vec<PageContents>) -> Result<(), RenderError> {
        let page_height = self.page_height()?;
        let rect = base.pdf_rect(page_height);
        // the editing surface rotates clockwise, PDF rotations are counter-clockwise
        let transform = Transform::rotate_about(-base.rotate, rect.centre());
        let page = self
            .document
            .pages
            .get_mut(self.page)
            .ok_or(RenderError::PageMissing)?;
        page.add_group(transform, base.opacity, contents);
        Ok(())
    }
}

impl Schema {
    /// Draw this schema with `value` onto the context's page
    pub fn render_pdf(&self, ctx: &mut PdfRenderContext<'_>, value: &str) -> Result<(), RenderError> {
        match self {
            Schema::NumOfBcps(schema) => NumOfBcps.pdf_render(ctx, schema, value),
            Schema::ProgressBar(schema) => ProgressBar.pdf_render(ctx, schema, value),
            Schema::TextThreshold(schema) => TextThreshold.pdf_render(ctx, schema, value),
        }
    }

    /// Render this schema with `value` onto the editing surface
    pub fn render_ui(&self, ctx: &UiRenderContext<'_>, value: &str) -> Result<UiRender, RenderError> {
        match self {
            Schema::NumOfBcps(schema) => NumOfBcps.ui_render(ctx, schema, value),
            Schema::ProgressBar(schema) => ProgressBar.ui_render(ctx, schema, value),
            Schema::TextThreshold(schema) => TextThreshold.ui_render(ctx, schema, value),
        }
    }

    /// The schema the designer creates for a new field of the kind named `kind`
    pub fn default_for(kind: &str) -> Option<Schema> {
        match kind {
            "numOfBcps" => Some(Schema::NumOfBcps(NumOfBcps.default_schema())),
            "progressBar" => Some(Schema::ProgressBar(ProgressBar.default_schema())),
            "textThreshold" => Some(Schema::TextThreshold(TextThreshold.default_schema())),
            _ => None,
        }
    }
}
