//! Rendering a whole template, once per input record, into a PDF.

use crate::colour::ColourType;
use crate::fonts::{FontCache, FontSet};
use crate::page::Page;
use crate::pagesize;
use crate::schema::{Schema, Variables};
use crate::schemas::PdfRenderContext;
use crate::units::Mm;
use crate::RenderError;
use serde::{Deserialize, Serialize};

/// The blank page every template page is drawn onto, in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub width: Mm,
    pub height: Mm,
}

impl Default for PageSpec {
    fn default() -> Self {
        PageSpec {
            width: Mm(210.0),
            height: Mm(297.0),
        }
    }
}

/// Pages of schemas drawn onto a blank base page
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(default, alias = "basePdf")]
    pub base_page: PageSpec,
    /// The schemas of each page, in drawing order
    pub schemas: Vec<Vec<Schema>>,
}

impl Template {
    pub fn from_json(json: &str) -> Result<Template, RenderError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    pub colour_type: ColourType,
}

/// Render every page of `template` once for each input record, in order, and write the result
/// as a PDF. A field's value is the record's entry under the field's name, or the schema's own
/// content when the record doesn't have one.
pub fn generate(
    template: &Template,
    inputs: &[Variables],
    fonts: &FontSet,
    cache: &mut FontCache,
    options: GenerateOptions,
) -> Result<Vec<u8>, RenderError> {
    let mut document = cache.new_document();
    let key = document.key;
    let size = pagesize::from_mm(template.base_page.width, template.base_page.height);

    for (record, variables) in inputs.iter().enumerate() {
        for (page_index, schemas) in template.schemas.iter().enumerate() {
            log::debug!(
                "rendering page {page_index} of record {record} ({} schemas)",
                schemas.len()
            );
            let page = document.add_page(Page::new(size));
            let mut ctx = PdfRenderContext {
                document: &mut document,
                page,
                fonts,
                cache: &mut *cache,
                colour_type: options.colour_type,
                variables,
            };
            for schema in schemas {
                let value = schema.base().value_in(variables);
                schema.render_pdf(&mut ctx, value)?;
            }
        }
    }

    let bytes = document.to_bytes();
    cache.forget(key);
    bytes
}
