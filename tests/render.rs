use pdf_schemas::schemas::{NumOfBcps, PdfRenderContext, Plugin, ProgressBar, TextThreshold};
use pdf_schemas::{
    generate, pagesize, Colour, ColourType, Font, FontCache, FontSet, GenerateOptions, Page,
    PageContents, RectLayout, Schema, Template, Variables, BCP_NEGATIVE_BACKGROUND_COLOR,
    BCP_POSITIVE_BACKGROUND_COLOR,
};

fn fonts() -> FontSet {
    let font = Font::load(include_bytes!("../assets/DejaVuSansMono.ttf").to_vec())
        .expect("can load font");
    FontSet::single("mono", font)
}

/// Render one schema onto a fresh A4 page and return what was drawn
fn render(schema: &Schema, value: &str, variables: &Variables) -> Vec<PageContents> {
    let fonts = fonts();
    let mut cache = FontCache::new();
    let mut doc = cache.new_document();
    let page = doc.add_page(Page::new(pagesize::A4));
    let mut ctx = PdfRenderContext {
        document: &mut doc,
        page,
        fonts: &fonts,
        cache: &mut cache,
        colour_type: ColourType::Rgb,
        variables,
    };
    schema.render_pdf(&mut ctx, value).expect("can render schema");
    doc.pages[page].contents.clone()
}

/// The contents of the single group a schema draws
fn group_contents(contents: &[PageContents]) -> &[PageContents] {
    match contents {
        [PageContents::Group(group)] => &group.contents,
        other => panic!("expected one group, got {other:?}"),
    }
}

fn rectangles(contents: &[PageContents]) -> Vec<RectLayout> {
    group_contents(contents)
        .iter()
        .filter_map(|c| match c {
            PageContents::Rectangle(rect) => Some(rect.clone()),
            _ => None,
        })
        .collect()
}

fn hex(colour: &str) -> Colour {
    Colour::from_hex(colour).expect("valid colour")
}

#[test]
fn bcp_badges_are_coloured_by_their_count() {
    let schema = Schema::NumOfBcps(NumOfBcps.default_schema());
    let variables = Variables::new();

    let positive = rectangles(&render(&schema, "3", &variables));
    assert_eq!(positive[0].fill, hex(BCP_POSITIVE_BACKGROUND_COLOR));

    let negative = rectangles(&render(&schema, "0", &variables));
    assert_eq!(negative[0].fill, hex(BCP_NEGATIVE_BACKGROUND_COLOR));

    let blank = rectangles(&render(&schema, "", &variables));
    assert_eq!(blank[0].fill, hex(BCP_NEGATIVE_BACKGROUND_COLOR));
}

#[test]
fn bcp_badges_have_a_border_and_text() {
    let schema = Schema::NumOfBcps(NumOfBcps.default_schema());
    let contents = render(&schema, " 12 ", &Variables::new());
    let group = group_contents(&contents);

    let borders = group
        .iter()
        .filter(|c| matches!(c, PageContents::Line(_)))
        .count();
    assert_eq!(borders, 4);

    let text: Vec<&str> = group
        .iter()
        .filter_map(|c| match c {
            PageContents::Text(spans) => Some(spans.iter().map(|s| s.text.as_str())),
            _ => None,
        })
        .flatten()
        .collect();
    assert_eq!(text, ["12"]);
}

#[test]
fn progress_values_are_clamped() {
    let schema = Schema::ProgressBar(ProgressBar.default_schema());
    let variables = Variables::new();
    assert_eq!(render(&schema, "150", &variables), render(&schema, "100", &variables));
    assert_eq!(render(&schema, "-10", &variables), render(&schema, "0", &variables));
    assert_eq!(render(&schema, "oops", &variables), render(&schema, "0", &variables));
}

#[test]
fn progress_fill_is_proportional() {
    let schema = Schema::ProgressBar(ProgressBar.default_schema());
    let variables = Variables::new();

    let empty = rectangles(&render(&schema, "0", &variables));
    assert_eq!(empty.len(), 1);

    let quarter = rectangles(&render(&schema, "25", &variables));
    assert_eq!(quarter.len(), 2);
    let (background, bar) = (&quarter[0].rect, &quarter[1].rect);
    assert_eq!(bar.x1, background.x1);
    assert!((*bar.width() - *background.width() * 0.25).abs() < 1e-3);
    assert_eq!(bar.height(), background.height());
}

#[test]
fn threshold_text_flags_low_values() {
    let mut schema = TextThreshold.default_schema();
    schema.threshold = Some(5.0);
    schema.threshold_background_color = "#FF0000".into();
    let schema = Schema::TextThreshold(schema);
    let variables = Variables::new();

    let low = rectangles(&render(&schema, "4", &variables));
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].fill, hex("#FF0000"));

    assert!(rectangles(&render(&schema, "6", &variables)).is_empty());
    assert!(rectangles(&render(&schema, "5", &variables)).is_empty());
}

#[test]
fn threshold_text_compares_the_named_field() {
    let mut schema = TextThreshold.default_schema();
    schema.threshold = Some(5.0);
    schema.threshold_field = Some("stock".into());
    schema.background_color = "#00FF00".into();
    let schema = Schema::TextThreshold(schema);

    let variables = Variables::from([("stock".to_string(), "2".to_string())]);
    let low = rectangles(&render(&schema, "In stock", &variables));
    assert_eq!(low[0].fill, hex("#FFC7CE"));

    let variables = Variables::from([("stock".to_string(), "20".to_string())]);
    let fine = rectangles(&render(&schema, "In stock", &variables));
    assert_eq!(fine[0].fill, hex("#00FF00"));
}

#[test]
fn rotated_schemas_turn_about_their_centre() {
    let mut schema = ProgressBar.default_schema();
    schema.base.rotate = 90.0;
    let rect = schema.base.pdf_rect(pagesize::A4.1);
    let contents = render(&Schema::ProgressBar(schema), "50", &Variables::new());

    let PageContents::Group(group) = &contents[0] else {
        panic!("expected a group");
    };
    assert!(!group.transform.is_identity());
    let (cx, cy) = rect.centre();
    let (x, y) = group.transform.apply(rect.centre());
    assert!((*x - *cx).abs() < 1e-3 && (*y - *cy).abs() < 1e-3);
}

#[test]
fn fonts_are_embedded_once_per_document() {
    let fonts = fonts();
    let mut cache = FontCache::new();
    let mut doc = cache.new_document();
    let variables = Variables::new();
    let schemas = [
        Schema::NumOfBcps(NumOfBcps.default_schema()),
        Schema::TextThreshold(TextThreshold.default_schema()),
        Schema::ProgressBar(ProgressBar.default_schema()),
    ];

    for _ in 0..2 {
        let page = doc.add_page(Page::new(pagesize::A4));
        let mut ctx = PdfRenderContext {
            document: &mut doc,
            page,
            fonts: &fonts,
            cache: &mut cache,
            colour_type: ColourType::Rgb,
            variables: &variables,
        };
        for schema in &schemas {
            schema
                .render_pdf(&mut ctx, &schema.base().content)
                .expect("can render schema");
        }
    }

    assert_eq!(doc.fonts.len(), 1);
    assert!(cache.is_cached(doc.key));
}

#[test]
fn generates_a_pdf_for_every_record() {
    let template = Template::from_json(
        r#"{
            "basePdf": { "width": 100, "height": 100 },
            "schemas": [[
                {
                    "type": "textThreshold",
                    "name": "score",
                    "position": { "x": 10, "y": 10 },
                    "width": 80,
                    "height": 20,
                    "threshold": 50,
                    "opacity": 0.5
                }
            ]]
        }"#,
    )
    .expect("valid template");
    let inputs = [
        Variables::from([("score".to_string(), "10".to_string())]),
        Variables::from([("score".to_string(), "90".to_string())]),
    ];

    let fonts = fonts();
    let mut cache = FontCache::new();
    let pdf = generate(
        &template,
        &inputs,
        &fonts,
        &mut cache,
        GenerateOptions::default(),
    )
    .expect("can generate");

    assert!(pdf.starts_with(b"%PDF-"));
    let contains = |needle: &[u8]| pdf.windows(needle.len()).any(|w| w == needle);
    assert!(contains(b"/GS0 gs"));
    assert!(contains(b"/CIDFontType2"));
    // the document's cache entry is released once it has been written
    assert!(!cache.is_cached(pdf_schemas::DocumentKey(0)));
}

#[test]
fn cmyk_documents_draw_in_cmyk() {
    let fonts = fonts();
    let mut cache = FontCache::new();
    let template = Template {
        schemas: vec![vec![Schema::ProgressBar(ProgressBar.default_schema())]],
        ..Default::default()
    };
    let pdf = generate(
        &template,
        &[Variables::new()],
        &fonts,
        &mut cache,
        GenerateOptions {
            colour_type: ColourType::Cmyk,
        },
    )
    .expect("can generate");
    // the bar's #E0E0E0 background as naive device CMYK
    let background = format!("0 0 0 {} k\n", 1.0 - 224.0f32 / 255.0);
    assert!(pdf.windows(background.len()).any(|w| w == background.as_bytes()));
}
